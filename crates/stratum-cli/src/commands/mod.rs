//! CLI command definitions and dispatch.

pub mod plan;
pub mod schemas;
pub mod validate;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stratum_common::config::CompileConfig;
use stratum_common::types::CloudProvider;

/// Stratum: cloud architecture diagram compiler.
#[derive(Parser, Debug)]
#[command(name = stratum_common::constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// JSON compile configuration file.
    #[arg(long, global = true, env = "STRATUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Target cloud provider (aws, gcp, azure). Overrides the config file.
    #[arg(long, global = true, env = "STRATUM_PROVIDER")]
    pub provider: Option<CloudProvider>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a diagram and report errors and warnings.
    Validate(validate::ValidateArgs),
    /// Compile a diagram and display the provisioning order.
    Plan(plan::PlanArgs),
    /// List the resource schemas registered for a provider.
    Schemas(schemas::SchemasArgs),
}

impl Cli {
    /// Builds the effective configuration: file (or defaults), then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn compile_config(&self) -> anyhow::Result<CompileConfig> {
        let mut config = match &self.config {
            Some(path) => CompileConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => CompileConfig::default(),
        };
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        tracing::debug!(?config, "effective compile configuration");
        Ok(config)
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.compile_config()?;
    match cli.command {
        Command::Validate(args) => validate::execute(args, config),
        Command::Plan(args) => plan::execute(args, config),
        Command::Schemas(args) => schemas::execute(&args, &config),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn provider_flag_is_global_and_case_insensitive() {
        let cli = Cli::try_parse_from(["strat", "validate", "diagram.json", "--provider", "GCP"]).expect("parse");
        assert_eq!(cli.provider, Some(CloudProvider::Gcp));
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Cli::try_parse_from(["strat", "schemas", "--provider", "oracle"]).is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from(["strat", "plan", "--provider", "azure"]).expect("parse");
        let config = cli.compile_config().expect("config");
        assert_eq!(config.provider, CloudProvider::Azure);
        assert!(config.schema_validation);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["strat", "schemas", "--config", "/nonexistent/stratum.json"]).expect("parse");
        assert!(cli.compile_config().is_err());
    }
}

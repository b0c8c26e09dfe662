//! `strat validate`: Check a diagram and report findings.

use std::path::PathBuf;

use clap::Args;
use stratum_common::config::CompileConfig;
use stratum_sdk::{Compiler, load_graph};

use crate::output;

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the normalized diagram JSON file.
    #[arg(default_value = stratum_common::constants::DEFAULT_DIAGRAM_FILE)]
    pub file: PathBuf,

    /// Print the validation result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Fail when there are warnings.
    #[arg(long)]
    pub deny_warnings: bool,
}

/// Executes the `validate` command.
///
/// # Errors
///
/// Returns an error if the diagram cannot be loaded or has blocking
/// findings.
pub fn execute(args: ValidateArgs, mut config: CompileConfig) -> anyhow::Result<()> {
    config.deny_warnings |= args.deny_warnings;
    let graph = load_graph(&args.file)?;
    let compiler = Compiler::new(config);
    let result = compiler.validate(&graph);

    if args.json {
        output::print_json(&result)?;
    } else {
        println!("{}", output::heading(&format!("Validation of {}", args.file.display())));
        println!();
        output::print_validation(&result);
    }

    let blocked = !result.is_valid() || (compiler.config().deny_warnings && !result.warnings.is_empty());
    if blocked {
        anyhow::bail!(
            "{} failed validation: {}",
            args.file.display(),
            output::summary_line(&result)
        );
    }
    Ok(())
}

//! `strat schemas`: Browse registered resource schemas.

use clap::Args;
use stratum_common::config::CompileConfig;
use stratum_diagram::schema;

use crate::output;

/// Arguments for the `schemas` command.
#[derive(Args, Debug)]
pub struct SchemasArgs {
    /// Show a single resource type.
    #[arg(long = "type")]
    pub resource_type: Option<String>,

    /// Print the schemas as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `schemas` command.
///
/// # Errors
///
/// Returns an error if the requested type is not registered.
pub fn execute(args: &SchemasArgs, config: &CompileConfig) -> anyhow::Result<()> {
    let provider = config.provider.as_str();
    let registry = schema::global();

    let schemas = match &args.resource_type {
        Some(resource_type) => {
            let found = registry
                .get(resource_type, provider)
                .ok_or_else(|| anyhow::anyhow!("no schema for \"{resource_type}\" on {provider}"))?;
            vec![found]
        }
        None => registry.list_all(provider),
    };

    if args.json {
        return output::print_json(&schemas);
    }

    if schemas.is_empty() {
        println!("No schemas registered for {provider}.");
        return Ok(());
    }

    println!("{:<20} {:<8} {:<30}", "TYPE", "FIELDS", "PARENTS");
    for s in &schemas {
        let parents = if s.valid_parent_types.is_empty() {
            "*".to_string()
        } else {
            s.valid_parent_types.join(", ")
        };
        println!("{:<20} {:<8} {:<30}", s.resource_type, s.fields.len(), parents);
    }

    if args.resource_type.is_some() {
        for s in &schemas {
            println!();
            if !s.description.is_empty() {
                println!("  {}", s.description);
            }
            for field in &s.fields {
                println!("    {}", output::format_field(field));
            }
        }
    }

    Ok(())
}

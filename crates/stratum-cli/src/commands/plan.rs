//! `strat plan`: Display the provisioning order for a diagram.

use std::path::PathBuf;

use clap::Args;
use stratum_common::config::CompileConfig;
use stratum_sdk::{CompileError, Compiler};

use crate::output;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the normalized diagram JSON file.
    #[arg(default_value = stratum_common::constants::DEFAULT_DIAGRAM_FILE)]
    pub file: PathBuf,

    /// Print the full compilation report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `plan` command.
///
/// Validates the diagram, maps it to an architecture, resolves the
/// provisioning order, and displays it level by level.
///
/// # Errors
///
/// Returns an error if loading, validation, mapping, or ordering fails.
pub fn execute(args: PlanArgs, config: CompileConfig) -> anyhow::Result<()> {
    let compilation = match Compiler::new(config).compile_file(&args.file) {
        Ok(compilation) => compilation,
        Err(CompileError::Invalid(result)) => {
            output::print_validation(&result);
            anyhow::bail!("{} failed validation", args.file.display());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        return output::print_json(&compilation);
    }

    let arch = &compilation.architecture;
    println!("{}", output::heading(&format!("Provisioning Plan for: {}", args.file.display())));
    println!();
    let region = if arch.region.is_empty() { "-" } else { arch.region.as_str() };
    println!("  provider: {}    region: {region}", arch.provider);
    println!();

    for (i, level) in compilation.order.levels.iter().enumerate() {
        println!("  Level {}", i + 1);
        for id in level {
            let Some(resource) = arch.resource(id) else {
                continue;
            };
            println!("    + {id} ({})", resource.resource_type.kind);
            if resource.name != resource.id {
                println!("        name: {}", resource.name);
            }
            if let Some(parent) = &resource.parent_id {
                println!("        in: {parent}");
            }
            if !resource.depends_on.is_empty() {
                println!("        after: {}", resource.depends_on.join(", "));
            }
        }
    }

    println!();
    println!(
        "  {} resource(s) in {} level(s).",
        compilation.order.resources.len(),
        compilation.order.levels.len()
    );
    if !compilation.validation.warnings.is_empty() {
        println!();
        output::print_validation(&compilation.validation);
    }

    Ok(())
}

//! The validate → map → sort pipeline.
//!
//! Wraps `stratum-diagram`'s validator and `stratum-architecture`'s mapper
//! and sorter into a single call for SDK consumers.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use stratum_architecture::{Architecture, ArchitectureMapper, TopologicalSortResult};
use stratum_common::config::CompileConfig;
use stratum_common::error::StratumError;
use stratum_diagram::schema::{self, SchemaRegistry};
use stratum_diagram::{NormalizedGraph, ValidationOptions, ValidationResult};
use thiserror::Error;

/// Why a compilation did not produce an architecture.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The diagram has blocking findings.
    #[error(
        "diagram is invalid: {} error(s), {} warning(s)",
        .0.errors.len(),
        .0.warnings.len()
    )]
    Invalid(ValidationResult),

    /// Loading, mapping, or ordering failed.
    #[error(transparent)]
    Stratum(#[from] StratumError),
}

/// Everything produced by a successful compilation.
#[derive(Debug, Clone, Serialize)]
pub struct Compilation {
    /// Findings; warnings may be present.
    pub validation: ValidationResult,
    /// The mapped architecture.
    pub architecture: Architecture,
    /// Provisioning order and levels.
    pub order: TopologicalSortResult,
    /// When the compilation finished.
    pub compiled_at: DateTime<Utc>,
}

/// Compiles normalized diagrams into ordered architectures.
#[derive(Debug)]
pub struct Compiler<'r> {
    config: CompileConfig,
    registry: &'r SchemaRegistry,
    mapper: ArchitectureMapper,
}

impl Compiler<'static> {
    /// Creates a compiler over the process-wide schema registry and the
    /// default mapper.
    #[must_use]
    pub fn new(config: CompileConfig) -> Self {
        Self {
            config,
            registry: schema::global(),
            mapper: ArchitectureMapper::default(),
        }
    }
}

impl<'r> Compiler<'r> {
    /// Uses a different schema registry for type and schema checks.
    #[must_use]
    pub fn with_registry<'a>(self, registry: &'a SchemaRegistry) -> Compiler<'a> {
        Compiler {
            config: self.config,
            registry,
            mapper: self.mapper,
        }
    }

    /// Uses a different architecture mapper.
    #[must_use]
    pub fn with_mapper(mut self, mapper: ArchitectureMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Runs the validator with the passes the configuration enables.
    #[must_use]
    pub fn validate(&self, graph: &NormalizedGraph) -> ValidationResult {
        let provider = self.config.provider;
        let known_types: Option<BTreeSet<String>> = self
            .config
            .check_known_types
            .then(|| self.registry.known_types(provider.as_str()));

        let mut options = ValidationOptions::for_provider(provider);
        if let Some(known) = &known_types {
            options = options.with_known_types(known);
        }
        if self.config.schema_validation {
            options = options.with_registry(self.registry);
        }
        stratum_diagram::validate(graph, &options)
    }

    /// Validates, maps, and orders a diagram.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Invalid`] if validation reports errors (or
    /// warnings under `deny_warnings`), and [`CompileError::Stratum`] if a
    /// type cannot be resolved or the resources cannot be ordered.
    pub fn compile(&self, graph: &NormalizedGraph) -> Result<Compilation, CompileError> {
        let provider = self.config.provider;
        tracing::info!(%provider, nodes = graph.len(), "compiling diagram");

        let validation = self.validate(graph);
        let blocked_by_warnings = self.config.deny_warnings && !validation.warnings.is_empty();
        if !validation.is_valid() || blocked_by_warnings {
            tracing::warn!(
                errors = validation.errors.len(),
                warnings = validation.warnings.len(),
                "compilation stopped by validation"
            );
            return Err(CompileError::Invalid(validation));
        }

        let architecture = self.mapper.map(graph, provider)?;
        let order = stratum_architecture::sort(&architecture);
        if order.has_cycle {
            return Err(StratumError::DependencyCycle {
                ids: order.cycle_info,
            }
            .into());
        }

        tracing::info!(
            resources = architecture.len(),
            levels = order.levels.len(),
            "compilation complete"
        );
        Ok(Compilation {
            validation,
            architecture,
            order,
            compiled_at: Utc::now(),
        })
    }

    /// Loads a diagram file and compiles it.
    ///
    /// # Errors
    ///
    /// Returns the loading error, or any error of [`compile`](Self::compile).
    pub fn compile_file(&self, path: &Path) -> Result<Compilation, CompileError> {
        let graph = crate::loader::load_graph(path)?;
        self.compile(&graph)
    }
}

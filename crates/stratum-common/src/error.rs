//! Unified error types for the Stratum workspace.
//!
//! Each higher-level crate defines its own domain-specific error enum that wraps
//! these common variants when appropriate. Validation findings are not errors:
//! they are collected as data by the validator.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum StratumError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required item was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing item.
        kind: &'static str,
        /// Identifier of the missing item.
        id: String,
    },

    /// A pipeline input was absent (e.g. a `null` diagram document).
    #[error("missing input: {what}")]
    MissingInput {
        /// Which input was absent.
        what: &'static str,
    },

    /// A resource schema was rejected by the registry.
    #[error("invalid schema: {message}")]
    InvalidSchema {
        /// Reason the schema was rejected.
        message: String,
    },

    /// No mapper could resolve a diagram type to a domain resource type.
    #[error("cannot resolve resource type \"{resource_type}\" for provider {provider} (node {node_id})")]
    UnresolvedResourceType {
        /// Diagram-level type tag.
        resource_type: String,
        /// Provider the lookup was made for.
        provider: String,
        /// Node carrying the type.
        node_id: String,
    },

    /// The resource graph could not be ordered.
    #[error("dependency cycle detected among resources: {}", ids.join(", "))]
    DependencyCycle {
        /// Every resource id that could not be ordered.
        ids: Vec<String>,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StratumError>;

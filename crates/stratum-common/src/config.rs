//! Compilation configuration model.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StratumError};
use crate::types::CloudProvider;

/// Settings controlling a diagram compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Provider the diagram is compiled for.
    pub provider: CloudProvider,
    /// Check node types against the registry's known types.
    pub check_known_types: bool,
    /// Validate node configuration against registered schemas.
    pub schema_validation: bool,
    /// Treat validation warnings as blocking.
    pub deny_warnings: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            provider: CloudProvider::default(),
            check_known_types: true,
            schema_validation: true,
            deny_warnings: false,
        }
    }
}

impl CompileConfig {
    /// Loads a configuration from a JSON file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StratumError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

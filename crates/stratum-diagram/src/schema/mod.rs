//! Provider-scoped resource schemas.
//!
//! A [`ResourceSchema`] declares the configuration fields a resource type
//! accepts and where it may sit in the containment tree. Schemas live in a
//! [`SchemaRegistry`]; the process-wide one returned by [`global`] is
//! populated with the built-in provider schemas on first use.

mod builtin;

use std::collections::{BTreeSet, HashMap};
use std::sync::{OnceLock, PoisonError, RwLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stratum_common::error::{Result, StratumError};

use crate::graph::Config;

pub use builtin::builtin_schemas;

/// Expected JSON shape of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Any string.
    String,
    /// Any JSON number.
    Number,
    /// A number without a fractional part.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// A string holding an IPv4 CIDR block.
    Cidr,
}

impl FieldType {
    /// Returns `true` if `value` has this shape.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String | Self::Cidr => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    /// Lowercase name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Cidr => "cidr",
        }
    }
}

/// Value constraints for a field. Unset constraints are not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConstraints {
    /// Minimum string length (characters) or array length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum string length (characters) or array length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Inclusive numeric lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive numeric upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Allowed values.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    /// Required string prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Regular expression a string must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// One declared configuration field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Configuration key.
    pub name: String,
    /// Expected shape.
    pub field_type: FieldType,
    /// Whether the key must be present.
    #[serde(default)]
    pub required: bool,
    /// Value constraints.
    #[serde(default)]
    pub constraints: FieldConstraints,
    /// Alternative keys accepted when `name` is absent, in lookup order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl FieldSpec {
    /// A field that must be present.
    #[must_use]
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            constraints: FieldConstraints::default(),
            aliases: Vec::new(),
        }
    }

    /// A field that may be absent.
    #[must_use]
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Bounds string or array length.
    #[must_use]
    pub const fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.constraints.min_length = min;
        self.constraints.max_length = max;
        self
    }

    /// Bounds a numeric value.
    #[must_use]
    pub const fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.constraints.min = min;
        self.constraints.max = max;
        self
    }

    /// Restricts the value to a fixed set of strings.
    #[must_use]
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.enum_values = values.into_iter().map(|v| Value::String(v.into())).collect();
        self
    }

    /// Requires a string prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.constraints.prefix = Some(prefix.into());
        self
    }

    /// Requires a string to match a regular expression.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.pattern = Some(pattern.into());
        self
    }

    /// Accepts `key` in place of the field name.
    #[must_use]
    pub fn alias(mut self, key: impl Into<String>) -> Self {
        self.aliases.push(key.into());
        self
    }

    /// Finds the field's value under its name, then under each alias.
    /// Null values count as absent.
    #[must_use]
    pub fn lookup<'c>(&self, config: &'c Config) -> Option<(&'c str, &'c Value)> {
        std::iter::once(&self.name)
            .chain(&self.aliases)
            .filter_map(|key| config.get_key_value(key.as_str()))
            .find(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.as_str(), value))
    }
}

/// Schema for one resource type of one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// IR type tag this schema describes.
    pub resource_type: String,
    /// Provider tag, e.g. `aws`.
    pub provider: String,
    /// Human description.
    #[serde(default)]
    pub description: String,
    /// Declared configuration fields.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    /// Types allowed as direct parent. Empty means unrestricted.
    #[serde(default)]
    pub valid_parent_types: Vec<String>,
    /// Types allowed as direct children. Empty means unrestricted.
    #[serde(default)]
    pub valid_child_types: Vec<String>,
}

impl ResourceSchema {
    /// Creates a schema with no fields.
    #[must_use]
    pub fn new(provider: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            provider: provider.into(),
            description: String::new(),
            fields: Vec::new(),
            valid_parent_types: Vec::new(),
            valid_child_types: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declares a field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the allowed parent types.
    #[must_use]
    pub fn parents(mut self, types: &[&str]) -> Self {
        self.valid_parent_types = types.iter().map(ToString::to_string).collect();
        self
    }

    /// Sets the allowed child types.
    #[must_use]
    pub fn children(mut self, types: &[&str]) -> Self {
        self.valid_child_types = types.iter().map(ToString::to_string).collect();
        self
    }

    /// Looks up a declared field.
    #[must_use]
    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

type SchemaKey = (String, String);

fn key(provider: &str, resource_type: &str) -> SchemaKey {
    (provider.to_ascii_lowercase(), resource_type.to_string())
}

/// Thread-safe catalog of resource schemas keyed by provider and type.
///
/// Reads take a shared lock; registration is meant for process start.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<SchemaKey, ResourceSchema>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in provider schema.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for schema in builtin_schemas() {
            let resource_type = schema.resource_type.clone();
            if let Err(e) = registry.register(schema) {
                tracing::error!(resource_type = %resource_type, error = %e, "built-in schema rejected");
            }
        }
        registry
    }

    /// Registers a schema, replacing any existing one for the same key.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::InvalidSchema`] if the type or provider is
    /// empty, or a field's pattern is not a valid regular expression.
    pub fn register(&self, schema: ResourceSchema) -> Result<()> {
        if schema.resource_type.trim().is_empty() {
            return Err(StratumError::InvalidSchema {
                message: "resource type is empty".into(),
            });
        }
        if schema.provider.trim().is_empty() {
            return Err(StratumError::InvalidSchema {
                message: format!("provider is empty for \"{}\"", schema.resource_type),
            });
        }
        for field in &schema.fields {
            if let Some(pattern) = &field.constraints.pattern {
                if let Err(e) = compile_pattern(pattern) {
                    return Err(StratumError::InvalidSchema {
                        message: format!(
                            "field \"{}\" of \"{}\" has invalid pattern: {e}",
                            field.name, schema.resource_type
                        ),
                    });
                }
            }
        }

        tracing::debug!(
            provider = %schema.provider,
            resource_type = %schema.resource_type,
            "registering resource schema"
        );
        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        let _ = schemas.insert(key(&schema.provider, &schema.resource_type), schema);
        Ok(())
    }

    /// Returns the schema for a type and provider.
    #[must_use]
    pub fn get(&self, resource_type: &str, provider: &str) -> Option<ResourceSchema> {
        let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
        schemas.get(&key(provider, resource_type)).cloned()
    }

    /// Returns `true` if a schema is registered for the type and provider.
    #[must_use]
    pub fn has(&self, resource_type: &str, provider: &str) -> bool {
        let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
        schemas.contains_key(&key(provider, resource_type))
    }

    /// Every schema registered for a provider, ordered by type.
    #[must_use]
    pub fn list_all(&self, provider: &str) -> Vec<ResourceSchema> {
        let provider = provider.to_ascii_lowercase();
        let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
        let mut found: Vec<ResourceSchema> = schemas
            .iter()
            .filter(|((p, _), _)| *p == provider)
            .map(|(_, s)| s.clone())
            .collect();
        found.sort_by(|a, b| a.resource_type.cmp(&b.resource_type));
        found
    }

    /// Type names registered for a provider.
    #[must_use]
    pub fn known_types(&self, provider: &str) -> BTreeSet<String> {
        let provider = provider.to_ascii_lowercase();
        let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
        schemas
            .keys()
            .filter(|(p, _)| *p == provider)
            .map(|(_, t)| t.clone())
            .collect()
    }
}

static GLOBAL_REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();

static PATTERN_CACHE: OnceLock<RwLock<HashMap<String, Regex>>> = OnceLock::new();

fn pattern_cache() -> &'static RwLock<HashMap<String, Regex>> {
    PATTERN_CACHE.get_or_init(RwLock::default)
}

/// Compiles a field pattern, reusing an earlier compilation of the same
/// source text. Failures are not cached.
fn compile_pattern(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    if let Some(re) = pattern_cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(pattern)
    {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    let mut cache = pattern_cache().write().unwrap_or_else(PoisonError::into_inner);
    Ok(cache.entry(pattern.to_string()).or_insert(re).clone())
}

/// The compiled form of a registered field pattern.
pub(crate) fn compiled_pattern(pattern: &str) -> Option<Regex> {
    compile_pattern(pattern).ok()
}

/// The process-wide registry, built with the built-in schemas on first use.
pub fn global() -> &'static SchemaRegistry {
    GLOBAL_REGISTRY.get_or_init(SchemaRegistry::with_builtins)
}

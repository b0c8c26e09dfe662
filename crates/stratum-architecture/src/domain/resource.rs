//! Domain resource entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stratum_common::constants::VISUAL_ONLY_KEY;
use stratum_common::types::CloudProvider;

use super::ResourceType;

/// A cloud resource to provision. Its id is the originating node's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Identifier, reused from the diagram node.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Resolved type.
    pub resource_type: ResourceType,
    /// Provider the resource belongs to.
    pub provider: CloudProvider,
    /// Region the resource is deployed in; empty when the diagram has none.
    pub region: String,
    /// Containing resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Resources that must exist first.
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Node configuration plus position and the visual-only flag.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Resource {
    /// Creates a resource without parent, dependencies, or metadata.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        resource_type: ResourceType,
        provider: CloudProvider,
        region: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            resource_type,
            provider,
            region: region.into(),
            parent_id: None,
            depends_on: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Sets the containing resource.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Adds a dependency.
    #[must_use]
    pub fn depending_on(mut self, id: impl Into<String>) -> Self {
        self.depends_on.push(id.into());
        self
    }

    /// Whether the originating node was visual-only. Pricing skips these.
    #[must_use]
    pub fn is_visual_only(&self) -> bool {
        self.metadata
            .get(VISUAL_ONLY_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

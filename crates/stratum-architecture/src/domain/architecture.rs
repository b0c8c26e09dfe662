//! The architecture aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stratum_common::types::CloudProvider;
use stratum_diagram::graph::{Output, Variable};

use super::Resource;

/// A mapped set of resources and their relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Architecture {
    /// Resources in mapping order.
    pub resources: Vec<Resource>,
    /// Project region; empty when the diagram declares none.
    pub region: String,
    /// Target provider.
    pub provider: CloudProvider,
    /// Parent resource id to child resource ids.
    pub containments: BTreeMap<String, Vec<String>>,
    /// Resource id to the ids it depends on.
    pub dependencies: BTreeMap<String, Vec<String>>,
    /// Input variables carried through for code generators.
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Output values carried through for code generators.
    #[serde(default)]
    pub outputs: Vec<Output>,
}

impl Architecture {
    /// Creates an empty architecture.
    #[must_use]
    pub fn new(provider: CloudProvider, region: impl Into<String>) -> Self {
        Self {
            provider,
            region: region.into(),
            ..Self::default()
        }
    }

    /// Looks up a resource by id.
    #[must_use]
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if there are no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Rebuilds both relationship maps from the resources' own parent ids
    /// and dependency lists.
    pub fn derive_relationships(&mut self) {
        self.containments.clear();
        self.dependencies.clear();
        for resource in &self.resources {
            if let Some(parent) = &resource.parent_id {
                self.containments
                    .entry(parent.clone())
                    .or_default()
                    .push(resource.id.clone());
            }
            if !resource.depends_on.is_empty() {
                let _ = self
                    .dependencies
                    .insert(resource.id.clone(), resource.depends_on.clone());
            }
        }
    }
}

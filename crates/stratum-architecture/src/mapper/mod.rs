//! Diagram → architecture translation.
//!
//! Type resolution is provider-pluggable: a [`ResourceTypeMapper`]
//! registered for a provider is asked first, then the provider's static
//! table. A registered [`ArchitectureGenerator`] replaces the whole
//! translation for its provider.
//!
//! The mapper assumes a graph that passed validation. It still refuses to
//! produce a partial result: an unresolvable type aborts mapping.

mod aws;
pub mod static_table;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

use serde_json::{Value, json};
use stratum_common::constants::{POSITION_KEY, REGION_NAME_KEY, VISUAL_ONLY_KEY};
use stratum_common::error::{Result, StratumError};
use stratum_common::types::CloudProvider;
use stratum_diagram::graph::{Node, NormalizedGraph};

pub use aws::AwsTypeMapper;

use crate::domain::{Architecture, Resource, ResourceType};

/// Resolves diagram IR types to domain resource types for one provider.
pub trait ResourceTypeMapper: Send + Sync {
    /// Provider this mapper serves.
    fn provider(&self) -> CloudProvider;

    /// Resolves an IR type, or `None` if the mapper does not know it.
    fn resolve(&self, ir_type: &str) -> Option<ResourceType>;
}

/// Fully replaces node → architecture translation for one provider.
pub trait ArchitectureGenerator: Send + Sync {
    /// Provider this generator serves.
    fn provider(&self) -> CloudProvider;

    /// Builds the architecture for a validated graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be translated.
    fn generate(&self, graph: &NormalizedGraph) -> Result<Architecture>;
}

/// Registry of per-provider type mappers and generators.
pub struct ArchitectureMapper {
    type_mappers: HashMap<CloudProvider, Box<dyn ResourceTypeMapper>>,
    generators: HashMap<CloudProvider, Box<dyn ArchitectureGenerator>>,
}

impl ArchitectureMapper {
    /// Creates a mapper with no registrations: static tables only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            type_mappers: HashMap::new(),
            generators: HashMap::new(),
        }
    }

    /// Registers a type mapper, replacing any for the same provider.
    pub fn register_type_mapper(&mut self, mapper: Box<dyn ResourceTypeMapper>) {
        let _ = self.type_mappers.insert(mapper.provider(), mapper);
    }

    /// Registers a generator, replacing any for the same provider.
    pub fn register_generator(&mut self, generator: Box<dyn ArchitectureGenerator>) {
        let _ = self.generators.insert(generator.provider(), generator);
    }

    /// Resolves an IR type: provider mapper first, static table second.
    #[must_use]
    pub fn resolve_type(&self, provider: CloudProvider, ir_type: &str) -> Option<ResourceType> {
        if let Some(resolved) = self
            .type_mappers
            .get(&provider)
            .and_then(|m| m.resolve(ir_type))
        {
            tracing::debug!(%provider, ir_type, "resolved by provider mapper");
            return Some(resolved);
        }
        let fallback = static_table::lookup(provider, ir_type);
        if fallback.is_some() {
            tracing::debug!(%provider, ir_type, "resolved by static table");
        }
        fallback
    }

    /// Translates a validated graph into an architecture.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::UnresolvedResourceType`] if any mappable
    /// node's type cannot be resolved, or whatever a registered generator
    /// returns.
    pub fn map(&self, graph: &NormalizedGraph, provider: CloudProvider) -> Result<Architecture> {
        tracing::info!(%provider, nodes = graph.len(), "mapping diagram to architecture");
        if let Some(generator) = self.generators.get(&provider) {
            tracing::debug!(%provider, "using registered architecture generator");
            return generator.generate(graph);
        }
        self.translate(graph, provider)
    }

    fn translate(&self, graph: &NormalizedGraph, provider: CloudProvider) -> Result<Architecture> {
        let region = region_name(graph);

        // All surviving ids first, so parent lookups do not depend on order.
        let resource_ids: HashSet<&str> = graph
            .nodes
            .values()
            .filter(|n| is_mappable(n))
            .map(|n| n.id.as_str())
            .collect();

        let mut architecture = Architecture::new(provider, region.clone());
        for node in graph.nodes.values() {
            if !is_mappable(node) {
                tracing::debug!(node_id = %node.id, "skipping region or visual-only node");
                continue;
            }
            let resource_type = self.resolve_type(provider, &node.resource_type).ok_or_else(|| {
                tracing::warn!(node_id = %node.id, resource_type = %node.resource_type, %provider, "unresolved resource type");
                StratumError::UnresolvedResourceType {
                    resource_type: node.resource_type.clone(),
                    provider: provider.to_string(),
                    node_id: node.id.clone(),
                }
            })?;

            let name = if node.label.is_empty() {
                node.id.clone()
            } else {
                node.label.clone()
            };
            let mut resource = Resource::new(node.id.clone(), name, resource_type, provider, region.clone());
            resource.parent_id = node
                .parent_id
                .as_deref()
                .filter(|p| resource_ids.contains(p))
                .map(ToString::to_string);
            resource.depends_on = dependency_ids(graph, &node.id, &resource_ids);
            resource.metadata = metadata(node);
            architecture.resources.push(resource);
        }

        architecture.derive_relationships();
        architecture.variables.clone_from(&graph.variables);
        architecture.outputs.clone_from(&graph.outputs);

        tracing::info!(
            resources = architecture.len(),
            region = %architecture.region,
            "architecture mapped"
        );
        Ok(architecture)
    }
}

impl Default for ArchitectureMapper {
    /// Static tables plus the AWS alias mapper.
    fn default() -> Self {
        let mut mapper = Self::new();
        mapper.register_type_mapper(Box::new(AwsTypeMapper));
        mapper
    }
}

impl fmt::Debug for ArchitectureMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut mappers: Vec<_> = self.type_mappers.keys().collect();
        mappers.sort();
        let mut generators: Vec<_> = self.generators.keys().collect();
        generators.sort();
        f.debug_struct("ArchitectureMapper")
            .field("type_mappers", &mappers)
            .field("generators", &generators)
            .finish()
    }
}

fn is_mappable(node: &Node) -> bool {
    !node.is_region() && !node.is_visual_only
}

fn region_name(graph: &NormalizedGraph) -> String {
    graph
        .region_node()
        .and_then(|n| n.config.get(REGION_NAME_KEY))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Targets of dependency edges leaving `node_id`, in edge order, limited to
/// mapped resources.
fn dependency_ids(graph: &NormalizedGraph, node_id: &str, resource_ids: &HashSet<&str>) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for edge in graph.dependency_edges().filter(|e| e.source == node_id) {
        if resource_ids.contains(edge.target.as_str()) && !ids.contains(&edge.target) {
            ids.push(edge.target.clone());
        }
    }
    ids
}

fn metadata(node: &Node) -> BTreeMap<String, Value> {
    let mut metadata = node.config.clone();
    let _ = metadata.insert(
        POSITION_KEY.to_string(),
        json!({ "x": node.position.x, "y": node.position.y }),
    );
    let _ = metadata.insert(VISUAL_ONLY_KEY.to_string(), Value::Bool(node.is_visual_only));
    metadata
}

static DEFAULT_MAPPER: OnceLock<ArchitectureMapper> = OnceLock::new();

/// Maps a validated graph with the default mapper.
///
/// # Errors
///
/// Returns [`StratumError::UnresolvedResourceType`] if a node's type cannot
/// be resolved for `provider`.
pub fn map_diagram_to_architecture(graph: &NormalizedGraph, provider: CloudProvider) -> Result<Architecture> {
    DEFAULT_MAPPER
        .get_or_init(ArchitectureMapper::default)
        .map(graph, provider)
}

//! The normalized diagram graph.
//!
//! A diagram parser turns raw editor JSON into a [`NormalizedGraph`]: nodes
//! keyed by id plus an ordered edge list. The graph is a read-only view;
//! nothing in the compiler deletes or re-parents nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stratum_common::constants::REGION_TYPE;
use stratum_common::error::{Result, StratumError};

/// Open key-value configuration attached to nodes and edges.
pub type Config = BTreeMap<String, Value>;

/// Whether a node groups other nodes or stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A node that may own children (VPC, subnet, region).
    Container,
    /// A leaf resource.
    Resource,
}

/// Kind of relationship an edge expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Structural "is inside".
    Containment,
    /// Source requires target.
    Dependency,
    /// Informational link with no ordering meaning.
    Reference,
}

/// Pixel position of a node on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

/// A diagram entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier.
    pub id: String,
    /// Container or resource.
    pub kind: NodeKind,
    /// IR type tag, e.g. `vpc`, `subnet`, `region`.
    #[serde(default)]
    pub resource_type: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Free-form configuration.
    #[serde(default)]
    pub config: Config,
    /// Canvas position.
    #[serde(default)]
    pub position: Position,
    /// Owning container, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Drawn for documentation only; never becomes a resource.
    #[serde(default)]
    pub is_visual_only: bool,
}

impl Node {
    fn new(id: impl Into<String>, kind: NodeKind, resource_type: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            kind,
            resource_type: resource_type.into(),
            config: Config::new(),
            position: Position::default(),
            parent_id: None,
            is_visual_only: false,
        }
    }

    /// Creates a container node.
    #[must_use]
    pub fn container(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Container, resource_type)
    }

    /// Creates a resource node.
    #[must_use]
    pub fn resource(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Resource, resource_type)
    }

    /// Sets the owning container.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Adds a configuration entry.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let _ = self.config.insert(key.into(), value.into());
        self
    }

    /// Places the node on the canvas.
    #[must_use]
    pub const fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    /// Marks the node as visual-only.
    #[must_use]
    pub const fn visual_only(mut self) -> Self {
        self.is_visual_only = true;
        self
    }

    /// Returns `true` for the project-level region node.
    #[must_use]
    pub fn is_region(&self) -> bool {
        self.resource_type == REGION_TYPE
    }

    /// Returns `true` if the node is a container.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.kind == NodeKind::Container
    }
}

/// A directed relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier.
    pub id: String,
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Relationship kind.
    pub kind: EdgeKind,
    /// Optional edge configuration (label and the like).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
}

impl Edge {
    /// Creates an edge with an explicit id.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind,
            config: None,
        }
    }

    /// Creates an edge with a generated id.
    #[must_use]
    pub fn generated(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), source, target, kind)
    }

    /// Shorthand for a dependency edge: `source` requires `target`.
    #[must_use]
    pub fn dependency(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::generated(source, target, EdgeKind::Dependency)
    }
}

/// A declared input variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name.
    pub name: String,
    /// Declared type, e.g. `string`.
    #[serde(rename = "type", default)]
    pub var_type: String,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Human description.
    #[serde(default)]
    pub description: String,
    /// Whether the value must be redacted in output.
    #[serde(default)]
    pub sensitive: bool,
}

/// A declared output value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Output name.
    pub name: String,
    /// Expression producing the value.
    pub value: String,
    /// Human description.
    #[serde(default)]
    pub description: String,
    /// Whether the value must be redacted.
    #[serde(default)]
    pub sensitive: bool,
}

/// A policy attached to an edge, granting a role access to a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStatement {
    /// Edge that carries the policy.
    pub edge_id: String,
    /// Role node id.
    pub role_id: String,
    /// Target node id.
    pub target_id: String,
    /// Policy document.
    #[serde(default)]
    pub document: Value,
}

/// The normalized diagram: nodes keyed by id, ordered edges, declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedGraph {
    /// Nodes keyed by id.
    pub nodes: BTreeMap<String, Node>,
    /// Edges in diagram order.
    pub edges: Vec<Edge>,
    /// Input variables.
    pub variables: Vec<Variable>,
    /// Output values.
    pub outputs: Vec<Output>,
    /// Edge-scoped policy statements.
    pub policies: Vec<PolicyStatement>,
}

impl NormalizedGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a graph from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::MissingInput`] for a `null` document and a
    /// serialization error for malformed JSON.
    pub fn from_json(input: &str) -> Result<Self> {
        let graph: Option<Self> = serde_json::from_str(input)?;
        graph.ok_or(StratumError::MissingInput {
            what: "diagram graph",
        })
    }

    /// Inserts a node, keyed by its id. Replaces any node with the same id.
    pub fn add_node(&mut self, node: Node) {
        let _ = self.nodes.insert(node.id.clone(), node);
    }

    /// Appends an edge.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Builder form of [`add_node`](Self::add_node).
    #[must_use]
    pub fn with_node(mut self, node: Node) -> Self {
        self.add_node(node);
        self
    }

    /// Builder form of [`add_edge`](Self::add_edge).
    #[must_use]
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.add_edge(edge);
        self
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns `true` if a node with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes whose parent is `parent_id`, in id order.
    #[must_use]
    pub fn children(&self, parent_id: &str) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|n| n.parent_id.as_deref() == Some(parent_id))
            .collect()
    }

    /// The node owning `child_id`, if both exist.
    #[must_use]
    pub fn parent(&self, child_id: &str) -> Option<&Node> {
        let parent_id = self.node(child_id)?.parent_id.as_deref()?;
        self.node(parent_id)
    }

    /// Edges of kind [`EdgeKind::Containment`].
    pub fn containment_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.kind == EdgeKind::Containment)
    }

    /// Edges of kind [`EdgeKind::Dependency`].
    pub fn dependency_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.kind == EdgeKind::Dependency)
    }

    /// Parent id to child ids, built from every node's `parent_id`.
    ///
    /// Dangling parent ids appear as keys too; callers decide what to do
    /// with them.
    #[must_use]
    pub fn build_tree(&self) -> BTreeMap<String, Vec<String>> {
        let mut tree: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for node in self.nodes.values() {
            if let Some(parent) = &node.parent_id {
                tree.entry(parent.clone()).or_default().push(node.id.clone());
            }
        }
        tree
    }

    /// Nodes without a parent, in id order.
    #[must_use]
    pub fn roots(&self) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.parent_id.is_none()).collect()
    }

    /// Every region node, in id order.
    #[must_use]
    pub fn region_nodes(&self) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.is_region()).collect()
    }

    /// The region node honored downstream: the first in id order.
    #[must_use]
    pub fn region_node(&self) -> Option<&Node> {
        self.nodes.values().find(|n| n.is_region())
    }
}

//! Static analysis of a normalized diagram graph.
//!
//! [`validate`] runs every pass and accumulates their findings; no pass
//! short-circuits another. Errors block mapping, warnings never do.
//!
//! # Passes
//!
//! 1. Structure: missing parents, containment cycles, dangling edges.
//! 2. Dependencies: endpoints, self-loops, non-resource endpoints, cycles.
//! 3. Types: resource-type existence (when a known-type set is given) and
//!    region node count.
//! 4. Configuration: schema field checks and schema-implied containment
//!    (when a registry is given).
//! 5. Network: VPC/subnet CIDR well-formedness, enclosure, and overlap.

mod config;
mod dependency;
mod network;
mod structure;
mod types;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use stratum_common::types::CloudProvider;

use crate::graph::NormalizedGraph;
use crate::schema::SchemaRegistry;

/// Machine-readable validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// A node's parent id does not resolve.
    MissingParent,
    /// The parent relation loops.
    ContainmentCycle,
    /// An edge's source does not resolve.
    InvalidEdgeSource,
    /// An edge's target does not resolve.
    InvalidEdgeTarget,
    /// A dependency edge points at its own source.
    DependencySelfLoop,
    /// A dependency edge has an empty endpoint.
    DependencyInvalidEndpoint,
    /// A dependency edge joins two containers.
    DependencyNonResource,
    /// Dependency edges loop.
    DependencyCycle,
    /// A node has no resource type.
    MissingResourceType,
    /// A node's resource type is not known for the provider.
    UnknownResourceType,
    /// The diagram has no region node.
    NoRegionNode,
    /// The diagram has more than one region node.
    MultipleRegionNodes,
    /// A required configuration field is absent.
    ConfigMissingField,
    /// A configuration field has the wrong JSON type.
    ConfigInvalidType,
    /// A configuration field violates a constraint.
    ConfigConstraintViolation,
    /// A CIDR-typed configuration field is malformed.
    ConfigInvalidCidr,
    /// A node sits under a parent type its schema does not allow.
    InvalidContainment,
    /// A VPC or subnet CIDR is malformed.
    CidrInvalid,
    /// A subnet's range is not inside its VPC's range.
    CidrOutsideVpc,
    /// Two sibling subnets share addresses.
    CidrOverlap,
}

impl IssueCode {
    /// The wire form, e.g. `MISSING_PARENT`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingParent => "MISSING_PARENT",
            Self::ContainmentCycle => "CONTAINMENT_CYCLE",
            Self::InvalidEdgeSource => "INVALID_EDGE_SOURCE",
            Self::InvalidEdgeTarget => "INVALID_EDGE_TARGET",
            Self::DependencySelfLoop => "DEPENDENCY_SELF_LOOP",
            Self::DependencyInvalidEndpoint => "DEPENDENCY_INVALID_ENDPOINT",
            Self::DependencyNonResource => "DEPENDENCY_NON_RESOURCE",
            Self::DependencyCycle => "DEPENDENCY_CYCLE",
            Self::MissingResourceType => "MISSING_RESOURCE_TYPE",
            Self::UnknownResourceType => "UNKNOWN_RESOURCE_TYPE",
            Self::NoRegionNode => "NO_REGION_NODE",
            Self::MultipleRegionNodes => "MULTIPLE_REGION_NODES",
            Self::ConfigMissingField => "CONFIG_MISSING_FIELD",
            Self::ConfigInvalidType => "CONFIG_INVALID_TYPE",
            Self::ConfigConstraintViolation => "CONFIG_CONSTRAINT_VIOLATION",
            Self::ConfigInvalidCidr => "CONFIG_INVALID_CIDR",
            Self::InvalidContainment => "INVALID_CONTAINMENT",
            Self::CidrInvalid => "CIDR_INVALID",
            Self::CidrOutsideVpc => "CIDR_OUTSIDE_VPC",
            Self::CidrOverlap => "CIDR_OVERLAP",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Machine-readable code.
    pub code: IssueCode,
    /// Human-readable message.
    pub message: String,
    /// Offending node, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl ValidationIssue {
    /// Creates an issue attached to a node.
    #[must_use]
    pub fn at(code: IssueCode, node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            node_id: Some(node_id.into()),
        }
    }

    /// Creates a graph-level issue.
    #[must_use]
    pub fn global(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            node_id: None,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "[{}] {} (node {id})", self.code, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Accumulated findings, partitioned by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValidationResult {
    /// Blocking findings.
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,
    /// Advisory findings.
    #[serde(default)]
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when there are no errors. Warnings do not count.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records a blocking finding.
    pub fn error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    /// Records an advisory finding.
    pub fn warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Appends another result's findings.
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Errors and warnings attached to one node.
    pub fn issues_for<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(move |i| i.node_id.as_deref() == Some(node_id))
    }

    /// Returns `true` if any error carries `code`.
    #[must_use]
    pub fn has_error(&self, code: IssueCode) -> bool {
        self.errors.iter().any(|i| i.code == code)
    }

    /// Returns `true` if any warning carries `code`.
    #[must_use]
    pub fn has_warning(&self, code: IssueCode) -> bool {
        self.warnings.iter().any(|i| i.code == code)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

/// Optional inputs that enable the type-existence and schema passes.
///
/// The default disables both; structural passes always run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions<'a> {
    /// Provider used for schema lookups.
    pub provider: CloudProvider,
    /// Known resource-type names for the provider.
    pub known_types: Option<&'a BTreeSet<String>>,
    /// Schema registry for configuration and containment checks.
    pub registry: Option<&'a SchemaRegistry>,
}

impl<'a> ValidationOptions<'a> {
    /// Options for a provider with both optional passes disabled.
    #[must_use]
    pub fn for_provider(provider: CloudProvider) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    /// Enables the resource-type existence pass.
    #[must_use]
    pub const fn with_known_types(mut self, known_types: &'a BTreeSet<String>) -> Self {
        self.known_types = Some(known_types);
        self
    }

    /// Enables the schema passes.
    #[must_use]
    pub const fn with_registry(mut self, registry: &'a SchemaRegistry) -> Self {
        self.registry = Some(registry);
        self
    }
}

/// Validates a graph, accumulating findings from every pass.
#[must_use]
pub fn validate(graph: &NormalizedGraph, options: &ValidationOptions<'_>) -> ValidationResult {
    tracing::info!(
        nodes = graph.len(),
        edges = graph.edges.len(),
        provider = %options.provider,
        "validating diagram graph"
    );
    let mut result = ValidationResult::new();

    structure::check_missing_parents(graph, &mut result);
    structure::check_containment_cycles(graph, &mut result);
    structure::check_edge_references(graph, &mut result);
    dependency::check_dependency_edges(graph, &mut result);
    dependency::check_dependency_cycles(graph, &mut result);
    if let Some(known) = options.known_types {
        types::check_resource_types(graph, known, &mut result);
    }
    types::check_region_nodes(graph, &mut result);
    if let Some(registry) = options.registry {
        config::check_node_configs(graph, registry, options.provider, &mut result);
        config::check_containment_types(graph, registry, options.provider, &mut result);
    }
    network::check_cidrs(graph, &mut result);

    tracing::info!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        valid = result.is_valid(),
        "validation finished"
    );
    result
}

/// Iterative depth-first search reporting every node reached through a
/// back edge, in discovery order.
///
/// Equivalent to the recursive formulation with a recursion stack: each
/// start is tried in order, and a node reached while still on the stack is
/// reported without being descended into.
fn find_back_edge_targets<'g>(
    starts: impl IntoIterator<Item = &'g str>,
    adjacency: &BTreeMap<&'g str, Vec<&'g str>>,
) -> Vec<&'g str> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_stack: HashSet<&str> = HashSet::new();
    let mut found = Vec::new();

    for start in starts {
        if !visited.insert(start) {
            continue;
        }
        let _ = on_stack.insert(start);
        let mut stack: Vec<(&str, usize)> = vec![(start, 0)];

        while let Some(&(node, next)) = stack.last() {
            let successors = adjacency.get(node).map_or(&[][..], Vec::as_slice);
            let Some(&succ) = successors.get(next) else {
                let _ = on_stack.remove(node);
                let _ = stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            if on_stack.contains(succ) {
                found.push(succ);
            } else if visited.insert(succ) {
                let _ = on_stack.insert(succ);
                stack.push((succ, 0));
            }
        }
    }
    found
}

//! Provisioning order via Kahn's algorithm.
//!
//! Three edge sources are merged into one `petgraph` graph, each edge
//! meaning "provision A before B":
//!
//! - explicit dependencies: B depends on A gives A → B,
//! - the containment map: A contains B gives A → B,
//! - each resource's own parent id, for containment the map lacks.
//!
//! Duplicate edges are dropped. A cycle is reported through
//! [`TopologicalSortResult::has_cycle`], never as an error.

use std::collections::{HashMap, VecDeque};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use stratum_common::error::{Result, StratumError};

use crate::domain::{Architecture, Resource};

/// Where an ordering edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeOrigin {
    Dependency,
    Containment,
    ParentId,
}

/// Outcome of sorting an architecture.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopologicalSortResult {
    /// Resources in provisioning order. Excludes cycle members.
    pub resources: Vec<Resource>,
    /// Batches of ids with no unresolved predecessors, in order.
    pub levels: Vec<Vec<String>>,
    /// Whether some resources could not be ordered.
    pub has_cycle: bool,
    /// Every id that could not be ordered, in architecture order.
    ///
    /// This is not a minimal cycle: resources downstream of a cycle are
    /// listed too.
    pub cycle_info: Vec<String>,
}

impl TopologicalSortResult {
    /// Index of a resource in the provisioning order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.resources.iter().position(|r| r.id == id)
    }

    /// Ids in provisioning order.
    #[must_use]
    pub fn order(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.id.as_str()).collect()
    }
}

struct OrderingGraph<'a> {
    graph: DiGraph<&'a Resource, EdgeOrigin>,
    index: HashMap<&'a str, NodeIndex>,
}

impl<'a> OrderingGraph<'a> {
    fn build(architecture: &'a Architecture) -> Self {
        let mut graph = DiGraph::with_capacity(architecture.resources.len(), 0);
        let mut index = HashMap::with_capacity(architecture.resources.len());
        for resource in &architecture.resources {
            let idx = graph.add_node(resource);
            let _ = index.insert(resource.id.as_str(), idx);
        }

        let mut ordering = Self { graph, index };
        for (dependent, dependencies) in &architecture.dependencies {
            for dependency in dependencies {
                ordering.add_edge(dependency, dependent, EdgeOrigin::Dependency);
            }
        }
        for (parent, children) in &architecture.containments {
            for child in children {
                ordering.add_edge(parent, child, EdgeOrigin::Containment);
            }
        }
        for resource in &architecture.resources {
            if let Some(parent) = &resource.parent_id {
                ordering.add_edge(parent, &resource.id, EdgeOrigin::ParentId);
            }
        }
        ordering
    }

    /// Ignores ids that are not resources and edges already present.
    fn add_edge(&mut self, before: &str, after: &str, origin: EdgeOrigin) {
        let (Some(&from), Some(&to)) = (self.index.get(before), self.index.get(after)) else {
            tracing::debug!(before, after, ?origin, "ordering edge references unknown resource");
            return;
        };
        if !self.graph.contains_edge(from, to) {
            let _ = self.graph.add_edge(from, to, origin);
        }
    }

    /// Successors in insertion order (`petgraph` yields newest first).
    fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut next: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        next.reverse();
        next
    }
}

/// Orders an architecture's resources for provisioning.
#[must_use]
pub fn sort(architecture: &Architecture) -> TopologicalSortResult {
    tracing::info!(resources = architecture.len(), "sorting architecture");
    let ordering = OrderingGraph::build(architecture);
    let graph = &ordering.graph;

    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|i| graph.neighbors_directed(i, Direction::Incoming).count())
        .collect();
    let mut queue: VecDeque<NodeIndex> = graph
        .node_indices()
        .filter(|i| in_degree[i.index()] == 0)
        .collect();

    let mut emitted = vec![false; graph.node_count()];
    let mut result = TopologicalSortResult::default();

    while !queue.is_empty() {
        let level: Vec<NodeIndex> = queue.drain(..).collect();
        for &idx in &level {
            emitted[idx.index()] = true;
            result.resources.push(graph[idx].clone());
            for next in ordering.successors(idx) {
                let degree = &mut in_degree[next.index()];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }
        result
            .levels
            .push(level.iter().map(|&i| graph[i].id.clone()).collect());
    }

    if result.resources.len() < architecture.resources.len() {
        result.has_cycle = true;
        result.cycle_info = graph
            .node_indices()
            .filter(|i| !emitted[i.index()])
            .map(|i| graph[i].id.clone())
            .collect();
        tracing::warn!(unordered = ?result.cycle_info, "cycle detected in resource graph");
    }
    result
}

/// Returns the resources in provisioning order.
///
/// # Errors
///
/// Returns [`StratumError::DependencyCycle`] listing every unordered id if
/// the architecture contains a cycle.
pub fn get_sorted_resources(architecture: &Architecture) -> Result<Vec<Resource>> {
    let result = sort(architecture);
    if result.has_cycle {
        return Err(StratumError::DependencyCycle {
            ids: result.cycle_info,
        });
    }
    Ok(result.resources)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stratum_common::types::CloudProvider;

    use super::*;
    use crate::domain::{ResourceCategory, ResourceType};

    fn resource(id: &str) -> Resource {
        let rt = ResourceType::regional("test", "Test", ResourceCategory::Compute, "test");
        Resource::new(id, id, rt, CloudProvider::Aws, "us-east-1")
    }

    fn architecture(resources: Vec<Resource>) -> Architecture {
        let mut arch = Architecture::new(CloudProvider::Aws, "us-east-1");
        arch.resources = resources;
        arch.derive_relationships();
        arch
    }

    #[test]
    fn empty_architecture_sorts_to_nothing() {
        let result = sort(&Architecture::default());
        assert!(result.resources.is_empty());
        assert!(result.levels.is_empty());
        assert!(!result.has_cycle);
    }

    #[test]
    fn vpc_subnet_instance_chain() {
        let arch = architecture(vec![
            resource("vpc"),
            resource("subnet").depending_on("vpc"),
            resource("ec2").depending_on("subnet"),
        ]);
        let result = sort(&arch);
        assert_eq!(result.order(), vec!["vpc", "subnet", "ec2"]);
        assert_eq!(
            result.levels,
            vec![vec!["vpc".to_string()], vec!["subnet".to_string()], vec!["ec2".to_string()]]
        );
        assert!(!result.has_cycle);
    }

    #[test]
    fn children_follow_parents() {
        let arch = architecture(vec![
            resource("web").with_parent("subnet"),
            resource("subnet").with_parent("vpc"),
            resource("vpc"),
        ]);
        assert_eq!(sort(&arch).order(), vec!["vpc", "subnet", "web"]);
    }

    #[test]
    fn parent_id_fallback_without_containment_map() {
        let mut arch = Architecture::new(CloudProvider::Aws, "");
        arch.resources = vec![resource("child").with_parent("parent"), resource("parent")];
        assert!(arch.containments.is_empty());
        assert_eq!(sort(&arch).order(), vec!["parent", "child"]);
    }

    #[test]
    fn independent_resources_share_a_level() {
        let arch = architecture(vec![
            resource("vpc"),
            resource("a").with_parent("vpc"),
            resource("b").with_parent("vpc"),
            resource("c").depending_on("a").depending_on("b"),
        ]);
        let result = sort(&arch);
        assert_eq!(result.levels.len(), 3);
        assert_eq!(result.levels[1], vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn duplicated_edges_do_not_stall() {
        // "a" is both parent and dependency of "b".
        let arch = architecture(vec![resource("a"), resource("b").with_parent("a").depending_on("a")]);
        let result = sort(&arch);
        assert_eq!(result.order(), vec!["a", "b"]);
    }

    #[test]
    fn cycle_reports_every_unordered_resource() {
        let arch = architecture(vec![
            resource("root"),
            resource("a").depending_on("b"),
            resource("b").depending_on("a"),
            resource("downstream").depending_on("a"),
        ]);
        let result = sort(&arch);
        assert!(result.has_cycle);
        assert_eq!(result.order(), vec!["root"]);
        assert_eq!(result.cycle_info, vec!["a", "b", "downstream"]);
    }

    #[test]
    fn cycle_through_containment_and_dependency() {
        let arch = architecture(vec![
            resource("vpc").depending_on("web"),
            resource("web").with_parent("vpc"),
        ]);
        assert!(sort(&arch).has_cycle);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let arch = architecture(vec![resource("a").depending_on("ghost").with_parent("phantom")]);
        let result = sort(&arch);
        assert_eq!(result.order(), vec!["a"]);
    }

    #[test]
    fn sorted_resources_surface_cycles_as_errors() {
        let arch = architecture(vec![resource("a").depending_on("a")]);
        let err = get_sorted_resources(&arch).unwrap_err();
        assert!(matches!(err, StratumError::DependencyCycle { ref ids } if ids == &["a"]));
    }
}

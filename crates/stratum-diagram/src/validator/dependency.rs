//! Dependency edge checks. Dependencies must form a DAG on their own,
//! independently of containment.

use std::collections::BTreeMap;

use super::{IssueCode, ValidationIssue, ValidationResult, find_back_edge_targets};
use crate::graph::NormalizedGraph;

pub(super) fn check_dependency_edges(graph: &NormalizedGraph, result: &mut ValidationResult) {
    for edge in graph.dependency_edges() {
        if edge.source.is_empty() || edge.target.is_empty() {
            result.error(ValidationIssue::global(
                IssueCode::DependencyInvalidEndpoint,
                format!("dependency edge \"{}\" has an empty endpoint", edge.id),
            ));
            continue;
        }
        if edge.source == edge.target {
            result.error(ValidationIssue::at(
                IssueCode::DependencySelfLoop,
                &edge.source,
                format!("node \"{}\" depends on itself (edge \"{}\")", edge.source, edge.id),
            ));
            continue;
        }
        if let (Some(source), Some(target)) = (graph.node(&edge.source), graph.node(&edge.target)) {
            if source.is_container() && target.is_container() {
                result.warning(ValidationIssue::at(
                    IssueCode::DependencyNonResource,
                    &edge.source,
                    format!(
                        "dependency edge \"{}\" joins two containers (\"{}\" -> \"{}\")",
                        edge.id, edge.source, edge.target
                    ),
                ));
            }
        }
    }
}

/// Self-loops and unresolved endpoints are left to the edge checks.
pub(super) fn check_dependency_cycles(graph: &NormalizedGraph, result: &mut ValidationResult) {
    let mut adjacency: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for edge in graph.dependency_edges() {
        if edge.source != edge.target && graph.contains(&edge.source) && graph.contains(&edge.target) {
            adjacency
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }
    }

    for node_id in find_back_edge_targets(graph.nodes.keys().map(String::as_str), &adjacency) {
        tracing::debug!(node_id, "dependency cycle");
        result.error(ValidationIssue::at(
            IssueCode::DependencyCycle,
            node_id,
            format!("dependency cycle detected at node \"{node_id}\""),
        ));
    }
}

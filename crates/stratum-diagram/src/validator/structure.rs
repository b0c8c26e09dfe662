//! Referential integrity and containment shape.

use std::collections::BTreeMap;

use super::{IssueCode, ValidationIssue, ValidationResult, find_back_edge_targets};
use crate::graph::NormalizedGraph;

pub(super) fn check_missing_parents(graph: &NormalizedGraph, result: &mut ValidationResult) {
    for node in graph.nodes.values() {
        if let Some(parent) = &node.parent_id {
            if !graph.contains(parent) {
                result.error(ValidationIssue::at(
                    IssueCode::MissingParent,
                    &node.id,
                    format!("node \"{}\" references missing parent \"{parent}\"", node.id),
                ));
            }
        }
    }
}

/// Walks parent → children from every node, not only roots: a cycle can
/// leave no root to start from.
pub(super) fn check_containment_cycles(graph: &NormalizedGraph, result: &mut ValidationResult) {
    let tree = graph.build_tree();
    let adjacency: BTreeMap<&str, Vec<&str>> = tree
        .iter()
        .map(|(parent, children)| {
            (
                parent.as_str(),
                children.iter().map(String::as_str).collect(),
            )
        })
        .collect();

    for node_id in find_back_edge_targets(graph.nodes.keys().map(String::as_str), &adjacency) {
        tracing::debug!(node_id, "containment cycle");
        result.error(ValidationIssue::at(
            IssueCode::ContainmentCycle,
            node_id,
            format!("containment cycle detected at node \"{node_id}\""),
        ));
    }
}

pub(super) fn check_edge_references(graph: &NormalizedGraph, result: &mut ValidationResult) {
    for edge in &graph.edges {
        if !graph.contains(&edge.source) {
            result.error(ValidationIssue::global(
                IssueCode::InvalidEdgeSource,
                format!("edge \"{}\" source \"{}\" is not defined", edge.id, edge.source),
            ));
        }
        if !graph.contains(&edge.target) {
            result.error(ValidationIssue::global(
                IssueCode::InvalidEdgeTarget,
                format!("edge \"{}\" target \"{}\" is not defined", edge.id, edge.target),
            ));
        }
    }
}

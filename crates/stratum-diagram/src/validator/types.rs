//! Resource-type existence and region node checks.

use std::collections::BTreeSet;

use super::{IssueCode, ValidationIssue, ValidationResult};
use crate::graph::NormalizedGraph;

/// The region node is project-level and always known. An empty known set
/// means the provider has nothing registered, so no type is flagged.
pub(super) fn check_resource_types(
    graph: &NormalizedGraph,
    known: &BTreeSet<String>,
    result: &mut ValidationResult,
) {
    for node in graph.nodes.values() {
        if node.resource_type.trim().is_empty() {
            result.error(ValidationIssue::at(
                IssueCode::MissingResourceType,
                &node.id,
                format!("node \"{}\" has no resource type", node.id),
            ));
        } else if !known.is_empty() && !node.is_region() && !known.contains(&node.resource_type) {
            result.warning(ValidationIssue::at(
                IssueCode::UnknownResourceType,
                &node.id,
                format!(
                    "node \"{}\" has unknown resource type \"{}\"",
                    node.id, node.resource_type
                ),
            ));
        }
    }
}

/// An empty diagram is not asked for a region.
pub(super) fn check_region_nodes(graph: &NormalizedGraph, result: &mut ValidationResult) {
    if graph.is_empty() {
        return;
    }
    let regions = graph.region_nodes();
    match regions.as_slice() {
        [] => result.warning(ValidationIssue::global(
            IssueCode::NoRegionNode,
            "diagram has no region node; the region will be left empty",
        )),
        [_] => {}
        [honored, rest @ ..] => {
            for extra in rest {
                result.warning(ValidationIssue::at(
                    IssueCode::MultipleRegionNodes,
                    &extra.id,
                    format!(
                        "region node \"{}\" is ignored; only \"{}\" is honored",
                        extra.id, honored.id
                    ),
                ));
            }
        }
    }
}

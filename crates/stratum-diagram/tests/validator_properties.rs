//! Property tests for the validator's structural passes.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use stratum_diagram::validator::{IssueCode, ValidationOptions, validate};
use stratum_diagram::{Edge, Node, NormalizedGraph};

fn node_id(i: usize) -> String {
    format!("n{i:03}")
}

/// A forest: every node's parent has a smaller index, so no cycles.
fn forest() -> impl Strategy<Value = NormalizedGraph> {
    (1usize..40).prop_flat_map(|n| {
        proptest::collection::vec(proptest::option::of(any::<prop::sample::Index>()), n).prop_map(
            move |parents| {
                let mut graph = NormalizedGraph::new();
                for (i, parent) in parents.into_iter().enumerate() {
                    let mut node = Node::container(node_id(i), "vpc");
                    if let Some(idx) = parent.filter(|_| i > 0) {
                        node = node.with_parent(node_id(idx.index(i)));
                    }
                    graph.add_node(node);
                }
                graph
            },
        )
    })
}

proptest! {
    #[test]
    fn forests_have_no_containment_cycles(graph in forest()) {
        let result = validate(&graph, &ValidationOptions::default());
        prop_assert!(!result.has_error(IssueCode::ContainmentCycle));
        prop_assert!(!result.has_error(IssueCode::MissingParent));
    }

    #[test]
    fn parent_rings_are_detected(len in 2usize..20, extra in 0usize..10) {
        let mut graph = NormalizedGraph::new();
        for i in 0..len {
            graph.add_node(Node::container(node_id(i), "vpc").with_parent(node_id((i + 1) % len)));
        }
        // Trees hanging off the ring do not hide it.
        for j in 0..extra {
            graph.add_node(Node::resource(format!("leaf{j}"), "ec2").with_parent(node_id(j % len)));
        }
        let result = validate(&graph, &ValidationOptions::default());
        prop_assert!(result.has_error(IssueCode::ContainmentCycle));
        prop_assert!(!result.is_valid());
    }

    #[test]
    fn self_dependencies_always_flagged(id in "[a-z]{1,8}") {
        let graph = NormalizedGraph::new()
            .with_node(Node::resource(id.clone(), "ec2"))
            .with_edge(Edge::dependency(id.clone(), id));
        let result = validate(&graph, &ValidationOptions::default());
        prop_assert!(result.has_error(IssueCode::DependencySelfLoop));
    }

    #[test]
    fn forward_dependencies_are_acyclic(n in 2usize..30, pairs in proptest::collection::vec((0usize..30, 0usize..30), 0..60)) {
        let mut graph = NormalizedGraph::new();
        for i in 0..n {
            graph.add_node(Node::resource(node_id(i), "ec2"));
        }
        for (a, b) in pairs {
            let (a, b) = (a % n, b % n);
            if a < b {
                graph.add_edge(Edge::dependency(node_id(a), node_id(b)));
            }
        }
        let result = validate(&graph, &ValidationOptions::default());
        prop_assert!(!result.has_error(IssueCode::DependencyCycle));
    }
}

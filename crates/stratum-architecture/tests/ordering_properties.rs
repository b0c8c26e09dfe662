//! Property tests for mapping and provisioning order.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use stratum_architecture::domain::{Architecture, Resource, ResourceCategory, ResourceType};
use stratum_architecture::{map_diagram_to_architecture, sort};
use stratum_common::types::CloudProvider;
use stratum_diagram::{Edge, Node, NormalizedGraph};

fn id(i: usize) -> String {
    format!("r{i:03}")
}

fn resource(i: usize) -> Resource {
    let rt = ResourceType::regional("ec2", "EC2 Instance", ResourceCategory::Compute, "aws_instance");
    Resource::new(id(i), id(i), rt, CloudProvider::Aws, "us-east-1")
}

/// Dependencies always point at a lower index, so the result is a DAG.
fn acyclic() -> impl Strategy<Value = Architecture> {
    (1usize..30).prop_flat_map(|n| {
        proptest::collection::vec((0usize..30, 0usize..30), 0..60).prop_map(move |pairs| {
            let mut resources: Vec<Resource> = (0..n).map(resource).collect();
            for (a, b) in pairs {
                let (a, b) = (a % n, b % n);
                if a < b {
                    resources[b].depends_on.push(id(a));
                } else if b < a && resources[a].parent_id.is_none() {
                    resources[a].parent_id = Some(id(b));
                }
            }
            let mut arch = Architecture::new(CloudProvider::Aws, "us-east-1");
            arch.resources = resources;
            arch.derive_relationships();
            arch
        })
    })
}

proptest! {
    #[test]
    fn acyclic_order_respects_every_edge(arch in acyclic()) {
        let result = sort(&arch);
        prop_assert!(!result.has_cycle);
        prop_assert_eq!(result.resources.len(), arch.len());
        let levels: usize = result.levels.iter().map(Vec::len).sum();
        prop_assert_eq!(levels, arch.len());

        for resource in &arch.resources {
            let at = result.position(&resource.id).unwrap();
            for dep in &resource.depends_on {
                prop_assert!(result.position(dep).unwrap() < at);
            }
            if let Some(parent) = &resource.parent_id {
                prop_assert!(result.position(parent).unwrap() < at);
            }
        }
    }

    #[test]
    fn cycles_report_everything_left_over(arch in acyclic(), back in 0usize..30) {
        // Close a loop from the last resource back to an earlier one.
        let mut arch = arch;
        let n = arch.len();
        prop_assume!(n >= 2);
        let first = back % (n - 1);
        arch.resources[first].depends_on.push(id(n - 1));
        arch.resources[n - 1].depends_on.push(id(first));
        arch.derive_relationships();

        let result = sort(&arch);
        prop_assert!(result.has_cycle);
        prop_assert_eq!(result.resources.len() + result.cycle_info.len(), n);
        prop_assert!(result.cycle_info.contains(&id(first)));
        prop_assert!(result.cycle_info.contains(&id(n - 1)));
    }

    #[test]
    fn every_plain_node_becomes_a_resource(n in 0usize..25, visual in 0usize..5) {
        let mut graph = NormalizedGraph::new()
            .with_node(Node::container("region", "region").with_config("name", "eu-west-1"));
        for i in 0..n {
            graph.add_node(Node::resource(id(i), "ec2").with_parent("region"));
        }
        for j in 0..visual {
            graph.add_node(Node::resource(format!("sticky{j}"), "ec2").visual_only());
        }
        if n > 1 {
            graph.add_edge(Edge::dependency(id(1), id(0)));
        }

        let arch = map_diagram_to_architecture(&graph, CloudProvider::Aws).unwrap();
        prop_assert_eq!(arch.len(), n);
        prop_assert!(arch.resources.iter().all(|r| r.region == "eu-west-1"));
        prop_assert!(arch.resources.iter().all(|r| r.parent_id.is_none()));
        prop_assert!(!sort(&arch).has_cycle);
    }
}

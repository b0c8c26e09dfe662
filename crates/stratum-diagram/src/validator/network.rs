//! VPC and subnet CIDR checks.

use std::collections::BTreeMap;

use serde_json::Value;
use stratum_common::constants::{CIDR_BLOCK_KEY, CIDR_KEY, SUBNET_TYPE, VPC_TYPE};

use super::{IssueCode, ValidationIssue, ValidationResult};
use crate::cidr::Ipv4Cidr;
use crate::graph::{Node, NormalizedGraph};

/// Reads a node's CIDR. `None` when unset; a malformed value is reported
/// and also yields `None`.
fn node_cidr(node: &Node, result: &mut ValidationResult) -> Option<Ipv4Cidr> {
    let raw = node
        .config
        .get(CIDR_KEY)
        .filter(|v| !v.is_null())
        .or_else(|| node.config.get(CIDR_BLOCK_KEY))?;
    let parsed = match raw {
        Value::Null => return None,
        Value::String(s) => Ipv4Cidr::new(s).map_err(|e| e.to_string()),
        other => Err(format!("expected a string, got {other}")),
    };
    match parsed {
        Ok(cidr) => Some(cidr),
        Err(reason) => {
            result.error(ValidationIssue::at(
                IssueCode::CidrInvalid,
                &node.id,
                format!("{} \"{}\" has an invalid CIDR: {reason}", node.resource_type, node.id),
            ));
            None
        }
    }
}

pub(super) fn check_cidrs(graph: &NormalizedGraph, result: &mut ValidationResult) {
    let mut vpcs: BTreeMap<&str, Option<Ipv4Cidr>> = BTreeMap::new();
    for node in graph.nodes.values().filter(|n| n.resource_type == VPC_TYPE) {
        let _ = vpcs.insert(node.id.as_str(), node_cidr(node, result));
    }

    // Subnets per VPC, in id order, for the sibling overlap check.
    let mut siblings: BTreeMap<&str, Vec<(&str, Ipv4Cidr)>> = BTreeMap::new();

    for subnet in graph.nodes.values().filter(|n| n.resource_type == SUBNET_TYPE) {
        let Some(subnet_cidr) = node_cidr(subnet, result) else {
            continue;
        };
        let Some(vpc_id) = subnet.parent_id.as_deref() else {
            continue;
        };
        let Some(vpc_cidr) = vpcs.get(vpc_id) else {
            continue;
        };

        if let Some(vpc_cidr) = vpc_cidr {
            if !vpc_cidr.contains(&subnet_cidr) {
                result.error(ValidationIssue::at(
                    IssueCode::CidrOutsideVpc,
                    &subnet.id,
                    format!(
                        "subnet \"{}\" range {subnet_cidr} is outside VPC \"{vpc_id}\" range {vpc_cidr}",
                        subnet.id
                    ),
                ));
            }
        }
        siblings
            .entry(vpc_id)
            .or_default()
            .push((subnet.id.as_str(), subnet_cidr));
    }

    for (vpc_id, subnets) in &siblings {
        for (i, (a_id, a)) in subnets.iter().enumerate() {
            for (b_id, b) in &subnets[i + 1..] {
                if a.overlaps(b) {
                    result.error(ValidationIssue::at(
                        IssueCode::CidrOverlap,
                        *b_id,
                        format!(
                            "subnet \"{b_id}\" range {b} overlaps subnet \"{a_id}\" range {a} in VPC \"{vpc_id}\""
                        ),
                    ));
                }
            }
        }
    }
}

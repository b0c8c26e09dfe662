//! End-to-end compilation of diagram files.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::Write;

use pretty_assertions::assert_eq;
use stratum_common::config::CompileConfig;
use stratum_common::error::StratumError;
use stratum_common::types::CloudProvider;
use stratum_diagram::IssueCode;
use stratum_sdk::{CompileError, Compiler, load_graph};

const WEB_STACK: &str = r#"{
  "nodes": {
    "region": { "id": "region", "kind": "container", "resourceType": "region", "config": { "name": "eu-west-1" } },
    "vpc": { "id": "vpc", "kind": "container", "resourceType": "vpc", "parentId": "region", "label": "Main VPC",
             "config": { "cidr": "10.0.0.0/16" } },
    "public": { "id": "public", "kind": "container", "resourceType": "subnet", "parentId": "vpc",
                "config": { "cidr": "10.0.1.0/24" } },
    "private": { "id": "private", "kind": "container", "resourceType": "subnet", "parentId": "vpc",
                 "config": { "cidr": "10.0.2.0/24" } },
    "web": { "id": "web", "kind": "resource", "resourceType": "aws_instance", "parentId": "public",
             "config": { "instance_type": "t3.micro" }, "position": { "x": 120, "y": 80 } },
    "db": { "id": "db", "kind": "resource", "resourceType": "rds", "parentId": "private",
            "config": { "engine": "postgres" } },
    "legend": { "id": "legend", "kind": "resource", "resourceType": "ec2", "isVisualOnly": true,
                "config": { "instance_type": "t3.micro" } }
  },
  "edges": [
    { "id": "e1", "source": "web", "target": "db", "kind": "dependency" },
    { "id": "e2", "source": "web", "target": "legend", "kind": "dependency" }
  ],
  "variables": [ { "name": "env", "type": "string", "default": "prod" } ],
  "outputs": [ { "name": "web_ip", "value": "aws_instance.web.public_ip" } ]
}"#;

fn write_diagram(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write diagram");
    file
}

#[test]
fn compiles_web_stack_from_file() {
    let file = write_diagram(WEB_STACK);
    let compilation = Compiler::new(CompileConfig::default())
        .compile_file(file.path())
        .expect("compile");

    let arch = &compilation.architecture;
    assert_eq!(arch.region, "eu-west-1");
    assert_eq!(arch.provider, CloudProvider::Aws);
    assert_eq!(arch.len(), 5);
    assert!(arch.resource("legend").is_none());
    assert!(arch.resource("region").is_none());

    let web = arch.resource("web").expect("web");
    assert_eq!(web.resource_type.id, "ec2");
    assert_eq!(web.parent_id.as_deref(), Some("public"));
    assert_eq!(web.depends_on, vec!["db".to_string()]);
    assert_eq!(arch.resource("vpc").expect("vpc").name, "Main VPC");
    assert_eq!(arch.resource("vpc").expect("vpc").parent_id, None);
    assert_eq!(arch.variables.len(), 1);
    assert_eq!(arch.outputs.len(), 1);

    let order = &compilation.order;
    assert_eq!(
        order.levels,
        vec![
            vec!["vpc".to_string()],
            vec!["private".to_string(), "public".to_string()],
            vec!["db".to_string()],
            vec!["web".to_string()],
        ]
    );
    assert_eq!(order.order(), vec!["vpc", "private", "public", "db", "web"]);
    // `aws_instance` is a mapper alias the registry does not list.
    assert!(compilation.validation.has_warning(IssueCode::UnknownResourceType));
}

#[test]
fn overlapping_subnets_block_compilation() {
    let diagram = WEB_STACK.replace("10.0.2.0/24", "10.0.1.128/25");
    let graph = load_graph(write_diagram(&diagram).path()).expect("load");
    let err = Compiler::new(CompileConfig::default()).compile(&graph).unwrap_err();
    let CompileError::Invalid(result) = err else {
        unreachable!("overlap is a validation error");
    };
    assert!(result.has_error(IssueCode::CidrOverlap));
    // Reported once, on the sibling that sorts later.
    assert_eq!(result.issues_for("public").count(), 1);
    assert_eq!(result.issues_for("private").count(), 0);
}

#[test]
fn compilation_report_serializes() {
    let file = write_diagram(WEB_STACK);
    let compilation = Compiler::new(CompileConfig::default())
        .compile_file(file.path())
        .expect("compile");
    let json = serde_json::to_value(&compilation).expect("serialize");

    assert_eq!(json["validation"]["valid"], true);
    assert_eq!(json["validation"]["warnings"][0]["code"], "UNKNOWN_RESOURCE_TYPE");
    assert_eq!(json["order"]["hasCycle"], serde_json::Value::Null);
    assert_eq!(json["order"]["has_cycle"], false);
    assert!(json["compiled_at"].is_string());
}

#[test]
fn null_document_is_rejected_before_validation() {
    let file = write_diagram("null");
    let err = Compiler::new(CompileConfig::default())
        .compile_file(file.path())
        .unwrap_err();
    assert!(matches!(err, CompileError::Stratum(StratumError::MissingInput { .. })));
}

#[test]
fn config_file_selects_provider() {
    let mut config_file = tempfile::NamedTempFile::new().expect("temp file");
    config_file
        .write_all(br#"{ "provider": "gcp", "schema_validation": false }"#)
        .expect("write config");
    let config = CompileConfig::load(config_file.path()).expect("config");

    let diagram = r#"{ "nodes": {
        "region": { "id": "region", "kind": "container", "resourceType": "region" },
        "net": { "id": "net", "kind": "container", "resourceType": "vpc" },
        "vm": { "id": "vm", "kind": "resource", "resourceType": "compute_instance", "parentId": "net" }
    } }"#;
    let compilation = Compiler::new(config)
        .compile_file(write_diagram(diagram).path())
        .expect("compile");
    assert_eq!(compilation.architecture.provider, CloudProvider::Gcp);
    assert_eq!(
        compilation.architecture.resource("net").expect("net").resource_type.kind,
        "google_compute_network"
    );
    assert_eq!(compilation.order.order(), vec!["net", "vm"]);
}

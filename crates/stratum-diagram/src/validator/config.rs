//! Schema-driven configuration and containment checks.
//!
//! Only declared fields are validated; undeclared keys pass through.

use serde_json::Value;
use stratum_common::types::CloudProvider;

use super::{IssueCode, ValidationIssue, ValidationResult};
use crate::cidr::Ipv4Cidr;
use crate::graph::{Node, NormalizedGraph};
use crate::schema::{FieldConstraints, FieldSpec, FieldType, SchemaRegistry, compiled_pattern};

pub(super) fn check_node_configs(
    graph: &NormalizedGraph,
    registry: &SchemaRegistry,
    provider: CloudProvider,
    result: &mut ValidationResult,
) {
    for node in graph.nodes.values() {
        let Some(schema) = registry.get(&node.resource_type, provider.as_str()) else {
            continue;
        };
        for field in &schema.fields {
            check_field(node, field, result);
        }
    }
}

fn check_field(node: &Node, field: &FieldSpec, result: &mut ValidationResult) {
    let Some((key, value)) = field.lookup(&node.config) else {
        if field.required {
            result.error(ValidationIssue::at(
                IssueCode::ConfigMissingField,
                &node.id,
                format!("required field \"{}\" is missing", field.name),
            ));
        }
        return;
    };

    if !field.field_type.matches(value) {
        result.error(ValidationIssue::at(
            IssueCode::ConfigInvalidType,
            &node.id,
            format!(
                "field \"{key}\" must be of type {}, got {}",
                field.field_type.as_str(),
                json_type_name(value)
            ),
        ));
        return;
    }

    if field.field_type == FieldType::Cidr {
        if let Some(Err(e)) = value.as_str().map(Ipv4Cidr::new) {
            result.error(ValidationIssue::at(
                IssueCode::ConfigInvalidCidr,
                &node.id,
                format!("field \"{key}\": {e}"),
            ));
            return;
        }
    }

    for violation in constraint_violations(value, &field.constraints) {
        result.error(ValidationIssue::at(
            IssueCode::ConfigConstraintViolation,
            &node.id,
            format!("field \"{key}\" {violation}"),
        ));
    }
}

fn constraint_violations(value: &Value, constraints: &FieldConstraints) -> Vec<String> {
    let mut violations = Vec::new();

    let length = match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    };
    if let Some(len) = length {
        if let Some(min) = constraints.min_length {
            if len < min {
                violations.push(format!("has length {len}, below minimum {min}"));
            }
        }
        if let Some(max) = constraints.max_length {
            if len > max {
                violations.push(format!("has length {len}, above maximum {max}"));
            }
        }
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = constraints.min {
            if n < min {
                violations.push(format!("is {n}, below minimum {min}"));
            }
        }
        if let Some(max) = constraints.max {
            if n > max {
                violations.push(format!("is {n}, above maximum {max}"));
            }
        }
    }

    if !constraints.enum_values.is_empty() && !constraints.enum_values.contains(value) {
        let allowed: Vec<String> = constraints.enum_values.iter().map(Value::to_string).collect();
        violations.push(format!("is {value}, expected one of [{}]", allowed.join(", ")));
    }

    if let Some(s) = value.as_str() {
        if let Some(prefix) = &constraints.prefix {
            if !s.starts_with(prefix.as_str()) {
                violations.push(format!("must start with \"{prefix}\""));
            }
        }
        if let Some(pattern) = &constraints.pattern {
            // Invalid patterns are rejected at registration.
            if let Some(re) = compiled_pattern(pattern) {
                if !re.is_match(s) {
                    violations.push(format!("does not match pattern {pattern}"));
                }
            }
        }
    }

    violations
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Advisory only: provider models do not list every legal placement.
pub(super) fn check_containment_types(
    graph: &NormalizedGraph,
    registry: &SchemaRegistry,
    provider: CloudProvider,
    result: &mut ValidationResult,
) {
    for node in graph.nodes.values() {
        let Some(parent) = graph.parent(&node.id) else {
            continue;
        };
        let Some(schema) = registry.get(&node.resource_type, provider.as_str()) else {
            continue;
        };
        if schema.valid_parent_types.is_empty()
            || schema.valid_parent_types.contains(&parent.resource_type)
        {
            continue;
        }
        result.warning(ValidationIssue::at(
            IssueCode::InvalidContainment,
            &node.id,
            format!(
                "{} \"{}\" cannot be placed inside {} \"{}\" (allowed parents: {})",
                node.resource_type,
                node.id,
                parent.resource_type,
                parent.id,
                schema.valid_parent_types.join(", ")
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::ResourceSchema;

    fn registry() -> SchemaRegistry {
        let registry = SchemaRegistry::new();
        registry
            .register(
                ResourceSchema::new("aws", "bucket")
                    .field(
                        FieldSpec::required("name", FieldType::String)
                            .length(Some(3), Some(8))
                            .pattern("^[a-z]+$")
                            .alias("bucket_name"),
                    )
                    .field(FieldSpec::optional("size", FieldType::Integer).range(Some(1.0), Some(10.0)))
                    .field(FieldSpec::optional("tier", FieldType::String).one_of(["hot", "cold"]))
                    .field(FieldSpec::optional("arn", FieldType::String).prefix("arn:"))
                    .field(FieldSpec::optional("range", FieldType::Cidr))
                    .parents(&["region"]),
            )
            .expect("register");
        registry
            .register(ResourceSchema::new("aws", "vpc"))
            .expect("register");
        registry
    }

    fn check(node: Node) -> ValidationResult {
        let graph = NormalizedGraph::new().with_node(node);
        let mut result = ValidationResult::new();
        check_node_configs(&graph, &registry(), CloudProvider::Aws, &mut result);
        result
    }

    fn codes(result: &ValidationResult) -> Vec<IssueCode> {
        result.errors.iter().map(|i| i.code).collect()
    }

    #[test]
    fn conforming_config_passes() {
        let result = check(
            Node::resource("b", "bucket")
                .with_config("name", "logs")
                .with_config("size", 5)
                .with_config("tier", "cold")
                .with_config("arn", "arn:aws:s3:::logs")
                .with_config("range", "10.0.0.0/8")
                .with_config("undeclared", json!({ "anything": true })),
        );
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn missing_and_null_required_fields() {
        assert_eq!(codes(&check(Node::resource("b", "bucket"))), vec![IssueCode::ConfigMissingField]);
        assert_eq!(
            codes(&check(Node::resource("b", "bucket").with_config("name", Value::Null))),
            vec![IssueCode::ConfigMissingField]
        );
    }

    #[test]
    fn alias_satisfies_required_field() {
        let result = check(Node::resource("b", "bucket").with_config("bucket_name", "logs"));
        assert!(result.is_valid(), "{:?}", result.errors);

        let result = check(
            Node::resource("b", "bucket")
                .with_config("name", Value::Null)
                .with_config("bucket_name", "logs"),
        );
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn aliased_value_is_checked_under_its_key() {
        let result = check(Node::resource("b", "bucket").with_config("bucket_name", "AB"));
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().all(|i| i.message.contains("\"bucket_name\"")));
    }

    #[test]
    fn wrong_type_skips_constraints() {
        let result = check(Node::resource("b", "bucket").with_config("name", 42));
        assert_eq!(codes(&result), vec![IssueCode::ConfigInvalidType]);
        assert!(result.errors[0].message.contains("got number"));
    }

    #[test]
    fn each_constraint_reports() {
        let result = check(
            Node::resource("b", "bucket")
                .with_config("name", "AB")
                .with_config("size", 11)
                .with_config("tier", "warm")
                .with_config("arn", "urn:x"),
        );
        // name: too short + pattern; size: max; tier: enum; arn: prefix.
        assert_eq!(result.errors.len(), 5);
        assert!(
            result
                .errors
                .iter()
                .all(|i| i.code == IssueCode::ConfigConstraintViolation)
        );
    }

    #[test]
    fn malformed_cidr_field() {
        let result = check(
            Node::resource("b", "bucket")
                .with_config("name", "logs")
                .with_config("range", "10.0.0.0/40"),
        );
        assert_eq!(codes(&result), vec![IssueCode::ConfigInvalidCidr]);
    }

    #[test]
    fn other_provider_schemas_do_not_apply() {
        let graph = NormalizedGraph::new().with_node(Node::resource("b", "bucket"));
        let mut result = ValidationResult::new();
        check_node_configs(&graph, &registry(), CloudProvider::Gcp, &mut result);
        assert!(result.is_valid());
    }

    #[test]
    fn disallowed_parent_warns() {
        let graph = NormalizedGraph::new()
            .with_node(Node::container("vpc", "vpc"))
            .with_node(Node::resource("b", "bucket").with_parent("vpc"));
        let mut result = ValidationResult::new();
        check_containment_types(&graph, &registry(), CloudProvider::Aws, &mut result);
        assert!(result.is_valid());
        assert!(result.has_warning(IssueCode::InvalidContainment));
    }

    #[test]
    fn unrestricted_schema_accepts_any_parent() {
        let graph = NormalizedGraph::new()
            .with_node(Node::container("outer", "bucket"))
            .with_node(Node::container("inner", "vpc").with_parent("outer"));
        let mut result = ValidationResult::new();
        check_containment_types(&graph, &registry(), CloudProvider::Aws, &mut result);
        assert!(result.warnings.is_empty());
    }
}

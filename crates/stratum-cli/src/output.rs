//! Formatted output helpers for CLI commands.
//!
//! Provides consistent headings, issue listings, and schema field
//! summaries.

use serde::Serialize;
use stratum_diagram::schema::{FieldConstraints, FieldSpec};
use stratum_diagram::{ValidationIssue, ValidationResult};

/// A title underlined with double rules of the same width.
#[must_use]
pub fn heading(title: &str) -> String {
    format!("{title}\n{}", "\u{2550}".repeat(title.chars().count()))
}

/// Error and warning counts, e.g. "1 error(s), 2 warning(s)".
#[must_use]
pub fn summary_line(result: &ValidationResult) -> String {
    format!(
        "{} error(s), {} warning(s)",
        result.errors.len(),
        result.warnings.len()
    )
}

/// One issue line, indented, with its severity marker.
#[must_use]
pub fn format_issue(marker: char, issue: &ValidationIssue) -> String {
    format!("  {marker} {issue}")
}

/// Prints every error and warning, then the summary line.
pub fn print_validation(result: &ValidationResult) {
    for issue in &result.errors {
        println!("{}", format_issue('\u{2717}', issue));
    }
    for issue in &result.warnings {
        println!("{}", format_issue('!', issue));
    }
    if !result.errors.is_empty() || !result.warnings.is_empty() {
        println!();
    }
    println!("  {}", summary_line(result));
}

/// Pretty-prints a value as JSON on stdout.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Field summary, e.g. `instance_type: string (required) pattern=...`.
#[must_use]
pub fn format_field(field: &FieldSpec) -> String {
    let mut line = format!("{}: {}", field.name, field.field_type.as_str());
    if field.required {
        line.push_str(" (required)");
    }
    if !field.aliases.is_empty() {
        line.push_str(" aka ");
        line.push_str(&field.aliases.join(", "));
    }
    for constraint in describe_constraints(&field.constraints) {
        line.push(' ');
        line.push_str(&constraint);
    }
    line
}

fn describe_constraints(c: &FieldConstraints) -> Vec<String> {
    let mut parts = Vec::new();
    match (c.min_length, c.max_length) {
        (Some(min), Some(max)) => parts.push(format!("length={min}..{max}")),
        (Some(min), None) => parts.push(format!("length>={min}")),
        (None, Some(max)) => parts.push(format!("length<={max}")),
        (None, None) => {}
    }
    match (c.min, c.max) {
        (Some(min), Some(max)) => parts.push(format!("range={min}..{max}")),
        (Some(min), None) => parts.push(format!("min={min}")),
        (None, Some(max)) => parts.push(format!("max={max}")),
        (None, None) => {}
    }
    if !c.enum_values.is_empty() {
        let values: Vec<String> = c
            .enum_values
            .iter()
            .map(|v| v.as_str().map_or_else(|| v.to_string(), ToString::to_string))
            .collect();
        parts.push(format!("one of [{}]", values.join(", ")));
    }
    if let Some(prefix) = &c.prefix {
        parts.push(format!("prefix={prefix}"));
    }
    if let Some(pattern) = &c.pattern {
        parts.push(format!("pattern={pattern}"));
    }
    parts
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stratum_diagram::IssueCode;
    use stratum_diagram::schema::FieldType;

    use super::*;

    #[test]
    fn heading_underline_matches_width() {
        assert_eq!(heading("Plan"), "Plan\n\u{2550}\u{2550}\u{2550}\u{2550}");
    }

    #[test]
    fn summary_counts_both_severities() {
        let mut result = ValidationResult::new();
        result.error(ValidationIssue::global(IssueCode::ContainmentCycle, "loop"));
        result.warning(ValidationIssue::global(IssueCode::NoRegionNode, "none"));
        result.warning(ValidationIssue::global(IssueCode::NoRegionNode, "none"));
        assert_eq!(summary_line(&result), "1 error(s), 2 warning(s)");
    }

    #[test]
    fn issue_line_names_code_and_node() {
        let issue = ValidationIssue::at(IssueCode::MissingParent, "web", "parent \"vpc\" not found");
        assert_eq!(
            format_issue('!', &issue),
            "  ! [MISSING_PARENT] parent \"vpc\" not found (node web)"
        );
    }

    #[test]
    fn field_summary_lists_constraints() {
        let field = FieldSpec::required("engine", FieldType::String).one_of(["postgres", "mysql"]);
        assert_eq!(format_field(&field), "engine: string (required) one of [postgres, mysql]");

        let size = FieldSpec::optional("size", FieldType::Integer).range(Some(8.0), None);
        assert_eq!(format_field(&size), "size: integer min=8");

        let cidr = FieldSpec::required("cidr", FieldType::Cidr).alias("cidr_block");
        assert_eq!(format_field(&cidr), "cidr: cidr (required) aka cidr_block");
    }
}

//! # stratum-diagram
//!
//! The front half of the diagram compiler.
//!
//! Handles:
//! - **Graph**: The normalized node/edge graph produced from diagram JSON.
//! - **Schema**: Provider-scoped resource schemas and the process-wide registry.
//! - **Validator**: Structural, dependency, schema, and network checks that
//!   gate a diagram before it is mapped to an architecture.
//! - **Cidr**: IPv4 CIDR arithmetic used by the network checks.

pub mod cidr;
pub mod graph;
pub mod schema;
pub mod validator;

pub use graph::{Edge, EdgeKind, Node, NodeKind, NormalizedGraph, Position};
pub use schema::SchemaRegistry;
pub use validator::{IssueCode, ValidationIssue, ValidationOptions, ValidationResult, validate};

//! # stratum-architecture
//!
//! The back half of the diagram compiler.
//!
//! Handles:
//! - **Domain**: [`Architecture`](domain::Architecture), [`Resource`](domain::Resource),
//!   and the [`ResourceType`](domain::ResourceType) value object.
//! - **Mapper**: Translation of a validated diagram into an architecture, with
//!   provider-specific type resolvers and whole-diagram generators.
//! - **Sorter**: Kahn ordering over merged containment and dependency edges.

pub mod domain;
pub mod mapper;
pub mod sorter;

pub use domain::{Architecture, Resource, ResourceCategory, ResourceType};
pub use mapper::{ArchitectureMapper, map_diagram_to_architecture};
pub use sorter::{TopologicalSortResult, get_sorted_resources, sort};

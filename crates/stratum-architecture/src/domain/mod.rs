//! Architecture domain model.
//!
//! The mapper builds an [`Architecture`] fresh for every compilation and
//! hands it out immutable; editing a diagram means compiling again.

mod architecture;
mod resource;
mod resource_type;

pub use architecture::Architecture;
pub use resource::Resource;
pub use resource_type::{ResourceCategory, ResourceType};

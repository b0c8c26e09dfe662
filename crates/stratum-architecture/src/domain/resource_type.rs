//! Resource type value object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad grouping used by pricing and code generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    /// Networks, subnets, gateways, load balancers.
    Networking,
    /// Virtual machines and functions.
    Compute,
    /// Managed databases.
    Database,
    /// Object and block storage.
    Storage,
    /// Firewalls, security groups, identity.
    Security,
    /// CDN and edge services.
    Edge,
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Networking => "networking",
            Self::Compute => "compute",
            Self::Database => "database",
            Self::Storage => "storage",
            Self::Security => "security",
            Self::Edge => "edge",
        };
        f.write_str(name)
    }
}

/// A resolved, provider-specific resource type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceType {
    /// Canonical type id, e.g. `subnet`.
    pub id: String,
    /// Display name, e.g. `Subnet`.
    pub name: String,
    /// Broad grouping.
    pub category: ResourceCategory,
    /// Provider-native kind, e.g. `aws_subnet`.
    pub kind: String,
    /// Lives in a single region.
    pub is_regional: bool,
    /// Spans every region.
    pub is_global: bool,
}

impl ResourceType {
    /// Creates a regional resource type.
    #[must_use]
    pub fn regional(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ResourceCategory,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            kind: kind.into(),
            is_regional: true,
            is_global: false,
        }
    }

    /// Creates a global resource type.
    #[must_use]
    pub fn global(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ResourceCategory,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            is_regional: false,
            is_global: true,
            ..Self::regional(id, name, category, kind)
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

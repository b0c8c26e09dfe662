//! System-wide constants: well-known type tags and configuration keys.

/// Binary name for the CLI.
pub const BIN_NAME: &str = "strat";

/// IR type of the project-level region node.
pub const REGION_TYPE: &str = "region";

/// IR type of a virtual private network.
pub const VPC_TYPE: &str = "vpc";

/// IR type of a subnet.
pub const SUBNET_TYPE: &str = "subnet";

/// Configuration key holding a region's name.
pub const REGION_NAME_KEY: &str = "name";

/// Primary configuration key holding a network's CIDR block.
pub const CIDR_KEY: &str = "cidr";

/// Fallback configuration key holding a network's CIDR block.
pub const CIDR_BLOCK_KEY: &str = "cidr_block";

/// Resource metadata key for the diagram position.
pub const POSITION_KEY: &str = "position";

/// Resource metadata key for the visual-only flag.
pub const VISUAL_ONLY_KEY: &str = "is_visual_only";

/// Default diagram file name read by the CLI.
pub const DEFAULT_DIAGRAM_FILE: &str = "diagram.json";

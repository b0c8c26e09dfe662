//! IPv4 CIDR blocks.
//!
//! Containment is numeric: a block contains another when it contains both
//! the other's network address and its last (broadcast) address.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

/// CIDR parse error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// No `/prefix` part.
    #[error("missing prefix length in \"{0}\"")]
    MissingPrefix(String),

    /// The address part is not a dotted-quad IPv4 address.
    #[error("invalid IPv4 address: \"{0}\"")]
    InvalidAddress(String),

    /// The prefix is not a number in 0..=32.
    #[error("invalid prefix length: \"{0}\" (must be 0-32)")]
    InvalidPrefix(String),
}

/// An IPv4 network in CIDR notation.
///
/// Host bits in the written address are tolerated; the block is the one the
/// prefix selects.
///
/// ```rust
/// use stratum_diagram::cidr::Ipv4Cidr;
///
/// let vpc: Ipv4Cidr = "10.0.0.0/16".parse().unwrap();
/// let subnet: Ipv4Cidr = "10.0.1.0/24".parse().unwrap();
/// assert!(vpc.contains(&subnet));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Cidr {
    address: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Cidr {
    /// Parses `a.b.c.d/n`.
    ///
    /// # Errors
    ///
    /// Returns a [`CidrError`] if the prefix is absent or out of range, or
    /// the address is malformed.
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, CidrError> {
        let cidr = cidr.as_ref().trim();
        let (addr_str, prefix_str) = cidr
            .split_once('/')
            .ok_or_else(|| CidrError::MissingPrefix(cidr.to_string()))?;

        let address = Ipv4Addr::from_str(addr_str)
            .map_err(|_| CidrError::InvalidAddress(addr_str.to_string()))?;

        // `u8::from_str` accepts a leading '+'.
        if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CidrError::InvalidPrefix(prefix_str.to_string()));
        }
        let prefix = prefix_str
            .parse::<u8>()
            .ok()
            .filter(|p| *p <= 32)
            .ok_or_else(|| CidrError::InvalidPrefix(prefix_str.to_string()))?;

        Ok(Self { address, prefix })
    }

    /// Prefix length.
    #[must_use]
    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    const fn mask(&self) -> u32 {
        if self.prefix == 0 {
            0
        } else {
            u32::MAX << (32 - self.prefix)
        }
    }

    /// First address of the block.
    #[must_use]
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.address) & self.mask())
    }

    /// Last address of the block: the network with every host bit set.
    #[must_use]
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network()) | !self.mask())
    }

    /// Returns `true` if `addr` falls inside this block.
    #[must_use]
    pub fn contains_addr(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & self.mask() == u32::from(self.network())
    }

    /// Returns `true` if `other` lies entirely inside this block.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.contains_addr(other.network()) && self.contains_addr(other.broadcast())
    }

    /// Returns `true` if the two blocks share any address.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.contains_addr(other.network()) || other.contains_addr(self.network())
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

impl FromStr for Ipv4Cidr {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidr(s: &str) -> Ipv4Cidr {
        s.parse().expect("valid cidr")
    }

    #[test]
    fn network_and_broadcast() {
        let block = cidr("10.0.1.77/24");
        assert_eq!(block.network(), Ipv4Addr::new(10, 0, 1, 0));
        assert_eq!(block.broadcast(), Ipv4Addr::new(10, 0, 1, 255));
    }

    #[test]
    fn zero_prefix_covers_everything() {
        let all = cidr("0.0.0.0/0");
        assert!(all.contains(&cidr("192.168.0.0/16")));
        assert_eq!(all.broadcast(), Ipv4Addr::BROADCAST);
    }

    #[test]
    fn host_route_contains_itself() {
        let host = cidr("10.0.0.5/32");
        assert!(host.contains(&host));
        assert!(!host.contains(&cidr("10.0.0.4/31")));
    }

    #[test]
    fn containment_needs_both_ends() {
        let vpc = cidr("10.0.0.0/16");
        assert!(vpc.contains(&cidr("10.0.1.0/24")));
        assert!(!vpc.contains(&cidr("11.0.0.0/24")));
        assert!(!vpc.contains(&cidr("10.0.0.0/8")));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = cidr("10.0.1.0/24");
        let b = cidr("10.0.1.128/25");
        let c = cidr("10.0.2.0/24");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            Ipv4Cidr::new("10.0.0.0"),
            Err(CidrError::MissingPrefix("10.0.0.0".into()))
        );
        assert!(matches!(
            Ipv4Cidr::new("10.0.0/16"),
            Err(CidrError::InvalidAddress(_))
        ));
        assert!(matches!(
            Ipv4Cidr::new("10.0.0.0/33"),
            Err(CidrError::InvalidPrefix(_))
        ));
        assert!(matches!(
            Ipv4Cidr::new("10.0.0.0/x"),
            Err(CidrError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn prefix_must_be_plain_digits() {
        for bad in ["10.0.0.0/+8", "10.0.0.0/", "10.0.0.0/ 8", "10.0.0.0/-0"] {
            assert!(
                matches!(Ipv4Cidr::new(bad), Err(CidrError::InvalidPrefix(_))),
                "{bad} should be rejected"
            );
        }
        assert_eq!(cidr("10.0.0.0/08").prefix(), 8);
    }

    #[test]
    fn display_keeps_written_address() {
        assert_eq!(cidr("10.0.1.5/24").to_string(), "10.0.1.5/24");
    }
}

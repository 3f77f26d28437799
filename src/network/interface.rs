//! Core types for interface snapshots.

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

/// Opaque, stable OS-assigned handle for one adapter.
///
/// On Windows this wraps the interface LUID. It is the authoritative key
/// for every mutating call; the display name is only a lookup key and may
/// collide across adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InterfaceId(pub u64);

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A value snapshot of one network adapter at enumeration time.
///
/// Snapshots are immutable once built and are never cached across user
/// actions: every load and every apply performs its own enumeration so
/// that stale identities are not acted upon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    /// Friendly display name (e.g. "Ethernet", "Wi-Fi"). Unique in
    /// practice but not guaranteed unique by the OS.
    pub name: String,
    /// Vendor/driver description, informational only.
    pub description: String,
    /// All IPv4 unicast addresses assigned to this adapter.
    pub ip_addresses: Vec<Ipv4Addr>,
    /// Prefix length of the last-seen unicast address. Adapters with
    /// multiple addresses only retain one prefix length; known
    /// limitation.
    pub subnet_prefix_length: u8,
    /// IPv4 gateway addresses.
    pub gateways: Vec<Ipv4Addr>,
    /// IPv4 DNS server addresses.
    pub dns_servers: Vec<Ipv4Addr>,
    /// Connection-specific DNS suffix.
    pub dns_suffix: String,
    /// Current IPv4 route metric.
    pub metric: u32,
    /// When true the OS computes the metric itself and ignores an
    /// explicitly set value until the flag is cleared.
    pub automatic_metric: bool,
    /// Operational status (up vs. anything else).
    pub connected: bool,
    /// Stable handle used for all mutating calls.
    pub id: InterfaceId,
}

impl Interface {
    /// Returns true if this adapter has at least one IPv4 address.
    #[must_use]
    pub fn has_addresses(&self) -> bool {
        !self.ip_addresses.is_empty()
    }
}

//! Provider trait and error types for OS adapter/routing access.

use std::net::Ipv4Addr;

use thiserror::Error;

use super::InterfaceId;

/// Error type for snapshot enumeration.
///
/// Enumeration is all-or-nothing: any failure during the base query or a
/// per-adapter routing-row fetch aborts the whole call. Partial interface
/// sets are never returned.
#[derive(Debug, Error)]
pub enum EnumerationError {
    /// The OS would not settle on a buffer size for the adapter table.
    #[error("Cannot allocate adapter table buffer ({size} bytes requested)")]
    Allocation {
        /// Last size the OS asked for.
        size: u32,
    },

    /// The base adapter query failed.
    #[cfg(windows)]
    #[error("Cannot get adapter addresses: {0}")]
    AdapterQuery(#[source] windows::core::Error),

    /// The per-adapter routing-row fetch failed.
    #[cfg(windows)]
    #[error("Cannot read routing row for '{name}': {source}")]
    RoutingRow {
        /// Display name of the adapter whose row could not be read.
        name: String,
        #[source]
        source: windows::core::Error,
    },

    /// Platform-specific failure with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Description of the failure.
        message: String,
    },
}

/// Error type for a single metric write.
///
/// Carries the OS-native error text. One failed write never aborts the
/// remaining names in a reconciliation pass.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Re-reading the routing row before mutation failed.
    #[cfg(windows)]
    #[error("Cannot read routing row for interface {id}: {source}")]
    RowRead {
        /// Target interface.
        id: InterfaceId,
        #[source]
        source: windows::core::Error,
    },

    /// Writing the modified routing row back failed.
    #[cfg(windows)]
    #[error("Cannot update metric for interface {id}: {source}")]
    RowWrite {
        /// Target interface.
        id: InterfaceId,
        #[source]
        source: windows::core::Error,
    },

    /// Platform-specific failure with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Description of the failure.
        message: String,
    },
}

/// One IPv4 unicast address with its on-link prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawUnicast {
    /// The assigned address.
    pub address: Ipv4Addr,
    /// On-link prefix length reported for this address.
    pub prefix_length: u8,
}

/// Raw adapter record as returned by the OS, before snapshot building.
///
/// Field layout mirrors what `GetAdaptersAddresses` plus the per-adapter
/// routing row yield, kept OS-agnostic so the snapshot builder and the
/// reconciler can be exercised with fake providers in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAdapter {
    /// Friendly display name.
    pub name: String,
    /// Driver description.
    pub description: String,
    /// Connection-specific DNS suffix.
    pub dns_suffix: String,
    /// Whether the operational status is "up".
    pub oper_up: bool,
    /// IPv4 unicast addresses in OS order.
    pub unicast: Vec<RawUnicast>,
    /// IPv4 gateway addresses in OS order.
    pub gateways: Vec<Ipv4Addr>,
    /// IPv4 DNS servers in OS order.
    pub dns_servers: Vec<Ipv4Addr>,
    /// Current IPv4 route metric from the routing row.
    pub metric: u32,
    /// Whether the OS computes the metric itself.
    pub automatic_metric: bool,
    /// Stable handle for mutation.
    pub id: InterfaceId,
}

/// Capability boundary to the OS adapter and routing facilities.
///
/// This is the only seam that performs privileged, platform-specific I/O.
/// Core logic takes an implementation by reference, so tests inject fakes
/// and never need real elevated privileges.
pub trait NetworkProvider {
    /// Queries the host for all IPv4-capable adapters together with each
    /// adapter's current routing row.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if the base query or any per-adapter
    /// routing-row fetch fails. No partial result is returned.
    fn enumerate(&self) -> Result<Vec<RawAdapter>, EnumerationError>;

    /// Sets the IPv4 route metric for one adapter.
    ///
    /// Implementations must re-read the current routing row for `id`
    /// rather than reuse a previously fetched copy: the OS mutation call
    /// requires a freshly fetched row as its base. When `clear_automatic`
    /// is true the automatic-metric flag is cleared in the same write.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError`] if either the read-back or the write-back
    /// fails.
    fn set_metric(
        &self,
        id: InterfaceId,
        metric: u32,
        clear_automatic: bool,
    ) -> Result<(), UpdateError>;
}

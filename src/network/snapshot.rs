//! Snapshot building: raw adapter records into owned [`Interface`] values.

use super::provider::{EnumerationError, NetworkProvider, RawAdapter};
use super::{Interface, InterfaceId};

/// Enumerates the live adapter set and builds a fresh snapshot.
///
/// A new snapshot is constructed on every call; nothing is cached. Callers
/// that mutate afterwards must enumerate again rather than reuse an old
/// snapshot, since OS state may have changed in between.
///
/// # Errors
///
/// Returns [`EnumerationError`] when the provider cannot produce the full
/// adapter set. No partial snapshot is ever returned.
pub fn enumerate_interfaces<P: NetworkProvider + ?Sized>(
    provider: &P,
) -> Result<Vec<Interface>, EnumerationError> {
    let raw = provider.enumerate()?;
    tracing::debug!("Enumerated {} adapter record(s)", raw.len());
    Ok(raw.into_iter().map(build_interface).collect())
}

/// Maps one raw adapter record into an [`Interface`] value.
///
/// Unicast addresses are collected in OS order; the prefix length of the
/// last address visited wins, so multi-address adapters only retain one
/// prefix length. Known limitation.
fn build_interface(raw: RawAdapter) -> Interface {
    let mut subnet_prefix_length = 0;
    let mut ip_addresses = Vec::with_capacity(raw.unicast.len());

    for entry in &raw.unicast {
        ip_addresses.push(entry.address);
        subnet_prefix_length = entry.prefix_length;
    }

    Interface {
        name: raw.name,
        description: raw.description,
        ip_addresses,
        subnet_prefix_length,
        gateways: raw.gateways,
        dns_servers: raw.dns_servers,
        dns_suffix: raw.dns_suffix,
        metric: raw.metric,
        automatic_metric: raw.automatic_metric,
        connected: raw.oper_up,
        id: raw.id,
    }
}

/// Searches a snapshot for the first interface whose name compares
/// byte-exact equal to `name`.
///
/// UTF-8 comparison, case-sensitive, no normalization. When two live
/// interfaces share a name the first in enumeration order wins; accepted
/// ambiguity, the display name is not a reliable key.
#[must_use]
pub fn find_by_name<'a>(interfaces: &'a [Interface], name: &str) -> Option<&'a Interface> {
    interfaces.iter().find(|itf| itf.name == name)
}

/// Convenience lookup returning only the stable handle.
#[must_use]
pub fn id_by_name(interfaces: &[Interface], name: &str) -> Option<InterfaceId> {
    find_by_name(interfaces, name).map(|itf| itf.id)
}

//! Windows provider built on `GetAdaptersAddresses` and the IP interface
//! table (`GetIpInterfaceEntry` / `SetIpInterfaceEntry`).

use std::net::Ipv4Addr;

use windows::Win32::Foundation::{BOOLEAN, ERROR_BUFFER_OVERFLOW, ERROR_NO_DATA, NO_ERROR, WIN32_ERROR};
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_INCLUDE_GATEWAYS, GAA_FLAG_INCLUDE_PREFIX, GAA_FLAG_INCLUDE_WINS_INFO,
    GetAdaptersAddresses, GetIpInterfaceEntry, IP_ADAPTER_ADDRESSES_LH, MIB_IPINTERFACE_ROW,
    SetIpInterfaceEntry,
};
use windows::Win32::NetworkManagement::Ndis::{IfOperStatusUp, NET_LUID_LH};
use windows::Win32::Networking::WinSock::{AF_INET, SOCKADDR, SOCKADDR_IN};

use crate::network::InterfaceId;
use crate::network::provider::{
    EnumerationError, NetworkProvider, RawAdapter, RawUnicast, UpdateError,
};

/// Windows implementation of [`NetworkProvider`].
///
/// Enumeration restricts the address family to IPv4 and asks for gateways,
/// prefixes and WINS info so the snapshot carries the full IP
/// configuration. Mutation goes through the IP interface table, keyed by
/// the adapter LUID.
#[derive(Debug, Clone, Default)]
pub struct WindowsProvider {
    _private: (),
}

impl WindowsProvider {
    /// Creates a new Windows provider.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl NetworkProvider for WindowsProvider {
    fn enumerate(&self) -> Result<Vec<RawAdapter>, EnumerationError> {
        match query_adapter_table()? {
            Some(buffer) => walk_adapter_table(&buffer),
            None => Ok(Vec::new()),
        }
    }

    fn set_metric(
        &self,
        id: InterfaceId,
        metric: u32,
        clear_automatic: bool,
    ) -> Result<(), UpdateError> {
        // The mutation call requires a freshly fetched row as its base;
        // reusing the row from enumeration would write stale fields back.
        let mut row =
            read_routing_row(id).map_err(|source| UpdateError::RowRead { id, source })?;

        if clear_automatic {
            row.UseAutomaticMetric = BOOLEAN::from(false);
        }
        row.Metric = metric;
        // The row reads back with a site prefix length SetIpInterfaceEntry
        // rejects for IPv4 (anything above 32 is illegal there).
        row.SitePrefixLength = 32;

        // SAFETY: `row` is a valid, freshly fetched MIB_IPINTERFACE_ROW.
        unsafe { SetIpInterfaceEntry(&mut row) }
            .ok()
            .map_err(|source| UpdateError::RowWrite { id, source })
    }
}

/// Calls `GetAdaptersAddresses` with the two-step pattern: size query
/// first, then fill. One extra growth round covers an adapter appearing
/// between the two calls.
///
/// Returns `None` when the host reports no IPv4-capable adapters at all.
fn query_adapter_table() -> Result<Option<Vec<u8>>, EnumerationError> {
    let flags = GAA_FLAG_INCLUDE_GATEWAYS | GAA_FLAG_INCLUDE_PREFIX | GAA_FLAG_INCLUDE_WINS_INFO;
    let family = u32::from(AF_INET.0);

    let mut size = 0u32;
    // SAFETY: sizing call with no buffer; the API writes the required
    // length into `size`.
    let sizing = unsafe { GetAdaptersAddresses(family, flags, None, None, &raw mut size) };
    if sizing == ERROR_NO_DATA.0 {
        return Ok(None);
    }

    for _ in 0..2 {
        let mut buffer = vec![0u8; size as usize];
        // SAFETY: `buffer` is valid for `size` bytes; the API fills it and
        // updates `size` on overflow.
        let result = unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut size,
            )
        };

        if result == NO_ERROR.0 {
            return Ok(Some(buffer));
        }
        if result == ERROR_NO_DATA.0 {
            return Ok(None);
        }
        if result != ERROR_BUFFER_OVERFLOW.0 {
            return Err(EnumerationError::AdapterQuery(windows::core::Error::from(
                WIN32_ERROR(result),
            )));
        }
    }

    Err(EnumerationError::Allocation { size })
}

/// Walks the linked adapter list inside a `GetAdaptersAddresses` buffer.
fn walk_adapter_table(buffer: &[u8]) -> Result<Vec<RawAdapter>, EnumerationError> {
    // `as_ptr()` on an empty Vec is dangling, never dereference it.
    if buffer.is_empty() {
        return Ok(Vec::new());
    }

    let mut adapters = Vec::new();
    // SAFETY: GetAdaptersAddresses returns a properly aligned buffer for
    // IP_ADAPTER_ADDRESSES_LH and links the entries through `Next`. The
    // list stays valid as long as `buffer` is alive.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = buffer.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    while !current.is_null() {
        let adapter = unsafe { &*current };
        adapters.push(parse_adapter(adapter)?);
        current = adapter.Next;
    }

    Ok(adapters)
}

/// Maps one `IP_ADAPTER_ADDRESSES_LH` entry into a [`RawAdapter`],
/// including the per-adapter routing-row fetch for metric and
/// automatic-metric flag.
fn parse_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Result<RawAdapter, EnumerationError> {
    // SAFETY: GetAdaptersAddresses fills these as NUL-terminated wide
    // strings inside the returned buffer.
    let name = unsafe { adapter.FriendlyName.to_string() }.unwrap_or_default();
    let description = unsafe { adapter.Description.to_string() }.unwrap_or_default();
    let dns_suffix = unsafe { adapter.DnsSuffix.to_string() }.unwrap_or_default();

    // SAFETY: NET_LUID_LH union read; `Value` is the full 64-bit handle.
    let id = InterfaceId(unsafe { adapter.Luid.Value });

    let row = read_routing_row(id).map_err(|source| EnumerationError::RoutingRow {
        name: name.clone(),
        source,
    })?;

    Ok(RawAdapter {
        name,
        description,
        dns_suffix,
        oper_up: adapter.OperStatus == IfOperStatusUp,
        unicast: collect_unicast(adapter),
        gateways: collect_gateways(adapter),
        dns_servers: collect_dns_servers(adapter),
        metric: row.Metric,
        automatic_metric: row.UseAutomaticMetric.as_bool(),
        id,
    })
}

/// Fetches the current IPv4 routing row for one adapter LUID.
fn read_routing_row(id: InterfaceId) -> windows::core::Result<MIB_IPINTERFACE_ROW> {
    let mut row = MIB_IPINTERFACE_ROW {
        Family: AF_INET,
        InterfaceLuid: NET_LUID_LH { Value: id.0 },
        ..Default::default()
    };

    // SAFETY: `row` is keyed by family and LUID; the API fills the rest.
    unsafe { GetIpInterfaceEntry(&mut row) }.ok()?;
    Ok(row)
}

/// Collects IPv4 unicast addresses with their on-link prefix lengths.
fn collect_unicast(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<RawUnicast> {
    let mut entries = Vec::new();
    let mut node = adapter.FirstUnicastAddress;

    // SAFETY: linked list inside the adapter buffer, valid while the
    // buffer is alive.
    while !node.is_null() {
        let entry = unsafe { &*node };
        if let Some(address) = unsafe { ipv4_of(entry.Address.lpSockaddr) } {
            entries.push(RawUnicast {
                address,
                prefix_length: entry.OnLinkPrefixLength,
            });
        }
        node = entry.Next;
    }

    entries
}

/// Collects IPv4 gateway addresses.
fn collect_gateways(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<Ipv4Addr> {
    let mut gateways = Vec::new();
    let mut node = adapter.FirstGatewayAddress;

    // SAFETY: same linked-list contract as the unicast chain.
    while !node.is_null() {
        let entry = unsafe { &*node };
        if let Some(address) = unsafe { ipv4_of(entry.Address.lpSockaddr) } {
            gateways.push(address);
        }
        node = entry.Next;
    }

    gateways
}

/// Collects IPv4 DNS server addresses.
fn collect_dns_servers(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<Ipv4Addr> {
    let mut servers = Vec::new();
    let mut node = adapter.FirstDnsServerAddress;

    // SAFETY: same linked-list contract as the unicast chain.
    while !node.is_null() {
        let entry = unsafe { &*node };
        if let Some(address) = unsafe { ipv4_of(entry.Address.lpSockaddr) } {
            servers.push(address);
        }
        node = entry.Next;
    }

    servers
}

/// Reads an IPv4 address out of a generic `SOCKADDR` pointer.
///
/// # Safety
///
/// `sockaddr` must be null or point to a valid socket address structure
/// whose lifetime covers this call. Windows guarantees alignment for the
/// structures it returns from the networking APIs.
#[allow(clippy::cast_ptr_alignment)]
unsafe fn ipv4_of(sockaddr: *const SOCKADDR) -> Option<Ipv4Addr> {
    let sa = unsafe { sockaddr.as_ref() }?;
    if sa.sa_family != AF_INET {
        return None;
    }

    // SAFETY: family checked above, so this points at a SOCKADDR_IN.
    let sockaddr_in = unsafe { &*(std::ptr::from_ref(sa).cast::<SOCKADDR_IN>()) };
    // SAFETY: sin_addr holds the IPv4 octets in network order.
    let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
    Some(Ipv4Addr::new(
        octets.s_b1,
        octets.s_b2,
        octets.s_b3,
        octets.s_b4,
    ))
}

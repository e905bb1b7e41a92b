//! Local interface resolution.
//!
//! When a device names a `broadcast_interface`, the magic packet is sent from
//! one of that interface's addresses so the OS routes the broadcast out of
//! the right link.
//!
//! # Which address is picked? (for beginners)
//!
//! An interface usually carries several addresses: an IPv4 address, one or
//! more IPv6 addresses, often an IPv6 link-local `fe80::` address.  Only a
//! unicast IPv4 address in class A, B or C (first octet below 224) qualifies
//! as a broadcast source.  IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are
//! judged, and returned, as their embedded IPv4 address so the socket family
//! matches an IPv4 broadcast destination.  The **first** qualifying address
//! in the order the OS reports them wins; there is no further ranking.
//!
//! This is narrower than "has a classful default mask": class D (multicast)
//! and class E (reserved, including `255.255.255.255`) also map to a default
//! mask classically, but neither can source a broadcast, so both are
//! rejected here.

use std::net::IpAddr;

use pnet::datalink::{self, NetworkInterface};
use tracing::debug;

use crate::application::wake_device::{LocalAddressResolver, ResolveError};

/// Resolves interface names against the live OS interface list.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkInterfaceResolver;

impl NetworkInterfaceResolver {
    /// Creates a resolver.  The interface list is read on every
    /// [`LocalAddressResolver::resolve`] call.
    pub fn new() -> Self {
        Self
    }
}

impl LocalAddressResolver for NetworkInterfaceResolver {
    fn resolve(&self, interface_name: &str) -> Result<IpAddr, ResolveError> {
        let interfaces = datalink::interfaces();
        debug!("enumerated {} local interface(s)", interfaces.len());
        select_local_address(&interfaces, interface_name)
    }
}

/// Picks the source address for `interface_name` from `interfaces`.
///
/// # Errors
///
/// - [`ResolveError::InterfaceNotFound`] if no interface has that name.
/// - [`ResolveError::NoUsableAddress`] if it has no address with a default
///   mask.
pub fn select_local_address(
    interfaces: &[NetworkInterface],
    interface_name: &str,
) -> Result<IpAddr, ResolveError> {
    let interface = interfaces
        .iter()
        .find(|i| i.name == interface_name)
        .ok_or_else(|| ResolveError::InterfaceNotFound(interface_name.to_string()))?;

    interface
        .ips
        .iter()
        .find_map(|net| broadcast_source(net.ip()))
        .ok_or_else(|| ResolveError::NoUsableAddress(interface_name.to_string()))
}

/// Returns `true` for IPv4 addresses in class A, B or C, including ones
/// carried as IPv4-mapped IPv6.
///
/// Class D and E addresses are rejected even though they have a classful
/// default mask.
pub fn has_default_mask(ip: &IpAddr) -> bool {
    broadcast_source(*ip).is_some()
}

/// `ip` as an IPv4 source address, if it qualifies.
fn broadcast_source(ip: IpAddr) -> Option<IpAddr> {
    let v4 = match ip {
        IpAddr::V4(v4) => v4,
        IpAddr::V6(v6) => v6.to_ipv4_mapped()?,
    };
    (v4.octets()[0] < 0xE0).then_some(IpAddr::V4(v4))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

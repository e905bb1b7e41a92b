//! UDP transport for magic packets.
//!
//! Each call opens a fresh socket, writes one datagram and drops the socket
//! before returning, so no socket outlives a wake attempt.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use tracing::debug;

use crate::application::wake_device::DatagramTransport;

/// Sends datagrams over a short-lived [`UdpSocket`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransport;

impl UdpTransport {
    /// Creates a transport.  Sockets are opened per send, not here.
    pub fn new() -> Self {
        Self
    }
}

impl DatagramTransport for UdpTransport {
    fn send_once(
        &self,
        local: Option<IpAddr>,
        destination: SocketAddr,
        payload: &[u8],
    ) -> io::Result<usize> {
        let bind_addr = SocketAddr::new(local.unwrap_or_else(|| unspecified_for(&destination)), 0);
        let socket = UdpSocket::bind(bind_addr)?;
        if destination.is_ipv4() {
            socket.set_broadcast(true)?;
        }
        socket.connect(destination)?;
        debug!(
            "sending {} bytes from {} to {}",
            payload.len(),
            socket.local_addr()?,
            destination
        );
        socket.send(payload)
    }
}

/// The wildcard address of the same family as `destination`.
fn unspecified_for(destination: &SocketAddr) -> IpAddr {
    match destination {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! WakeSender: sends one magic packet to one device.
//!
//! # Send lifecycle
//!
//! ```text
//! Idle ──► InterfaceResolved ──► PacketBuilt ──► SocketOpen ──► Sent | Failed ──► Closed
//! ```
//!
//! - `InterfaceResolved`: the device's `broadcast_interface` has been mapped
//!   to a local IP, or skipped because it is blank.
//! - `PacketBuilt`: the MAC text has been validated and encoded.
//! - `SocketOpen` → `Closed`: owned by the [`DatagramTransport`]; the socket
//!   is released on every exit path.
//!
//! There are no retries.  Wake-on-LAN has no acknowledgement, so a caller
//! that wants another attempt simply calls [`WakeSender::send`] again.
//!
//! # Short writes
//!
//! A write that reports fewer than 102 bytes is surfaced as
//! [`WakeOutcome::ShortWrite`] and logged as a warning, not returned as an
//! error: the OS may still have queued the datagram.

use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};
use wol_core::{CodecError, Device, MagicPacket, MAGIC_PACKET_LEN};

/// Error type for local interface resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No local interface has the given name.
    #[error("interface {0} not found")]
    InterfaceNotFound(String),

    /// The interface exists but has no address with a default subnet mask.
    #[error("no address associated with interface {0}")]
    NoUsableAddress(String),
}

/// Error type for a wake attempt.
#[derive(Debug, Error)]
pub enum WakeError {
    /// The source interface could not be resolved.
    #[error(transparent)]
    Interface(#[from] ResolveError),

    /// The device's MAC address is invalid.
    #[error(transparent)]
    Build(#[from] CodecError),

    /// The destination could not be parsed, or the socket failed.
    #[error("failed to send magic packet to {destination}: {source}")]
    Network {
        destination: String,
        #[source]
        source: io::Error,
    },
}

/// Result of a completed send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeOutcome {
    /// The full frame was handed to the OS.
    Sent { destination: SocketAddr, bytes: usize },
    /// The OS accepted fewer bytes than the frame holds.
    ShortWrite {
        destination: SocketAddr,
        written: usize,
        expected: usize,
    },
}

/// Maps a local interface name to the IP address used as packet source.
#[cfg_attr(test, mockall::automock)]
pub trait LocalAddressResolver: Send + Sync {
    /// Resolves `interface_name` to one of its addresses.
    fn resolve(&self, interface_name: &str) -> Result<IpAddr, ResolveError>;
}

/// Sends a single datagram.
///
/// Implementations open a socket (bound to `local` when given), connect it to
/// `destination`, write `payload` once and close the socket before returning.
#[cfg_attr(test, mockall::automock)]
pub trait DatagramTransport: Send + Sync {
    /// Returns the number of bytes the OS accepted.
    fn send_once(
        &self,
        local: Option<IpAddr>,
        destination: SocketAddr,
        payload: &[u8],
    ) -> io::Result<usize>;
}

/// The wake use case.
pub struct WakeSender {
    resolver: Arc<dyn LocalAddressResolver>,
    transport: Arc<dyn DatagramTransport>,
}

impl WakeSender {
    /// Creates a sender with the given resolver and transport.
    pub fn new(
        resolver: Arc<dyn LocalAddressResolver>,
        transport: Arc<dyn DatagramTransport>,
    ) -> Self {
        Self {
            resolver,
            transport,
        }
    }

    /// Sends one magic packet for `device`.
    ///
    /// # Errors
    ///
    /// - [`WakeError::Interface`] if `broadcast_interface` is set but cannot
    ///   be resolved.
    /// - [`WakeError::Build`] if the stored MAC address is invalid.
    /// - [`WakeError::Network`] if `broadcast_ip` does not resolve to an
    ///   address or the socket cannot be opened or written.
    pub fn send(&self, device: &Device) -> Result<WakeOutcome, WakeError> {
        let local = match device.broadcast_interface.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                let ip = self.resolver.resolve(name)?;
                debug!("using {ip} from interface {name} as source address");
                Some(ip)
            }
            _ => None,
        };

        let frame = MagicPacket::build(&device.mac)?.to_bytes();

        let destination = parse_destination(&device.broadcast_ip, device.port)?;

        let written = self
            .transport
            .send_once(local, destination, &frame)
            .map_err(|source| WakeError::Network {
                destination: destination.to_string(),
                source,
            })?;

        if written != MAGIC_PACKET_LEN {
            warn!("Magic packet sent was {written} bytes (expected {MAGIC_PACKET_LEN} bytes sent)");
            return Ok(WakeOutcome::ShortWrite {
                destination,
                written,
                expected: MAGIC_PACKET_LEN,
            });
        }

        info!("Magic packet sent successfully to {}", device.mac);
        Ok(WakeOutcome::Sent {
            destination,
            bytes: written,
        })
    }
}

/// Resolves `host` (an IP literal, bracketed IPv6 or a host name) and `port`
/// into a socket address.
///
/// Literals are used as-is.  Host names go through the system resolver; the
/// first IPv4 result is preferred, else the first result of any family.
fn parse_destination(host: &str, port: u16) -> Result<SocketAddr, WakeError> {
    let trimmed = host.trim();
    let unbracketed = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    if let Ok(addr) = unbracketed.parse::<IpAddr>() {
        return Ok(SocketAddr::new(addr, port));
    }

    let network_error = |source: io::Error| WakeError::Network {
        destination: format!("{host}:{port}"),
        source,
    };

    let resolved: Vec<SocketAddr> = (unbracketed, port)
        .to_socket_addrs()
        .map_err(network_error)?
        .collect();
    debug!("{unbracketed} resolved to {resolved:?}");

    resolved
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| resolved.first())
        .copied()
        .ok_or_else(|| {
            network_error(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{unbracketed} did not resolve to any address"),
            ))
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

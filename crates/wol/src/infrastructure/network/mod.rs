//! Network infrastructure.
//!
//! # Sub-modules
//!
//! - **`interface`** – Resolves a local interface name to the source IP for a
//!   wake packet, using the OS interface list from `pnet`.
//!
//! - **`udp`** – One-shot UDP socket that broadcasts a single datagram and
//!   closes.
//!
//! - **`mock`** – In-memory resolver and transport for tests that must not
//!   touch real interfaces or sockets.

pub mod interface;
pub mod mock;
pub mod udp;

pub use interface::NetworkInterfaceResolver;
pub use udp::UdpTransport;

//! # wol-core
//!
//! Shared library for the `wol` Wake-on-LAN tool containing the magic packet
//! codec, the MAC address value type and the persisted device entity.
//!
//! It has zero dependencies on OS APIs, the file system or network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! Wake-on-LAN lets a sleeping computer be powered on remotely.  A network
//! card with WOL enabled keeps listening while the machine is off and wakes
//! it when it sees a *magic packet*: six `0xFF` bytes followed by its own
//! hardware (MAC) address repeated sixteen times.
//!
//! This crate is the pure foundation:
//!
//! - **`protocol`** – How bytes travel over the network.  [`MacAddress`]
//!   validates the textual address; [`MagicPacket`] turns it into the exact
//!   102-byte frame.
//!
//! - **`domain`** – The [`Device`] record an operator registers by name, with
//!   the broadcast parameters used to reach it.

pub mod domain;
pub mod protocol;

pub use domain::device::{Device, DEFAULT_BROADCAST_IP, DEFAULT_PORT};
pub use protocol::mac::MacAddress;
pub use protocol::magic_packet::{CodecError, MagicPacket, MAGIC_PACKET_LEN};

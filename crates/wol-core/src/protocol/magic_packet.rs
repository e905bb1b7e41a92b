//! Wake-on-LAN magic packet codec.
//!
//! Wire format:
//! ```text
//! [0xFF x 6][mac:6] x 16
//! ```
//! Total size: 102 bytes.  The frame is a plain byte sequence with no
//! multi-byte integers, so there is no byte order to agree on.
//!
//! # Why build the frame by appending? (for beginners)
//!
//! It is tempting to describe the packet as a `#[repr(C)]` struct and
//! reinterpret its memory as bytes.  That couples the wire format to the
//! compiler's layout rules (padding, alignment).  Appending fixed byte
//! sequences into a buffer produces exactly the bytes we ask for and nothing
//! else, and the length can be checked against [`MAGIC_PACKET_LEN`].

use thiserror::Error;

use crate::protocol::mac::{MacAddress, MAC_LEN};

/// Number of `0xFF` bytes that open the frame.
pub const HEADER_LEN: usize = 6;

/// How many times the target MAC address is repeated after the header.
pub const MAC_REPETITIONS: usize = 16;

/// Exact size of a serialized magic packet.
pub const MAGIC_PACKET_LEN: usize = HEADER_LEN + MAC_LEN * MAC_REPETITIONS;

/// Errors that can occur while building a magic packet.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The text is not a syntactically valid MAC-48 address.
    #[error("{0} is not a IEEE 802 MAC-48 address")]
    InvalidMac(String),
}

/// A magic packet addressed to one network card.
///
/// The packet only stores the target address; the 102-byte frame is produced
/// on demand by [`MagicPacket::to_bytes`].
///
/// # Examples
///
/// ```rust
/// use wol_core::{MagicPacket, MAGIC_PACKET_LEN};
///
/// let packet = MagicPacket::build("e0:d5:5e:6e:30:c9").unwrap();
/// let bytes = packet.to_bytes();
/// assert_eq!(bytes.len(), MAGIC_PACKET_LEN);
/// assert_eq!(&bytes[..6], &[0xFF; 6]);
/// assert_eq!(&bytes[6..12], &[0xE0, 0xD5, 0x5E, 0x6E, 0x30, 0xC9]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicPacket {
    target: MacAddress,
}

impl MagicPacket {
    /// Creates a packet for an already validated address.
    pub const fn new(target: MacAddress) -> Self {
        Self { target }
    }

    /// Validates `mac_text` and creates a packet for it.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidMac`] naming `mac_text` if it is not a
    /// MAC-48 address in colon or dash form.
    pub fn build(mac_text: &str) -> Result<Self, CodecError> {
        MacAddress::parse(mac_text).map(Self::new)
    }

    /// The address this packet wakes.
    pub const fn target(&self) -> MacAddress {
        self.target
    }

    /// Serializes the packet into its 102-byte wire form.
    pub fn to_bytes(&self) -> [u8; MAGIC_PACKET_LEN] {
        let mut buf = Vec::with_capacity(MAGIC_PACKET_LEN);
        buf.extend_from_slice(&[0xFF; HEADER_LEN]);
        let octets = self.target.octets();
        for _ in 0..MAC_REPETITIONS {
            buf.extend_from_slice(&octets);
        }

        let mut frame = [0u8; MAGIC_PACKET_LEN];
        frame.copy_from_slice(&buf);
        frame
    }
}

impl From<MacAddress> for MagicPacket {
    fn from(target: MacAddress) -> Self {
        Self::new(target)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

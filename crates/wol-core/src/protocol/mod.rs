//! Protocol module containing the MAC address type and the magic packet codec.

pub mod mac;
pub mod magic_packet;

pub use mac::MacAddress;
pub use magic_packet::{CodecError, MagicPacket, HEADER_LEN, MAC_REPETITIONS, MAGIC_PACKET_LEN};

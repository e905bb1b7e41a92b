//! The persisted device record.
//!
//! A [`Device`] is what the operator registers: a unique name, the hardware
//! address of its network card, and where to broadcast the magic packet.
//!
//! # Serde default values
//!
//! `broadcast_ip` and `port` are optional in the registry file.  They are
//! filled in while deserializing (an empty string or a port of `0` count as
//! missing), so a loaded `Device` never carries a zero value and the next
//! write stores the canonical defaults explicitly.

use serde::{Deserialize, Serialize};

use crate::protocol::mac::MacAddress;
use crate::protocol::magic_packet::CodecError;

/// Broadcast address used when a device does not specify one.
pub const DEFAULT_BROADCAST_IP: &str = "255.255.255.255";

/// UDP port used when a device does not specify one (the "echo" port).
pub const DEFAULT_PORT: u16 = 7;

/// A named device that can be woken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDevice")]
pub struct Device {
    /// Unique identifier within a registry.
    pub name: String,
    /// Hardware address text.  Devices created through [`Device::new`] hold the
    /// canonical lower-case colon form; hand-edited files may hold any text,
    /// which is validated when a packet is built.
    pub mac: String,
    /// Local interface whose address is used as the packet source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast_interface: Option<String>,
    /// Destination address, usually a broadcast address.
    pub broadcast_ip: String,
    /// Destination UDP port.
    pub port: u16,
}

impl Device {
    /// Creates a device with the default broadcast address and port.
    pub fn new(name: impl Into<String>, mac: MacAddress) -> Self {
        Self {
            name: name.into(),
            mac: mac.to_string(),
            broadcast_interface: None,
            broadcast_ip: DEFAULT_BROADCAST_IP.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Sets the source interface.  Blank names clear it.
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.broadcast_interface = non_blank(interface.into());
        self
    }

    /// Sets the destination address.  Blank values keep the default.
    pub fn with_broadcast_ip(mut self, ip: impl Into<String>) -> Self {
        self.broadcast_ip = non_blank(ip.into()).unwrap_or_else(|| DEFAULT_BROADCAST_IP.to_string());
        self
    }

    /// Sets the destination port.  `0` keeps the default.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = if port == 0 { DEFAULT_PORT } else { port };
        self
    }

    /// Parses the stored hardware address.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidMac`] if the stored text is not a MAC-48
    /// address.
    pub fn mac_address(&self) -> Result<MacAddress, CodecError> {
        MacAddress::parse(&self.mac)
    }

    /// Returns `true` if `query` denotes the same hardware address as this
    /// device.
    ///
    /// Addresses are compared by value when both sides parse, so case and
    /// separator do not matter.  Otherwise the texts are compared ignoring
    /// ASCII case.
    pub fn has_mac(&self, query: &str) -> bool {
        match (MacAddress::parse(query), self.mac_address()) {
            (Ok(wanted), Ok(own)) => wanted == own,
            _ => self.mac.eq_ignore_ascii_case(query),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// On-disk shape of a device, before defaults are applied.
#[derive(Deserialize)]
struct RawDevice {
    name: String,
    mac: String,
    #[serde(default)]
    broadcast_interface: Option<String>,
    #[serde(default)]
    broadcast_ip: Option<String>,
    #[serde(default)]
    port: Option<u16>,
}

impl From<RawDevice> for Device {
    fn from(raw: RawDevice) -> Self {
        Self {
            name: raw.name,
            mac: raw.mac,
            broadcast_interface: raw.broadcast_interface.and_then(non_blank),
            broadcast_ip: raw
                .broadcast_ip
                .and_then(non_blank)
                .unwrap_or_else(|| DEFAULT_BROADCAST_IP.to_string()),
            port: raw.port.filter(|p| *p != 0).unwrap_or(DEFAULT_PORT),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

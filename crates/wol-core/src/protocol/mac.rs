//! IEEE 802 MAC-48 hardware address.
//!
//! Accepted textual forms are six two-digit hex groups joined by a single
//! separator, either `:` or `-`, used consistently:
//!
//! ```text
//! e0:d5:5e:6e:30:c9
//! E0-D5-5E-6E-30-C9
//! ```
//!
//! Hex digits are case-insensitive.  Anything else (EUI-64, dotted Cisco
//! notation, missing leading zeros, mixed separators) is rejected with
//! [`CodecError::InvalidMac`].

use std::fmt;
use std::str::FromStr;

use crate::protocol::magic_packet::CodecError;

/// Number of bytes in a MAC-48 address.
pub const MAC_LEN: usize = 6;

/// Length of the textual form: 6 groups of 2 digits plus 5 separators.
const MAC_TEXT_LEN: usize = MAC_LEN * 3 - 1;

/// A validated 6-byte hardware address.
///
/// Two addresses compare equal when their bytes are equal, regardless of the
/// case or separator used in the text they were parsed from.
///
/// # Examples
///
/// ```rust
/// use wol_core::MacAddress;
///
/// let a: MacAddress = "E0-D5-5E-6E-30-C9".parse().unwrap();
/// let b: MacAddress = "e0:d5:5e:6e:30:c9".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "e0:d5:5e:6e:30:c9");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; MAC_LEN]);

impl MacAddress {
    /// Wraps raw address bytes.
    pub const fn new(bytes: [u8; MAC_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses `text` as a MAC-48 address.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidMac`] naming `text` if it does not match
    /// the accepted syntax.
    pub fn parse(text: &str) -> Result<Self, CodecError> {
        let invalid = || CodecError::InvalidMac(text.to_string());

        let raw = text.as_bytes();
        if raw.len() != MAC_TEXT_LEN {
            return Err(invalid());
        }

        let separator = raw[2];
        if separator != b':' && separator != b'-' {
            return Err(invalid());
        }

        let mut bytes = [0u8; MAC_LEN];
        for (idx, byte) in bytes.iter_mut().enumerate() {
            let start = idx * 3;
            if idx > 0 && raw[start - 1] != separator {
                return Err(invalid());
            }
            let hi = hex_value(raw[start]).ok_or_else(invalid)?;
            let lo = hex_value(raw[start + 1]).ok_or_else(invalid)?;
            *byte = (hi << 4) | lo;
        }

        Ok(Self(bytes))
    }

    /// Returns `true` if `text` is a syntactically valid MAC-48 address.
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    /// Returns the six address bytes.
    pub const fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }

    /// Formats the address as upper-case colon-separated hex.
    pub fn to_upper_string(&self) -> String {
        self.to_string().to_ascii_uppercase()
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Canonical form: lower-case hex, colon separated.
impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddress {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; MAC_LEN]> for MacAddress {
    fn from(bytes: [u8; MAC_LEN]) -> Self {
        Self(bytes)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

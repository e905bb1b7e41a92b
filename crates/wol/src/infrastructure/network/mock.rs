//! Mock network adapters for testing.
//!
//! [`StaticAddressResolver`] answers interface lookups from a fixed table and
//! [`RecordingTransport`] captures datagrams instead of sending them, so wake
//! flows can be exercised without touching the OS network stack.

use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Mutex, PoisonError};

use crate::application::wake_device::{DatagramTransport, LocalAddressResolver, ResolveError};

/// Resolves interface names from an in-memory table.
#[derive(Debug, Default)]
pub struct StaticAddressResolver {
    addresses: HashMap<String, Option<IpAddr>>,
}

impl StaticAddressResolver {
    /// Creates a resolver that knows no interfaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with a usable address.
    pub fn with_interface(mut self, name: impl Into<String>, ip: IpAddr) -> Self {
        self.addresses.insert(name.into(), Some(ip));
        self
    }

    /// Registers `name` as present but without a usable address.
    pub fn with_unaddressed_interface(mut self, name: impl Into<String>) -> Self {
        self.addresses.insert(name.into(), None);
        self
    }
}

impl LocalAddressResolver for StaticAddressResolver {
    fn resolve(&self, interface_name: &str) -> Result<IpAddr, ResolveError> {
        match self.addresses.get(interface_name) {
            Some(Some(ip)) => Ok(*ip),
            Some(None) => Err(ResolveError::NoUsableAddress(interface_name.to_string())),
            None => Err(ResolveError::InterfaceNotFound(interface_name.to_string())),
        }
    }
}

/// One datagram captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentDatagram {
    pub local: Option<IpAddr>,
    pub destination: SocketAddr,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
enum Behaviour {
    WriteAll,
    WriteAtMost(usize),
    Fail(io::ErrorKind),
}

/// A transport that records every datagram it is asked to send.
#[derive(Debug)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentDatagram>>,
    behaviour: Behaviour,
}

impl RecordingTransport {
    /// Creates a transport that reports every payload as fully written.
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            behaviour: Behaviour::WriteAll,
        }
    }

    /// Reports at most `limit` bytes written per send.
    pub fn short_writes(limit: usize) -> Self {
        Self {
            behaviour: Behaviour::WriteAtMost(limit),
            ..Self::new()
        }
    }

    /// Fails every send with `kind`.  Failed sends are still recorded.
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            behaviour: Behaviour::Fail(kind),
            ..Self::new()
        }
    }

    /// Datagrams captured so far, oldest first.
    pub fn sent(&self) -> Vec<SentDatagram> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl DatagramTransport for RecordingTransport {
    fn send_once(
        &self,
        local: Option<IpAddr>,
        destination: SocketAddr,
        payload: &[u8],
    ) -> io::Result<usize> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentDatagram {
                local,
                destination,
                payload: payload.to_vec(),
            });

        match self.behaviour {
            Behaviour::WriteAll => Ok(payload.len()),
            Behaviour::WriteAtMost(limit) => Ok(payload.len().min(limit)),
            Behaviour::Fail(kind) => Err(io::Error::new(kind, "mock transport failure")),
        }
    }
}

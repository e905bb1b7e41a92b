//! wol library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does wol do? (for beginners)
//!
//! `wol` keeps a small YAML registry of machines on the local network and
//! wakes them on request:
//!
//! 1. `wol add --name nas --mac 00:11:32:aa:bb:cc` stores a device.
//! 2. `wol wake nas` looks the device up, builds a 102-byte magic packet for
//!    its MAC address and broadcasts it over UDP.
//! 3. The sleeping machine's network card recognises its own address in the
//!    packet and powers the machine on.
//!
//! There is no reply: Wake-on-LAN is fire-and-forget.

/// Application layer: the device registry and the wake use case.
pub mod application;

/// Infrastructure layer: registry file, network interfaces, UDP socket, console.
pub mod infrastructure;

//! Application layer use cases.
//!
//! Use cases in this layer orchestrate `wol_core` types and depend only on
//! the port traits declared here.  They contain no file system or socket
//! calls of their own.
//!
//! # Sub-modules
//!
//! - **`manage_devices`** – The [`DeviceRegistry`](manage_devices::DeviceRegistry):
//!   the collection of named devices, its uniqueness rules and the
//!   two-pass name-then-MAC lookup.  Every mutation is flushed through a
//!   [`DeviceStore`](manage_devices::DeviceStore).
//!
//! - **`wake_device`** – The [`WakeSender`](wake_device::WakeSender): resolves
//!   the source address, builds the magic packet and hands it to a
//!   [`DatagramTransport`](wake_device::DatagramTransport) exactly once.

pub mod manage_devices;
pub mod wake_device;

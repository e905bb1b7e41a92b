//! Infrastructure layer.
//!
//! Contains OS-facing adapters: the YAML registry file, network interface
//! lookup, the UDP socket and console rendering.
//!
//! **Dependency rule**: this layer may depend on `application` and `wol_core`,
//! but MUST NOT be imported by the `application` layer.

pub mod console;
pub mod network;
pub mod storage;

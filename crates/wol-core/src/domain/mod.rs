//! Domain entities for the wol tool.
//!
//! This module contains plain data with no infrastructure dependencies.  The
//! registry that owns these records and the code that persists them live in
//! the `wol` crate's application and infrastructure layers.

/// A registered device and its broadcast parameters.
///
/// See [`device::Device`] for the main type.
pub mod device;

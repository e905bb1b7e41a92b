//! Persistence adapters.
//!
//! - **`registry_file`** – The YAML registry file ([`YamlRegistryFile`]) that
//!   backs the `DeviceRegistry`, plus the sample document printed by
//!   `wol example`.

pub mod registry_file;

pub use registry_file::{default_registry_path, example_document, YamlRegistryFile};

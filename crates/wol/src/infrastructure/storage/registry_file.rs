//! YAML-based registry persistence.
//!
//! The registry lives in a single file, by default `~/.wol.yaml`:
//!
//! ```yaml
//! devices:
//! - name: iMac
//!   mac: e0:d5:5e:6e:30:c9
//!   broadcast_ip: 255.255.255.255
//!   port: 7
//! - name: nas
//!   mac: 00:11:32:aa:bb:cc
//!   broadcast_interface: eth0
//!   broadcast_ip: 192.168.1.255
//!   port: 9
//! ```
//!
//! Older files that use `machines` as the top-level key are read as well;
//! writes always use `devices`.
//!
//! # Atomic writes
//!
//! [`YamlRegistryFile::save`] serializes the whole document into a temporary
//! file next to the target and renames it into place, so readers see either
//! the old registry or the new one, never a truncated file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;
use wol_core::{Device, MacAddress};

use crate::application::manage_devices::{DeviceStore, StoreError};

/// File name of the registry inside the home directory.
pub const REGISTRY_FILE_NAME: &str = ".wol.yaml";

#[derive(Debug, Default, Deserialize)]
struct RegistryDocument {
    #[serde(default, alias = "machines")]
    devices: Vec<Device>,
}

#[derive(Serialize)]
struct RegistryDocumentRef<'a> {
    devices: &'a [Device],
}

/// A registry stored as a YAML document at a fixed path.
#[derive(Debug, Clone)]
pub struct YamlRegistryFile {
    path: PathBuf,
}

impl YamlRegistryFile {
    /// Creates a store for `path`.  Nothing is read or created until
    /// [`DeviceStore::load`] or [`DeviceStore::save`] is called.
    ///
    /// ```rust
    /// use wol::application::manage_devices::DeviceRegistry;
    /// use wol::infrastructure::storage::YamlRegistryFile;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = YamlRegistryFile::new(dir.path().join("wol.yaml"));
    /// assert!(!store.path().exists());
    ///
    /// let registry = DeviceRegistry::load(Box::new(store)).unwrap();
    /// assert!(registry.is_empty());
    /// assert_eq!(registry.len(), 0);
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DeviceStore for YamlRegistryFile {
    /// Reads the registry, returning an empty one if the file does not exist
    /// yet or holds no document.
    fn load(&self) -> Result<Vec<Device>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("registry {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document: RegistryDocument =
            serde_yaml::from_str(&content).map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                source: Box::new(e),
            })?;
        Ok(document.devices)
    }

    fn save(&self, devices: &[Device]) -> Result<(), StoreError> {
        let content = serde_yaml::to_string(&RegistryDocumentRef { devices })
            .map_err(|e| StoreError::Serialize(Box::new(e)))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| self.io_error(e))?;
        set_registry_permissions(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!("wrote {} device(s) to {}", devices.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the mode of an existing registry; new files get `0644`.
fn set_registry_permissions(tmp: &NamedTempFile, target: &Path) -> io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => default_permissions(tmp),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn default_permissions(tmp: &NamedTempFile) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file().set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions(_tmp: &NamedTempFile) -> io::Result<()> {
    Ok(())
}

/// Resolves `~/.wol.yaml`, or `None` when the home directory is unknown.
pub fn default_registry_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(REGISTRY_FILE_NAME))
}

/// Renders a sample registry document with a single device.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] if serialization fails.
pub fn example_document() -> Result<String, StoreError> {
    let sample = Device::new("iMac", MacAddress::new([0xE0, 0xD5, 0x5E, 0x6E, 0x30, 0xC9]));
    serde_yaml::to_string(&RegistryDocumentRef {
        devices: std::slice::from_ref(&sample),
    })
    .map_err(|e| StoreError::Serialize(Box::new(e)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

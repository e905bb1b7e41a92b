//! DeviceRegistry: the named collection of wakeable devices.
//!
//! The registry is loaded once per invocation from a [`DeviceStore`], mutated
//! in memory by at most one command, and written back in full after every
//! successful `add` or `remove`.
//!
//! # Lookup policy
//!
//! [`DeviceRegistry::find`] and [`DeviceRegistry::remove`] accept either a
//! device name or a MAC address and search in two passes:
//!
//! ```text
//! pass 1: name == query          (exact, case-sensitive)
//! pass 2: mac  == query          (by address value, case/separator-insensitive)
//! ```
//!
//! A device whose *name* happens to equal another device's MAC text is found
//! by the first pass.  This ambiguity is part of the lookup contract and is
//! not resolved here.
//!
//! # Persistence failures
//!
//! If the store fails after a mutation, the error is returned and the
//! in-memory registry keeps the mutation.  There is no rollback: callers
//! treat the error as fatal for the invocation.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};
use wol_core::Device;

/// Boxed error used as the underlying cause of parse/serialize failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for registry persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing registry at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document could not be parsed.
    #[error("failed to parse registry {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The registry could not be serialized.
    #[error("failed to serialize registry: {0}")]
    Serialize(#[source] BoxError),
}

/// Error type for registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A device must have a non-empty name.
    #[error("device name must not be empty")]
    EmptyName,

    /// A device with the same name or the same MAC address is registered.
    #[error("device [{name} {mac}] already exists (conflicts with [{existing}])")]
    DuplicateDevice {
        name: String,
        mac: String,
        existing: String,
    },

    /// No device matches the name or MAC address.
    #[error("not found device [{0}]")]
    DeviceNotFound(String),

    /// The registry could not be flushed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Persistence port for the registry.
///
/// The production implementation is the YAML file in
/// `infrastructure::storage::registry_file`.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceStore {
    /// Reads every persisted device, with field defaults applied.
    fn load(&self) -> Result<Vec<Device>, StoreError>;

    /// Replaces the persisted collection with `devices`.
    fn save(&self, devices: &[Device]) -> Result<(), StoreError>;
}

/// In-memory registry backed by a [`DeviceStore`].
///
/// A `Vec` keeps insertion order for display; lookups are linear, which is
/// fine for the handful of machines a registry holds.
pub struct DeviceRegistry {
    store: Box<dyn DeviceStore>,
    devices: Vec<Device>,
}

impl DeviceRegistry {
    /// Loads the registry from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or parsed.
    pub fn load(store: Box<dyn DeviceStore>) -> Result<Self, StoreError> {
        let devices = store.load()?;
        debug!("loaded {} device(s)", devices.len());
        Ok(Self { store, devices })
    }

    /// Finds a device by name, or failing that by MAC address.
    pub fn find(&self, name_or_mac: &str) -> Option<&Device> {
        self.position(name_or_mac).map(|idx| &self.devices[idx])
    }

    /// Adds `device` and persists the registry.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::EmptyName`] if the name is blank.
    /// - [`RegistryError::DuplicateDevice`] if the name (checked first) or the
    ///   MAC address (checked second) is already registered.  The registry is
    ///   left unchanged.
    /// - [`RegistryError::Store`] if persisting fails; the device stays in
    ///   memory.
    pub fn add(&mut self, device: Device) -> Result<(), RegistryError> {
        if device.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let existing = self
            .devices
            .iter()
            .find(|d| d.name == device.name)
            .or_else(|| self.devices.iter().find(|d| d.has_mac(&device.mac)));
        if let Some(existing) = existing {
            return Err(RegistryError::DuplicateDevice {
                name: device.name,
                mac: device.mac,
                existing: existing.name.clone(),
            });
        }

        info!("adding device {} ({})", device.name, device.mac);
        self.devices.push(device);
        self.store.save(&self.devices)?;
        Ok(())
    }

    /// Removes the device matching `name_or_mac` and persists the registry.
    ///
    /// Removal swaps the last device into the freed slot; registry order
    /// carries no meaning.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DeviceNotFound`] if nothing matches.
    /// - [`RegistryError::Store`] if persisting fails; the device stays
    ///   removed in memory.
    pub fn remove(&mut self, name_or_mac: &str) -> Result<Device, RegistryError> {
        let idx = self
            .position(name_or_mac)
            .ok_or_else(|| RegistryError::DeviceNotFound(name_or_mac.to_string()))?;

        let removed = self.devices.swap_remove(idx);
        info!("removed device {} ({})", removed.name, removed.mac);
        self.store.save(&self.devices)?;
        Ok(removed)
    }

    /// Devices in registry order.
    pub fn list(&self) -> &[Device] {
        &self.devices
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if no device is registered.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    fn position(&self, name_or_mac: &str) -> Option<usize> {
        self.devices
            .iter()
            .position(|d| d.name == name_or_mac)
            .or_else(|| self.devices.iter().position(|d| d.has_mac(name_or_mac)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wol_core::MacAddress;

    fn device(name: &str, mac: &str) -> Device {
        Device::new(name, mac.parse::<MacAddress>().unwrap())
    }

    fn imac() -> Device {
        device("iMac", "e0:d5:5e:6e:30:c9")
    }

    fn nas() -> Device {
        device("nas", "00:11:32:aa:bb:cc")
    }

    /// A store that loads `initial` and expects `saves` writes.
    fn store_with(initial: Vec<Device>, saves: usize) -> Box<MockDeviceStore> {
        let mut store = MockDeviceStore::new();
        store.expect_load().times(1).return_once(move || Ok(initial));
        store.expect_save().times(saves).returning(|_| Ok(()));
        Box::new(store)
    }

    fn denied() -> StoreError {
        StoreError::Io {
            path: PathBuf::from("/registry.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
    }

    #[test]
    fn test_load_propagates_store_error() {
        // Arrange
        let mut store = MockDeviceStore::new();
        store.expect_load().return_once(|| Err(denied()));

        // Act
        let result = DeviceRegistry::load(Box::new(store));

        // Assert
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_add_then_find_returns_device_unchanged() {
        // Arrange
        let mut registry = DeviceRegistry::load(store_with(vec![], 1)).unwrap();
        let added = nas().with_interface("eth0").with_port(9);

        // Act
        registry.add(added.clone()).expect("add");

        // Assert
        assert_eq!(registry.find("nas"), Some(&added));
    }

    #[test]
    fn test_add_persists_full_registry() {
        // Arrange
        let mut store = MockDeviceStore::new();
        store.expect_load().return_once(|| Ok(vec![imac()]));
        store
            .expect_save()
            .withf(|devices: &[Device]| {
                devices.len() == 2 && devices[0].name == "iMac" && devices[1].name == "nas"
            })
            .times(1)
            .returning(|_| Ok(()));
        let mut registry = DeviceRegistry::load(Box::new(store)).unwrap();

        // Act / Assert
        registry.add(nas()).expect("add");
    }

    #[test]
    fn test_add_duplicate_name_fails_and_leaves_registry_unmodified() {
        // Arrange
        let mut registry = DeviceRegistry::load(store_with(vec![imac()], 0)).unwrap();

        // Act
        let result = registry.add(device("iMac", "00:00:00:00:00:01"));

        // Assert
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateDevice { ref existing, .. }) if existing == "iMac"
        ));
        assert_eq!(registry.list(), &[imac()]);
    }

    #[test]
    fn test_add_duplicate_mac_fails_regardless_of_case() {
        // Arrange
        let mut registry = DeviceRegistry::load(store_with(vec![imac()], 0)).unwrap();
        let mut other = device("imac-wifi", "e0:d5:5e:6e:30:c9");
        other.mac = "E0-D5-5E-6E-30-C9".to_string();

        // Act
        let result = registry.add(other);

        // Assert
        assert!(matches!(result, Err(RegistryError::DuplicateDevice { .. })));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut registry = DeviceRegistry::load(store_with(vec![], 0)).unwrap();

        let result = registry.add(device("  ", "e0:d5:5e:6e:30:c9"));

        assert!(matches!(result, Err(RegistryError::EmptyName)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_store_failure_keeps_device_in_memory() {
        // Arrange
        let mut store = MockDeviceStore::new();
        store.expect_load().return_once(|| Ok(vec![]));
        store.expect_save().times(1).returning(|_| Err(denied()));
        let mut registry = DeviceRegistry::load(Box::new(store)).unwrap();

        // Act
        let result = registry.add(imac());

        // Assert
        assert!(matches!(result, Err(RegistryError::Store(StoreError::Io { .. }))));
        assert!(registry.find("iMac").is_some());
    }

    #[test]
    fn test_find_by_mac_is_case_insensitive() {
        // Arrange
        let mut stored = imac();
        stored.mac = "E0:D5:5E:6E:30:C9".to_string();
        let registry = DeviceRegistry::load(store_with(vec![stored], 0)).unwrap();

        // Act
        let found = registry.find("e0:d5:5e:6e:30:c9");

        // Assert
        assert_eq!(found.map(|d| d.name.as_str()), Some("iMac"));
    }

    #[test]
    fn test_find_prefers_name_match_over_mac_match() {
        // Arrange: a device *named* like another device's MAC.
        let decoy = device("00:11:32:aa:bb:cc", "aa:aa:aa:aa:aa:aa");
        let registry = DeviceRegistry::load(store_with(vec![nas(), decoy.clone()], 0)).unwrap();

        // Act
        let found = registry.find("00:11:32:aa:bb:cc");

        // Assert
        assert_eq!(found, Some(&decoy));
    }

    #[test]
    fn test_find_absent_returns_none() {
        let registry = DeviceRegistry::load(store_with(vec![imac()], 0)).unwrap();
        assert!(registry.find("printer").is_none());
    }

    #[test]
    fn test_remove_then_find_returns_none() {
        // Arrange
        let mut registry = DeviceRegistry::load(store_with(vec![imac(), nas()], 1)).unwrap();

        // Act
        let removed = registry.remove("iMac").expect("remove");

        // Assert
        assert_eq!(removed.name, "iMac");
        assert!(registry.find("iMac").is_none());
        assert_eq!(registry.list(), &[nas()]);
    }

    #[test]
    fn test_remove_by_mac() {
        let mut registry = DeviceRegistry::load(store_with(vec![imac(), nas()], 1)).unwrap();

        let removed = registry.remove("00-11-32-AA-BB-CC").expect("remove");

        assert_eq!(removed.name, "nas");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_swaps_last_into_place() {
        let third = device("laptop", "01:02:03:04:05:06");
        let mut registry =
            DeviceRegistry::load(store_with(vec![imac(), nas(), third.clone()], 1)).unwrap();

        registry.remove("iMac").expect("remove");

        assert_eq!(registry.list(), &[third, nas()]);
    }

    #[test]
    fn test_remove_absent_fails_with_device_not_found() {
        // Arrange
        let mut registry = DeviceRegistry::load(store_with(vec![imac()], 0)).unwrap();

        // Act
        let result = registry.remove("printer");

        // Assert
        assert!(matches!(result, Err(RegistryError::DeviceNotFound(ref q)) if q == "printer"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut registry = DeviceRegistry::load(store_with(vec![nas()], 1)).unwrap();

        registry.add(imac()).unwrap();

        let names: Vec<&str> = registry.list().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["nas", "iMac"]);
    }
}

//! Beacon registry capability
//!
//! The exhibit core needs a single source of known beacons when it creates
//! content folders and reconciles them against metadata. That source is an
//! explicit dependency injected at construction time, never a global.

use super::address::MacAddress;
use crate::error::{Error, Result};
use std::sync::RwLock;

/// A physical beacon known to the deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beacon {
    /// MAC address, the beacon's stable identity
    pub address: MacAddress,

    /// Human-friendly name shown to exhibit authors
    pub friendly_name: String,
}

impl Beacon {
    /// Create a beacon with the given address and friendly name
    pub fn new(address: MacAddress, friendly_name: impl Into<String>) -> Self {
        Self {
            address,
            friendly_name: friendly_name.into(),
        }
    }
}

/// Source of known beacons consumed by the exhibit core.
///
/// Lookups are pure and perform no I/O; implementations backed by a slow
/// store should cache.
pub trait BeaconRegistry: Send + Sync {
    /// All beacons currently known, in registration order
    fn all_beacons(&self) -> Vec<Beacon>;

    /// Look up a beacon by address, failing with [`Error::BeaconNotFound`]
    /// if no known beacon has it
    fn beacon_by_address(&self, address: &MacAddress) -> Result<Beacon>;
}

/// In-memory beacon registry.
///
/// Seeded from configuration or built up programmatically; this is what
/// the CLI and the tests inject.
pub struct InMemoryBeaconRegistry {
    beacons: RwLock<Vec<Beacon>>,
}

impl InMemoryBeaconRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            beacons: RwLock::new(Vec::new()),
        }
    }

    /// Create a registry pre-populated with the given beacons
    pub fn with_beacons(beacons: Vec<Beacon>) -> Self {
        Self {
            beacons: RwLock::new(beacons),
        }
    }

    /// Register a beacon. Re-registering an address replaces the friendly
    /// name but keeps the original position.
    pub fn register(&self, beacon: Beacon) {
        let mut beacons = self.beacons.write().expect("registry lock poisoned");
        if let Some(existing) = beacons.iter_mut().find(|b| b.address == beacon.address) {
            existing.friendly_name = beacon.friendly_name;
        } else {
            beacons.push(beacon);
        }
    }

    /// Number of known beacons
    pub fn len(&self) -> usize {
        self.beacons.read().expect("registry lock poisoned").len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryBeaconRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BeaconRegistry for InMemoryBeaconRegistry {
    fn all_beacons(&self) -> Vec<Beacon> {
        self.beacons.read().expect("registry lock poisoned").clone()
    }

    fn beacon_by_address(&self, address: &MacAddress) -> Result<Beacon> {
        self.beacons
            .read()
            .expect("registry lock poisoned")
            .iter()
            .find(|b| &b.address == address)
            .cloned()
            .ok_or_else(|| Error::BeaconNotFound(address.to_string()))
    }
}

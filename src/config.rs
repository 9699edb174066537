//! Docent configuration management

use crate::beacons::{Beacon, InMemoryBeaconRegistry, MacAddress};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Docent configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocentConfig {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Beacons known to this deployment, seeded into the registry
    #[serde(default)]
    pub beacons: Vec<BeaconSeed>,
}

impl DocentConfig {
    /// Build the in-memory beacon registry from the configured seeds
    pub fn registry(&self) -> InMemoryBeaconRegistry {
        InMemoryBeaconRegistry::with_beacons(
            self.beacons
                .iter()
                .map(|seed| Beacon::new(seed.address, seed.name.clone()))
                .collect(),
        )
    }
}

/// One beacon known to the deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconSeed {
    /// Beacon MAC address
    pub address: MacAddress,

    /// Human-friendly name shown to exhibit authors
    pub name: String,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory for storage
    pub base_dir: PathBuf,

    /// Exhibit storage path
    pub exhibits_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docent");

        Self {
            exhibits_dir: base.join("exhibits"),
            base_dir: base,
        }
    }
}

// Helper module for default directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }
}

//! Exhibit metadata documents
//!
//! `metadata.json` records the exhibit-level fields and, per beacon, the
//! ordered list of content filenames. The order of the `contents` arrays
//! is semantically meaningful: it is the presentation order on the
//! physical beacon.

use crate::beacons::{Beacon, MacAddress};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the metadata document inside an exhibit folder
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// The metadata document for one exhibit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitMetadata {
    /// Exhibit title
    pub name: String,

    /// Whether this exhibit is the one live on the physical beacons.
    /// Written at creation and carried through; nothing in this crate
    /// toggles it.
    pub active: bool,

    /// Free-form description
    pub description: String,

    /// Per-beacon entries, one per supported beacon
    pub beacons: Vec<BeaconEntry>,
}

/// One beacon's entry in the metadata document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconEntry {
    /// Canonical beacon address, unique within the document
    pub address: MacAddress,

    /// Ordered content filenames for this beacon
    pub contents: Vec<String>,
}

impl ExhibitMetadata {
    /// Build the initial document for a freshly created exhibit: empty
    /// description, inactive, one empty content list per known beacon.
    pub fn initial(name: impl Into<String>, beacons: &[Beacon]) -> Self {
        Self {
            name: name.into(),
            active: false,
            description: String::new(),
            beacons: beacons
                .iter()
                .map(|b| BeaconEntry {
                    address: b.address,
                    contents: Vec::new(),
                })
                .collect(),
        }
    }

    /// Load and parse a metadata document.
    ///
    /// A missing, unreadable, or malformed file fails with
    /// [`Error::MetadataCorrupt`].
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::MetadataCorrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        serde_json::from_str(&raw).map_err(|e| Error::MetadataCorrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Serialize and write the document, replacing any previous content.
    ///
    /// Writes to a sibling temp file and renames it into place. That is
    /// best-effort atomicity, not a transactional guarantee: a crash
    /// between the write and the rename leaves the temp file behind.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        let write_err = |e: std::io::Error| Error::MetadataWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        tokio::fs::write(&tmp, serialized.as_bytes())
            .await
            .map_err(write_err)?;
        tokio::fs::rename(&tmp, path).await.map_err(write_err)?;

        Ok(())
    }

    /// Find the entry for the given address, failing with
    /// [`Error::BeaconNotFound`] if no entry matches exactly.
    pub fn beacon_entry(&self, address: &MacAddress) -> Result<&BeaconEntry> {
        self.beacons
            .iter()
            .find(|entry| &entry.address == address)
            .ok_or_else(|| Error::BeaconNotFound(address.to_string()))
    }

    /// Mutable variant of [`Self::beacon_entry`]
    pub fn beacon_entry_mut(&mut self, address: &MacAddress) -> Result<&mut BeaconEntry> {
        self.beacons
            .iter_mut()
            .find(|entry| &entry.address == address)
            .ok_or_else(|| Error::BeaconNotFound(address.to_string()))
    }
}

//! Content folder layout
//!
//! Each beacon owns one subfolder directly under the exhibit root, named
//! by its canonical address string. These helpers build the address→folder
//! map from disk and create folders for newly supported beacons.

use crate::beacons::{Beacon, BeaconRegistry, MacAddress};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Scan the immediate subfolders of an exhibit root into a beacon→folder
/// map.
///
/// Subfolder names that don't parse as addresses are skipped with a warn
/// log, as are valid addresses the registry doesn't know about; neither is
/// an error.
pub async fn folders_for_beacons(
    root: &Path,
    registry: &dyn BeaconRegistry,
) -> Result<HashMap<MacAddress, PathBuf>> {
    let mut folders = HashMap::new();

    let mut entries = tokio::fs::read_dir(root).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }

        let folder_name = entry.file_name().to_string_lossy().into_owned();
        let address = match MacAddress::parse(&folder_name) {
            Ok(address) => address,
            Err(_) => {
                tracing::warn!(
                    folder = %entry.path().display(),
                    "Skipping subfolder that isn't named by a beacon address"
                );
                continue;
            }
        };

        match registry.beacon_by_address(&address) {
            Ok(_) => {
                folders.insert(address, entry.path());
            }
            Err(_) => {
                tracing::warn!(
                    folder = %entry.path().display(),
                    "Odd, no beacon for folder"
                );
            }
        }
    }

    Ok(folders)
}

/// Create the content folder for a beacon under the exhibit root.
///
/// Fails with [`Error::FolderCreate`] if the folder already exists or the
/// filesystem refuses.
pub async fn create_folder_for_beacon(root: &Path, beacon: &Beacon) -> Result<PathBuf> {
    let folder = root.join(beacon.address.to_string());

    if tokio::fs::try_exists(&folder).await? {
        return Err(Error::FolderCreate {
            path: folder,
            reason: "folder already exists".to_string(),
        });
    }

    tokio::fs::create_dir(&folder)
        .await
        .map_err(|e| Error::FolderCreate {
            path: folder.clone(),
            reason: e.to_string(),
        })?;

    Ok(folder)
}

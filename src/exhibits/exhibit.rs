//! The exhibit aggregate
//!
//! An [`Exhibit`] owns the metadata document and the beacon→folder layout
//! for one exhibit and keeps them consistent: every mutation writes the
//! metadata document back to disk before returning. Create new exhibits
//! with [`Exhibit::initialize_into_folder`] and thereafter load them with
//! [`Exhibit::load_from_folder`].

use super::content::ExhibitContent;
use super::layout;
use super::metadata::{BeaconEntry, ExhibitMetadata, METADATA_FILE_NAME};
use crate::beacons::{Beacon, BeaconRegistry, MacAddress};
use crate::error::{Error, Result};
use crate::sync::ContentSynchronizer;
use rand::Rng;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A named, persisted collection of per-beacon content with ordering.
///
/// The folder on disk is the source of truth; this struct is a cache
/// reconstructed by [`Self::load_from_folder`]. Mutations require `&mut
/// self`, so a single exhibit instance has a single writer; loading the
/// same folder twice and mutating both instances is unsupported.
pub struct Exhibit {
    id: i64,
    root: PathBuf,
    metadata: ExhibitMetadata,
    registry: Arc<dyn BeaconRegistry>,
    synchronizer: Arc<dyn ContentSynchronizer>,
    folder_for_beacon: HashMap<MacAddress, PathBuf>,
    contents_for_beacon: HashMap<MacAddress, Vec<ExhibitContent>>,
}

impl Exhibit {
    /// Create a new exhibit under `parent`, writing it to disk.
    ///
    /// Generates a random 64-bit identifier, creates `<parent>/<id>/` with
    /// one content subfolder per beacon the registry currently knows,
    /// writes the initial metadata document, then loads the result back.
    pub async fn initialize_into_folder(
        name: &str,
        parent: &Path,
        registry: Arc<dyn BeaconRegistry>,
        synchronizer: Arc<dyn ContentSynchronizer>,
    ) -> Result<Self> {
        let parent_info = tokio::fs::metadata(parent).await.map_err(|_| {
            Error::InvalidArgument(format!("parent folder {} doesn't exist", parent.display()))
        })?;
        if !parent_info.is_dir() {
            return Err(Error::InvalidArgument(format!(
                "{} is a file, not a folder",
                parent.display()
            )));
        }

        // id is randomly generated to avoid collisions; the folder name is
        // the id, kept non-negative so it never reads as a CLI flag
        let id: i64 = rand::thread_rng().gen_range(0..i64::MAX);
        let root = parent.join(id.to_string());

        tokio::fs::create_dir(&root)
            .await
            .map_err(|e| Error::FolderCreate {
                path: root.clone(),
                reason: e.to_string(),
            })?;

        let beacons = registry.all_beacons();
        for beacon in &beacons {
            layout::create_folder_for_beacon(&root, beacon).await?;
        }

        let metadata = ExhibitMetadata::initial(name, &beacons);
        metadata.save(&root.join(METADATA_FILE_NAME)).await?;

        tracing::info!(id, name, folder = %root.display(), "Created exhibit");

        Self::load_from_folder(&root, registry, synchronizer).await
    }

    /// Load an exhibit from an already created folder.
    ///
    /// The folder name must parse as the exhibit's numeric identifier. A
    /// filename listed in metadata with no corresponding file fails the
    /// whole load with [`Error::DanglingReference`]; a registry beacon
    /// with no content folder only logs a warning.
    pub async fn load_from_folder(
        folder: &Path,
        registry: Arc<dyn BeaconRegistry>,
        synchronizer: Arc<dyn ContentSynchronizer>,
    ) -> Result<Self> {
        let folder_info = tokio::fs::metadata(folder).await.map_err(|_| {
            Error::InvalidArgument(format!("{} doesn't exist", folder.display()))
        })?;
        if !folder_info.is_dir() {
            return Err(Error::InvalidArgument(format!(
                "{} is a file, not a folder",
                folder.display()
            )));
        }

        // the folder name matches the unique id of the exhibit
        let id = folder
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.parse::<i64>().ok())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "folder name of {} isn't an exhibit id",
                    folder.display()
                ))
            })?;

        let root = folder.to_path_buf();
        let metadata = ExhibitMetadata::load(&root.join(METADATA_FILE_NAME)).await?;
        let folder_for_beacon = layout::folders_for_beacons(&root, registry.as_ref()).await?;

        let mut contents_for_beacon = HashMap::new();
        for beacon in registry.all_beacons() {
            match folder_for_beacon.get(&beacon.address) {
                Some(content_folder) => {
                    let contents =
                        load_beacon_contents(&metadata, &beacon.address, content_folder).await?;
                    contents_for_beacon.insert(beacon.address, contents);
                }
                None => {
                    tracing::warn!(
                        beacon = %beacon.friendly_name,
                        address = %beacon.address,
                        "No content folder for beacon"
                    );
                }
            }
        }

        Ok(Self {
            id,
            root,
            metadata,
            registry,
            synchronizer,
            folder_for_beacon,
            contents_for_beacon,
        })
    }

    /// Unique identifier of this exhibit
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Title of the exhibit
    pub fn title(&self) -> &str {
        &self.metadata.name
    }

    /// Description of the exhibit
    pub fn description(&self) -> &str {
        &self.metadata.description
    }

    /// Whether this exhibit is marked live on the physical beacons.
    /// Persisted passthrough; nothing in this crate toggles it.
    pub fn is_active(&self) -> bool {
        self.metadata.active
    }

    /// The folder that contains all data of this exhibit
    pub fn root_folder(&self) -> &Path {
        &self.root
    }

    /// Addresses this exhibit currently has content folders for
    pub fn configured_beacons(&self) -> Vec<MacAddress> {
        let mut addresses: Vec<MacAddress> = self.folder_for_beacon.keys().copied().collect();
        addresses.sort();
        addresses
    }

    /// Set the title and persist the metadata document.
    ///
    /// The in-memory title is updated even when the write fails; the
    /// caller decides whether to retry or surface the error.
    pub async fn set_title(&mut self, new_title: impl Into<String>) -> Result<()> {
        self.metadata.name = new_title.into();
        self.save_metadata().await
    }

    /// Set the description and persist the metadata document.
    ///
    /// Same write-failure contract as [`Self::set_title`].
    pub async fn set_description(&mut self, new_description: impl Into<String>) -> Result<()> {
        self.metadata.description = new_description.into();
        self.save_metadata().await
    }

    /// Write the current in-memory content order for `address` into its
    /// metadata entry and persist.
    ///
    /// Must be called after any reordering through
    /// [`Self::content_for_beacon_mut`]; until then the on-disk order
    /// diverges from memory.
    pub async fn persist_content_changes(&mut self, address: &MacAddress) -> Result<()> {
        let names: Vec<String> = self
            .contents_for_beacon
            .get(address)
            .ok_or_else(|| Error::UnknownBeacon(address.to_string()))?
            .iter()
            .map(|content| content.name().to_string())
            .collect();

        self.metadata.beacon_entry_mut(address)?.contents = names;
        self.save_metadata().await
    }

    /// Configure this exhibit to store content for a new beacon.
    ///
    /// Idempotent: creates the content folder only if absent, adds a
    /// metadata entry only if none exists for the address, and ensures
    /// the in-memory maps have entries.
    pub async fn configure_for_additional_beacon(&mut self, beacon: &Beacon) -> Result<()> {
        let address = beacon.address;
        let content_folder = self.root.join(address.to_string());

        if !tokio::fs::try_exists(&content_folder).await? {
            layout::create_folder_for_beacon(&self.root, beacon).await?;
        }

        if self.metadata.beacon_entry(&address).is_err() {
            self.metadata.beacons.push(BeaconEntry {
                address,
                contents: Vec::new(),
            });
            self.save_metadata().await?;
        }

        let contents = load_beacon_contents(&self.metadata, &address, &content_folder).await?;
        self.folder_for_beacon.insert(address, content_folder);
        self.contents_for_beacon.insert(address, contents);

        tracing::info!(exhibit = self.id, beacon = %address, "Configured beacon for exhibit");
        Ok(())
    }

    /// Remove a beacon from this exhibit along with all its content.
    ///
    /// The metadata entry is removed and persisted before the folder is
    /// physically deleted, so a crash mid-operation favors metadata as the
    /// source of truth. The synchronizer is told about the folder before
    /// it goes away.
    pub async fn configure_for_removed_beacon(&mut self, beacon: &Beacon) -> Result<()> {
        let address = beacon.address;
        let content_folder = self
            .folder_for_beacon
            .get(&address)
            .cloned()
            .ok_or_else(|| Error::UnknownBeacon(address.to_string()))?;

        let target = self
            .metadata
            .beacons
            .iter()
            .position(|entry| entry.address == address)
            .ok_or_else(|| Error::BeaconNotFound(address.to_string()))?;

        self.metadata.beacons.remove(target);
        self.save_metadata().await?;

        self.folder_for_beacon.remove(&address);
        self.contents_for_beacon.remove(&address);

        self.synchronizer
            .delete_synced_equivalent(&content_folder)
            .await;
        tokio::fs::remove_dir_all(&content_folder).await?;

        tracing::info!(exhibit = self.id, beacon = %address, "Removed beacon from exhibit");
        Ok(())
    }

    /// The live ordered content list for a beacon, or `None` if the
    /// beacon isn't configured in this exhibit
    pub fn content_for_beacon(&self, address: &MacAddress) -> Option<&[ExhibitContent]> {
        self.contents_for_beacon
            .get(address)
            .map(|contents| contents.as_slice())
    }

    /// Mutable access to the live content list, for reordering.
    ///
    /// Call [`Self::persist_content_changes`] afterwards to write the new
    /// order to disk.
    pub fn content_for_beacon_mut(
        &mut self,
        address: &MacAddress,
    ) -> Option<&mut Vec<ExhibitContent>> {
        self.contents_for_beacon.get_mut(address)
    }

    /// Copy the file at `source` into the beacon's content folder and
    /// append it to that beacon's content list, persistently.
    ///
    /// The physical copy happens before the metadata is touched, so a
    /// failed copy never leaves a listed-but-missing file.
    pub async fn insert_content(&mut self, source: &Path, address: &MacAddress) -> Result<()> {
        let display_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::InvalidArgument(format!("{} has no file name", source.display()))
            })?;

        let beacon_folder = self
            .folder_for_beacon
            .get(address)
            .cloned()
            .ok_or_else(|| Error::UnknownBeacon(address.to_string()))?;

        let local_copy = beacon_folder.join(&display_name);
        tokio::fs::copy(source, &local_copy)
            .await
            .map_err(|e| Error::CopyFailed {
                source_path: source.to_path_buf(),
                dest: local_copy.clone(),
                reason: e.to_string(),
            })?;

        self.metadata
            .beacon_entry_mut(address)?
            .contents
            .push(display_name.clone());
        self.save_metadata().await?;

        self.contents_for_beacon
            .entry(*address)
            .or_default()
            .push(ExhibitContent::from_file(local_copy));

        tracing::info!(
            exhibit = self.id,
            beacon = %address,
            content = %display_name,
            "Inserted content"
        );
        Ok(())
    }

    /// Remove the named content from this exhibit permanently.
    ///
    /// The metadata update is synchronous; the synchronizer notification
    /// and the physical file deletion run on a detached task so the caller
    /// never blocks on them. Their failures are logged, not surfaced, and
    /// completion before process exit is not guaranteed; a crash in
    /// between leaves an orphaned file, never a dangling reference.
    pub async fn remove_content(&mut self, content_name: &str, address: &MacAddress) -> Result<()> {
        let entry = self.metadata.beacon_entry_mut(address)?;
        let target = entry
            .contents
            .iter()
            .position(|name| name == content_name)
            .ok_or_else(|| Error::ContentNotFound(content_name.to_string()))?;
        entry.contents.remove(target);
        self.save_metadata().await?;

        if let Some(contents) = self.contents_for_beacon.get_mut(address) {
            if let Some(position) = contents.iter().position(|c| c.name() == content_name) {
                contents.remove(position);
            }
        }

        let content_file = self
            .folder_for_beacon
            .get(address)
            .map(|folder| folder.join(content_name));

        if let Some(content_file) = content_file {
            let synchronizer = Arc::clone(&self.synchronizer);
            tokio::spawn(async move {
                synchronizer.delete_synced_equivalent(&content_file).await;
                if let Err(e) = tokio::fs::remove_file(&content_file).await {
                    tracing::warn!(
                        file = %content_file.display(),
                        error = %e,
                        "Couldn't delete removed content file"
                    );
                }
            });
        }

        tracing::info!(
            exhibit = self.id,
            beacon = %address,
            content = %content_name,
            "Removed content"
        );
        Ok(())
    }

    /// The registry this exhibit was constructed with
    pub fn registry(&self) -> &Arc<dyn BeaconRegistry> {
        &self.registry
    }

    async fn save_metadata(&self) -> Result<()> {
        self.metadata.save(&self.root.join(METADATA_FILE_NAME)).await
    }
}

/// Materialize a beacon's ordered content list by cross-referencing its
/// metadata entry against the files in its folder.
///
/// A folder with no metadata entry yields an empty list with a warning
/// (the reverse side of the layout invariant); a listed file missing on
/// disk is fatal.
async fn load_beacon_contents(
    metadata: &ExhibitMetadata,
    address: &MacAddress,
    folder: &Path,
) -> Result<Vec<ExhibitContent>> {
    let entry = match metadata.beacon_entry(address) {
        Ok(entry) => entry,
        Err(_) => {
            tracing::warn!(
                beacon = %address,
                "Content folder exists but metadata has no entry for it"
            );
            return Ok(Vec::new());
        }
    };

    let mut contents = Vec::with_capacity(entry.contents.len());
    for file_name in &entry.contents {
        let content_file = folder.join(file_name);
        if !tokio::fs::try_exists(&content_file).await? {
            return Err(Error::DanglingReference(content_file));
        }
        contents.push(ExhibitContent::from_file(content_file));
    }

    Ok(contents)
}

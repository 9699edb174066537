//! Exhibit enumeration and lifecycle
//!
//! The manager owns the exhibits root folder and the injected registry
//! and synchronizer handles, so callers create and open exhibits without
//! re-plumbing those dependencies everywhere.

use super::exhibit::Exhibit;
use crate::beacons::BeaconRegistry;
use crate::error::{Error, Result};
use crate::sync::ContentSynchronizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Manages the exhibits stored beneath one root folder
pub struct ExhibitManager {
    exhibits_root: PathBuf,
    registry: Arc<dyn BeaconRegistry>,
    synchronizer: Arc<dyn ContentSynchronizer>,
}

impl ExhibitManager {
    /// Create a manager for the given root, creating the folder if needed
    pub async fn new(
        exhibits_root: impl Into<PathBuf>,
        registry: Arc<dyn BeaconRegistry>,
        synchronizer: Arc<dyn ContentSynchronizer>,
    ) -> Result<Self> {
        let exhibits_root = exhibits_root.into();
        tokio::fs::create_dir_all(&exhibits_root).await?;

        Ok(Self {
            exhibits_root,
            registry,
            synchronizer,
        })
    }

    /// The folder all exhibits live under
    pub fn exhibits_root(&self) -> &Path {
        &self.exhibits_root
    }

    /// Load every exhibit under the root.
    ///
    /// Subfolders whose names aren't numeric identifiers are skipped with
    /// a warning; an exhibit that fails to load is skipped with an error
    /// log so one corrupt exhibit doesn't hide the rest.
    pub async fn list(&self) -> Result<Vec<Exhibit>> {
        let mut exhibits = Vec::new();

        let mut entries = tokio::fs::read_dir(&self.exhibits_root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.parse::<i64>().is_err() {
                tracing::warn!(
                    folder = %entry.path().display(),
                    "Skipping subfolder that isn't named by an exhibit id"
                );
                continue;
            }

            match Exhibit::load_from_folder(
                &entry.path(),
                Arc::clone(&self.registry),
                Arc::clone(&self.synchronizer),
            )
            .await
            {
                Ok(exhibit) => exhibits.push(exhibit),
                Err(e) => {
                    tracing::error!(
                        folder = %entry.path().display(),
                        error = %e,
                        "Couldn't load exhibit"
                    );
                }
            }
        }

        exhibits.sort_by_key(|exhibit| exhibit.id());
        Ok(exhibits)
    }

    /// Open one exhibit by identifier
    pub async fn open(&self, id: i64) -> Result<Exhibit> {
        let folder = self.exhibits_root.join(id.to_string());
        Exhibit::load_from_folder(
            &folder,
            Arc::clone(&self.registry),
            Arc::clone(&self.synchronizer),
        )
        .await
    }

    /// Create a new exhibit with the given name
    pub async fn create(&self, name: &str) -> Result<Exhibit> {
        Exhibit::initialize_into_folder(
            name,
            &self.exhibits_root,
            Arc::clone(&self.registry),
            Arc::clone(&self.synchronizer),
        )
        .await
    }

    /// Delete an exhibit and everything it stores.
    ///
    /// The synchronizer is told about the folder before it is removed,
    /// mirroring per-beacon deletion.
    pub async fn remove(&self, id: i64) -> Result<()> {
        let folder = self.exhibits_root.join(id.to_string());
        if !tokio::fs::try_exists(&folder).await? {
            return Err(Error::InvalidArgument(format!("no exhibit with id {}", id)));
        }

        self.synchronizer.delete_synced_equivalent(&folder).await;
        tokio::fs::remove_dir_all(&folder).await?;

        tracing::info!(id, "Deleted exhibit");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beacons::{Beacon, InMemoryBeaconRegistry, MacAddress};
    use crate::sync::NoopSynchronizer;

    fn addr(s: &str) -> MacAddress {
        MacAddress::parse(s).unwrap()
    }

    async fn manager(root: &Path) -> ExhibitManager {
        let registry = Arc::new(InMemoryBeaconRegistry::with_beacons(vec![Beacon::new(
            addr("AA:BB:CC:DD:EE:01"),
            "Entrance",
        )]));
        ExhibitManager::new(root, registry, Arc::new(NoopSynchronizer))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("exhibits");
        let manager = manager(&root).await;

        assert!(manager.exhibits_root().is_dir());
    }

    #[tokio::test]
    async fn test_create_list_open() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path()).await;

        let hall_a = manager.create("Hall A").await.unwrap();
        let hall_b = manager.create("Hall B").await.unwrap();

        let listed = manager.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        let mut titles: Vec<&str> = listed.iter().map(|e| e.title()).collect();
        titles.sort();
        assert_eq!(titles, vec!["Hall A", "Hall B"]);

        let opened = manager.open(hall_a.id()).await.unwrap();
        assert_eq!(opened.title(), "Hall A");
        assert_ne!(hall_a.id(), hall_b.id());
    }

    #[tokio::test]
    async fn test_list_skips_foreign_folders() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path()).await;

        manager.create("Hall A").await.unwrap();
        tokio::fs::create_dir(dir.path().join("not-an-exhibit"))
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("stray.txt"), b"x")
            .await
            .unwrap();

        let listed = manager.list().await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_list_skips_corrupt_exhibit() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path()).await;

        manager.create("Hall A").await.unwrap();
        // a folder with a valid id but no metadata file
        tokio::fs::create_dir(dir.path().join("424242"))
            .await
            .unwrap();

        let listed = manager.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title(), "Hall A");
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path()).await;

        let exhibit = manager.create("Hall A").await.unwrap();
        let id = exhibit.id();
        let folder = exhibit.root_folder().to_path_buf();
        drop(exhibit);

        manager.remove(id).await.unwrap();
        assert!(!folder.exists());
        assert!(manager.list().await.unwrap().is_empty());

        let again = manager.remove(id).await;
        assert!(matches!(again, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_open_missing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path()).await;

        let result = manager.open(9999).await;
        assert!(result.is_err());
    }
}

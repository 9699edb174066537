//! Content synchronization hook
//!
//! Deployments typically mirror exhibit content to a secondary store (a
//! remote drive, a staging server). The core doesn't know or care how the
//! mirror works; it only tells the synchronizer when a content file or a
//! beacon folder is deleted so the mirror can drop its copy. Notifications
//! are best-effort: no return value is consumed, and for content removal
//! they run on a detached task that may not finish before process exit.

use async_trait::async_trait;
use std::path::Path;

/// Mirrors exhibit deletions to a secondary store
#[async_trait]
pub trait ContentSynchronizer: Send + Sync {
    /// Delete the synced copy of the file or folder at `path`.
    ///
    /// Implementations handle their own failures; callers never observe
    /// them.
    async fn delete_synced_equivalent(&self, path: &Path);
}

/// Synchronizer for deployments without a secondary store
pub struct NoopSynchronizer;

#[async_trait]
impl ContentSynchronizer for NoopSynchronizer {
    async fn delete_synced_equivalent(&self, path: &Path) {
        tracing::debug!(path = %path.display(), "No synchronizer configured, nothing to mirror");
    }
}

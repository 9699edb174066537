//! Docent - Folder-backed exhibit content management for BLE beacons
//!
//! Docent manages "exhibits": named collections of per-beacon media that
//! museum and kiosk deployments compose, reorder, and swap onto physical
//! BLE beacons. Each exhibit is a folder tree indexed by a JSON metadata
//! document; a best-effort synchronization hook mirrors deletions to a
//! secondary store.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    ExhibitManager                       │
//! │   enumerate / open / create / delete exhibit folders    │
//! └───────────────────────────┬────────────────────────────┘
//!                             │
//! ┌───────────────────────────▼────────────────────────────┐
//! │                       Exhibit                           │
//! │  - metadata document  (name, description, per-beacon    │
//! │    ordered content lists)                               │
//! │  - beacon → content-folder layout                       │
//! │  - mutation API, persisted synchronously                │
//! └──────┬──────────────────────────────────────┬──────────┘
//!        │                                      │
//! ┌──────▼──────────────┐            ┌──────────▼──────────┐
//! │   BeaconRegistry    │            │ ContentSynchronizer │
//! │ which beacons exist │            │ mirror deletions,   │
//! │ (injected)          │            │ fire-and-forget     │
//! └─────────────────────┘            └─────────────────────┘
//! ```
//!
//! The folder tree on disk is the source of truth; every in-memory
//! exhibit is a cache reconstructed from it.
//!
//! ## Modules
//!
//! - [`exhibits`]: exhibit aggregate, metadata store, folder layout
//! - [`beacons`]: beacon identity and the registry capability
//! - [`sync`]: the deletion-mirroring hook
//! - [`config`]: configuration management

pub mod beacons;
pub mod config;
pub mod error;
pub mod exhibits;
pub mod sync;

pub use config::DocentConfig;
pub use error::{Error, Result};
pub use exhibits::{Exhibit, ExhibitManager};

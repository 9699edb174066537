//! Exhibit persistence and content management
//!
//! An exhibit is a named set of per-beacon media, stored as a folder tree
//! with a JSON index:
//!
//! ```text
//! <exhibits-root>/<exhibit-id>/
//! ├── metadata.json
//! ├── AA:BB:CC:DD:EE:01/
//! │   ├── intro.mp4
//! │   └── map.png
//! └── AA:BB:CC:DD:EE:02/
//!     └── welcome.mp3
//! ```
//!
//! The folder tree is the source of truth; the in-memory [`Exhibit`] is a
//! cache reconstructed by [`Exhibit::load_from_folder`]. Every mutation
//! persists the metadata document synchronously before it returns.

mod content;
mod exhibit;
mod layout;
mod manager;
mod metadata;

pub use content::{ContentKind, ExhibitContent};
pub use exhibit::Exhibit;
pub use manager::ExhibitManager;
pub use metadata::{BeaconEntry, ExhibitMetadata, METADATA_FILE_NAME};

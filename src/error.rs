//! Docent error types

use std::path::PathBuf;
use thiserror::Error;

/// Docent error type
#[derive(Error, Debug)]
pub enum Error {
    /// A folder or parent precondition was violated
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A string could not be parsed as a beacon MAC address
    #[error("Invalid beacon address: {0}")]
    InvalidAddress(String),

    /// The metadata file is missing, unreadable, or not valid JSON
    #[error("Metadata corrupt at {}: {reason}", .path.display())]
    MetadataCorrupt { path: PathBuf, reason: String },

    /// Metadata lists a content file that does not exist on disk
    #[error("Metadata references missing file: {}", .0.display())]
    DanglingReference(PathBuf),

    /// A content folder could not be created
    #[error("Couldn't create folder {}: {reason}", .path.display())]
    FolderCreate { path: PathBuf, reason: String },

    /// A content file could not be copied into a beacon folder
    #[error("Couldn't copy {} into {}: {reason}", .source_path.display(), .dest.display())]
    CopyFailed {
        source_path: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    /// No content with the given name is listed for the beacon
    #[error("No such content: {0}")]
    ContentNotFound(String),

    /// No metadata entry matches the given beacon address
    #[error("No such beacon: {0}")]
    BeaconNotFound(String),

    /// The beacon has no content folder in this exhibit
    #[error("Beacon not configured for exhibit: {0}")]
    UnknownBeacon(String),

    /// The metadata file could not be written
    #[error("Couldn't write metadata to {}: {reason}", .path.display())]
    MetadataWrite { path: PathBuf, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Docent operations
pub type Result<T> = std::result::Result<T, Error>;

//! Exhibit content items
//!
//! A content item is derived entirely from its file: the display name is
//! the file name and the kind is inferred from the extension. Existence
//! and ordering are governed by the metadata document, never by the item
//! itself.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Broad media category of a content file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Still image (jpg, png, gif, webp, bmp, svg)
    Image,
    /// Video (mp4, mov, mkv, webm, avi)
    Video,
    /// Audio (mp3, wav, ogg, flac, m4a)
    Audio,
    /// Text or markup (txt, md, html, htm)
    Text,
    /// Anything else
    Other,
}

impl ContentKind {
    /// Infer the kind from a file extension (case-insensitive)
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "svg" => Self::Image,
            "mp4" | "mov" | "mkv" | "webm" | "avi" => Self::Video,
            "mp3" | "wav" | "ogg" | "flac" | "m4a" => Self::Audio,
            "txt" | "md" | "html" | "htm" => Self::Text,
            _ => Self::Other,
        }
    }
}

/// One piece of media assigned to a beacon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhibitContent {
    name: String,
    kind: ContentKind,
    path: PathBuf,
}

impl ExhibitContent {
    /// Build a content item from the file it lives in
    pub fn from_file(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let kind = path
            .extension()
            .map(|ext| ContentKind::from_extension(&ext.to_string_lossy()))
            .unwrap_or(ContentKind::Other);

        Self { name, kind, path }
    }

    /// Display name, identical to the file name on disk
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inferred media kind
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

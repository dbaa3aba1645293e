//! Native host errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FramingError {
    #[error("Frame too large: {size} bytes, max {max} bytes")]
    FrameTooLarge { size: usize, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest not found: {0}")]
    NotFound(PathBuf),

    #[error("No native messaging directory on this platform")]
    NoManifestDir,

    #[error("Manifest name mismatch: expected {expected}, found {found}")]
    NameMismatch { expected: String, found: String },

    #[error("Unsupported host type: {0}")]
    UnsupportedType(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

//! Error types for the segmentation core and the texture batch around it.

use std::path::PathBuf;

/// Failure raised by the region mapper.
///
/// The check happens before any pixel is written, so the buffer is untouched
/// whenever this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecolorError {
    #[error("expected {expected} faces, found {found}")]
    FaceCountMismatch { expected: usize, found: usize },
}

/// Errors surfaced by the texture pipeline and the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Recolor(#[from] RecolorError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("missing texture {}", .0.display())]
    MissingTexture(PathBuf),

    #[error("unknown palette {0:?}")]
    UnknownPalette(String),
}

use std::path::PathBuf;
use thiserror::Error;

/// Contract violations raised by the shape store and the drawing session.
///
/// A host that honours the session state never sees these; they exist so a
/// misbehaving host gets a descriptive error instead of a corrupted store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawingError {
    /// The operation is not allowed in the current state
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A preview operation was requested but no preview shape exists
    #[error("no active preview shape")]
    NoActivePreview,
}

/// Result type for store and session operations
pub type DrawingResult<T> = Result<T, DrawingError>;

/// Errors that can occur while exporting the canvas to a raster image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("canvas of {width}x{height} pixels cannot be rasterized")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("failed to render canvas: {0}")]
    Render(String),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while opening a raster image as the background
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to load image {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors that can occur while reading or writing drawing settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings data: {0}")]
    Parse(#[from] serde_json::Error),
}

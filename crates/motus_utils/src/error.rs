//! Utility error types

use thiserror::Error;

/// JSON encoding or decoding failed
#[derive(Error, Debug)]
#[error("JSON error: {0}")]
pub struct JsonError(#[from] pub serde_json::Error);

/// Errors from bitmap encoding
#[derive(Error, Debug)]
pub enum BitmapError {
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Cannot write image file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from downloading or copying files
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Download failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("File I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file name pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Download worker stopped before reporting a result")]
    WorkerLost,
}

//! Crate-wide error type

use thiserror::Error;

/// Errors surfaced by file output, settings and figure layout
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A figure's construction never produced one of its anchor points
    #[error("Layout error: {0}")]
    Layout(String),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the bordered renderer.

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum BorderedError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors while loading or validating a frame document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading frame document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid frame document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid color format: {value}")]
    InvalidColor { value: String },

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid rect at index {index}: {reason}")]
    InvalidRect { index: usize, reason: String },
}

/// Errors during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("GPU initialization failed: {reason}")]
    GpuInitFailed { reason: String },

    #[error("GPU error: {reason}")]
    GpuError { reason: String },

    #[error("Invalid render target size: {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },
}

/// Errors during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {reason}")]
    Encode { reason: String },

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
}

//! Rendering error types.

use thiserror::Error;

/// Errors that can occur while rendering frames, legends or animations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Per-point data does not match the number of points.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The canvas has a zero dimension.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    /// `animate` was called before any keyframe was captured.
    #[error("no keyframes captured")]
    NoKeyframes,

    /// Frame rate of zero.
    #[error("fps must be positive")]
    InvalidFps,

    /// Output path has an extension we cannot encode.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Failed to write output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

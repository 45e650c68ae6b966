//! Error types for cloudspin runs.

use thiserror::Error;

use cloudspin_core::CoreError;
use cloudspin_render::RenderError;

/// Any failure of a fly-around run.
#[derive(Error, Debug)]
pub enum CloudspinError {
    /// Label, trajectory or input validation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Rendering or encoding failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Invalid run configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input data with an unexpected shape or element type.
    #[error("invalid input data: {0}")]
    Data(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for cloudspin operations.
pub type Result<T> = std::result::Result<T, CloudspinError>;

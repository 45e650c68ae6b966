//! Error types for cloudspin-core.

use thiserror::Error;

/// Validation failures raised by the color mapper and trajectory generator.
///
/// Every variant is detected eagerly at component entry, before any output is
/// produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A label is empty (or an empty label record was supplied).
    #[error("invalid label at index {index}: labels must be non-empty strings")]
    InvalidLabel { index: usize },

    /// Trajectory parameters are out of range.
    #[error("invalid trajectory plan: {0}")]
    InvalidPlan(String),

    /// Coordinates and labels do not describe the same number of points.
    #[error("input length mismatch: {coordinates} coordinates but {labels} labels")]
    InputLengthMismatch { coordinates: usize, labels: usize },
}

/// A specialized Result type for cloudspin-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

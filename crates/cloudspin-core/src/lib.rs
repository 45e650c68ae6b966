//! Core algorithms for cloudspin.
//!
//! This crate holds the two pure stages of a fly-around run:
//! - [`CategoricalColorMapper`] turns per-point category labels into a color
//!   table and a legend, with a fixed grey for the sentinel category
//! - [`CameraTrajectoryGenerator`] turns a [`TrajectoryPlan`] into camera
//!   keyframes for an animation sink
//!
//! Neither stage performs I/O or keeps state between calls.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod color_mapper;
pub mod error;
pub mod label;
pub mod options;
pub mod palette;
pub mod trajectory;

pub use color_mapper::{CategoricalColorMapper, CategoricalColors, ColorTable, LegendEntry};
pub use error::{CoreError, Result};
pub use label::{check_lengths, display_name, LabelSet, DEFAULT_SENTINEL};
pub use options::{PointStyle, Shading, ViewerOptions};
pub use palette::{hls_to_rgb, hue_palette, neutral_grey, NEUTRAL_GREY};
pub use trajectory::{
    CameraKeyframe, CameraTrajectoryGenerator, TrajectoryPlan, ARC_DEGREES, MAX_ROTATION,
};

// Re-export glam types for convenience
pub use glam::{Vec3, Vec4};

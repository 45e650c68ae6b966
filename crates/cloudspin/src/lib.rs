//! cloudspin: rotating fly-around videos of categorically colored 3D point
//! clouds.
//!
//! A run loads per-point coordinates and category labels, colors each
//! category from an evenly spaced hue palette (the sentinel category stays
//! neutral grey), writes a legend image, and renders a camera orbit to a GIF
//! or a PNG sequence.
//!
//! # Quick Start
//!
//! ```no_run
//! use cloudspin::*;
//!
//! fn main() -> Result<()> {
//!     let source = PointSource::new(
//!         vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)],
//!         vec!["mitochondria".into(), "others".into()],
//!     )?;
//!     let summary = run(&source, &RunConfig::default())?;
//!     println!("{} frames written", summary.frames);
//!     Ok(())
//! }
//! ```
//!
//! # Stages
//!
//! - [`CategoricalColorMapper`] - labels to colors and legend entries
//! - [`CameraTrajectoryGenerator`] - a [`TrajectoryPlan`] to camera keyframes
//! - [`SoftwareViewer`] - a CPU point viewer implementing [`PointViewer`]
//! - [`Animation`] - keyframe capture and GIF or PNG-sequence output

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;

pub use config::{LegendConfig, RunConfig};
pub use error::{CloudspinError, Result};
pub use pipeline::{record_fly_around, run, RunSummary};
pub use source::{LabelRecord, PointSource};

// Re-export core types
pub use cloudspin_core::{
    CameraKeyframe, CameraTrajectoryGenerator, CategoricalColorMapper, CategoricalColors,
    ColorTable, CoreError, LegendEntry, PointStyle, Shading, TrajectoryPlan, ViewerOptions,
    DEFAULT_SENTINEL,
};

// Re-export render types
pub use cloudspin_render::{
    Animation, AnimationFormat, LegendOptions, PointLayer, PointViewer, RenderError,
    SoftwareViewer, ViewerCamera,
};

pub use glam::{Vec3, Vec4};

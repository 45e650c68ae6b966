//! Rendering sinks for cloudspin.
//!
//! This crate provides the consumers of the core's color tables and keyframes:
//! - [`PointViewer`] and the CPU [`SoftwareViewer`] that draws colored points
//! - [`ViewerCamera`], the orbit camera the viewer renders through
//! - [`Animation`], which captures keyframes and writes GIFs or PNG sequences
//! - legend images with one swatch per category

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod animation;
pub mod camera;
pub mod error;
pub mod legend;
pub mod raster;
pub mod screenshot;
pub mod viewer;

pub use animation::{interpolate_cameras, Animation, CapturedKeyframe};
pub use camera::{ViewerCamera, DEFAULT_ANGLES};
pub use error::{RenderError, RenderResult};
pub use legend::{
    build_legend, load_legend_font, render_legend, save_legend, LegendOptions, FONT_PATH_ENV,
};
pub use screenshot::{frame_file_name, save_image, AnimationFormat};
pub use viewer::{PointLayer, PointViewer, SoftwareViewer};

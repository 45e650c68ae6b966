//! Run configuration.
//!
//! A [`RunConfig`] is read from JSON; every field is optional and falls back
//! to the defaults below. Command-line flags override individual fields.

use std::path::{Path, PathBuf};

use glam::Vec4;
use serde::{Deserialize, Serialize};

use cloudspin_core::{PointStyle, TrajectoryPlan, ViewerOptions, DEFAULT_SENTINEL};
use cloudspin_render::LegendOptions;

use crate::error::{CloudspinError, Result};

/// Legend image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    /// Whether to write a legend image at all.
    pub enabled: bool,

    /// Output path of the legend image.
    pub path: PathBuf,

    pub font_size: f32,
    pub swatch_diameter: f32,

    /// Text color.
    pub text_color: Vec4,

    /// Font file; falls back to `CLOUDSPIN_FONT` and system fonts.
    pub font_path: Option<PathBuf>,
}

impl Default for LegendConfig {
    fn default() -> Self {
        let options = LegendOptions::default();
        Self {
            enabled: true,
            path: PathBuf::from("legend.png"),
            font_size: options.font_size,
            swatch_diameter: options.swatch_diameter,
            text_color: options.text_color,
            font_path: None,
        }
    }
}

impl LegendConfig {
    /// Layout options for the legend renderer.
    #[must_use]
    pub fn to_options(&self) -> LegendOptions {
        LegendOptions {
            font_size: self.font_size,
            swatch_diameter: self.swatch_diameter,
            text_color: self.text_color,
            font_path: self.font_path.clone(),
            ..LegendOptions::default()
        }
    }
}

/// Everything a fly-around run needs besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Label colored neutral grey and listed last in the legend.
    pub sentinel: String,

    /// Name of the point layer added to the viewer.
    pub layer_name: String,

    pub style: PointStyle,
    pub viewer: ViewerOptions,
    pub trajectory: TrajectoryPlan,
    pub legend: LegendConfig,

    /// Animation output: a `.gif` file or a directory for PNG frames.
    pub output: PathBuf,

    /// Capture only the canvas, without window chrome.
    pub canvas_only: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            layer_name: "points".to_string(),
            style: PointStyle::default(),
            viewer: ViewerOptions::default(),
            trajectory: TrajectoryPlan::default(),
            legend: LegendConfig::default(),
            output: PathBuf::from("3d_umap.gif"),
            canvas_only: true,
        }
    }
}

impl RunConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Checks settings the individual stages cannot check themselves.
    pub fn validate(&self) -> Result<()> {
        if self.sentinel.is_empty() {
            return Err(CloudspinError::Config("sentinel label is empty".into()));
        }
        if !(self.style.point_size.is_finite() && self.style.point_size > 0.0) {
            return Err(CloudspinError::Config(format!(
                "point_size must be positive, got {}",
                self.style.point_size
            )));
        }
        if !(0.0..=1.0).contains(&self.style.opacity) {
            return Err(CloudspinError::Config(format!(
                "opacity must be within [0, 1], got {}",
                self.style.opacity
            )));
        }
        Ok(())
    }
}

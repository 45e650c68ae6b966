//! Display options handed to the point viewer.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// How point discs are shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shading {
    /// Flat discs.
    None,
    /// Discs darkened toward the rim so they read as spheres.
    #[default]
    Spherical,
}

/// Appearance of one point layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    /// Point diameter in data units (before `scale`).
    pub point_size: f32,

    /// Rim width as a fraction of the point radius (0 disables the rim).
    pub edge_width: f32,

    /// Rim color.
    pub edge_color: Vec4,

    /// Layer opacity, multiplied into each point's alpha.
    pub opacity: f32,

    /// Per-axis scale from data units to world units.
    pub scale: Vec3,

    pub shading: Shading,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            point_size: 0.06,
            edge_width: 0.0,
            edge_color: Vec4::ONE,
            opacity: 0.9,
            scale: Vec3::splat(100.0),
            shading: Shading::Spherical,
        }
    }
}

/// Canvas settings of the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Canvas size in pixels (width, height).
    pub window_size: [u32; 2],

    /// Background color.
    pub background_color: Vec3,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            window_size: [1300, 1000],
            background_color: Vec3::ZERO,
        }
    }
}

//! Camera and view management.

use cloudspin_core::CameraKeyframe;
use glam::{Quat, Vec3};

/// Angles of the default side-on view: `(pan, rotation, tilt)` in degrees.
pub const DEFAULT_ANGLES: [f32; 3] = [0.0, 0.0, 90.0];

/// Fraction of the canvas the scene fills after [`ViewerCamera::fit_to_box`].
const FIT_MARGIN: f32 = 0.95;

/// Orthographic camera orbiting a pivot.
///
/// Angles are Euler angles in degrees:
/// - `pan` rolls the image around the view axis
/// - `rotation` spins the scene around its vertical axis
/// - `tilt` is the elevation; 90 looks at the scene side-on, 0 from above
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerCamera {
    /// Pixels per world unit at zoom 1, set by [`ViewerCamera::fit_to_box`].
    pub scale: f32,
    /// Magnification on top of `scale`.
    pub zoom: f32,
    /// `(pan, rotation, tilt)` in degrees.
    pub angles: [f32; 3],
    /// World-space point the camera orbits and centers on.
    pub pivot: Vec3,
}

impl Default for ViewerCamera {
    fn default() -> Self {
        Self {
            scale: 1.0,
            zoom: 1.0,
            angles: DEFAULT_ANGLES,
            pivot: Vec3::ZERO,
        }
    }
}

impl ViewerCamera {
    /// Sets zoom and angles from a trajectory keyframe, keeping the fitted
    /// scale and pivot.
    pub fn apply_keyframe(&mut self, keyframe: &CameraKeyframe) {
        self.zoom = keyframe.zoom;
        self.angles = keyframe.angles();
    }

    /// Centers on the given bounding box, restores the default angles and
    /// zoom, and picks a scale at which the box diagonal spans 95% of the
    /// shorter canvas side.
    pub fn fit_to_box(&mut self, min: Vec3, max: Vec3, canvas: (u32, u32)) {
        self.pivot = (min + max) * 0.5;
        self.angles = DEFAULT_ANGLES;
        self.zoom = 1.0;

        #[allow(clippy::cast_precision_loss)]
        let short_side = canvas.0.min(canvas.1) as f32;
        let diagonal = (max - min).length();
        self.scale = if diagonal > f32::EPSILON {
            FIT_MARGIN * short_side / diagonal
        } else {
            1.0
        };
    }

    /// Pixels per world unit at the current zoom.
    #[must_use]
    pub fn pixels_per_unit(&self) -> f32 {
        self.scale * self.zoom
    }

    /// Rotation taking world offsets from the pivot into view space, where
    /// +X is right, +Y is up and +Z points toward the viewer.
    #[must_use]
    pub fn view_rotation(&self) -> Quat {
        let [pan, rotation, tilt] = self.angles;
        Quat::from_rotation_z(pan.to_radians())
            * Quat::from_rotation_x((90.0 - tilt).to_radians())
            * Quat::from_rotation_y(rotation.to_radians())
    }

    /// Maps a world position to canvas pixels plus depth (larger is nearer).
    #[must_use]
    pub fn project(&self, rotation: Quat, world: Vec3, canvas: (u32, u32)) -> Vec3 {
        let view = rotation * (world - self.pivot);
        #[allow(clippy::cast_precision_loss)]
        let (cx, cy) = (canvas.0 as f32 * 0.5, canvas.1 as f32 * 0.5);
        let ppu = self.pixels_per_unit();
        Vec3::new(cx + view.x * ppu, cy - view.y * ppu, view.z)
    }

    /// Linear blend towards `other`; `t = 0` gives `self`, `t = 1` gives `other`.
    ///
    /// Angles are blended as plain numbers, so the sweep follows the absolute
    /// angle values rather than the shortest arc.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        if t >= 1.0 {
            return *other;
        }
        let blend = |a: f32, b: f32| a + (b - a) * t;
        Self {
            scale: blend(self.scale, other.scale),
            zoom: blend(self.zoom, other.zoom),
            angles: [
                blend(self.angles[0], other.angles[0]),
                blend(self.angles[1], other.angles[1]),
                blend(self.angles[2], other.angles[2]),
            ],
            pivot: self.pivot.lerp(other.pivot, t),
        }
    }
}

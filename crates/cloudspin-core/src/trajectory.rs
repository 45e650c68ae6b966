//! Camera fly-around trajectories.
//!
//! A trajectory is a list of [`CameraKeyframe`]s, one per 180 degree arc around
//! the scene pivot. Rotation angles accumulate without wrapping: a sink that
//! interpolates between absolute angles always sweeps forward, where a wrapped
//! `180 -> 0` pair could be read as a reverse arc.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Degrees swept between consecutive keyframes.
pub const ARC_DEGREES: f32 = 180.0;
/// Camera tilt for a side-on orbit.
pub const ORBIT_TILT: f32 = 90.0;
/// Largest rotation magnitude a keyframe may reach. Up to `2^24` the `f32`
/// spacing is at most 2 degrees, so consecutive arcs stay distinct.
pub const MAX_ROTATION: f64 = 16_777_216.0;

/// A camera pose plus the number of interpolation steps needed to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraKeyframe {
    /// Roll around the view axis, in degrees.
    pub pan: f32,
    /// Rotation around the vertical axis, in degrees.
    pub rotation: f32,
    /// Elevation, in degrees. 90 looks at the scene side-on.
    pub tilt: f32,
    /// Pixels per world unit.
    pub zoom: f32,
    /// Frames spent interpolating from the previous keyframe.
    pub transition_steps: u32,
}

impl CameraKeyframe {
    /// The `(pan, rotation, tilt)` triple.
    #[must_use]
    pub fn angles(&self) -> [f32; 3] {
        [self.pan, self.rotation, self.tilt]
    }
}

/// Parameters of one fly-around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryPlan {
    /// Number of 180 degree arcs (one keyframe each).
    pub turns: u32,
    pub fps: u32,
    pub seconds_per_turn: f32,
    /// Rotation of the first keyframe, in degrees.
    pub start_angle: f32,
    pub zoom: f32,
}

impl Default for TrajectoryPlan {
    fn default() -> Self {
        Self {
            turns: 2,
            fps: 60,
            seconds_per_turn: 3.0,
            start_angle: 0.0,
            zoom: 0.6,
        }
    }
}

impl TrajectoryPlan {
    /// Interpolation steps per keyframe: `fps * seconds_per_turn`, rounded.
    ///
    /// Saturates at `u32::MAX`; [`validate`](Self::validate) rejects plans
    /// that would.
    #[must_use]
    pub fn transition_steps(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = self.exact_steps() as u32;
        steps
    }

    fn exact_steps(&self) -> f64 {
        (f64::from(self.fps) * f64::from(self.seconds_per_turn)).round()
    }

    /// Rotation of keyframe `index`, computed in `f64`.
    fn rotation_at(&self, index: u32) -> f64 {
        f64::from(self.start_angle) + f64::from(ARC_DEGREES) * f64::from(index)
    }

    /// Frames an interpolating sink produces for this plan: the first keyframe
    /// is shown once, every later keyframe adds its transition.
    #[must_use]
    pub fn total_frames(&self) -> u64 {
        1 + u64::from(self.turns.saturating_sub(1)) * u64::from(self.transition_steps())
    }

    /// Checks every parameter, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.turns < 1 {
            return Err(CoreError::InvalidPlan(format!(
                "turns must be at least 1, got {}",
                self.turns
            )));
        }
        if self.fps == 0 {
            return Err(CoreError::InvalidPlan("fps must be positive".into()));
        }
        if !(self.seconds_per_turn.is_finite() && self.seconds_per_turn > 0.0) {
            return Err(CoreError::InvalidPlan(format!(
                "seconds_per_turn must be positive, got {}",
                self.seconds_per_turn
            )));
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(CoreError::InvalidPlan(format!(
                "zoom must be positive, got {}",
                self.zoom
            )));
        }
        if !self.start_angle.is_finite() {
            return Err(CoreError::InvalidPlan("start_angle must be finite".into()));
        }
        let last_rotation = self.rotation_at(self.turns - 1);
        let first_rotation = f64::from(self.start_angle);
        if first_rotation.abs() > MAX_ROTATION || last_rotation.abs() > MAX_ROTATION {
            return Err(CoreError::InvalidPlan(format!(
                "rotations from {} to {last_rotation} exceed +/-{MAX_ROTATION} degrees",
                self.start_angle
            )));
        }
        if self.exact_steps() > f64::from(u32::MAX) {
            return Err(CoreError::InvalidPlan(format!(
                "{} fps over {} s exceeds {} transition steps",
                self.fps,
                self.seconds_per_turn,
                u32::MAX
            )));
        }
        if self.transition_steps() == 0 {
            return Err(CoreError::InvalidPlan(format!(
                "{} fps over {} s rounds to zero transition steps",
                self.fps, self.seconds_per_turn
            )));
        }
        Ok(())
    }
}

/// Produces the keyframes of a constant-zoom orbit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraTrajectoryGenerator;

impl CameraTrajectoryGenerator {
    /// Generates exactly `plan.turns` keyframes with strictly increasing
    /// rotation and constant transition steps.
    pub fn generate(plan: &TrajectoryPlan) -> Result<Vec<CameraKeyframe>> {
        plan.validate()?;

        let transition_steps = plan.transition_steps();
        #[allow(clippy::cast_possible_truncation)]
        let keyframes: Vec<CameraKeyframe> = (0..plan.turns)
            .map(|index| CameraKeyframe {
                pan: 0.0,
                rotation: plan.rotation_at(index) as f32,
                tilt: ORBIT_TILT,
                zoom: plan.zoom,
                transition_steps,
            })
            .collect();

        if keyframes
            .windows(2)
            .any(|pair| pair[0].rotation >= pair[1].rotation)
        {
            return Err(CoreError::InvalidPlan(format!(
                "rotations starting at {} are not strictly increasing in f32",
                plan.start_angle
            )));
        }

        log::debug!(
            "generated {} keyframes, {} steps each, rotation {} -> {}",
            keyframes.len(),
            transition_steps,
            plan.start_angle,
            plan.rotation_at(plan.turns - 1)
        );
        Ok(keyframes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_arc_plan() {
        let plan = TrajectoryPlan {
            turns: 2,
            fps: 60,
            seconds_per_turn: 3.0,
            start_angle: 0.0,
            zoom: 0.6,
        };
        let keyframes = CameraTrajectoryGenerator::generate(&plan).unwrap();
        assert_eq!(keyframes.len(), 2);
        assert_eq!(keyframes[0].rotation, 0.0);
        assert_eq!(keyframes[1].rotation, 180.0);
        assert!(keyframes.iter().all(|k| k.transition_steps == 180));
        assert_eq!(keyframes[0].angles(), [0.0, 0.0, 90.0]);
        assert_eq!(keyframes[1].zoom, 0.6);
    }

    #[test]
    fn test_default_plan_matches_two_arcs() {
        let plan = TrajectoryPlan::default();
        assert_eq!(plan.transition_steps(), 180);
        assert_eq!(plan.total_frames(), 181);
    }

    #[test]
    fn test_zero_turns_is_invalid() {
        let plan = TrajectoryPlan {
            turns: 0,
            ..TrajectoryPlan::default()
        };
        assert!(matches!(
            CameraTrajectoryGenerator::generate(&plan),
            Err(CoreError::InvalidPlan(_))
        ));
    }

    #[test]
    fn test_invalid_rates() {
        let zero_fps = TrajectoryPlan {
            fps: 0,
            ..TrajectoryPlan::default()
        };
        assert!(zero_fps.validate().is_err());

        let negative_seconds = TrajectoryPlan {
            seconds_per_turn: -1.0,
            ..TrajectoryPlan::default()
        };
        assert!(negative_seconds.validate().is_err());

        let nan_seconds = TrajectoryPlan {
            seconds_per_turn: f32::NAN,
            ..TrajectoryPlan::default()
        };
        assert!(nan_seconds.validate().is_err());

        let zero_zoom = TrajectoryPlan {
            zoom: 0.0,
            ..TrajectoryPlan::default()
        };
        assert!(zero_zoom.validate().is_err());

        let rounds_to_zero = TrajectoryPlan {
            fps: 1,
            seconds_per_turn: 0.2,
            ..TrajectoryPlan::default()
        };
        assert!(rounds_to_zero.validate().is_err());
    }

    #[test]
    fn test_angles_do_not_wrap() {
        let plan = TrajectoryPlan {
            turns: 5,
            start_angle: 270.0,
            ..TrajectoryPlan::default()
        };
        let keyframes = CameraTrajectoryGenerator::generate(&plan).unwrap();
        let rotations: Vec<f32> = keyframes.iter().map(|k| k.rotation).collect();
        assert_eq!(rotations, [270.0, 450.0, 630.0, 810.0, 990.0]);
    }

    #[test]
    fn test_huge_start_angle_is_invalid() {
        let plan = TrajectoryPlan {
            turns: 3,
            start_angle: 1e10,
            ..TrajectoryPlan::default()
        };
        assert!(matches!(
            CameraTrajectoryGenerator::generate(&plan),
            Err(CoreError::InvalidPlan(_))
        ));

        let negative = TrajectoryPlan {
            start_angle: -1e10,
            ..plan
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_rotation_near_limit_still_increases() {
        #[allow(clippy::cast_possible_truncation)]
        let plan = TrajectoryPlan {
            turns: 4,
            start_angle: (MAX_ROTATION - 4.0 * 180.0) as f32,
            ..TrajectoryPlan::default()
        };
        let keyframes = CameraTrajectoryGenerator::generate(&plan).unwrap();
        for pair in keyframes.windows(2) {
            assert!(pair[0].rotation < pair[1].rotation);
        }
    }

    #[test]
    fn test_too_many_turns_is_invalid() {
        let plan = TrajectoryPlan {
            turns: u32::MAX,
            ..TrajectoryPlan::default()
        };
        assert!(matches!(plan.validate(), Err(CoreError::InvalidPlan(_))));
    }

    #[test]
    fn test_step_overflow_is_invalid() {
        let plan = TrajectoryPlan {
            fps: u32::MAX,
            seconds_per_turn: 10.0,
            ..TrajectoryPlan::default()
        };
        assert!(matches!(plan.validate(), Err(CoreError::InvalidPlan(_))));

        let at_limit = TrajectoryPlan {
            fps: u32::MAX,
            seconds_per_turn: 1.0,
            ..TrajectoryPlan::default()
        };
        assert_eq!(at_limit.transition_steps(), u32::MAX);
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_plan_deserializes_with_defaults() {
        let plan: TrajectoryPlan = serde_json::from_str(r#"{"turns": 4}"#).unwrap();
        assert_eq!(plan.turns, 4);
        assert_eq!(plan.fps, 60);
    }

    proptest! {
        #[test]
        fn keyframes_follow_plan(
            turns in 1u32..64,
            fps in 1u32..240,
            seconds in 0.5f32..20.0,
            start in -720.0f32..720.0,
        ) {
            let plan = TrajectoryPlan {
                turns,
                fps,
                seconds_per_turn: seconds,
                start_angle: start,
                zoom: 1.0,
            };
            let keyframes = CameraTrajectoryGenerator::generate(&plan).unwrap();
            prop_assert_eq!(keyframes.len(), turns as usize);
            for pair in keyframes.windows(2) {
                prop_assert!(pair[0].rotation < pair[1].rotation);
            }
            for keyframe in &keyframes {
                prop_assert_eq!(keyframe.transition_steps, plan.transition_steps());
            }
        }
    }
}

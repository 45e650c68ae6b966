//! The fly-around pipeline: colors, legend, viewer, keyframes, animation.
//!
//! Everything that can be validated up front (output formats, labels and the
//! trajectory plan) is checked before the first file is written, so a failed
//! run leaves no partial output behind.

use std::path::Path;

use cloudspin_core::{CameraKeyframe, CategoricalColorMapper, CameraTrajectoryGenerator};
use cloudspin_render::{
    build_legend, frame_file_name, save_image, Animation, AnimationFormat, PointLayer, PointViewer,
    RenderError, SoftwareViewer,
};

use crate::config::RunConfig;
use crate::error::Result;
use crate::source::PointSource;

/// What a completed run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub points: usize,
    /// Distinct non-sentinel categories.
    pub categories: usize,
    pub keyframes: usize,
    /// Frames written to the animation.
    pub frames: usize,
}

/// Runs the whole pipeline on the built-in software viewer.
///
/// The legend is rendered in memory and saved only after the animation has
/// been written. If recording or saving fails, the files this run created are
/// removed again.
pub fn run(source: &PointSource, config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;
    let format = AnimationFormat::from_path(&config.output)?;
    if config.legend.enabled {
        check_legend_path(&config.legend.path)?;
    }

    let mapper = CategoricalColorMapper::with_sentinel(config.sentinel.clone());
    let colors = mapper.map(&source.labels)?;
    let keyframes = CameraTrajectoryGenerator::generate(&config.trajectory)?;
    let mut viewer = SoftwareViewer::new(config.viewer.clone())?;

    let legend = config
        .legend
        .enabled
        .then(|| build_legend(&colors.legend, &config.legend.to_options()));

    let categories = colors.label_set().num_categories();
    let layer = PointLayer::new(
        config.layer_name.clone(),
        source.coordinates.clone(),
        colors.colors,
        config.style.clone(),
    )?;
    viewer.add_points(layer);

    let outputs = OutputGuard {
        animation: &config.output,
        format,
        animation_existed: config.output.exists(),
        frames: config.trajectory.total_frames(),
        legend: legend.as_ref().map(|_| config.legend.path.as_path()),
        legend_existed: config.legend.path.exists(),
    };

    let recorded = record_fly_around(
        &mut viewer,
        &keyframes,
        &config.output,
        config.trajectory.fps,
        config.canvas_only,
    )
    .and_then(|frames| {
        if let Some(image) = &legend {
            save_image(&config.legend.path, image)?;
            log::info!("legend saved to {}", config.legend.path.display());
        }
        Ok(frames)
    });
    let frames = match recorded {
        Ok(frames) => frames,
        Err(e) => {
            outputs.discard();
            return Err(e);
        }
    };

    let summary = RunSummary {
        points: source.len(),
        categories,
        keyframes: keyframes.len(),
        frames,
    };
    log::info!("{summary:?}");
    Ok(summary)
}

/// Poses the viewer at each keyframe, captures it, and renders the animation.
///
/// The view is reset once so every keyframe starts from the same fitted
/// framing; each keyframe then sets the camera angles and zoom.
pub fn record_fly_around<V: PointViewer>(
    viewer: &mut V,
    keyframes: &[CameraKeyframe],
    output: &Path,
    fps: u32,
    canvas_only: bool,
) -> Result<usize> {
    viewer.reset_view();
    let mut animation = Animation::new(viewer);
    for keyframe in keyframes {
        animation.viewer_mut().camera_mut().apply_keyframe(keyframe);
        animation.capture_keyframe(keyframe.transition_steps);
    }
    Ok(animation.animate(output, fps, canvas_only)?)
}

/// Files a run may create, removed again when the run fails.
struct OutputGuard<'a> {
    animation: &'a Path,
    format: AnimationFormat,
    animation_existed: bool,
    frames: u64,
    legend: Option<&'a Path>,
    legend_existed: bool,
}

impl OutputGuard<'_> {
    fn discard(&self) {
        match self.format {
            AnimationFormat::Gif if !self.animation_existed => {
                remove_quietly(std::fs::remove_file(self.animation), self.animation);
            }
            AnimationFormat::Gif => {}
            AnimationFormat::PngSequence if !self.animation_existed => {
                remove_quietly(std::fs::remove_dir_all(self.animation), self.animation);
            }
            AnimationFormat::PngSequence => {
                for index in 0..self.frames {
                    let Ok(index) = usize::try_from(index) else {
                        break;
                    };
                    let frame = self.animation.join(frame_file_name(index));
                    if frame.exists() {
                        remove_quietly(std::fs::remove_file(&frame), &frame);
                    }
                }
            }
        }
        if let Some(legend) = self.legend {
            if !self.legend_existed {
                remove_quietly(std::fs::remove_file(legend), legend);
            }
        }
    }
}

fn remove_quietly(result: std::io::Result<()>, path: &Path) {
    match result {
        Ok(()) => log::debug!("removed partial output {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("could not remove partial output {}: {e}", path.display()),
    }
}

fn check_legend_path(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png" | "jpg" | "jpeg") => Ok(()),
        other => Err(RenderError::UnsupportedFormat(other.unwrap_or_default().to_owned()).into()),
    }
}

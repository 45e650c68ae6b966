//! Keyframe capture and frame-by-frame animation rendering.
//!
//! [`Animation`] borrows the viewer mutably for its whole lifetime: keyframes
//! are captured from the viewer's live camera, and rendering drives that same
//! camera through the interpolated poses one frame at a time. Holding the
//! borrow keeps anything else from moving the camera mid-capture.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::camera::ViewerCamera;
use crate::error::{RenderError, RenderResult};
use crate::screenshot::{frame_file_name, AnimationFormat};
use crate::viewer::PointViewer;

/// GIF quantizer speed (1 = best quality, 30 = fastest).
const GIF_SPEED: i32 = 10;

/// A camera pose recorded by [`Animation::capture_keyframe`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapturedKeyframe {
    pub camera: ViewerCamera,
    /// Frames spent moving here from the previous keyframe.
    pub steps: u32,
}

/// Expands keyframes into one camera per output frame.
///
/// The first keyframe yields a single frame; each later keyframe adds `steps`
/// frames, the last of which is exactly that keyframe's pose. Zero steps cut
/// straight to the pose in one frame.
#[must_use]
pub fn interpolate_cameras(keyframes: &[CapturedKeyframe]) -> Vec<ViewerCamera> {
    let Some(first) = keyframes.first() else {
        return Vec::new();
    };

    let total: usize = keyframes[1..]
        .iter()
        .map(|k| k.steps.max(1) as usize)
        .sum();
    let mut cameras = Vec::with_capacity(total + 1);
    cameras.push(first.camera);

    for pair in keyframes.windows(2) {
        let (from, to) = (&pair[0].camera, &pair[1].camera);
        let steps = pair[1].steps.max(1);
        for step in 1..=steps {
            #[allow(clippy::cast_precision_loss)]
            let t = step as f32 / steps as f32;
            cameras.push(from.lerp(to, t));
        }
    }
    cameras
}

/// Records keyframes from a viewer and renders them to an animation file.
pub struct Animation<'a, V: PointViewer> {
    viewer: &'a mut V,
    keyframes: Vec<CapturedKeyframe>,
}

impl<'a, V: PointViewer> Animation<'a, V> {
    /// Starts an empty animation on `viewer`.
    pub fn new(viewer: &'a mut V) -> Self {
        Self {
            viewer,
            keyframes: Vec::new(),
        }
    }

    #[must_use]
    pub fn viewer(&self) -> &V {
        self.viewer
    }

    /// The viewer, for posing the camera between captures.
    pub fn viewer_mut(&mut self) -> &mut V {
        self.viewer
    }

    #[must_use]
    pub fn keyframes(&self) -> &[CapturedKeyframe] {
        &self.keyframes
    }

    /// Records the viewer's current camera, reached from the previous
    /// keyframe in `steps` frames.
    pub fn capture_keyframe(&mut self, steps: u32) {
        let camera = *self.viewer.camera();
        log::debug!(
            "captured keyframe {} (angles {:?}, zoom {}, {} steps)",
            self.keyframes.len(),
            camera.angles,
            camera.zoom,
            steps
        );
        self.keyframes.push(CapturedKeyframe { camera, steps });
    }

    /// Cameras of every output frame, in playback order.
    #[must_use]
    pub fn frame_cameras(&self) -> Vec<ViewerCamera> {
        interpolate_cameras(&self.keyframes)
    }

    /// Renders every frame in order and writes them to `path`.
    ///
    /// A `.gif` path produces a looping GIF with a `1 / fps` frame delay; a
    /// directory or extension-less path receives numbered PNG frames. The
    /// software viewer has no window chrome, so `canvas_only` does not change
    /// the output. Returns the number of frames written.
    pub fn animate(
        &mut self,
        path: impl AsRef<Path>,
        fps: u32,
        canvas_only: bool,
    ) -> RenderResult<usize> {
        let path = path.as_ref();
        if self.keyframes.is_empty() {
            return Err(RenderError::NoKeyframes);
        }
        if fps == 0 {
            return Err(RenderError::InvalidFps);
        }

        let cameras = self.frame_cameras();
        let mut writer = FrameWriter::create(path, fps)?;
        log::info!(
            "rendering {} frames at {} fps to {} (canvas only: {})",
            cameras.len(),
            fps,
            path.display(),
            canvas_only
        );

        for (index, camera) in cameras.iter().enumerate() {
            *self.viewer.camera_mut() = *camera;
            let frame = self.viewer.render_frame();
            writer.write(index, frame)?;
            if (index + 1) % 30 == 0 {
                log::debug!("rendered frame {}/{}", index + 1, cameras.len());
            }
        }

        log::info!("animation written to {}", path.display());
        Ok(cameras.len())
    }
}

enum FrameWriter {
    Gif {
        encoder: Box<GifEncoder<BufWriter<File>>>,
        delay: Delay,
    },
    PngSequence {
        directory: PathBuf,
    },
}

impl FrameWriter {
    fn create(path: &Path, fps: u32) -> RenderResult<Self> {
        match AnimationFormat::from_path(path)? {
            AnimationFormat::Gif => {
                let file = File::create(path)?;
                let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), GIF_SPEED);
                encoder.set_repeat(Repeat::Infinite)?;
                Ok(Self::Gif {
                    encoder: Box::new(encoder),
                    delay: Delay::from_numer_denom_ms(1000, fps),
                })
            }
            AnimationFormat::PngSequence => {
                std::fs::create_dir_all(path)?;
                Ok(Self::PngSequence {
                    directory: path.to_path_buf(),
                })
            }
        }
    }

    fn write(&mut self, index: usize, image: RgbaImage) -> RenderResult<()> {
        match self {
            Self::Gif { encoder, delay } => {
                encoder.encode_frame(Frame::from_parts(image, 0, 0, *delay))?;
            }
            Self::PngSequence { directory } => {
                let file = directory.join(frame_file_name(index));
                image.save_with_format(file, image::ImageFormat::Png)?;
            }
        }
        Ok(())
    }
}

//! Saving rendered frames to disk.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{RenderError, RenderResult};

/// Where an animation is written, chosen from the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationFormat {
    /// A single looping GIF.
    Gif,
    /// A directory of numbered PNG frames.
    PngSequence,
}

impl AnimationFormat {
    /// Picks the format from the path: `.gif` encodes a GIF, an existing
    /// directory or an extension-less path receives PNG frames.
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        if path.is_dir() {
            return Ok(Self::PngSequence);
        }
        match lowercase_extension(path).as_deref() {
            Some("gif") => Ok(Self::Gif),
            None => Ok(Self::PngSequence),
            Some(other) => Err(RenderError::UnsupportedFormat(other.to_owned())),
        }
    }
}

/// File name of frame `index` inside a PNG sequence directory.
#[must_use]
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{index:05}.png")
}

/// Saves an RGBA image as PNG or JPEG, chosen by extension.
///
/// JPEG output drops the alpha channel.
pub fn save_image(path: &Path, image: &RgbaImage) -> RenderResult<()> {
    match lowercase_extension(path).as_deref() {
        Some("png") => {
            image.save_with_format(path, ImageFormat::Png)?;
        }
        Some("jpg" | "jpeg") => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            rgb.save_with_format(path, ImageFormat::Jpeg)?;
        }
        other => {
            return Err(RenderError::UnsupportedFormat(
                other.unwrap_or_default().to_owned(),
            ));
        }
    }
    Ok(())
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

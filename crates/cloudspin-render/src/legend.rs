//! Legend images: one color swatch and display name per category.

use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use cloudspin_core::LegendEntry;
use glam::{Vec2, Vec4};
use image::{Rgba, RgbaImage};

use crate::error::RenderResult;
use crate::raster::{blend_over, draw_disc, DiscPaint};
use crate::screenshot::save_image;

/// Environment variable pointing at a TrueType/OpenType font for legend text.
pub const FONT_PATH_ENV: &str = "CLOUDSPIN_FONT";

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation2/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Layout of the legend image. Sizes are in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendOptions {
    pub swatch_diameter: f32,
    pub font_size: f32,
    pub row_height: u32,
    pub padding: u32,
    /// Gap between swatch and text.
    pub spacing: u32,
    /// Text color; light by default, for dark slides.
    pub text_color: Vec4,
    /// Font file; falls back to [`FONT_PATH_ENV`] and common system fonts.
    pub font_path: Option<PathBuf>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            swatch_diameter: 30.0,
            font_size: 32.0,
            row_height: 48,
            padding: 24,
            spacing: 16,
            text_color: Vec4::ONE,
            font_path: None,
        }
    }
}

/// Loads the legend font from the configured path, the environment, or the
/// first system font that parses.
#[must_use]
pub fn load_legend_font(options: &LegendOptions) -> Option<FontArc> {
    let configured = options
        .font_path
        .clone()
        .or_else(|| std::env::var_os(FONT_PATH_ENV).map(PathBuf::from));

    configured
        .into_iter()
        .chain(FONT_CANDIDATES.iter().map(PathBuf::from))
        .find_map(|path| {
            let data = std::fs::read(&path).ok()?;
            let font = FontArc::try_from_vec(data).ok()?;
            log::debug!("legend font: {}", path.display());
            Some(font)
        })
}

/// Renders the legend onto a transparent canvas, entries top to bottom.
///
/// Without a font only the swatches are drawn.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_legend(
    entries: &[LegendEntry],
    options: &LegendOptions,
    font: Option<&FontArc>,
) -> RgbaImage {
    let scale = PxScale::from(options.font_size);
    let text_width = font.map_or(0.0, |font| {
        entries
            .iter()
            .map(|entry| measure_text(font, scale, &entry.display_name))
            .fold(0.0, f32::max)
    });

    let width = 2 * options.padding
        + options.swatch_diameter.ceil() as u32
        + options.spacing
        + text_width.ceil() as u32;
    let height = 2 * options.padding + options.row_height * entries.len() as u32;
    let mut image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    for (row, entry) in entries.iter().enumerate() {
        let row_center = options.padding as f32 + (row as f32 + 0.5) * options.row_height as f32;
        let swatch_radius = options.swatch_diameter * 0.5;
        let swatch_center = Vec2::new(options.padding as f32 + swatch_radius, row_center);
        draw_disc(&mut image, swatch_center, swatch_radius, &DiscPaint::flat(entry.color));

        if let Some(font) = font {
            let text_x = options.padding as f32 + options.swatch_diameter + options.spacing as f32;
            draw_text(
                &mut image,
                font,
                scale,
                &entry.display_name,
                Vec2::new(text_x, row_center),
                options.text_color,
            );
        }
    }

    image
}

/// Loads the legend font and renders the legend in memory.
///
/// Logs a warning and draws swatches only when no font is available.
#[must_use]
pub fn build_legend(entries: &[LegendEntry], options: &LegendOptions) -> RgbaImage {
    let font = load_legend_font(options);
    if font.is_none() && !entries.is_empty() {
        log::warn!("no usable font found (set {FONT_PATH_ENV}); legend will show swatches only");
    }
    render_legend(entries, options, font.as_ref())
}

/// Renders the legend and saves it as a PNG (or JPEG, without transparency).
pub fn save_legend(
    entries: &[LegendEntry],
    options: &LegendOptions,
    path: &Path,
) -> RenderResult<()> {
    let image = build_legend(entries, options);
    save_image(path, &image)?;
    log::info!(
        "legend with {} entries saved to {}",
        entries.len(),
        path.display()
    );
    Ok(())
}

fn measure_text(font: &FontArc, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    text.chars()
        .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
        .sum()
}

/// Draws `text` starting at `origin.x`, vertically centered on `origin.y`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn draw_text(
    image: &mut RgbaImage,
    font: &FontArc,
    scale: PxScale,
    text: &str,
    origin: Vec2,
    color: Vec4,
) {
    let scaled = font.as_scaled(scale);
    let baseline = origin.y + (scaled.ascent() + scaled.descent()) * 0.5;
    let (width, height) = image.dimensions();
    let mut caret = origin.x;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);

        let Some(outline) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outline.px_bounds();
        outline.draw(|x, y, coverage| {
            let (px, py) = (
                (bounds.min.x + x as f32) as i64,
                (bounds.min.y + y as f32) as i64,
            );
            if px >= 0 && py >= 0 && px < i64::from(width) && py < i64::from(height) {
                let pixel = image.get_pixel_mut(px as u32, py as u32);
                blend_over(pixel, color.truncate(), color.w * coverage);
            }
        });
    }
}

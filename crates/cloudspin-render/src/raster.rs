//! CPU rasterization helpers shared by the viewer and the legend.

use glam::{Vec2, Vec3, Vec4};
use image::{Rgba, RgbaImage};

/// How to paint one disc.
#[derive(Debug, Clone, Copy)]
pub struct DiscPaint {
    /// Fill color; alpha is the fill opacity.
    pub fill: Vec4,
    /// Rim color, used for the outer `edge_fraction` of the radius.
    pub edge: Vec4,
    /// Rim width as a fraction of the radius, `0..=1`.
    pub edge_fraction: f32,
    /// Darken toward the rim like a lit sphere.
    pub spherical: bool,
}

impl DiscPaint {
    /// A flat disc with no rim.
    #[must_use]
    pub fn flat(fill: Vec4) -> Self {
        Self {
            fill,
            edge: Vec4::ZERO,
            edge_fraction: 0.0,
            spherical: false,
        }
    }
}

/// Converts a `[0, 1]` color to 8-bit RGBA.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_rgba8(color: Vec4) -> Rgba<u8> {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    Rgba([c.x as u8, c.y as u8, c.z as u8, c.w as u8])
}

/// Composites `rgb` with coverage `alpha` over the pixel ("source over").
///
/// Works for opaque canvases and for transparent ones such as the legend.
pub fn blend_over(pixel: &mut Rgba<u8>, rgb: Vec3, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let [r, g, b, a] = pixel.0;
    let dst_a = f32::from(a) / 255.0;
    let dst = Vec3::new(f32::from(r), f32::from(g), f32::from(b)) / 255.0;

    let out_a = alpha + dst_a * (1.0 - alpha);
    let out = (rgb * alpha + dst * dst_a * (1.0 - alpha)) / out_a;
    *pixel = to_rgba8(out.extend(out_a));
}

/// Draws an anti-aliased disc centered at `center` (pixel coordinates).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn draw_disc(image: &mut RgbaImage, center: Vec2, radius: f32, paint: &DiscPaint) {
    if radius <= 0.0 || (paint.fill.w <= 0.0 && paint.edge_fraction <= 0.0) {
        return;
    }
    let (width, height) = image.dimensions();
    let (w, h) = (width as f32, height as f32);

    let reach = radius + 0.5;
    let x0 = (center.x - reach).floor().max(0.0);
    let y0 = (center.y - reach).floor().max(0.0);
    let x1 = (center.x + reach).ceil().min(w);
    let y1 = (center.y + reach).ceil().min(h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let rim_start = 1.0 - paint.edge_fraction.clamp(0.0, 1.0);

    for y in (y0 as u32)..(y1 as u32) {
        for x in (x0 as u32)..(x1 as u32) {
            let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            let dist = offset.length();
            let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }

            let d = (dist / radius).min(1.0);
            let color = if paint.edge_fraction > 0.0 && d >= rim_start {
                paint.edge
            } else if paint.spherical {
                let shade = 0.35 + 0.65 * (1.0 - d * d).sqrt();
                (paint.fill.truncate() * shade).extend(paint.fill.w)
            } else {
                paint.fill
            };

            blend_over(image.get_pixel_mut(x, y), color.truncate(), color.w * coverage);
        }
    }
}

//! Count-based hue palettes.
//!
//! Categories get hues spaced evenly around the HLS color wheel, so any `k`
//! categories are separated by `1 / k` of a turn. There is no semantic binding
//! between a label and its hue beyond assignment order.

use glam::Vec4;

/// Hue offset of the first palette entry (fraction of a turn).
pub const HUE_OFFSET: f64 = 0.01;
/// Lightness shared by all palette entries.
pub const LIGHTNESS: f64 = 0.6;
/// Saturation shared by all palette entries.
pub const SATURATION: f64 = 0.65;

/// Grey channel value used for the sentinel category (sample 10 of a
/// 101-step light-to-dark grey ramp).
pub const NEUTRAL_GREY: f32 = 0.954;
/// Alpha of sentinel points in the rendered cloud.
pub const SENTINEL_POINT_ALPHA: f32 = 0.9;
/// Alpha of the sentinel swatch in the legend.
pub const SENTINEL_LEGEND_ALPHA: f32 = 1.0;

/// The sentinel grey with the given alpha.
#[must_use]
pub fn neutral_grey(alpha: f32) -> Vec4 {
    Vec4::new(NEUTRAL_GREY, NEUTRAL_GREY, NEUTRAL_GREY, alpha)
}

/// Generates `k` evenly spaced, fully opaque hues.
///
/// `k == 0` yields an empty palette.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn hue_palette(k: usize) -> Vec<Vec4> {
    (0..k)
        .map(|i| {
            let hue = (i as f64 / k as f64 + HUE_OFFSET).rem_euclid(1.0);
            let [r, g, b] = hls_to_rgb(hue, LIGHTNESS, SATURATION);
            Vec4::new(r as f32, g as f32, b as f32, 1.0)
        })
        .collect()
}

/// Converts hue/lightness/saturation (all in `[0, 1]`) to RGB.
#[must_use]
pub fn hls_to_rgb(hue: f64, lightness: f64, saturation: f64) -> [f64; 3] {
    if saturation == 0.0 {
        return [lightness; 3];
    }

    let m2 = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let m1 = 2.0 * lightness - m2;

    [
        hue_channel(m1, m2, hue + 1.0 / 3.0),
        hue_channel(m1, m2, hue),
        hue_channel(m1, m2, hue - 1.0 / 3.0),
    ]
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

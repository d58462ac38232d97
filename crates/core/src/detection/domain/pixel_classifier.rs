//! Per-pixel skin and hair tone predicates.
//!
//! Both are empirical heuristics over normalized red/green and an
//! approximate hue angle. The thresholds are fixed model constants.

use crate::shared::color::Color;

/// Skin hue is accepted at or below this angle...
pub const SKIN_HUE_MAX: f64 = 20.0;
/// ...or strictly above this one (wrap-around through magenta).
pub const SKIN_HUE_WRAP_MIN: f64 = 240.0;

/// Hair hue band, exclusive lower bound.
pub const HAIR_HUE_MIN: f64 = 20.0;
/// Hair hue band, inclusive upper bound.
pub const HAIR_HUE_MAX: f64 = 40.0;

/// Pixels darker than this mean intensity are hair candidates.
pub const HAIR_MAX_INTENSITY: f64 = 80.0;
/// Dark pixels only count as hair when blue does not dominate by this much.
pub const HAIR_MAX_BLUE_EXCESS: i32 = 15;

/// Minimum squared distance from the neutral chromaticity point `(0.33, 0.33)`.
pub const SKIN_MIN_NEUTRAL_DISTANCE: f64 = 0.001;

/// Upper bound of the skin locus in `(r, g)` space.
fn skin_upper_bound(r: f64) -> f64 {
    -1.376 * r * r + 1.0743 * r + 0.2
}

/// Lower bound of the skin locus in `(r, g)` space.
fn skin_lower_bound(r: f64) -> f64 {
    -0.776 * r * r + 0.5601 * r + 0.18
}

/// Returns true when `color` falls inside the skin locus with a skin hue.
///
/// Achromatic pixels have no hue and are never skin.
pub fn is_skin_pixel(color: Color) -> bool {
    let Some(hue) = color.hue_degrees() else {
        return false;
    };

    let r = color.r as f64 / 255.0;
    let g = color.g as f64 / 255.0;
    let neutral_distance = (r - 0.33).powi(2) + (g - 0.33).powi(2);

    g > skin_lower_bound(r)
        && g < skin_upper_bound(r)
        && neutral_distance > SKIN_MIN_NEUTRAL_DISTANCE
        && (hue <= SKIN_HUE_MAX || hue > SKIN_HUE_WRAP_MIN)
}

/// Returns true when `color` is dark and not strongly blue, or has a hair hue.
///
/// For achromatic pixels only the darkness test can succeed.
pub fn is_hair_pixel(color: Color) -> bool {
    let blue = color.b as i32;
    let dark = color.intensity() < HAIR_MAX_INTENSITY
        && (blue - (color.g as i32) < HAIR_MAX_BLUE_EXCESS
            || blue - (color.r as i32) < HAIR_MAX_BLUE_EXCESS);

    let hair_hue = color
        .hue_degrees()
        .is_some_and(|hue| hue > HAIR_HUE_MIN && hue <= HAIR_HUE_MAX);

    dark || hair_hue
}

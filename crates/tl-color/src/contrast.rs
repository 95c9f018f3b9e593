// SPDX-License-Identifier: MIT
//
// WCAG contrast, measured on colors or directly on tones.
//
// Tone is L*, so a tone pair determines relative luminance and therefore
// contrast, independent of hue and chroma. Scheme code uses that to reason
// about readability before any color is solved.

use crate::argb::{Argb, lstar_from_y, y_from_lstar};

/// Tone search results are nudged this far past the exact boundary so that
/// 8-bit rounding never drops them below the requested ratio.
const TONE_NUDGE: f64 = 0.4;

/// WCAG 2.1 contrast ratio between two colors, in [1, 21] regardless of
/// argument order.
#[must_use]
pub fn contrast_ratio(a: Argb, b: Argb) -> f64 {
    ratio_of_ys(a.y(), b.y())
}

/// The lowest tone at or above `tone` reaching `ratio` against it, if any.
#[must_use]
pub fn lighter(tone: f64, ratio: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&tone) {
        return None;
    }
    let dark_y = y_from_lstar(tone);
    let light_y = ratio * (dark_y + 5.0) - 5.0;
    if ratio_of_ys(light_y, dark_y) < ratio - 0.04 {
        return None;
    }
    let result = lstar_from_y(light_y) + TONE_NUDGE;
    (0.0..=100.0).contains(&result).then_some(result)
}

/// The highest tone at or below `tone` reaching `ratio` against it, if any.
#[must_use]
pub fn darker(tone: f64, ratio: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&tone) {
        return None;
    }
    let light_y = y_from_lstar(tone);
    let dark_y = (light_y + 5.0) / ratio - 5.0;
    if dark_y < 0.0 {
        return None;
    }
    if ratio_of_ys(light_y, dark_y) < ratio - 0.04 {
        return None;
    }
    let result = lstar_from_y(dark_y) - TONE_NUDGE;
    (0.0..=100.0).contains(&result).then_some(result)
}

// Y on the 0–100 scale, hence +5 rather than +0.05.
fn ratio_of_ys(y1: f64, y2: f64) -> f64 {
    let (lighter, darker) = if y1 >= y2 { (y1, y2) } else { (y2, y1) };
    (lighter + 5.0) / (darker + 5.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

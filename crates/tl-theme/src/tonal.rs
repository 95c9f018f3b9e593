//! Tonal palettes: one hue and chroma, every tone.
//!
//! A palette is just the `(hue, chroma)` pair. Asking for a tone solves the
//! HCT triple on the spot, so a palette is `Copy` and never goes stale.
//! Chroma that a tone cannot carry is reduced by the solver; tone is always
//! honored, which keeps lightness monotonic across the stops.

use serde::{Deserialize, Serialize};
use tl_color::{Argb, Hct, HctColor};
use tl_color::math::sanitize_degrees;

/// The eleven decade stops shown for every palette.
pub const TONE_STOPS: [u8; 11] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Extra stops used by surface and container roles.
pub const HIGHLIGHT_STOPS: [u8; 12] = [4, 6, 12, 17, 22, 24, 87, 92, 94, 96, 98, 99];

/// A hue and chroma held constant across tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TonalPalette {
    hue: f64,
    chroma: f64,
}

impl TonalPalette {
    /// Palette for `(hue, chroma)`. Hue is wrapped into [0, 360), negative
    /// chroma is treated as zero.
    #[must_use]
    pub fn of(hue: f64, chroma: f64) -> Self {
        Self {
            hue: sanitize_degrees(hue),
            chroma: chroma.max(0.0),
        }
    }

    /// Palette keeping the seed's own hue and chroma.
    #[must_use]
    pub fn from_hct(seed: &HctColor) -> Self {
        Self::of(seed.hue(), seed.chroma())
    }

    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    #[must_use]
    pub const fn chroma(&self) -> f64 {
        self.chroma
    }

    /// The color at `tone` (clamped to 100).
    #[must_use]
    pub fn tone(&self, tone: u8) -> Argb {
        self.hct(tone).to_argb()
    }

    /// The solved HCT value at `tone`, with the chroma actually realized.
    #[must_use]
    pub fn hct(&self, tone: u8) -> Hct {
        Hct::new(self.hue, self.chroma, f64::from(tone.min(100)))
    }

    /// Every stop in [`TONE_STOPS`] and [`HIGHLIGHT_STOPS`], ascending.
    #[must_use]
    pub fn stops() -> Vec<u8> {
        let mut stops: Vec<u8> = TONE_STOPS.iter().chain(&HIGHLIGHT_STOPS).copied().collect();
        stops.sort_unstable();
        stops.dedup();
        stops
    }

    /// `(tone, color)` for each of `stops`.
    #[must_use]
    pub fn tones(&self, stops: &[u8]) -> Vec<(u8, Argb)> {
        stops.iter().map(|&t| (t, self.tone(t))).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn hue_is_wrapped_and_chroma_floored() {
        let p = TonalPalette::of(-30.0, -5.0);
        assert!(approx_eq(p.hue(), 330.0, 1e-9));
        assert!(approx_eq(p.chroma(), 0.0, 1e-12));
    }

    #[test]
    fn from_hct_keeps_seed_coordinates() {
        let seed = tl_color::hex_to_hct("#6750A4").unwrap();
        let p = TonalPalette::from_hct(&seed);
        assert!(approx_eq(p.hue(), seed.hue(), 1e-12));
        assert!(approx_eq(p.chroma(), seed.chroma(), 1e-12));
    }

    // ── Tones ────────────────────────────────────────────────────────

    #[test]
    fn endpoints_are_black_and_white() {
        let p = TonalPalette::of(282.0, 48.0);
        assert_eq!(p.tone(0), Argb::BLACK);
        assert_eq!(p.tone(100), Argb::WHITE);
        assert_eq!(p.tone(250), Argb::WHITE);
    }

    #[test]
    fn tone_forty_of_baseline_seed_is_the_seed() {
        let seed = tl_color::hex_to_hct("#6750A4").unwrap();
        let p = TonalPalette::of(seed.hue(), seed.chroma().max(48.0));
        assert_eq!(p.tone(40).to_hex(), "#6750a4");
        assert_eq!(p.tone(90).to_hex(), "#e9ddff");
        assert_eq!(p.tone(10).to_hex(), "#22005d");
    }

    #[test]
    fn realized_tone_matches_request() {
        let p = TonalPalette::of(25.0, 84.0);
        for t in TONE_STOPS {
            let hct = p.hct(t);
            assert!(approx_eq(hct.tone(), f64::from(t), 0.5), "T{t} → {}", hct.tone());
        }
    }

    // ── Stops ────────────────────────────────────────────────────────

    #[test]
    fn stops_are_merged_and_sorted() {
        let stops = TonalPalette::stops();
        assert_eq!(stops.len(), TONE_STOPS.len() + HIGHLIGHT_STOPS.len());
        assert!(stops.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(stops.first(), Some(&0));
        assert_eq!(stops.last(), Some(&100));
    }

    #[test]
    fn tones_pairs_each_stop() {
        let p = TonalPalette::of(140.0, 30.0);
        let tones = p.tones(&TONE_STOPS);
        assert_eq!(tones.len(), 11);
        assert_eq!(tones[4], (40, p.tone(40)));
    }

    // ── Properties ───────────────────────────────────────────────────

    proptest! {
        #[test]
        fn lightness_is_monotonic(hue in 0.0f64..360.0, chroma in 0.0f64..150.0) {
            let p = TonalPalette::of(hue, chroma);
            let lstars: Vec<f64> = TonalPalette::stops().into_iter().map(|t| p.tone(t).lstar()).collect();
            for w in lstars.windows(2) {
                prop_assert!(w[0] < w[1], "{} !< {}", w[0], w[1]);
            }
        }
    }
}

// SPDX-License-Identifier: MIT
//
// HCT values.
//
// Two types live here:
//
//   Hct       the numeric model value (hue, chroma, tone + solved Argb),
//             used by palette and scheme code
//   HctColor  the user-facing color record {hue, chroma, tone, hex}, the
//             shape stored in theme files and passed between collaborators
//
// Both keep their numeric and encoded forms in sync by construction: there
// is no setter, and every constructor either solves (hue, chroma, tone) to
// an sRGB color and records what was actually realized, or starts from an
// sRGB color and measures it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::argb::Argb;
use crate::cam16::Cam16;
use crate::error::ColorError;
use crate::math::sanitize_degrees;
use crate::solver::solve_to_argb;

/// Minimum chroma shortfall reported as a gamut reduction. Smaller
/// deviations come from 8-bit quantization, not from the gamut.
const GAMUT_REDUCTION_THRESHOLD: f64 = 1.0;

// ─── GamutReduction ──────────────────────────────────────────────────────────

/// The requested chroma was not realizable in sRGB at this hue and tone.
///
/// Not an error: the solver returns the most chromatic in-gamut color and
/// this report says by how much it fell short.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamutReduction {
    pub hue: f64,
    pub tone: f64,
    pub requested: f64,
    pub realized: f64,
}

// ─── Hct ─────────────────────────────────────────────────────────────────────

/// A color in hue, chroma, tone.
///
/// `hue` and `chroma` are CAM16 correlates, `tone` is CIE L*. The values
/// stored are those of the solved sRGB color, which may have lower chroma
/// than was asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hct {
    hue: f64,
    chroma: f64,
    tone: f64,
    argb: Argb,
}

impl Hct {
    /// Solve (hue, chroma, tone) to the nearest sRGB color.
    ///
    /// Tone is clamped to [0, 100], hue wrapped into [0, 360), negative
    /// chroma treated as zero. A gamut reduction is logged at `debug` under
    /// the `tl_color::gamut` target.
    #[must_use]
    pub fn new(hue: f64, chroma: f64, tone: f64) -> Self {
        let (hct, reduction) = Self::solve_with_report(hue, chroma, tone);
        if let Some(r) = reduction {
            tracing::debug!(
                target: "tl_color::gamut",
                hue = r.hue,
                tone = r.tone,
                requested = r.requested,
                realized = r.realized,
                "chroma reduced to fit sRGB"
            );
        }
        hct
    }

    /// Like [`Hct::new`], also returning the gamut reduction, if any.
    #[must_use]
    pub fn solve_with_report(hue: f64, chroma: f64, tone: f64) -> (Self, Option<GamutReduction>) {
        let hue = sanitize_degrees(hue);
        let chroma = chroma.max(0.0);
        let tone = tone.clamp(0.0, 100.0);
        let hct = Self::from_argb(solve_to_argb(hue, chroma, tone));

        let interior = tone > 0.0 && tone < 100.0;
        let reduction = (interior && chroma - hct.chroma > GAMUT_REDUCTION_THRESHOLD).then_some(
            GamutReduction {
                hue,
                tone,
                requested: chroma,
                realized: hct.chroma,
            },
        );
        (hct, reduction)
    }

    /// Measure an sRGB color.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        let cam = Cam16::from_argb(argb);
        Self {
            hue: cam.hue,
            chroma: cam.chroma,
            tone: argb.lstar(),
            argb,
        }
    }

    #[must_use]
    pub const fn hue(self) -> f64 {
        self.hue
    }

    #[must_use]
    pub const fn chroma(self) -> f64 {
        self.chroma
    }

    #[must_use]
    pub const fn tone(self) -> f64 {
        self.tone
    }

    #[must_use]
    pub const fn to_argb(self) -> Argb {
        self.argb
    }
}

impl From<Argb> for Hct {
    fn from(argb: Argb) -> Self {
        Self::from_argb(argb)
    }
}

// ─── HctColor ────────────────────────────────────────────────────────────────

/// A user-chosen color: HCT coordinates plus the hex string they encode to.
///
/// Built from hex, the literal string is carried through unchanged (case
/// included). Built from HCT, the coordinates recorded are the realized
/// ones after gamut mapping. Deserialization re-derives the coordinates
/// from `hex`, which is authoritative; a bare `"#rrggbb"` string is also
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HctColorRepr", into = "HctColorRepr")]
pub struct HctColor {
    hue: f64,
    chroma: f64,
    tone: f64,
    hex: String,
    argb: Argb,
}

impl HctColor {
    /// Parse `#rrggbb` and measure it.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidFormat`] unless `hex` is `#` followed by
    /// exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let argb = Argb::from_hex(hex)?;
        let hct = Hct::from_argb(argb);
        Ok(Self {
            hue: hct.hue,
            chroma: hct.chroma,
            tone: hct.tone,
            hex: hex.to_string(),
            argb,
        })
    }

    /// Solve (hue, chroma, tone) and record the realized color.
    #[must_use]
    pub fn from_hct(hue: f64, chroma: f64, tone: f64) -> Self {
        Self::from(Hct::new(hue, chroma, tone))
    }

    /// Measure a packed color. The hex is lowercase.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        Self::from(Hct::from_argb(argb))
    }

    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    #[must_use]
    pub const fn chroma(&self) -> f64 {
        self.chroma
    }

    #[must_use]
    pub const fn tone(&self) -> f64 {
        self.tone
    }

    /// The hex string exactly as constructed.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    #[must_use]
    pub const fn to_argb(&self) -> Argb {
        self.argb
    }

    #[must_use]
    pub fn to_hct(&self) -> Hct {
        Hct {
            hue: self.hue,
            chroma: self.chroma,
            tone: self.tone,
            argb: self.argb,
        }
    }
}

impl From<Hct> for HctColor {
    fn from(hct: Hct) -> Self {
        Self {
            hue: hct.hue,
            chroma: hct.chroma,
            tone: hct.tone,
            hex: hct.argb.to_hex(),
            argb: hct.argb,
        }
    }
}

impl fmt::Display for HctColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (H {:.1}, C {:.1}, T {:.1})",
            self.hex, self.hue, self.chroma, self.tone
        )
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum HctColorRepr {
    Full {
        hue: f64,
        chroma: f64,
        tone: f64,
        hex: String,
    },
    Hex(String),
}

impl TryFrom<HctColorRepr> for HctColor {
    type Error = ColorError;

    fn try_from(repr: HctColorRepr) -> Result<Self, Self::Error> {
        match repr {
            HctColorRepr::Full { hex, .. } | HctColorRepr::Hex(hex) => Self::from_hex(&hex),
        }
    }
}

impl From<HctColor> for HctColorRepr {
    fn from(color: HctColor) -> Self {
        Self::Full {
            hue: color.hue,
            chroma: color.chroma,
            tone: color.tone,
            hex: color.hex,
        }
    }
}

// ─── Free Functions ──────────────────────────────────────────────────────────

/// Parse a hex color into its HCT record. The returned `hex` is `hex`.
///
/// # Errors
///
/// Returns [`ColorError::InvalidFormat`] unless `hex` is `#` followed by
/// exactly six hex digits (either case).
pub fn hex_to_hct(hex: &str) -> Result<HctColor, ColorError> {
    HctColor::from_hex(hex)
}

/// Encode (hue, chroma, tone) as lowercase `#rrggbb`.
///
/// Tone is clamped to [0, 100]. Chroma beyond what sRGB can show at this
/// hue and tone is reduced to the maximum available; see [`Hct::new`].
#[must_use]
pub fn hct_to_hex(hue: f64, chroma: f64, tone: f64) -> String {
    Hct::new(hue, chroma, tone).to_argb().to_hex()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

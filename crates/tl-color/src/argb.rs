// SPDX-License-Identifier: MIT
//
// Packed ARGB colors and the sRGB ↔ XYZ ↔ L* conversions.
//
// Linear RGB and XYZ components are on a 0–100 scale throughout this crate
// (Y = 100 is diffuse white), matching the CAM16 literature.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ColorError;
use crate::math::matrix_multiply;

/// Linear sRGB → CIE XYZ (D65).
pub const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_338_95, 0.357_620_64, 0.180_510_42],
    [0.2126, 0.7152, 0.0722],
    [0.019_321_41, 0.119_163_82, 0.950_344_78],
];

/// CIE XYZ (D65) → linear sRGB.
pub const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.241_377_479_238_868_5, -1.537_665_240_285_185_1, -0.498_853_668_462_680_53],
    [-0.969_145_251_300_532_1, 1.875_885_345_106_787_2, 0.041_565_856_169_120_61],
    [0.055_620_936_896_913_05, -0.203_955_245_647_421_23, 1.057_179_911_122_033_5],
];

/// D65 standard illuminant, Y normalized to 100.
pub const WHITE_POINT_D65: [f64; 3] = [95.047, 100.0, 108.883];

// ─── Argb ────────────────────────────────────────────────────────────────────

/// A 32-bit `0xAARRGGBB` color.
///
/// The hex form is always lowercase `#rrggbb`; alpha is carried but never
/// printed, since every color this engine produces is opaque.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Argb(pub u32);

impl Argb {
    pub const BLACK: Self = Self(0xff00_0000);
    pub const WHITE: Self = Self(0xffff_ffff);

    /// Opaque color from 8-bit channels.
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xff00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Parse `#rrggbb` (case-insensitive). Nothing else is accepted: no
    /// shorthand, no alpha, no missing `#`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidFormat`] for any other input.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s.strip_prefix('#').ok_or_else(|| ColorError::invalid(s))?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::invalid(s));
        }
        let rgb = u32::from_str_radix(digits, 16).map_err(|_| ColorError::invalid(s))?;
        Ok(Self(0xff00_0000 | rgb))
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }

    /// Color from linear RGB components (0–100 scale), rounded and clamped.
    #[must_use]
    pub fn from_linrgb(linrgb: [f64; 3]) -> Self {
        Self::from_rgb(
            delinearized(linrgb[0]),
            delinearized(linrgb[1]),
            delinearized(linrgb[2]),
        )
    }

    /// Color from CIE XYZ (0–100 scale).
    #[must_use]
    pub fn from_xyz(xyz: [f64; 3]) -> Self {
        Self::from_linrgb(matrix_multiply(xyz, &XYZ_TO_SRGB))
    }

    /// The achromatic color with the given L*.
    #[must_use]
    pub fn from_lstar(lstar: f64) -> Self {
        let component = delinearized(y_from_lstar(lstar));
        Self::from_rgb(component, component, component)
    }

    /// Linear RGB components, 0–100.
    #[must_use]
    pub fn linrgb(self) -> [f64; 3] {
        [
            linearized(self.red()),
            linearized(self.green()),
            linearized(self.blue()),
        ]
    }

    /// CIE XYZ, 0–100.
    #[must_use]
    pub fn to_xyz(self) -> [f64; 3] {
        matrix_multiply(self.linrgb(), &SRGB_TO_XYZ)
    }

    /// Relative luminance Y, 0–100.
    #[must_use]
    pub fn y(self) -> f64 {
        self.to_xyz()[1]
    }

    /// CIE L* (the HCT tone), 0–100.
    #[must_use]
    pub fn lstar(self) -> f64 {
        lstar_from_y(self.y())
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argb({})", self.to_hex())
    }
}

impl FromStr for Argb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Argb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Argb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Transfer Functions ──────────────────────────────────────────────────────

/// sRGB 8-bit component → linear component on a 0–100 scale.
#[must_use]
pub fn linearized(component: u8) -> f64 {
    let normalized = f64::from(component) / 255.0;
    if normalized <= 0.040_449_936 {
        normalized / 12.92 * 100.0
    } else {
        ((normalized + 0.055) / 1.055).powf(2.4) * 100.0
    }
}

/// Linear component (0–100) → sRGB, unrounded, on a 0–255 scale.
#[must_use]
pub fn true_delinearized(component: f64) -> f64 {
    let normalized = component / 100.0;
    let delinearized = if normalized <= 0.003_130_8 {
        normalized * 12.92
    } else {
        1.055 * normalized.powf(1.0 / 2.4) - 0.055
    };
    delinearized * 255.0
}

/// Linear component (0–100) → sRGB 8-bit, rounded and clamped.
#[must_use]
pub fn delinearized(component: f64) -> u8 {
    true_delinearized(component).round().clamp(0.0, 255.0) as u8
}

// ─── L* ──────────────────────────────────────────────────────────────────────

const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

fn lab_inv_f(ft: f64) -> f64 {
    let ft3 = ft * ft * ft;
    if ft3 > EPSILON {
        ft3
    } else {
        (116.0 * ft - 16.0) / KAPPA
    }
}

/// L* (0–100) → relative luminance Y (0–100).
#[must_use]
pub fn y_from_lstar(lstar: f64) -> f64 {
    100.0 * lab_inv_f((lstar + 16.0) / 116.0)
}

/// Relative luminance Y (0–100) → L* (0–100).
#[must_use]
pub fn lstar_from_y(y: f64) -> f64 {
    lab_f(y / 100.0) * 116.0 - 16.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

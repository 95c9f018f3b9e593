// SPDX-License-Identifier: MIT
//
// CAM16 color appearance model (forward direction).
//
// HCT takes its hue and chroma from here. The inverse direction lives in
// `solver.rs`, specialized for the standard viewing conditions.

use crate::argb::{Argb, SRGB_TO_XYZ};
use crate::math::{matrix_multiply, signum};
use crate::viewing::{ViewingConditions, XYZ_TO_CAM16RGB};

/// Appearance correlates of one color under one set of viewing conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cam16 {
    /// Hue angle in degrees, [0, 360).
    pub hue: f64,
    /// Colorfulness relative to a white of the same brightness.
    pub chroma: f64,
    /// Lightness J.
    pub j: f64,
    /// Brightness Q.
    pub q: f64,
    /// Colorfulness M.
    pub m: f64,
    /// Saturation s.
    pub s: f64,
    /// CAM16-UCS J*.
    pub jstar: f64,
    /// CAM16-UCS a*.
    pub astar: f64,
    /// CAM16-UCS b*.
    pub bstar: f64,
}

impl Cam16 {
    /// Appearance of `argb` under the standard viewing conditions.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        Self::from_argb_in(argb, ViewingConditions::standard())
    }

    /// Appearance of `argb` under `vc`.
    #[must_use]
    pub fn from_argb_in(argb: Argb, vc: &ViewingConditions) -> Self {
        let xyz = matrix_multiply(argb.linrgb(), &SRGB_TO_XYZ);
        Self::from_xyz_in(xyz, vc)
    }

    /// Appearance of an XYZ color (0–100 scale) under `vc`.
    #[must_use]
    pub fn from_xyz_in(xyz: [f64; 3], vc: &ViewingConditions) -> Self {
        // Discount illuminant, then the nonlinear post-adaptation compression.
        let rgb_c = matrix_multiply(xyz, &XYZ_TO_CAM16RGB);
        let adapted = [0, 1, 2].map(|i| {
            let d = vc.rgb_d[i] * rgb_c[i];
            let af = (vc.fl * d.abs() / 100.0).powf(0.42);
            signum(d) * 400.0 * af / (af + 27.13)
        });
        let [r_a, g_a, b_a] = adapted;

        // Opponent dimensions.
        let a = (11.0 * r_a + -12.0 * g_a + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;
        let u = (20.0 * r_a + 20.0 * g_a + 21.0 * b_a) / 20.0;
        let p2 = (40.0 * r_a + 20.0 * g_a + b_a) / 20.0;

        let atan_degrees = b.atan2(a).to_degrees();
        let hue = if atan_degrees < 0.0 {
            atan_degrees + 360.0
        } else if atan_degrees >= 360.0 {
            atan_degrees - 360.0
        } else {
            atan_degrees
        };
        let hue_radians = hue.to_radians();

        let ac = p2 * vc.nbb;
        let j = 100.0 * (ac / vc.aw).powf(vc.c * vc.z);
        let q = 4.0 / vc.c * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;

        let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
        let e_hue = 0.25 * ((hue_prime.to_radians() + 2.0).cos() + 3.8);
        let p1 = 50000.0 / 13.0 * e_hue * vc.nc * vc.ncb;
        let t = p1 * a.hypot(b) / (u + 0.305);
        let alpha = (1.64 - 0.29f64.powf(vc.n)).powf(0.73) * t.powf(0.9);

        let chroma = alpha * (j / 100.0).sqrt();
        let m = chroma * vc.fl_root;
        let s = 50.0 * (alpha * vc.c / (vc.aw + 4.0)).sqrt();

        let jstar = (1.0 + 100.0 * 0.007) * j / (1.0 + 0.007 * j);
        let mstar = 1.0 / 0.0228 * (0.0228 * m).ln_1p();

        Self {
            hue,
            chroma,
            j,
            q,
            m,
            s,
            jstar,
            astar: mstar * hue_radians.cos(),
            bstar: mstar * hue_radians.sin(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

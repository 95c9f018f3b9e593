// SPDX-License-Identifier: MIT
//
// CAM16 viewing conditions.
//
// A color's appearance depends on its surroundings. These parameters are
// the expensive, color-independent part of the CAM16 forward and inverse
// transforms, computed once per environment.

use std::f64::consts::PI;
use std::sync::LazyLock;

use crate::argb::{WHITE_POINT_D65, y_from_lstar};
use crate::math::lerp;

/// CIE XYZ → CAM16 RGB (the M16 matrix).
pub const XYZ_TO_CAM16RGB: [[f64; 3]; 3] = [
    [0.401_288, 0.650_173, -0.051_461],
    [-0.250_268, 1.204_414, 0.045_854],
    [-0.002_079, 0.048_952, 0.953_127],
];

static STANDARD: LazyLock<ViewingConditions> = LazyLock::new(ViewingConditions::default);

/// Precomputed CAM16 environment parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingConditions {
    pub n: f64,
    pub aw: f64,
    pub nbb: f64,
    pub ncb: f64,
    pub c: f64,
    pub nc: f64,
    pub rgb_d: [f64; 3],
    pub fl: f64,
    pub fl_root: f64,
    pub z: f64,
}

impl ViewingConditions {
    /// Build viewing conditions for an environment.
    ///
    /// - `white_point`: XYZ of the adopted white, Y = 100
    /// - `adapting_luminance`: cd/m² of the adapting field
    /// - `background_lstar`: L* of the background (clamped to ≥ 0.1)
    /// - `surround`: 0 = dark, 1 = dim, 2 = average
    /// - `discounting_illuminant`: full chromatic adaptation when true
    #[must_use]
    pub fn make(
        white_point: [f64; 3],
        adapting_luminance: f64,
        background_lstar: f64,
        surround: f64,
        discounting_illuminant: bool,
    ) -> Self {
        let background_lstar = background_lstar.max(0.1);
        let m = &XYZ_TO_CAM16RGB;
        let wp = white_point;
        let r_w = wp[0] * m[0][0] + wp[1] * m[0][1] + wp[2] * m[0][2];
        let g_w = wp[0] * m[1][0] + wp[1] * m[1][1] + wp[2] * m[1][2];
        let b_w = wp[0] * m[2][0] + wp[1] * m[2][1] + wp[2] * m[2][2];

        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };
        let d = if discounting_illuminant {
            1.0
        } else {
            f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())
        };
        let d = d.clamp(0.0, 1.0);
        let nc = f;
        let rgb_d = [
            d * (100.0 / r_w) + 1.0 - d,
            d * (100.0 / g_w) + 1.0 - d,
            d * (100.0 / b_w) + 1.0 - d,
        ];

        let k = 1.0 / (5.0 * adapting_luminance + 1.0);
        let k4 = k * k * k * k;
        let k4f = 1.0 - k4;
        let fl = k4 * adapting_luminance + 0.1 * k4f * k4f * (5.0 * adapting_luminance).cbrt();

        let n = y_from_lstar(background_lstar) / wp[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);
        let ncb = nbb;

        let factors = [
            (fl * rgb_d[0] * r_w / 100.0).powf(0.42),
            (fl * rgb_d[1] * g_w / 100.0).powf(0.42),
            (fl * rgb_d[2] * b_w / 100.0).powf(0.42),
        ];
        let rgb_a = factors.map(|af| 400.0 * af / (af + 27.13));
        let aw = (2.0 * rgb_a[0] + rgb_a[1] + 0.05 * rgb_a[2]) * nbb;

        Self {
            n,
            aw,
            nbb,
            ncb,
            c,
            nc,
            rgb_d,
            fl,
            fl_root: fl.powf(0.25),
            z,
        }
    }

    /// The shared sRGB viewing environment every HCT value is defined in.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }
}

impl Default for ViewingConditions {
    /// sRGB-like conditions: D65 white, a gray-world adapting field of
    /// `200/π · Y(L*=50)` cd/m², mid-gray background, average surround.
    fn default() -> Self {
        Self::make(
            WHITE_POINT_D65,
            200.0 / PI * y_from_lstar(50.0) / 100.0,
            50.0,
            2.0,
            false,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

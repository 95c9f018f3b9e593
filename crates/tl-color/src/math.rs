// SPDX-License-Identifier: MIT
//
// Small numeric helpers shared by the CAM16 model and the HCT solver.

use std::f64::consts::PI;

/// Sign of `x`: -1.0, 0.0 or 1.0. Zero maps to zero, unlike `f64::signum`.
#[inline]
#[must_use]
pub fn signum(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Linear interpolation: `t` = 0.0 returns `start`, `t` = 1.0 returns `stop`.
#[inline]
#[must_use]
pub fn lerp(start: f64, stop: f64, t: f64) -> f64 {
    (1.0 - t) * start + t * stop
}

/// Normalize an angle in degrees to [0, 360).
#[inline]
#[must_use]
pub fn sanitize_degrees(degrees: f64) -> f64 {
    let d = degrees % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

/// Normalize an angle in radians to [0, 2π).
#[inline]
#[must_use]
pub fn sanitize_radians(angle: f64) -> f64 {
    (angle + PI * 8.0) % (PI * 2.0)
}

/// Shortest angular distance between two hues, in degrees (0–180).
#[inline]
#[must_use]
pub fn difference_degrees(a: f64, b: f64) -> f64 {
    180.0 - ((a - b).abs() - 180.0).abs()
}

/// Multiply a row vector by a 3×3 matrix (`matrix · row`).
#[inline]
#[must_use]
pub fn matrix_multiply(row: [f64; 3], matrix: &[[f64; 3]; 3]) -> [f64; 3] {
    let m = matrix;
    [
        row[0] * m[0][0] + row[1] * m[0][1] + row[2] * m[0][2],
        row[0] * m[1][0] + row[1] * m[1][1] + row[2] * m[1][2],
        row[0] * m[2][0] + row[1] * m[2][1] + row[2] * m[2][2],
    ]
}

/// Product of two 3×3 matrices (`a · b`).
#[must_use]
pub fn matrix_product(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

/// Inverse of a 3×3 matrix by cofactor expansion.
///
/// Only called on the fixed, well-conditioned CAM16 matrices; a singular
/// input yields non-finite entries.
#[must_use]
pub fn matrix_inverse(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let c00 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
    let c01 = m[1][2] * m[2][0] - m[1][0] * m[2][2];
    let c02 = m[1][0] * m[2][1] - m[1][1] * m[2][0];
    let det = m[0][0] * c00 + m[0][1] * c01 + m[0][2] * c02;
    let inv = 1.0 / det;
    [
        [
            c00 * inv,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
        ],
        [
            c01 * inv,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
        ],
        [
            c02 * inv,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
        ],
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

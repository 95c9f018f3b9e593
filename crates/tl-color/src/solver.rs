// SPDX-License-Identifier: MIT
//
// HCT → sRGB solver.
//
// Tone fixes the target luminance Y, so every candidate lives on the plane
// Y = const inside the linear-RGB cube. Two strategies, in order:
//
//   1. Exact: Newton-style iteration on CAM16 J until the color built from
//      (J, chroma, hue) has the target Y. Succeeds whenever the requested
//      chroma is inside the sRGB gamut.
//
//   2. Gamut boundary: intersect the Y plane with the cube edges (a polygon
//      of up to six vertices), find the edge segment the target hue crosses,
//      then bisect along the sRGB "critical planes" (the linear values where
//      an 8-bit channel rounds to the next integer) to the boundary color
//      with the target hue. That color is the most chromatic one available,
//      so chroma is reduced silently.
//
// All matrices are derived once from the standard viewing conditions.

use std::f64::consts::PI;
use std::sync::LazyLock;

use crate::argb::{Argb, SRGB_TO_XYZ, true_delinearized, y_from_lstar};
use crate::math::{
    matrix_inverse, matrix_multiply, matrix_product, sanitize_degrees, sanitize_radians, signum,
};
use crate::viewing::{ViewingConditions, XYZ_TO_CAM16RGB};

const Y_FROM_LINRGB: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Linear RGB (0–100) → CAM16 RGB after illuminant discounting and the
/// `F_L / 100` scaling, i.e. the input of the post-adaptation compression.
static SCALED_DISCOUNT_FROM_LINRGB: LazyLock<[[f64; 3]; 3]> = LazyLock::new(|| {
    let vc = ViewingConditions::standard();
    let mut m = matrix_product(&XYZ_TO_CAM16RGB, &SRGB_TO_XYZ);
    for (row, d) in m.iter_mut().zip(vc.rgb_d) {
        for cell in row.iter_mut() {
            *cell *= vc.fl * d / 100.0;
        }
    }
    m
});

static LINRGB_FROM_SCALED_DISCOUNT: LazyLock<[[f64; 3]; 3]> =
    LazyLock::new(|| matrix_inverse(&SCALED_DISCOUNT_FROM_LINRGB));

/// Linear component (0–100) at the midpoint between 8-bit values `i` and
/// `i + 1`. Crossing one of these changes the rounded sRGB byte.
fn critical_plane(i: i32) -> f64 {
    let normalized = (f64::from(i) + 0.5) / 255.0;
    if normalized <= 0.040_449_936 {
        normalized / 12.92 * 100.0
    } else {
        ((normalized + 0.055) / 1.055).powf(2.4) * 100.0
    }
}

// ─── Entry Point ─────────────────────────────────────────────────────────────

/// Solve for the sRGB color with the given hue (degrees), chroma, and tone.
///
/// Tone is honored exactly (up to 8-bit quantization). Hue is honored as
/// closely as the gamut allows. Chroma is reduced to the maximum available
/// at that hue and tone when the request is out of gamut.
#[must_use]
pub fn solve_to_argb(hue_degrees: f64, chroma: f64, lstar: f64) -> Argb {
    if chroma < 0.0001 || !(0.0001..=99.9999).contains(&lstar) {
        return Argb::from_lstar(lstar);
    }
    let hue_radians = sanitize_degrees(hue_degrees) / 180.0 * PI;
    let y = y_from_lstar(lstar);
    if let Some(exact) = find_result_by_j(hue_radians, chroma, y) {
        return exact;
    }
    Argb::from_linrgb(bisect_to_limit(y, hue_radians))
}

// ─── Exact Solution ──────────────────────────────────────────────────────────

fn inverse_chromatic_adaptation(adapted: f64) -> f64 {
    let adapted_abs = adapted.abs();
    let base = (27.13 * adapted_abs / (400.0 - adapted_abs)).max(0.0);
    signum(adapted) * base.powf(1.0 / 0.42)
}

#[allow(clippy::float_cmp)]
fn find_result_by_j(hue_radians: f64, chroma: f64, y: f64) -> Option<Argb> {
    let vc = ViewingConditions::standard();

    // Initial estimate of J.
    let mut j = y.sqrt() * 11.0;

    let t_inner_coeff = 1.0 / (1.64 - 0.29f64.powf(vc.n)).powf(0.73);
    let e_hue = 0.25 * ((hue_radians + 2.0).cos() + 3.8);
    let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
    let h_sin = hue_radians.sin();
    let h_cos = hue_radians.cos();

    for round in 0..5 {
        let j_normalized = j / 100.0;
        let alpha = if chroma == 0.0 || j == 0.0 {
            0.0
        } else {
            chroma / j_normalized.sqrt()
        };
        let t = (alpha * t_inner_coeff).powf(1.0 / 0.9);
        let ac = vc.aw * j_normalized.powf(1.0 / vc.c / vc.z);
        let p2 = ac / vc.nbb;
        let gamma = 23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;
        let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
        let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
        let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;
        let scaled = [
            inverse_chromatic_adaptation(r_a),
            inverse_chromatic_adaptation(g_a),
            inverse_chromatic_adaptation(b_a),
        ];
        let linrgb = matrix_multiply(scaled, &LINRGB_FROM_SCALED_DISCOUNT);

        if linrgb.iter().any(|&c| c < 0.0) {
            return None;
        }
        let fnj = Y_FROM_LINRGB[0] * linrgb[0]
            + Y_FROM_LINRGB[1] * linrgb[1]
            + Y_FROM_LINRGB[2] * linrgb[2];
        if fnj <= 0.0 {
            return None;
        }
        if round == 4 || (fnj - y).abs() < 0.002 {
            if linrgb.iter().any(|&c| c > 100.01) {
                return None;
            }
            return Some(Argb::from_linrgb(linrgb));
        }
        // Iterate with Newton's method on J ≈ sqrt(Y).
        j -= (fnj - y) * j / (2.0 * fnj);
    }
    None
}

// ─── Gamut Boundary ──────────────────────────────────────────────────────────

/// CAM16 hue (radians) of a linear RGB color.
fn hue_of(linrgb: [f64; 3]) -> f64 {
    let scaled = matrix_multiply(linrgb, &SCALED_DISCOUNT_FROM_LINRGB);
    let [r_a, g_a, b_a] = scaled.map(chromatic_adaptation);
    let a = (11.0 * r_a + -12.0 * g_a + b_a) / 11.0;
    let b = (r_a + g_a - 2.0 * b_a) / 9.0;
    b.atan2(a)
}

fn chromatic_adaptation(component: f64) -> f64 {
    let af = component.abs().powf(0.42);
    signum(component) * 400.0 * af / (af + 27.13)
}

/// True when `b` lies strictly between `a` and `c` going counterclockwise.
fn are_in_cyclic_order(a: f64, b: f64, c: f64) -> bool {
    let delta_ab = sanitize_radians(b - a);
    let delta_ac = sanitize_radians(c - a);
    delta_ab < delta_ac
}

fn intercept(source: f64, mid: f64, target: f64) -> f64 {
    (mid - source) / (target - source)
}

fn lerp_point(source: [f64; 3], t: f64, target: [f64; 3]) -> [f64; 3] {
    [
        source[0] + (target[0] - source[0]) * t,
        source[1] + (target[1] - source[1]) * t,
        source[2] + (target[2] - source[2]) * t,
    ]
}

fn set_coordinate(source: [f64; 3], coordinate: f64, target: [f64; 3], axis: usize) -> [f64; 3] {
    let t = intercept(source[axis], coordinate, target[axis]);
    lerp_point(source, t, target)
}

fn is_bounded(x: f64) -> bool {
    (0.0..=100.0).contains(&x)
}

/// The `n`th of the 12 possible intersections of the plane Y = `y` with the
/// edges of the linear RGB cube, or `None` when that edge misses the plane.
fn nth_vertex(y: f64, n: usize) -> Option<[f64; 3]> {
    let [k_r, k_g, k_b] = Y_FROM_LINRGB;
    let coord_a = if n % 4 <= 1 { 0.0 } else { 100.0 };
    let coord_b = if n % 2 == 0 { 0.0 } else { 100.0 };
    let vertex = if n < 4 {
        let (g, b) = (coord_a, coord_b);
        let r = (y - g * k_g - b * k_b) / k_r;
        [r, g, b]
    } else if n < 8 {
        let (b, r) = (coord_a, coord_b);
        let g = (y - r * k_r - b * k_b) / k_g;
        [r, g, b]
    } else {
        let (r, g) = (coord_a, coord_b);
        let b = (y - r * k_r - g * k_g) / k_b;
        [r, g, b]
    };
    let free_axis = match n {
        0..4 => 0,
        4..8 => 1,
        _ => 2,
    };
    is_bounded(vertex[free_axis]).then_some(vertex)
}

/// The two polygon vertices whose hues bracket `target_hue`.
fn bisect_to_segment(y: f64, target_hue: f64) -> ([f64; 3], [f64; 3]) {
    let mut left = [-1.0; 3];
    let mut right = left;
    let mut left_hue = 0.0;
    let mut right_hue = 0.0;
    let mut initialized = false;
    let mut uncut = true;

    for n in 0..12 {
        let Some(mid) = nth_vertex(y, n) else {
            continue;
        };
        let mid_hue = hue_of(mid);
        if !initialized {
            left = mid;
            right = mid;
            left_hue = mid_hue;
            right_hue = mid_hue;
            initialized = true;
            continue;
        }
        if uncut || are_in_cyclic_order(left_hue, mid_hue, right_hue) {
            uncut = false;
            if are_in_cyclic_order(left_hue, target_hue, mid_hue) {
                right = mid;
                right_hue = mid_hue;
            } else {
                left = mid;
                left_hue = mid_hue;
            }
        }
    }
    (left, right)
}

fn midpoint(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0, (a[2] + b[2]) / 2.0]
}

fn critical_plane_below(x: f64) -> i32 {
    (x - 0.5).floor() as i32
}

fn critical_plane_above(x: f64) -> i32 {
    (x - 0.5).ceil() as i32
}

/// The in-gamut linear RGB color on the plane Y = `y` whose hue is closest
/// to `target_hue`, refined to 8-bit precision.
#[allow(clippy::float_cmp)]
fn bisect_to_limit(y: f64, target_hue: f64) -> [f64; 3] {
    let (mut left, mut right) = bisect_to_segment(y, target_hue);
    let mut left_hue = hue_of(left);

    for axis in 0..3 {
        if left[axis] == right[axis] {
            continue;
        }
        let (mut l_plane, mut r_plane) = if left[axis] < right[axis] {
            (
                critical_plane_below(true_delinearized(left[axis])),
                critical_plane_above(true_delinearized(right[axis])),
            )
        } else {
            (
                critical_plane_above(true_delinearized(left[axis])),
                critical_plane_below(true_delinearized(right[axis])),
            )
        };
        for _ in 0..8 {
            if (r_plane - l_plane).abs() <= 1 {
                break;
            }
            let m_plane = (f64::from(l_plane + r_plane) / 2.0).floor() as i32;
            let mid = set_coordinate(left, critical_plane(m_plane), right, axis);
            let mid_hue = hue_of(mid);
            if are_in_cyclic_order(left_hue, target_hue, mid_hue) {
                right = mid;
                r_plane = m_plane;
            } else {
                left = mid;
                left_hue = mid_hue;
                l_plane = m_plane;
            }
        }
    }
    midpoint(left, right)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

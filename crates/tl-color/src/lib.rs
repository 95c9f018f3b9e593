// SPDX-License-Identifier: MIT
//
// tl-color: HCT color model for tonelist.
//
// HCT is hue and chroma from the CAM16 color appearance model, paired with
// tone (CIE L*). Tone alone predicts contrast; hue and chroma stay
// perceptually stable while tone moves. That makes it the natural space for
// building tonal palettes: hold hue and chroma, sweep tone.
//
// Conversion pipeline:
//
//   #rrggbb ↔ Argb ↔ linear sRGB ↔ XYZ ↔ CAM16 (hue, chroma)
//                                   └──→ L* (tone)
//
// The inverse direction (hue, chroma, tone → Argb) has no closed form. The
// solver in `solver.rs` first iterates CAM16 J toward the target Y, and if
// the requested chroma is outside sRGB it bisects along the gamut boundary
// at constant Y to the most chromatic color with the target hue.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/chroma/tone variable names are inherently similar.
#![allow(clippy::similar_names)]
// Evaluation order matches the reference CAM16 implementation so results
// are bit-for-bit reproducible. No fused multiply-add.
#![allow(clippy::suboptimal_flops)]
// 8-bit channel math: values are clamped before every narrowing cast.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod argb;
pub mod cam16;
pub mod contrast;
pub mod error;
pub mod hct;
pub mod math;
pub mod solver;
pub mod viewing;

pub use argb::Argb;
pub use cam16::Cam16;
pub use error::ColorError;
pub use hct::{GamutReduction, Hct, HctColor, hct_to_hex, hex_to_hct};
pub use viewing::ViewingConditions;

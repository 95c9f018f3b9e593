//! # tl-theme: seed-to-scheme theme engine for tonelist
//!
//! Derives a complete, accessible color scheme from one to five seed colors.
//! Everything here is a pure function of its inputs: no I/O, no globals, no
//! interior mutability. The owner of a [`ThemeState`] is its only writer.
//!
//! # Architecture
//!
//! ```text
//! SourceColorSet (1–5 seeds) + PaletteStyle
//!     │
//!     ▼
//! core_palette.rs: normalize seeds (default primary), derive six tonal palettes
//!     │
//!     ▼
//! tonal.rs:   TonalPalette (hue, chroma) → color at any tone 0–100
//!     │
//!     ▼
//! scheme.rs:  fixed (role, mode) → (palette, tone) table → RoleColorMap
//!     │
//!     ▼
//! cache.rs:   NamedTheme snapshots, save / update / delete transforms
//! state.rs:   persisted ThemeState, ThemeContext
//! ```
//!
//! # Color Space
//!
//! All derivation happens in HCT (see `tl-color`). Tone is CIE L*, so a
//! difference in tone between two roles fixes their contrast ratio before a
//! single color is solved. The scheme table relies on that: every "on" role
//! sits at least 50 tone steps from its background.

// Hue/chroma/tone variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod builtin;
pub mod cache;
pub mod core_palette;
pub mod error;
pub mod scheme;
pub mod state;
pub mod tonal;

pub use cache::NamedTheme;
pub use core_palette::{
    CorePaletteSet, NormalizedSources, PaletteRole, PaletteStyle, SourceColorSet, SourceRole,
    build_core_palette, normalize_source_colors,
};
pub use error::ThemeError;
pub use scheme::{ContrastIssue, Role, RoleColorMap, Scheme, compose_scheme};
pub use state::{Mode, ThemeContext, ThemeState};
pub use tonal::TonalPalette;

//! Persisted theme state and the explicit theme context.
//!
//! `ThemeState` is the JSON document a front end keeps between sessions:
//!
//! ```json
//! {
//!   "mode": "light",
//!   "sourceColor": "#1976d2",
//!   "sourceColors": { "primary": { "hue": 298.98, "chroma": 47.86, "tone": 40.08, "hex": "#6750A4" } },
//!   "cachedThemes": []
//! }
//! ```
//!
//! `ThemeContext` is the in-memory value a renderer derives colors from.
//! It is passed around explicitly; changing mode or seeds produces a new
//! context rather than mutating a shared one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::builtin::baseline_sources;
use crate::cache::NamedTheme;
use crate::core_palette::{CorePaletteSet, PaletteStyle, SourceColorSet};
use crate::error::ThemeError;
use crate::scheme::{RoleColorMap, compose_scheme};

const DEFAULT_SOURCE_COLOR: &str = "#1976d2";

// ─── Mode ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown mode {other:?}, expected light or dark")),
        }
    }
}

// ─── ThemeContext ────────────────────────────────────────────────────────────

/// Everything needed to derive a scheme: mode, seeds and palette style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeContext {
    mode: Mode,
    sources: SourceColorSet,
    style: PaletteStyle,
}

impl ThemeContext {
    #[must_use]
    pub fn new(mode: Mode, sources: SourceColorSet) -> Self {
        Self {
            mode,
            sources,
            style: PaletteStyle::default(),
        }
    }

    #[must_use]
    pub fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    #[must_use]
    pub fn with_sources(self, sources: SourceColorSet) -> Self {
        Self { sources, ..self }
    }

    #[must_use]
    pub fn with_style(self, style: PaletteStyle) -> Self {
        Self { style, ..self }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn sources(&self) -> &SourceColorSet {
        &self.sources
    }

    #[must_use]
    pub const fn style(&self) -> PaletteStyle {
        self.style
    }

    #[must_use]
    pub fn palettes(&self) -> CorePaletteSet {
        CorePaletteSet::build(&self.sources, self.style)
    }

    #[must_use]
    pub fn scheme(&self) -> RoleColorMap {
        compose_scheme(&self.palettes(), self.mode.is_dark())
    }

    /// Snapshot the current scheme as a named theme.
    #[must_use]
    pub fn capture(&self, name: impl Into<String>) -> NamedTheme {
        NamedTheme::capture(name, self.sources.clone(), &self.scheme())
    }
}

// ─── ThemeState ──────────────────────────────────────────────────────────────

/// The persisted document. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_source_color")]
    pub source_color: String,
    #[serde(default = "default_source_colors")]
    pub source_colors: SourceColorSet,
    #[serde(default)]
    pub cached_themes: Vec<NamedTheme>,
}

fn default_source_color() -> String {
    DEFAULT_SOURCE_COLOR.to_string()
}

fn default_source_colors() -> SourceColorSet {
    baseline_sources()
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            source_color: default_source_color(),
            source_colors: default_source_colors(),
            cached_themes: Vec::new(),
        }
    }
}

impl ThemeState {
    /// Parse a state document. Source colors may be full HCT objects or bare
    /// hex strings; either way the coordinates are recomputed from the hex.
    ///
    /// # Errors
    ///
    /// [`ThemeError::Json`] for malformed JSON or an invalid hex color.
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`ThemeError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ThemeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn context(&self) -> ThemeContext {
        ThemeContext::new(self.mode, self.source_colors.clone())
    }

    #[must_use]
    pub fn scheme(&self) -> RoleColorMap {
        self.context().scheme()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

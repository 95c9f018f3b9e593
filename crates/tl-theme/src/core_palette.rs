//! Seed colors and the core palette set derived from them.
//!
//! A user picks up to five seeds. Primary is mandatory for derivation, and
//! [`normalize_source_colors`] is the single place where a missing primary
//! becomes the default. Every other missing seed is derived from primary:
//!
//! ```text
//! primary    (h, max(c, 48))      seeded: its own (h, max(c, 48))
//! secondary  (h, 16)              seeded: its own (h, max(c, 48))
//! tertiary   (h + 60, 24)         seeded: its own (h, max(c, 48))
//! error      (25, 84)             seeded: its own (h, max(c, 48))
//! neutral    (h, 4)               seeded: (h_n, 4)
//! variant    (h, 8)               seeded: (h_n, 8)
//! ```
//!
//! With [`PaletteStyle::Fidelity`] seeded palettes keep the seed's chroma
//! instead of the `max(c, 48)` floor, so a muted seed stays muted.

use std::fmt;

use serde::{Deserialize, Serialize};
use tl_color::{Argb, HctColor};

use crate::tonal::TonalPalette;

/// Substituted for a missing primary seed.
pub const DEFAULT_PRIMARY: Argb = Argb::from_rgb(0x67, 0x50, 0xa4);

/// Accent palettes never drop below this chroma in the Material style.
const MIN_ACCENT_CHROMA: f64 = 48.0;

// ─── PaletteStyle ────────────────────────────────────────────────────────────

/// How literally seeded palettes follow their seed's chroma.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteStyle {
    /// Accent chroma is raised to at least 48; neutrals are fixed at 4 and 8.
    #[default]
    Material,
    /// Seeded palettes use the seed's chroma as is.
    Fidelity,
}

impl PaletteStyle {
    fn accent_chroma(self, chroma: f64) -> f64 {
        match self {
            Self::Material => chroma.max(MIN_ACCENT_CHROMA),
            Self::Fidelity => chroma,
        }
    }

    const fn neutral_chroma(self, chroma: f64) -> f64 {
        match self {
            Self::Material => 4.0,
            Self::Fidelity => chroma,
        }
    }

    fn neutral_variant_chroma(self, chroma: f64) -> f64 {
        match self {
            Self::Material => 8.0,
            Self::Fidelity => chroma + 4.0,
        }
    }
}

// ─── SourceColorSet ──────────────────────────────────────────────────────────

/// The five seed slots a user can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceRole {
    Primary,
    Secondary,
    Tertiary,
    Error,
    Neutral,
}

impl SourceRole {
    pub const ALL: [Self; 5] = [
        Self::Primary,
        Self::Secondary,
        Self::Tertiary,
        Self::Error,
        Self::Neutral,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Error => "error",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// User-chosen seed colors. Any slot may be empty.
///
/// An immutable snapshot as far as the engine is concerned: derivation reads
/// it and never writes back, not even the default primary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceColorSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<HctColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<HctColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tertiary: Option<HctColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<HctColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral: Option<HctColor>,
}

impl SourceColorSet {
    /// A set with only a primary seed.
    #[must_use]
    pub fn from_primary(primary: HctColor) -> Self {
        Self {
            primary: Some(primary),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn get(&self, role: SourceRole) -> Option<&HctColor> {
        match role {
            SourceRole::Primary => self.primary.as_ref(),
            SourceRole::Secondary => self.secondary.as_ref(),
            SourceRole::Tertiary => self.tertiary.as_ref(),
            SourceRole::Error => self.error.as_ref(),
            SourceRole::Neutral => self.neutral.as_ref(),
        }
    }

    /// A copy with `role` set to `color` (or cleared, for `None`).
    #[must_use]
    pub fn with(mut self, role: SourceRole, color: Option<HctColor>) -> Self {
        let slot = match role {
            SourceRole::Primary => &mut self.primary,
            SourceRole::Secondary => &mut self.secondary,
            SourceRole::Tertiary => &mut self.tertiary,
            SourceRole::Error => &mut self.error,
            SourceRole::Neutral => &mut self.neutral,
        };
        *slot = color;
        self
    }

    /// Filled slots in role order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceRole, &HctColor)> {
        SourceRole::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|c| (role, c)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

// ─── Normalization ───────────────────────────────────────────────────────────

/// Seeds with primary guaranteed present.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSources {
    pub primary: HctColor,
    pub secondary: Option<HctColor>,
    pub tertiary: Option<HctColor>,
    pub error: Option<HctColor>,
    pub neutral: Option<HctColor>,
}

/// Fill in the default primary (`#6750a4`) if it is missing.
///
/// This is the only place in the engine that substitutes a default seed.
#[must_use]
pub fn normalize_source_colors(sources: &SourceColorSet) -> NormalizedSources {
    let primary = sources.primary.clone().unwrap_or_else(|| {
        tracing::debug!(default = %DEFAULT_PRIMARY, "no primary seed, using default");
        HctColor::from_argb(DEFAULT_PRIMARY)
    });
    NormalizedSources {
        primary,
        secondary: sources.secondary.clone(),
        tertiary: sources.tertiary.clone(),
        error: sources.error.clone(),
        neutral: sources.neutral.clone(),
    }
}

// ─── CorePaletteSet ──────────────────────────────────────────────────────────

/// The six palettes a scheme is composed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaletteRole {
    Primary,
    Secondary,
    Tertiary,
    Error,
    Neutral,
    NeutralVariant,
}

impl PaletteRole {
    pub const ALL: [Self; 6] = [
        Self::Primary,
        Self::Secondary,
        Self::Tertiary,
        Self::Error,
        Self::Neutral,
        Self::NeutralVariant,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Error => "error",
            Self::Neutral => "neutral",
            Self::NeutralVariant => "neutralVariant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorePaletteSet {
    pub primary: TonalPalette,
    pub secondary: TonalPalette,
    pub tertiary: TonalPalette,
    pub error: TonalPalette,
    pub neutral: TonalPalette,
    pub neutral_variant: TonalPalette,
}

impl CorePaletteSet {
    /// Derive all six palettes from `sources`. Never fails.
    #[must_use]
    pub fn build(sources: &SourceColorSet, style: PaletteStyle) -> Self {
        Self::from_normalized(&normalize_source_colors(sources), style)
    }

    #[must_use]
    pub fn from_normalized(sources: &NormalizedSources, style: PaletteStyle) -> Self {
        let seed = &sources.primary;
        let (hue, chroma) = (seed.hue(), seed.chroma());

        let accent = |color: &HctColor| {
            TonalPalette::of(color.hue(), style.accent_chroma(color.chroma()))
        };

        let set = Self {
            primary: TonalPalette::of(hue, style.accent_chroma(chroma)),
            secondary: sources
                .secondary
                .as_ref()
                .map_or_else(|| TonalPalette::of(hue, 16.0), accent),
            tertiary: sources
                .tertiary
                .as_ref()
                .map_or_else(|| TonalPalette::of(hue + 60.0, 24.0), accent),
            error: sources
                .error
                .as_ref()
                .map_or_else(|| TonalPalette::of(25.0, 84.0), accent),
            neutral: sources.neutral.as_ref().map_or_else(
                || TonalPalette::of(hue, 4.0),
                |n| TonalPalette::of(n.hue(), style.neutral_chroma(n.chroma())),
            ),
            neutral_variant: sources.neutral.as_ref().map_or_else(
                || TonalPalette::of(hue, 8.0),
                |n| TonalPalette::of(n.hue(), style.neutral_variant_chroma(n.chroma())),
            ),
        };

        tracing::debug!(
            primary = seed.hex(),
            ?style,
            seeded_secondary = sources.secondary.is_some(),
            seeded_tertiary = sources.tertiary.is_some(),
            seeded_error = sources.error.is_some(),
            seeded_neutral = sources.neutral.is_some(),
            "assembled core palettes"
        );
        set
    }

    #[must_use]
    pub const fn get(&self, role: PaletteRole) -> &TonalPalette {
        match role {
            PaletteRole::Primary => &self.primary,
            PaletteRole::Secondary => &self.secondary,
            PaletteRole::Tertiary => &self.tertiary,
            PaletteRole::Error => &self.error,
            PaletteRole::Neutral => &self.neutral,
            PaletteRole::NeutralVariant => &self.neutral_variant,
        }
    }

    /// `(role, palette)` in [`PaletteRole::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PaletteRole, &TonalPalette)> {
        PaletteRole::ALL.into_iter().map(|role| (role, self.get(role)))
    }
}

/// [`CorePaletteSet::build`] with the default Material style.
#[must_use]
pub fn build_core_palette(sources: &SourceColorSet) -> CorePaletteSet {
    CorePaletteSet::build(sources, PaletteStyle::default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tl_color::hex_to_hct;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn seed(hex: &str) -> HctColor {
        hex_to_hct(hex).unwrap()
    }

    // ── Normalization ────────────────────────────────────────────────

    #[test]
    fn missing_primary_becomes_default() {
        let n = normalize_source_colors(&SourceColorSet::default());
        assert_eq!(n.primary.hex(), "#6750a4");
        assert_eq!(n.primary.to_argb(), DEFAULT_PRIMARY);
    }

    #[test]
    fn present_primary_is_kept_verbatim() {
        let sources = SourceColorSet::from_primary(seed("#B3261E"));
        let n = normalize_source_colors(&sources);
        assert_eq!(n.primary.hex(), "#B3261E");
    }

    #[test]
    fn normalization_does_not_touch_input() {
        let sources = SourceColorSet::default();
        let _ = normalize_source_colors(&sources);
        assert_eq!(sources.primary, None);
    }

    // ── SourceColorSet ───────────────────────────────────────────────

    #[test]
    fn with_sets_and_clears_slots() {
        let sources = SourceColorSet::default()
            .with(SourceRole::Tertiary, Some(seed("#B58392")))
            .with(SourceRole::Error, Some(seed("#B3261E")));
        let roles: Vec<_> = sources.iter().map(|(r, _)| r).collect();
        assert_eq!(roles, [SourceRole::Tertiary, SourceRole::Error]);

        let cleared = sources.with(SourceRole::Tertiary, None);
        assert_eq!(cleared.get(SourceRole::Tertiary), None);
        assert!(!cleared.is_empty());
    }

    #[test]
    fn absent_slots_are_omitted_from_json() {
        let sources = SourceColorSet::from_primary(seed("#6750A4"));
        let value = serde_json::to_value(&sources).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["primary"]["hex"], "#6750A4");
    }

    // ── Derivation ───────────────────────────────────────────────────

    #[test]
    fn primary_only_derives_the_rest() {
        let p = seed("#6750A4");
        let set = build_core_palette(&SourceColorSet::from_primary(p.clone()));

        assert!(approx_eq(set.primary.hue(), p.hue(), 1e-12));
        assert!(approx_eq(set.primary.chroma(), 48.0, 1e-12));
        assert!(approx_eq(set.secondary.chroma(), 16.0, 1e-12));
        assert!(approx_eq(set.tertiary.hue(), (p.hue() + 60.0) % 360.0, 1e-9));
        assert!(approx_eq(set.tertiary.chroma(), 24.0, 1e-12));
        assert!(approx_eq(set.error.hue(), 25.0, 1e-12));
        assert!(approx_eq(set.error.chroma(), 84.0, 1e-12));
        assert!(approx_eq(set.neutral.chroma(), 4.0, 1e-12));
        assert!(approx_eq(set.neutral_variant.chroma(), 8.0, 1e-12));
        assert!(approx_eq(set.neutral_variant.hue(), p.hue(), 1e-12));
    }

    #[test]
    fn vivid_primary_keeps_its_chroma() {
        let red = seed("#ff0000");
        let set = build_core_palette(&SourceColorSet::from_primary(red.clone()));
        assert!(approx_eq(set.primary.chroma(), red.chroma(), 1e-12));
    }

    #[test]
    fn seeded_palettes_use_their_own_hue() {
        let sources = SourceColorSet::from_primary(seed("#6750A4"))
            .with(SourceRole::Secondary, Some(seed("#00ff00")))
            .with(SourceRole::Neutral, Some(seed("#1C1B1F")));
        let set = build_core_palette(&sources);
        let green = seed("#00ff00");
        let neutral = seed("#1C1B1F");
        assert!(approx_eq(set.secondary.hue(), green.hue(), 1e-12));
        assert!(approx_eq(set.secondary.chroma(), green.chroma(), 1e-12));
        assert!(approx_eq(set.neutral.hue(), neutral.hue(), 1e-12));
        assert!(approx_eq(set.neutral.chroma(), 4.0, 1e-12));
    }

    #[test]
    fn fidelity_keeps_muted_seeds_muted() {
        let muted = seed("#958DA5");
        let sources = SourceColorSet::from_primary(muted.clone())
            .with(SourceRole::Neutral, Some(seed("#1C1B1F")));
        let material = CorePaletteSet::build(&sources, PaletteStyle::Material);
        let fidelity = CorePaletteSet::build(&sources, PaletteStyle::Fidelity);

        assert!(approx_eq(material.primary.chroma(), 48.0, 1e-12));
        assert!(approx_eq(fidelity.primary.chroma(), muted.chroma(), 1e-12));

        let n = seed("#1C1B1F").chroma();
        assert!(approx_eq(fidelity.neutral.chroma(), n, 1e-12));
        assert!(approx_eq(fidelity.neutral_variant.chroma(), n + 4.0, 1e-12));
    }

    #[test]
    fn derivation_is_deterministic() {
        let sources = SourceColorSet::from_primary(seed("#1976d2"));
        assert_eq!(build_core_palette(&sources), build_core_palette(&sources));
    }

    #[test]
    fn iter_follows_role_order() {
        let set = build_core_palette(&SourceColorSet::default());
        let names: Vec<_> = set.iter().map(|(r, _)| r.name()).collect();
        assert_eq!(
            names,
            ["primary", "secondary", "tertiary", "error", "neutral", "neutralVariant"]
        );
    }
}

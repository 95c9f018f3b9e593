//! Scheme composition: from core palettes to named role colors.
//!
//! Every role reads one tone of one palette. The tone depends only on the
//! role and light/dark mode, so the whole scheme is a fixed table lookup:
//!
//! ```text
//! role                    light   dark
//! primary                 P40     P80
//! onPrimary               P100    P20
//! primaryContainer        P90     P30
//! onPrimaryContainer      P10     P90
//!   (secondary, tertiary, error follow the same pattern on S, T, E)
//! background, surface     N99     N10
//! onBackground, onSurface N10     N90
//! surfaceVariant          NV90    NV30
//! onSurfaceVariant        NV30    NV80
//! outline                 NV50    NV60
//! outlineVariant          NV80    NV30
//! shadow, scrim           N0      N0
//! inverseSurface          N20     N90
//! inverseOnSurface        N95     N20
//! inversePrimary          P80     P40
//! surfaceDim              N87     N6
//! surfaceBright           N98     N24
//! surfaceContainerLowest  N100    N4
//! surfaceContainerLow     N96     N10
//! surfaceContainer        N94     N12
//! surfaceContainerHigh    N92     N17
//! surfaceContainerHighest N90     N22
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use tl_color::Argb;
use tl_color::contrast::{contrast_ratio, darker, lighter};

use crate::core_palette::{CorePaletteSet, PaletteRole, PaletteStyle, SourceColorSet};

/// WCAG AA for normal text.
pub const MIN_TEXT_CONTRAST: f64 = 4.5;

// ─── Role ────────────────────────────────────────────────────────────────────

/// A named slot in a color scheme.
///
/// Declaration order is display and serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Primary,
    OnPrimary,
    PrimaryContainer,
    OnPrimaryContainer,
    Secondary,
    OnSecondary,
    SecondaryContainer,
    OnSecondaryContainer,
    Tertiary,
    OnTertiary,
    TertiaryContainer,
    OnTertiaryContainer,
    Error,
    OnError,
    ErrorContainer,
    OnErrorContainer,
    Background,
    OnBackground,
    Surface,
    OnSurface,
    SurfaceVariant,
    OnSurfaceVariant,
    Outline,
    OutlineVariant,
    Shadow,
    Scrim,
    InverseSurface,
    InverseOnSurface,
    InversePrimary,
    SurfaceDim,
    SurfaceBright,
    SurfaceContainerLowest,
    SurfaceContainerLow,
    SurfaceContainer,
    SurfaceContainerHigh,
    SurfaceContainerHighest,
}

impl Role {
    pub const COUNT: usize = 36;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Primary,
        Self::OnPrimary,
        Self::PrimaryContainer,
        Self::OnPrimaryContainer,
        Self::Secondary,
        Self::OnSecondary,
        Self::SecondaryContainer,
        Self::OnSecondaryContainer,
        Self::Tertiary,
        Self::OnTertiary,
        Self::TertiaryContainer,
        Self::OnTertiaryContainer,
        Self::Error,
        Self::OnError,
        Self::ErrorContainer,
        Self::OnErrorContainer,
        Self::Background,
        Self::OnBackground,
        Self::Surface,
        Self::OnSurface,
        Self::SurfaceVariant,
        Self::OnSurfaceVariant,
        Self::Outline,
        Self::OutlineVariant,
        Self::Shadow,
        Self::Scrim,
        Self::InverseSurface,
        Self::InverseOnSurface,
        Self::InversePrimary,
        Self::SurfaceDim,
        Self::SurfaceBright,
        Self::SurfaceContainerLowest,
        Self::SurfaceContainerLow,
        Self::SurfaceContainer,
        Self::SurfaceContainerHigh,
        Self::SurfaceContainerHighest,
    ];

    /// Foreground/background pairs that carry text.
    pub const TEXT_PAIRS: [(Self, Self); 12] = [
        (Self::OnPrimary, Self::Primary),
        (Self::OnPrimaryContainer, Self::PrimaryContainer),
        (Self::OnSecondary, Self::Secondary),
        (Self::OnSecondaryContainer, Self::SecondaryContainer),
        (Self::OnTertiary, Self::Tertiary),
        (Self::OnTertiaryContainer, Self::TertiaryContainer),
        (Self::OnError, Self::Error),
        (Self::OnErrorContainer, Self::ErrorContainer),
        (Self::OnBackground, Self::Background),
        (Self::OnSurface, Self::Surface),
        (Self::OnSurfaceVariant, Self::SurfaceVariant),
        (Self::InverseOnSurface, Self::InverseSurface),
    ];

    /// The camelCase key used in JSON and on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::OnPrimary => "onPrimary",
            Self::PrimaryContainer => "primaryContainer",
            Self::OnPrimaryContainer => "onPrimaryContainer",
            Self::Secondary => "secondary",
            Self::OnSecondary => "onSecondary",
            Self::SecondaryContainer => "secondaryContainer",
            Self::OnSecondaryContainer => "onSecondaryContainer",
            Self::Tertiary => "tertiary",
            Self::OnTertiary => "onTertiary",
            Self::TertiaryContainer => "tertiaryContainer",
            Self::OnTertiaryContainer => "onTertiaryContainer",
            Self::Error => "error",
            Self::OnError => "onError",
            Self::ErrorContainer => "errorContainer",
            Self::OnErrorContainer => "onErrorContainer",
            Self::Background => "background",
            Self::OnBackground => "onBackground",
            Self::Surface => "surface",
            Self::OnSurface => "onSurface",
            Self::SurfaceVariant => "surfaceVariant",
            Self::OnSurfaceVariant => "onSurfaceVariant",
            Self::Outline => "outline",
            Self::OutlineVariant => "outlineVariant",
            Self::Shadow => "shadow",
            Self::Scrim => "scrim",
            Self::InverseSurface => "inverseSurface",
            Self::InverseOnSurface => "inverseOnSurface",
            Self::InversePrimary => "inversePrimary",
            Self::SurfaceDim => "surfaceDim",
            Self::SurfaceBright => "surfaceBright",
            Self::SurfaceContainerLowest => "surfaceContainerLowest",
            Self::SurfaceContainerLow => "surfaceContainerLow",
            Self::SurfaceContainer => "surfaceContainer",
            Self::SurfaceContainerHigh => "surfaceContainerHigh",
            Self::SurfaceContainerHighest => "surfaceContainerHighest",
        }
    }

    /// Look a role up by its key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }

    /// `(palette, light tone, dark tone)`.
    #[must_use]
    pub const fn tone_rule(self) -> (PaletteRole, u8, u8) {
        use PaletteRole::{Error as E, Neutral as N, NeutralVariant as NV, Primary as P};
        use PaletteRole::{Secondary as S, Tertiary as T};
        match self {
            Self::Primary => (P, 40, 80),
            Self::OnPrimary => (P, 100, 20),
            Self::PrimaryContainer => (P, 90, 30),
            Self::OnPrimaryContainer => (P, 10, 90),
            Self::Secondary => (S, 40, 80),
            Self::OnSecondary => (S, 100, 20),
            Self::SecondaryContainer => (S, 90, 30),
            Self::OnSecondaryContainer => (S, 10, 90),
            Self::Tertiary => (T, 40, 80),
            Self::OnTertiary => (T, 100, 20),
            Self::TertiaryContainer => (T, 90, 30),
            Self::OnTertiaryContainer => (T, 10, 90),
            Self::Error => (E, 40, 80),
            Self::OnError => (E, 100, 20),
            Self::ErrorContainer => (E, 90, 30),
            Self::OnErrorContainer => (E, 10, 90),
            Self::Background | Self::Surface => (N, 99, 10),
            Self::OnBackground | Self::OnSurface => (N, 10, 90),
            Self::SurfaceVariant => (NV, 90, 30),
            Self::OnSurfaceVariant => (NV, 30, 80),
            Self::Outline => (NV, 50, 60),
            Self::OutlineVariant => (NV, 80, 30),
            Self::Shadow | Self::Scrim => (N, 0, 0),
            Self::InverseSurface => (N, 20, 90),
            Self::InverseOnSurface => (N, 95, 20),
            Self::InversePrimary => (P, 80, 40),
            Self::SurfaceDim => (N, 87, 6),
            Self::SurfaceBright => (N, 98, 24),
            Self::SurfaceContainerLowest => (N, 100, 4),
            Self::SurfaceContainerLow => (N, 96, 10),
            Self::SurfaceContainer => (N, 94, 12),
            Self::SurfaceContainerHigh => (N, 92, 17),
            Self::SurfaceContainerHighest => (N, 90, 22),
        }
    }

    /// The tone this role takes in the given mode.
    #[must_use]
    pub const fn tone(self, is_dark: bool) -> u8 {
        let (_, light, dark) = self.tone_rule();
        if is_dark { dark } else { light }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

// ─── RoleColorMap ────────────────────────────────────────────────────────────

/// A composed scheme: one color for every [`Role`].
///
/// Built only by [`compose_scheme`] and never modified afterwards. Serializes
/// as a flat `{ "primary": "#rrggbb", ... }` object in role order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleColorMap {
    is_dark: bool,
    colors: [Argb; Role::COUNT],
}

/// The usual name for a [`RoleColorMap`].
pub type Scheme = RoleColorMap;

/// One text pair below the required contrast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastIssue {
    pub foreground: Role,
    pub background: Role,
    pub ratio: f64,
    /// Nearest foreground tone on the same side of the background that
    /// reaches the threshold. `None` when that side has no such tone.
    pub suggested_tone: Option<f64>,
}

impl RoleColorMap {
    /// Light scheme for `sources` in the default style.
    #[must_use]
    pub fn light(sources: &SourceColorSet) -> Self {
        compose_scheme(&CorePaletteSet::build(sources, PaletteStyle::default()), false)
    }

    /// Dark scheme for `sources` in the default style.
    #[must_use]
    pub fn dark(sources: &SourceColorSet) -> Self {
        compose_scheme(&CorePaletteSet::build(sources, PaletteStyle::default()), true)
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.is_dark
    }

    #[must_use]
    pub const fn get(&self, role: Role) -> Argb {
        self.colors[role as usize]
    }

    /// Lowercase `#rrggbb` for `role`.
    #[must_use]
    pub fn hex(&self, role: Role) -> String {
        self.get(role).to_hex()
    }

    /// `(role, color)` in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Argb)> + '_ {
        Role::ALL.into_iter().zip(self.colors.iter().copied())
    }

    #[must_use]
    pub fn to_hex_map(&self) -> BTreeMap<Role, String> {
        self.iter().map(|(role, argb)| (role, argb.to_hex())).collect()
    }

    /// Text pairs whose WCAG contrast is below `min_ratio`.
    #[must_use]
    pub fn contrast_issues(&self, min_ratio: f64) -> Vec<ContrastIssue> {
        Role::TEXT_PAIRS
            .into_iter()
            .filter_map(|(foreground, background)| {
                let (fg, bg) = (self.get(foreground), self.get(background));
                let ratio = contrast_ratio(fg, bg);
                if ratio >= min_ratio {
                    return None;
                }
                let bg_tone = bg.lstar();
                let suggested_tone = if fg.lstar() >= bg_tone {
                    lighter(bg_tone, min_ratio)
                } else {
                    darker(bg_tone, min_ratio)
                };
                Some(ContrastIssue {
                    foreground,
                    background,
                    ratio,
                    suggested_tone,
                })
            })
            .collect()
    }
}

impl Serialize for RoleColorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Role::COUNT))?;
        for (role, argb) in self.iter() {
            map.serialize_entry(role.key(), &argb)?;
        }
        map.end()
    }
}

/// Fill every role from its palette and tone.
#[must_use]
pub fn compose_scheme(palettes: &CorePaletteSet, is_dark: bool) -> RoleColorMap {
    let colors = Role::ALL.map(|role| {
        let (palette, light, dark) = role.tone_rule();
        let tone = if is_dark { dark } else { light };
        let argb = palettes.get(palette).tone(tone);
        tracing::trace!(role = role.key(), palette = palette.name(), tone, %argb, "role");
        argb
    });
    RoleColorMap { is_dark, colors }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Named seed presets, ready-to-use source color sets.
//!
//! Each preset fills some of the five seed slots; the rest are derived as
//! usual. "baseline" is the full default set a fresh state starts with.

use tl_color::{Argb, HctColor};

use crate::core_palette::{SourceColorSet, SourceRole};

/// The seeds a fresh state starts from.
const BASELINE: &[(SourceRole, Argb)] = &[
    (SourceRole::Primary, Argb::from_rgb(0x67, 0x50, 0xa4)),
    (SourceRole::Secondary, Argb::from_rgb(0x95, 0x8d, 0xa5)),
    (SourceRole::Tertiary, Argb::from_rgb(0xb5, 0x83, 0x92)),
    (SourceRole::Error, Argb::from_rgb(0xb3, 0x26, 0x1e)),
    (SourceRole::Neutral, Argb::from_rgb(0x1c, 0x1b, 0x1f)),
];

struct Preset {
    name: &'static str,
    seeds: &'static [(SourceRole, Argb)],
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "baseline",
        seeds: BASELINE,
    },
    Preset {
        name: "purple",
        seeds: &[(SourceRole::Primary, Argb::from_rgb(0x67, 0x50, 0xa4))],
    },
    Preset {
        name: "ocean",
        seeds: &[
            (SourceRole::Primary, Argb::from_rgb(0x19, 0x76, 0xd2)),
            (SourceRole::Tertiary, Argb::from_rgb(0x00, 0x96, 0x88)),
        ],
    },
    Preset {
        name: "forest",
        seeds: &[
            (SourceRole::Primary, Argb::from_rgb(0x38, 0x6a, 0x20)),
            (SourceRole::Secondary, Argb::from_rgb(0x8d, 0x6e, 0x63)),
        ],
    },
    Preset {
        name: "ember",
        seeds: &[
            (SourceRole::Primary, Argb::from_rgb(0xe6, 0x51, 0x00)),
            (SourceRole::Tertiary, Argb::from_rgb(0xff, 0xb3, 0x00)),
            (SourceRole::Neutral, Argb::from_rgb(0x3e, 0x27, 0x23)),
        ],
    },
    Preset {
        name: "rose",
        seeds: &[
            (SourceRole::Primary, Argb::from_rgb(0xc2, 0x18, 0x5b)),
            (SourceRole::Secondary, Argb::from_rgb(0xb5, 0x83, 0x92)),
        ],
    },
    Preset {
        name: "slate",
        seeds: &[
            (SourceRole::Primary, Argb::from_rgb(0x45, 0x5a, 0x64)),
            (SourceRole::Neutral, Argb::from_rgb(0x26, 0x32, 0x38)),
        ],
    },
];

/// Look up a preset by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_sources(name: &str) -> Option<SourceColorSet> {
    let preset = PRESETS.iter().find(|p| p.name == name)?;
    Some(from_seeds(preset.seeds))
}

/// The full five-seed default set.
#[must_use]
pub fn baseline_sources() -> SourceColorSet {
    from_seeds(BASELINE)
}

fn from_seeds(seeds: &[(SourceRole, Argb)]) -> SourceColorSet {
    seeds
        .iter()
        .fold(SourceColorSet::default(), |set, &(role, argb)| {
            set.with(role, Some(HctColor::from_argb(argb)))
        })
}

/// List all preset names.
#[must_use]
pub fn builtin_names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::{Role, RoleColorMap};
    use crate::state::ThemeState;

    #[test]
    fn all_builtins_resolve() {
        for name in builtin_names() {
            let sources = builtin_sources(name);
            assert!(sources.is_some(), "Builtin '{name}' failed to resolve");
            assert!(sources.unwrap().primary.is_some(), "Builtin '{name}' has no primary");
        }
    }

    #[test]
    fn unknown_returns_none() {
        assert!(builtin_sources("nonexistent").is_none());
    }

    #[test]
    fn baseline_matches_default_state() {
        assert_eq!(
            builtin_sources("baseline").unwrap(),
            ThemeState::default().source_colors
        );
    }

    #[test]
    fn each_builtin_is_distinct() {
        let primaries: Vec<_> = builtin_names()
            .into_iter()
            .filter(|&n| n != "baseline")
            .map(|n| RoleColorMap::light(&builtin_sources(n).unwrap()).get(Role::Primary))
            .collect();
        for (i, a) in primaries.iter().enumerate() {
            for b in &primaries[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

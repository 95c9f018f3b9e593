// SPDX-License-Identifier: MIT
//
// Subcommand handlers.
//
// Handlers gather inputs (preset, state file, seed flags), derive through
// tl-theme and hand results to the printer. Saved-theme changes go through
// the pure transforms in `tl_theme::cache`; the state file is rewritten
// only after a transform succeeds.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tl_color::{Hct, hex_to_hct};
use tl_theme::builtin::{builtin_names, builtin_sources};
use tl_theme::cache;
use tl_theme::scheme::MIN_TEXT_CONTRAST;
use tl_theme::{
    Mode, PaletteStyle, Role, RoleColorMap, SourceColorSet, SourceRole, ThemeContext, ThemeError,
    ThemeState,
};

use crate::cli::{Cli, Command, SeedArgs, ThemeAction};
use crate::output::Printer;

pub fn handle(cli: Cli) -> Result<()> {
    let printer = Printer::stdout(cli.output);
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Scheme {
            seeds,
            dark,
            light,
            state,
            roles,
        } => {
            let roles = parse_roles(&roles)?;
            let scheme = scheme(&seeds, dark, light, state.as_deref())?;
            printer.scheme(&mut out, &scheme, &roles)
        }
        Command::Palette { hex, fidelity } => {
            let seed = hex_to_hct(&hex).with_context(|| format!("invalid seed {hex:?}"))?;
            let ctx = ThemeContext::new(Mode::Light, SourceColorSet::from_primary(seed))
                .with_style(style(fidelity));
            printer.palettes(&mut out, &ctx.palettes())
        }
        Command::Hct { hex } => {
            let color = hex_to_hct(&hex).with_context(|| format!("invalid color {hex:?}"))?;
            printer.hct(&mut out, &color)
        }
        Command::Hex { hue, chroma, tone } => {
            check_finite(hue, chroma, tone)?;
            let (hct, reduction) = Hct::solve_with_report(hue, chroma, tone);
            printer.solved(&mut out, hct, reduction)
        }
        Command::Theme { state, action } => {
            let path = state.context("no state file: pass --state FILE or set TONELIST_STATE")?;
            theme(&printer, &mut out, &path, action)
        }
        Command::Presets => {
            let presets: Vec<_> = builtin_names()
                .into_iter()
                .filter_map(|name| builtin_sources(name).map(|s| (name, s)))
                .collect();
            printer.presets(&mut out, &presets)
        }
    }
}

// ─── Scheme ──────────────────────────────────────────────────────────────────

fn scheme(
    seeds: &SeedArgs,
    dark: bool,
    light: bool,
    state: Option<&Path>,
) -> Result<RoleColorMap> {
    let stored = match state {
        Some(path) => Some(load_state(path)?),
        None => None,
    };
    let base = stored
        .as_ref()
        .map_or_else(SourceColorSet::default, |s| s.source_colors.clone());
    let stored_mode = stored.as_ref().map_or(Mode::Light, |s| s.mode);
    let mode = if dark {
        Mode::Dark
    } else if light {
        Mode::Light
    } else {
        stored_mode
    };

    let ctx =
        ThemeContext::new(mode, resolve_sources(seeds, base)?).with_style(style(seeds.fidelity));
    let scheme = ctx.scheme();
    warn_low_contrast(&scheme);
    Ok(scheme)
}

fn parse_roles(keys: &[String]) -> Result<Vec<Role>> {
    keys.iter()
        .map(|key| Role::from_key(key).with_context(|| format!("unknown role {key:?}")))
        .collect()
}

fn check_finite(hue: f64, chroma: f64, tone: f64) -> Result<()> {
    for (name, value) in [("hue", hue), ("chroma", chroma), ("tone", tone)] {
        if !value.is_finite() {
            bail!("{name} must be a finite number, got {value}");
        }
    }
    Ok(())
}

fn warn_low_contrast(scheme: &RoleColorMap) {
    for issue in scheme.contrast_issues(MIN_TEXT_CONTRAST) {
        tracing::warn!(
            foreground = issue.foreground.key(),
            background = issue.background.key(),
            ratio = %format!("{:.2}", issue.ratio),
            suggested_tone = ?issue.suggested_tone.map(|t| (t * 10.0).round() / 10.0),
            "text pair below {MIN_TEXT_CONTRAST}:1 contrast"
        );
    }
}

// ─── Seeds ───────────────────────────────────────────────────────────────────

const fn style(fidelity: bool) -> PaletteStyle {
    if fidelity {
        PaletteStyle::Fidelity
    } else {
        PaletteStyle::Material
    }
}

/// Start from the preset (or `base` without one), then apply each seed flag.
fn resolve_sources(seeds: &SeedArgs, base: SourceColorSet) -> Result<SourceColorSet> {
    let mut sources = match &seeds.preset {
        Some(name) => builtin_sources(name)
            .with_context(|| format!("unknown preset {name:?} (see `tonelist presets`)"))?,
        None => base,
    };
    let flags = [
        (SourceRole::Primary, &seeds.primary),
        (SourceRole::Secondary, &seeds.secondary),
        (SourceRole::Tertiary, &seeds.tertiary),
        (SourceRole::Error, &seeds.error),
        (SourceRole::Neutral, &seeds.neutral),
    ];
    for (role, flag) in flags {
        if let Some(hex) = flag {
            let color = hex_to_hct(hex).with_context(|| format!("--{role} {hex:?}"))?;
            sources = sources.with(role, Some(color));
        }
    }
    Ok(sources)
}

// ─── State file ──────────────────────────────────────────────────────────────

/// Read the state document. A missing file is a fresh default state.
fn load_state(path: &Path) -> Result<ThemeState> {
    match fs::read_to_string(path) {
        Ok(json) => ThemeState::from_json(&json)
            .with_context(|| format!("failed to parse {}", path.display())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no state file yet, using defaults");
            Ok(ThemeState::default())
        }
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

/// Write through a sibling temp file so a failed write leaves the old
/// document intact.
fn store_state(path: &Path, state: &ThemeState) -> Result<()> {
    let mut json = state.to_json()?;
    json.push('\n');
    let tmp = temp_path(path);
    fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    tracing::debug!(path = %path.display(), themes = state.cached_themes.len(), "state written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

// ─── Saved themes ────────────────────────────────────────────────────────────

fn theme(printer: &Printer, out: &mut impl Write, path: &Path, action: ThemeAction) -> Result<()> {
    let state = load_state(path)?;
    let Some((next, message)) = apply(&state, action)? else {
        return printer.themes(out, &state.cached_themes);
    };
    if next != state {
        store_state(path, &next)?;
    }
    printer.status(out, &message)?;
    printer.themes(out, &next.cached_themes)
}

/// Compute the next state for `action`. `None` means read-only.
fn apply(state: &ThemeState, action: ThemeAction) -> Result<Option<(ThemeState, String)>> {
    let themes = &state.cached_themes;
    let (cached_themes, message) = match action {
        ThemeAction::List => return Ok(None),
        ThemeAction::Save { name, dedup, seeds } => {
            let captured = context(state, &seeds)?.capture(name.unwrap_or_default());
            let next = if dedup {
                cache::save_dedup(themes, captured)
            } else {
                cache::save(themes, captured)
            };
            let message = if next.len() == themes.len() {
                "identical theme already saved".to_string()
            } else {
                format!("saved {:?}", next[next.len() - 1].name)
            };
            (next, message)
        }
        ThemeAction::Update { name, rename, seeds } => {
            let captured = context(state, &seeds)?.capture(rename.unwrap_or_default());
            let next = cache::update(themes, &name, captured)?;
            (next, format!("updated {name:?}"))
        }
        ThemeAction::Delete { index } => {
            let next = cache::delete(themes, index)?;
            (next, format!("deleted {:?}", themes[index].name))
        }
        ThemeAction::Use { name } => {
            let (_, found) = cache::find(themes, &name)
                .ok_or_else(|| ThemeError::NotFound { name: name.clone() })?;
            let next = ThemeState {
                source_colors: found.sources.clone(),
                ..state.clone()
            };
            return Ok(Some((next, format!("now using {name:?}"))));
        }
        ThemeAction::Mode { mode } => {
            let mode = mode.unwrap_or_else(|| state.mode.toggled());
            let next = ThemeState {
                mode,
                ..state.clone()
            };
            return Ok(Some((next, format!("mode set to {mode}"))));
        }
    };
    let next = ThemeState {
        cached_themes,
        ..state.clone()
    };
    Ok(Some((next, message)))
}

/// The state's mode and seeds, overridden by any seed flags.
fn context(state: &ThemeState, seeds: &SeedArgs) -> Result<ThemeContext> {
    let sources = resolve_sources(seeds, state.source_colors.clone())?;
    Ok(ThemeContext::new(state.mode, sources).with_style(style(seeds.fidelity)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use pretty_assertions::assert_eq;

    fn seeds() -> SeedArgs {
        SeedArgs::default()
    }

    fn state_with(names: &[&str]) -> ThemeState {
        let ctx = ThemeState::default().context();
        let themes = names
            .iter()
            .fold(Vec::new(), |list, name| cache::save(&list, ctx.capture(*name)));
        ThemeState {
            cached_themes: themes,
            ..ThemeState::default()
        }
    }

    fn names(state: &ThemeState) -> Vec<&str> {
        state.cached_themes.iter().map(|t| t.name.as_str()).collect()
    }

    // ── Seeds ────────────────────────────────────────────────────────

    #[test]
    fn flags_override_preset_slots() {
        let args = SeedArgs {
            preset: Some("ocean".into()),
            primary: Some("#B3261E".into()),
            ..seeds()
        };
        let sources = resolve_sources(&args, SourceColorSet::default()).unwrap();
        assert_eq!(sources.primary.unwrap().hex(), "#B3261E");
        assert_eq!(sources.tertiary.unwrap().hex(), "#009688");
    }

    #[test]
    fn no_flags_keep_base() {
        let base = ThemeState::default().source_colors;
        assert_eq!(resolve_sources(&seeds(), base.clone()).unwrap(), base);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let args = SeedArgs {
            preset: Some("neon".into()),
            ..seeds()
        };
        let err = resolve_sources(&args, SourceColorSet::default()).unwrap_err();
        assert!(err.to_string().contains("unknown preset \"neon\""));
    }

    #[test]
    fn bad_hex_names_the_flag() {
        let args = SeedArgs {
            neutral: Some("gray".into()),
            ..seeds()
        };
        let err = resolve_sources(&args, SourceColorSet::default()).unwrap_err();
        assert_eq!(err.to_string(), "--neutral \"gray\"");
    }

    // ── Scheme ───────────────────────────────────────────────────────

    #[test]
    fn scheme_defaults_to_light_baseline() {
        let scheme = scheme(&seeds(), false, false, None).unwrap();
        assert!(!scheme.is_dark());
        assert_eq!(scheme.hex(Role::Primary), "#6750a4");
    }

    #[test]
    fn scheme_follows_state_mode_unless_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let dark = ThemeState {
            mode: Mode::Dark,
            ..ThemeState::default()
        };
        store_state(&path, &dark).unwrap();

        assert!(scheme(&seeds(), false, false, Some(&path)).unwrap().is_dark());
        assert!(!scheme(&seeds(), false, true, Some(&path)).unwrap().is_dark());
    }

    // ── State file ───────────────────────────────────────────────────

    #[test]
    fn missing_state_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_state(&dir.path().join("absent.json")).unwrap();
        assert_eq!(state, ThemeState::default());
    }

    #[test]
    fn corrupt_state_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_state(&path).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let state = state_with(&["Day"]);
        store_state(&path, &state).unwrap();
        assert_eq!(load_state(&path).unwrap(), state);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn temp_path_is_a_sibling() {
        assert_eq!(
            temp_path(Path::new("/cfg/state.json")),
            PathBuf::from("/cfg/state.json.tmp")
        );
    }

    // ── Saved themes ─────────────────────────────────────────────────

    #[test]
    fn list_is_read_only() {
        assert!(apply(&state_with(&["A"]), ThemeAction::List).unwrap().is_none());
    }

    #[test]
    fn save_numbers_blank_names() {
        let state = state_with(&["A"]);
        let action = ThemeAction::Save {
            name: None,
            dedup: false,
            seeds: seeds(),
        };
        let (next, message) = apply(&state, action).unwrap().unwrap();
        assert_eq!(names(&next), ["A", "Theme 2"]);
        assert_eq!(message, "saved \"Theme 2\"");
    }

    #[test]
    fn dedup_save_skips_same_preview() {
        let state = state_with(&["A"]);
        let action = ThemeAction::Save {
            name: Some("B".into()),
            dedup: true,
            seeds: seeds(),
        };
        let (next, message) = apply(&state, action).unwrap().unwrap();
        assert_eq!(next, state);
        assert_eq!(message, "identical theme already saved");
    }

    #[test]
    fn update_with_seed_flags() {
        let state = state_with(&["A", "B"]);
        let action = ThemeAction::Update {
            name: "B".into(),
            rename: None,
            seeds: SeedArgs {
                primary: Some("#B3261E".into()),
                ..seeds()
            },
        };
        let (next, _) = apply(&state, action).unwrap().unwrap();
        assert_eq!(names(&next), ["A", "B"]);
        assert_ne!(
            next.cached_themes[1].primary.to_argb(),
            state.cached_themes[1].primary.to_argb()
        );
        assert_eq!(next.source_colors, state.source_colors);
    }

    #[test]
    fn failed_transforms_produce_no_state() {
        let state = state_with(&["A"]);
        let missing = ThemeAction::Update {
            name: "Z".into(),
            rename: None,
            seeds: seeds(),
        };
        assert!(apply(&state, missing).is_err());
        assert!(apply(&state, ThemeAction::Delete { index: 3 }).is_err());
        assert!(apply(&state, ThemeAction::Use { name: "Z".into() }).is_err());
    }

    #[test]
    fn delete_reports_removed_name() {
        let state = state_with(&["A", "B"]);
        let (next, message) = apply(&state, ThemeAction::Delete { index: 0 }).unwrap().unwrap();
        assert_eq!(names(&next), ["B"]);
        assert_eq!(message, "deleted \"A\"");
    }

    #[test]
    fn use_loads_saved_sources() {
        let red = ThemeContext::new(
            Mode::Light,
            SourceColorSet::from_primary(hex_to_hct("#B3261E").unwrap()),
        );
        let state = ThemeState {
            cached_themes: vec![red.capture("Red")],
            ..ThemeState::default()
        };
        let (next, _) = apply(&state, ThemeAction::Use { name: "Red".into() }).unwrap().unwrap();
        assert_eq!(next.source_colors, *red.sources());
        assert_eq!(next.cached_themes, state.cached_themes);
    }

    #[test]
    fn mode_action() {
        let state = ThemeState::default();
        let (next, message) = apply(&state, ThemeAction::Mode { mode: Some(Mode::Dark) })
            .unwrap()
            .unwrap();
        assert_eq!(next.mode, Mode::Dark);
        assert_eq!(message, "mode set to dark");
    }

    #[test]
    fn mode_action_without_value_flips() {
        let state = ThemeState {
            mode: Mode::Dark,
            ..ThemeState::default()
        };
        let (next, message) = apply(&state, ThemeAction::Mode { mode: None }).unwrap().unwrap();
        assert_eq!(next.mode, Mode::Light);
        assert_eq!(message, "mode set to light");
    }

    // ── Arguments ────────────────────────────────────────────────────

    #[test]
    fn role_keys_resolve_in_given_order() {
        let roles = parse_roles(&["onPrimary".into(), "primary".into()]).unwrap();
        assert_eq!(roles, [Role::OnPrimary, Role::Primary]);
        let err = parse_roles(&["primary".into(), "accent".into()]).unwrap_err();
        assert_eq!(err.to_string(), "unknown role \"accent\"");
    }

    #[test]
    fn hex_rejects_non_finite_components() {
        assert!(check_finite(-78.0, 30.0, 40.0).is_ok());
        let err = check_finite(f64::NAN, 30.0, 50.0).unwrap_err();
        assert_eq!(err.to_string(), "hue must be a finite number, got NaN");
        let err = check_finite(120.0, f64::INFINITY, 50.0).unwrap_err();
        assert_eq!(err.to_string(), "chroma must be a finite number, got inf");
        assert!(check_finite(120.0, 30.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn theme_command_rewrites_file_only_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        store_state(&path, &state_with(&["A"])).unwrap();
        let before = fs::read_to_string(&path).unwrap();
        let printer = Printer::stdout(OutputFormat::Json);

        let mut sink = Vec::new();
        assert!(theme(&printer, &mut sink, &path, ThemeAction::Delete { index: 9 }).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);

        let mut sink = Vec::new();
        theme(&printer, &mut sink, &path, ThemeAction::Delete { index: 0 }).unwrap();
        assert!(load_state(&path).unwrap().cached_themes.is_empty());
        let printed: serde_json::Value = serde_json::from_slice(&sink).unwrap();
        assert_eq!(printed, serde_json::json!([]));
    }
}

//! End-to-end flow over a persisted state document: load, derive, save,
//! rename, delete, write back.

use pretty_assertions::assert_eq;
use tl_theme::cache::{delete, find, save, save_dedup, update};
use tl_theme::{Mode, Role, ThemeError, ThemeState};

const STORED: &str = r##"{
  "mode": "light",
  "sourceColor": "#1976d2",
  "sourceColors": {
    "primary": "#6750A4",
    "error": { "hue": 25.98, "chroma": 76.33, "tone": 39.69, "hex": "#B3261E" }
  },
  "cachedThemes": [
    {
      "name": "Theme 1",
      "sources": { "primary": "#6750A4" },
      "primary": "#6750a4",
      "secondary": "#625b71",
      "background": "#fffbff"
    },
    {
      "name": "Night",
      "sources": { "primary": "#6750A4" },
      "primary": "#cfbcff",
      "secondary": "#cbc2db",
      "background": "#1c1b1e"
    }
  ]
}"##;

#[test]
fn load_derive_and_save() {
    let state = ThemeState::from_json(STORED).unwrap();
    let scheme = state.scheme();
    assert_eq!(scheme.hex(Role::Primary), "#6750a4");

    let current = state.context().capture("");
    let themes = save(&state.cached_themes, current);
    assert_eq!(themes.len(), 3);
    assert_eq!(themes[2].name, "Theme 3");

    // Same preview as "Theme 1".
    let deduped = save_dedup(&state.cached_themes, state.context().capture("Copy"));
    assert_eq!(deduped, state.cached_themes);
}

#[test]
fn dark_capture_matches_saved_night_theme() {
    let state = ThemeState::from_json(STORED).unwrap();
    let night = state.context().with_mode(Mode::Dark).capture("Night");
    let (_, saved) = find(&state.cached_themes, "Night").unwrap();
    assert_eq!(night.primary.to_argb(), saved.primary.to_argb());
    assert_eq!(night.background.to_argb(), saved.background.to_argb());
}

#[test]
fn update_and_delete_then_write_back() {
    let state = ThemeState::from_json(STORED).unwrap();
    let renamed = state.context().with_mode(Mode::Dark).capture("Midnight");

    let themes = update(&state.cached_themes, "Night", renamed).unwrap();
    assert_eq!(themes[1].name, "Midnight");

    let themes = delete(&themes, 0).unwrap();
    assert_eq!(themes.len(), 1);

    let next = ThemeState {
        cached_themes: themes,
        ..state
    };
    let written = next.to_json().unwrap();
    let reread = ThemeState::from_json(&written).unwrap();
    assert_eq!(reread, next);
    assert_eq!(reread.cached_themes[0].name, "Midnight");
}

#[test]
fn failed_transforms_leave_list_alone() {
    let state = ThemeState::from_json(STORED).unwrap();
    let before = state.cached_themes.clone();

    let err = update(&state.cached_themes, "Nope", state.context().capture("x")).unwrap_err();
    assert!(matches!(err, ThemeError::NotFound { .. }));

    let err = delete(&state.cached_themes, 7).unwrap_err();
    assert_eq!(err.to_string(), "theme index 7 is out of range (2 saved)");

    assert_eq!(state.cached_themes, before);
}

#[test]
fn bare_strings_are_normalized_on_write() {
    let state = ThemeState::from_json(STORED).unwrap();
    let value: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
    let primary = &value["sourceColors"]["primary"];
    assert_eq!(primary["hex"], "#6750A4");
    assert!(primary["hue"].as_f64().unwrap() > 298.0);
}

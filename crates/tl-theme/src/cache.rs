//! Saved themes and the pure transforms over a saved-theme list.
//!
//! Each transform takes the current list by reference and returns a new one.
//! The caller owns persistence: it swaps the result in and writes it out, or
//! drops it on error and keeps what it had.

use serde::{Deserialize, Serialize};
use tl_color::HctColor;

use crate::core_palette::SourceColorSet;
use crate::error::ThemeError;
use crate::scheme::{Role, RoleColorMap};

/// A user-named theme: the seeds plus a preview snapshot of three roles.
///
/// The snapshot is taken when the theme is saved and is not refreshed if the
/// derivation rules change. Previews compare by color, so hex case is
/// irrelevant. Themes are identified by `name`; when names
/// collide the first entry wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedTheme {
    #[serde(default)]
    pub name: String,
    pub sources: SourceColorSet,
    pub primary: HctColor,
    pub secondary: HctColor,
    pub background: HctColor,
}

impl NamedTheme {
    /// Snapshot `scheme` under `name`. `scheme` should be derived from
    /// `sources`.
    #[must_use]
    pub fn capture(name: impl Into<String>, sources: SourceColorSet, scheme: &RoleColorMap) -> Self {
        Self {
            name: name.into(),
            sources,
            primary: HctColor::from_argb(scheme.get(Role::Primary)),
            secondary: HctColor::from_argb(scheme.get(Role::Secondary)),
            background: HctColor::from_argb(scheme.get(Role::Background)),
        }
    }

    fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }

    fn same_preview(&self, other: &Self) -> bool {
        self.primary.to_argb() == other.primary.to_argb()
            && self.secondary.to_argb() == other.secondary.to_argb()
            && self.background.to_argb() == other.background.to_argb()
    }
}

/// Append `theme`. A blank name becomes `"Theme N"` with N the new length.
#[must_use]
pub fn save(themes: &[NamedTheme], mut theme: NamedTheme) -> Vec<NamedTheme> {
    if theme.has_blank_name() {
        theme.name = format!("Theme {}", themes.len() + 1);
    }
    tracing::debug!(name = %theme.name, count = themes.len() + 1, "saved theme");
    let mut out = themes.to_vec();
    out.push(theme);
    out
}

/// Like [`save`], but returns the list unchanged when a theme with the same
/// primary, secondary and background preview is already saved.
#[must_use]
pub fn save_dedup(themes: &[NamedTheme], theme: NamedTheme) -> Vec<NamedTheme> {
    if let Some(existing) = themes.iter().find(|t| t.same_preview(&theme)) {
        tracing::debug!(existing = %existing.name, "identical theme already saved");
        return themes.to_vec();
    }
    save(themes, theme)
}

/// Replace the first theme called `name` with `theme`, in place.
///
/// A blank name on `theme` keeps the old name.
///
/// # Errors
///
/// [`ThemeError::NotFound`] when no theme is called `name`. Nothing is
/// inserted in that case.
pub fn update(
    themes: &[NamedTheme],
    name: &str,
    mut theme: NamedTheme,
) -> Result<Vec<NamedTheme>, ThemeError> {
    let (index, existing) = find(themes, name).ok_or_else(|| ThemeError::NotFound {
        name: name.to_string(),
    })?;
    if theme.has_blank_name() {
        theme.name.clone_from(&existing.name);
    }
    tracing::debug!(index, from = name, to = %theme.name, "updated theme");
    let mut out = themes.to_vec();
    out[index] = theme;
    Ok(out)
}

/// Remove the theme at `index`.
///
/// # Errors
///
/// [`ThemeError::IndexOutOfRange`] when `index >= themes.len()`.
pub fn delete(themes: &[NamedTheme], index: usize) -> Result<Vec<NamedTheme>, ThemeError> {
    if index >= themes.len() {
        return Err(ThemeError::IndexOutOfRange {
            index,
            len: themes.len(),
        });
    }
    tracing::debug!(index, name = %themes[index].name, "deleted theme");
    let mut out = themes.to_vec();
    out.remove(index);
    Ok(out)
}

/// The first theme called `name`, with its position.
#[must_use]
pub fn find<'a>(themes: &'a [NamedTheme], name: &str) -> Option<(usize, &'a NamedTheme)> {
    themes.iter().enumerate().find(|(_, t)| t.name == name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Errors for theme state and the saved-theme cache.
//!
//! Palette and scheme derivation cannot fail. Only caller input can: a bad
//! index or name into the cache, a malformed color string, or a state file
//! that is not valid JSON.

use thiserror::Error;
use tl_color::ColorError;

#[derive(Debug, Error)]
pub enum ThemeError {
    /// `delete` was given an index past the end of the list.
    #[error("theme index {index} is out of range ({len} saved)")]
    IndexOutOfRange { index: usize, len: usize },

    /// `update` found no saved theme with this name. The list is unchanged.
    #[error("no saved theme named {name:?}")]
    NotFound { name: String },

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("invalid theme state: {0}")]
    Json(#[from] serde_json::Error),
}

// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors produced while parsing color input.
///
/// Every numeric conversion in this crate is total. Only text input can be
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input is not `#` followed by exactly six hexadecimal digits.
    #[error("invalid hex color {input:?}: expected '#' followed by 6 hex digits")]
    InvalidFormat { input: String },
}

impl ColorError {
    pub(crate) fn invalid(input: &str) -> Self {
        Self::InvalidFormat {
            input: input.to_string(),
        }
    }
}

//! Internal helpers for input validation and text normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and matching logic so the engine enforces consistent invariants.

use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Trim a required name and reject empty input.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Fold text for case-insensitive matching (NFKC + lowercase).
pub(crate) fn normalize_search(value: &str) -> String {
    value.nfkc().collect::<String>().to_lowercase()
}

//! Raw cell value cleaning.
//!
//! Source spreadsheets use `"N/A"` and friends interchangeably with a blank
//! cell. Those tokens become absent here so they never reach the canonical
//! table; rendering `"N/A"` back is the presentation layer's job.

use crate::record::Field;

/// Placeholder tokens treated as absent, compared case-insensitively.
const PLACEHOLDERS: [&str; 7] = ["n/a", "na", "nan", "null", "none", "-", "#n/a"];

/// Returns `true` if `raw` is blank or a placeholder token.
#[must_use]
pub fn is_placeholder(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || PLACEHOLDERS
            .iter()
            .any(|p| trimmed.eq_ignore_ascii_case(p))
}

/// Clean a raw cell for `field`.
///
/// Join-key fields keep their exact text (keys are compared as provided);
/// every other field is trimmed.
#[must_use]
pub fn clean_value(field: Field, raw: &str) -> Option<String> {
    if is_placeholder(raw) {
        return None;
    }
    if field.is_join_key() {
        Some(raw.to_string())
    } else {
        Some(raw.trim().to_string())
    }
}

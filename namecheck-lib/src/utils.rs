//! Utility functions for query validation.
//!
//! Forms only ever send trimmed input that meets the per-tab minimum
//! length; anything shorter is dropped before it reaches the backend.

use crate::error::NameCheckError;
use crate::types::Tab;

/// Shortest username that is sent to the backend.
pub const MIN_USERNAME_LEN: usize = 2;

/// Shortest domain name that is sent to the backend.
pub const MIN_DOMAIN_LEN: usize = 3;

/// Minimum query length for a tab.
pub fn min_query_len(tab: Tab) -> usize {
    match tab {
        Tab::Username => MIN_USERNAME_LEN,
        Tab::Domain => MIN_DOMAIN_LEN,
    }
}

/// Trim a raw query and return it if it is long enough to submit.
///
/// Length is measured in characters, not bytes.
pub fn submittable_query(tab: Tab, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < min_query_len(tab) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validate a query for direct library use.
///
/// Unlike [`submittable_query`], this reports why the input was rejected.
pub fn validate_query(tab: Tab, raw: &str) -> Result<String, NameCheckError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(NameCheckError::invalid_input(
            tab.to_string(),
            trimmed,
            "cannot be empty",
        ));
    }

    submittable_query(tab, raw).ok_or_else(|| {
        NameCheckError::invalid_input(
            tab.to_string(),
            trimmed,
            format!("must be at least {} characters", min_query_len(tab)),
        )
    })
}

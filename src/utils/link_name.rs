//! Rules for explicitly chosen link names.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use crate::error::AppError;

/// Longest accepted name.
pub const MAX_NAME_LENGTH: usize = 64;

/// Names may not shadow fixed routes.
const RESERVED_NAMES: &[&str] = &["health"];

pub(crate) static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]+$").expect("name pattern is valid"));

/// Validates a name supplied by a client for create or rename.
///
/// Derived names only use `[0-9A-Za-z]`; explicit names may additionally use
/// `_` and `-`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the name is empty, too long, contains
/// other characters or is reserved.
pub fn validate_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(AppError::bad_request(
            format!("Name must be 1-{MAX_NAME_LENGTH} characters"),
            json!({ "provided_length": name.len() }),
        ));
    }

    if !NAME_REGEX.is_match(name) {
        return Err(AppError::bad_request(
            "Name can only contain letters, digits, '_' and '-'",
            json!({ "name": name }),
        ));
    }

    if RESERVED_NAMES.contains(&name) {
        return Err(AppError::bad_request(
            "This name is reserved",
            json!({ "name": name }),
        ));
    }

    Ok(())
}

//! Structural validation of raw handle input.
//!
//! Two boundaries exist: a strict regex shape (2-256 local-part characters,
//! one `@`, 2-64 letter provider label) and a relaxed boundary (contains `@`
//! and trimmed length of at least 5). [`ValidationPolicy`] selects which one
//! the service applies; both are pure functions with no side effects.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::Identifier;

lazy_static! {
    static ref HANDLE_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._-]{2,256}@[A-Za-z]{2,64}$").unwrap();
}

/// Minimum trimmed length accepted by the relaxed boundary.
const RELAXED_MIN_LEN: usize = 5;

/// Validation failure for a raw handle string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The trimmed input was empty
    #[error("UPI ID must not be empty")]
    EmptyInput,

    /// The input does not match the accepted handle shape
    #[error("Invalid UPI ID format. UPI IDs should contain '@' and be properly formatted.")]
    MalformedFormat,
}

/// Which validation boundary the service applies before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Contains `@` and is at least 5 characters after trimming
    #[default]
    Relaxed,
    /// Full `local-part@provider-label` regex shape
    Strict,
}

/// Validate against the strict handle shape.
pub fn validate(raw: &str) -> Result<Identifier, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    if !HANDLE_REGEX.is_match(trimmed) {
        return Err(ValidationError::MalformedFormat);
    }
    Ok(Identifier::new_unchecked(trimmed.to_string()))
}

/// Validate against the relaxed boundary used at the service edge.
///
/// Only the truly-empty string is `EmptyInput` here; whitespace-only input
/// fails the `@`/length boundary instead and becomes `MalformedFormat`,
/// which the service reports as a rejection verdict rather than an error.
pub fn validate_relaxed(raw: &str) -> Result<Identifier, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    let trimmed = raw.trim();
    if !trimmed.contains('@') || trimmed.len() < RELAXED_MIN_LEN {
        return Err(ValidationError::MalformedFormat);
    }
    Ok(Identifier::new_unchecked(trimmed.to_string()))
}

/// Validate under the given policy.
pub fn validate_with_policy(
    raw: &str,
    policy: ValidationPolicy,
) -> Result<Identifier, ValidationError> {
    match policy {
        ValidationPolicy::Relaxed => validate_relaxed(raw),
        ValidationPolicy::Strict => validate(raw),
    }
}

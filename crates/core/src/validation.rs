//! Write-side validation helpers.
//!
//! The status engine never validates; these run in the API layer before a
//! create or update reaches the store.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::Amount;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

static DATETIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("valid datetime regex")
});

/// Validate that `value` is an ISO date (`YYYY-MM-DD`) or starts with an
/// RFC 3339 datetime. Empty strings pass; optional fields may be blank.
pub fn validate_iso_date(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() || DATE_PATTERN.is_match(value) || DATETIME_PATTERN.is_match(value) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "{field} must be in ISO format (YYYY-MM-DD or RFC3339)"
    )))
}

/// Validate an optional date field.
pub fn validate_optional_date(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_iso_date(field, v),
        None => Ok(()),
    }
}

/// Validate that a money amount is not negative.
pub fn validate_money(field: &str, value: Amount) -> Result<(), CoreError> {
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Validate the contract value, which must be strictly positive.
pub fn validate_total_amount(value: Amount) -> Result<(), CoreError> {
    if value <= 0 {
        return Err(CoreError::Validation(format!(
            "totalAmount must be greater than 0, got {value}"
        )));
    }
    Ok(())
}

/// Reject a write that would clear `deliveredAt` on a delivered project.
///
/// `requested` is `None` when the write leaves the field untouched and
/// `Some(None)` when it explicitly clears it.
pub fn validate_delivery_monotonic(
    current: Option<&str>,
    requested: Option<Option<&str>>,
) -> Result<(), CoreError> {
    let delivered = current.is_some_and(|s| !s.trim().is_empty());
    let clearing = match requested {
        Some(None) => true,
        Some(Some(s)) => s.trim().is_empty(),
        None => false,
    };

    if delivered && clearing {
        return Err(CoreError::Conflict(
            "deliveredAt cannot be cleared once a project is delivered".to_string(),
        ));
    }
    Ok(())
}

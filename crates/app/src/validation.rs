//! Shared field rules for `validator` derives.

use validator::{ValidationError, ValidationErrors};

/// Highest amount a price column can hold.
pub(crate) const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Rejects empty and whitespace-only text.
///
/// # Errors
///
/// Returns a `blank` validation error.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

/// The reason for the first failing field, checked in `rules` order.
pub(crate) fn first_failure(
    errors: &ValidationErrors,
    rules: &[(&str, &'static str)],
) -> &'static str {
    let failed = errors.errors();

    rules
        .iter()
        .find(|(field, _)| failed.contains_key(*field))
        .map_or("Invalid input", |&(_, reason)| reason)
}

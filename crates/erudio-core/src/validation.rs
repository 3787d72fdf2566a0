//! Validation utilities.

use crate::ErudioError;
use validator::{Validate, ValidationError, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `ErudioError` on failure.
    fn validate_request(&self) -> Result<(), ErudioError> {
        self.validate().map_err(validation_errors_to_erudio_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `ErudioError`, one
/// `field: message` entry per failure, ordered by field.
#[must_use]
pub fn validation_errors_to_erudio_error(errors: ValidationErrors) -> ErudioError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| errors.iter().map(move |error| (field.to_string(), describe(error))))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ");

    ErudioError::Validation(message)
}

fn describe(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map_or_else(|| error.code.to_string(), ToString::to_string)
}

/// Runs one imperative rule and reports a failure against `field`.
pub fn check_field(field: &str, outcome: Result<(), ValidationError>) -> Result<(), ErudioError> {
    outcome.map_err(|error| ErudioError::Validation(format!("{field}: {}", describe(&error))))
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a price is a finite, non-negative amount.
    pub fn non_negative_price(value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::new("price_negative"));
        }
        Ok(())
    }
}

//! Payload validation with first-violation reporting.

use validator::{Validate, ValidationErrors};

use quill_core::{CoreError, CoreResult};

/// Validate a payload, mapping failure to [`CoreError::InvalidInput`] carrying
/// the first violation's message — the shape callers of this API expect.
pub fn check<T: Validate>(input: &T) -> CoreResult<()> {
    input.validate().map_err(first_violation)
}

fn first_violation(errors: ValidationErrors) -> CoreError {
    for (field, violations) in errors.field_errors() {
        if let Some(v) = violations.first() {
            let message = v
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            return CoreError::InvalidInput(message);
        }
    }
    CoreError::invalid_input("invalid input")
}

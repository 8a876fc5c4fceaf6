//! Input validation plumbing.
//!
//! Schemas live as `validator` derives on the request types in
//! [`crate::models`]; this module flattens the raw derive output into the
//! field → message map carried by [`ApiError::Validation`] and hosts the
//! custom rules the derive attributes reference.

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ApiError;
use crate::models::FieldErrors;

/// Run a type's validation schema, mapping failures to
/// [`ApiError::Validation`]. Synchronous; performs no I/O.
pub fn check<T: Validate>(value: &T) -> Result<(), ApiError> {
    value
        .validate()
        .map_err(|errors| ApiError::Validation { errors: field_messages(&errors) })
}

/// Flatten `ValidationErrors` into one message per field. When a field
/// fails several rules, the first message wins.
fn field_messages(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let message = field_errors
            .iter()
            .find_map(|e| e.message.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| format!("{field} is invalid"));
        out.insert(field.to_string(), message);
    }
    out
}

/// Prices must be strictly positive; zero is not a sellable price.
pub fn price_is_positive(price: &Decimal) -> Result<(), ValidationError> {
    if *price > Decimal::ZERO {
        return Ok(());
    }
    let mut err = ValidationError::new("range");
    err.message = Some("price must be greater than 0".into());
    Err(err)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;

//! Structural input checks shared by the mutating services.

use crate::error::{AppError, AppResult};

/// Trimmed value of a required text field.
pub fn required<'a>(field: &str, value: &'a str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

pub fn positive(field: &str, value: f64) -> AppResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a positive number"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod validate_tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("name", "  Oats ").unwrap(), "Oats");
        let err = required("name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "invalid input: name is required");
    }

    #[test]
    fn positive_rejects_zero_negative_and_nan() {
        assert_eq!(positive("grams", 2.5).unwrap(), 2.5);
        assert!(positive("grams", 0.0).is_err());
        assert!(positive("grams", -3.0).is_err());
        assert!(positive("grams", f64::NAN).is_err());
    }
}

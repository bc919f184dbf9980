//! Generic numeric range validator.

use crate::core::{
    ErrorCode, ValidationError, ValidationResult, Validator, ValidatorMetadata,
};

// ============================================================================
// NUMBER VALIDATOR
// ============================================================================

/// Validates a numeric value against integer and range constraints.
///
/// The input is an `Option<f64>` so that a missing value can be reported
/// with `NUMBER_REQUIRED` before any other rule runs.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::basic::NumberValidator;
///
/// let validator = NumberValidator::new().min(0.0).max(100.0);
/// assert_eq!(validator.validate(&Some(42.0)).unwrap(), 42.0);
/// assert!(validator.validate(&None).is_err());
/// assert!(validator.validate(&Some(42.5)).is_err()); // integers only by default
/// ```
#[derive(Debug, Clone)]
pub struct NumberValidator {
    min: Option<f64>,
    max: Option<f64>,
    allow_decimals: bool,
}

impl NumberValidator {
    /// Creates a number validator with no bounds that accepts integers only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
            allow_decimals: false,
        }
    }

    /// Sets the minimum allowed value (inclusive).
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the maximum allowed value (inclusive).
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Accepts fractional values.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_decimals(mut self) -> Self {
        self.allow_decimals = true;
        self
    }
}

impl Default for NumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NumberValidator {
    type Input = Option<f64>;
    type Output = f64;

    fn validate(&self, input: &Option<f64>) -> ValidationResult<f64> {
        let value = input.ok_or_else(|| {
            ValidationError::new(ErrorCode::NumberRequired, "Number is required")
        })?;

        if !self.allow_decimals && value.fract() != 0.0 {
            return Err(ValidationError::new(
                ErrorCode::NumberNotInteger,
                "Number must be an integer",
            ));
        }
        if let Some(min) = self.min {
            if value < min {
                return Err(ValidationError::new(
                    ErrorCode::NumberTooSmall,
                    format!("Number must be at least {min}"),
                )
                .with_param("min", min.to_string()));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(ValidationError::new(
                    ErrorCode::NumberTooLarge,
                    format!("Number must be at most {max}"),
                )
                .with_param("max", max.to_string()));
            }
        }
        Ok(value)
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Number")
            .with_description("Numeric range check")
            .with_tag("basic")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_is_required_error() {
        let validator = NumberValidator::new();
        assert_eq!(
            validator.validate(&None).unwrap_err().code(),
            ErrorCode::NumberRequired
        );
    }

    #[test]
    fn integer_check_runs_before_bounds() {
        let validator = NumberValidator::new().min(10.0);
        assert_eq!(
            validator.validate(&Some(5.5)).unwrap_err().code(),
            ErrorCode::NumberNotInteger
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let validator = NumberValidator::new().min(1.0).max(10.0);
        assert!(validator.validate(&Some(1.0)).is_ok());
        assert!(validator.validate(&Some(10.0)).is_ok());
        assert_eq!(
            validator.validate(&Some(0.0)).unwrap_err().code(),
            ErrorCode::NumberTooSmall
        );
        assert_eq!(
            validator.validate(&Some(11.0)).unwrap_err().code(),
            ErrorCode::NumberTooLarge
        );
    }

    #[test]
    fn decimals_allowed_when_enabled() {
        let validator = NumberValidator::new().allow_decimals();
        assert!(validator.validate(&Some(2.5)).is_ok());
    }
}

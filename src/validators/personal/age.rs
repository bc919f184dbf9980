//! Age validator.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::date_of_birth::age_breakdown;
use crate::core::{
    ErrorCode, ValidationError, ValidationResult, Validator, ValidatorMetadata,
};

// ============================================================================
// AGE INPUT / OUTPUT
// ============================================================================

/// Age input: either a number of years or a birth date to derive it from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgeInput {
    Years(f64),
    BirthDate(NaiveDate),
}

/// A validated age with its matched category, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidAge {
    /// Age in years (whole unless decimals are allowed).
    pub years: f64,
    /// First configured category whose range contains the age.
    pub category: Option<String>,
}

// ============================================================================
// AGE VALIDATOR
// ============================================================================

/// Validates an age given directly or derived from a birth date.
///
/// Check order: required, integer-unless-decimals-allowed, minimum,
/// maximum, expected category. A birth date in the future is reported as
/// `AGE_FUTURE_BIRTH_DATE`, never as a panic.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::personal::{AgeInput, AgeValidator};
///
/// let validator = AgeValidator::new().min(18.0);
/// assert!(validator.validate(&Some(AgeInput::Years(25.0))).is_ok());
/// assert!(validator.validate(&Some(AgeInput::Years(12.0))).is_err());
/// assert!(validator.validate(&None).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct AgeValidator {
    min: f64,
    max: f64,
    allow_decimals: bool,
    categories: Vec<(String, f64, f64)>,
    expected_category: Option<String>,
}

impl AgeValidator {
    /// Creates an age validator with default settings.
    ///
    /// Defaults: 0 to 130 years, whole numbers only, no categories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: 0.0,
            max: 130.0,
            allow_decimals: false,
            categories: Vec::new(),
            expected_category: None,
        }
    }

    /// Sets the minimum age (inclusive).
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    /// Sets the maximum age (inclusive).
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    /// Accepts fractional ages.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_decimals(mut self) -> Self {
        self.allow_decimals = true;
        self
    }

    /// Adds a named age category with an inclusive range.
    #[must_use = "builder methods must be chained or built"]
    pub fn category(mut self, name: impl Into<String>, from: f64, to: f64) -> Self {
        self.categories.push((name.into(), from, to));
        self
    }

    /// Requires the age to fall inside the named category's range.
    #[must_use = "builder methods must be chained or built"]
    pub fn expect_category(mut self, name: impl Into<String>) -> Self {
        self.expected_category = Some(name.into());
        self
    }

    fn validate_at(
        &self,
        input: &Option<AgeInput>,
        today: NaiveDate,
    ) -> ValidationResult<ValidAge> {
        let input = input.ok_or_else(|| {
            ValidationError::new(ErrorCode::AgeRequired, "Age is required")
        })?;

        let years = match input {
            AgeInput::Years(years) => years,
            AgeInput::BirthDate(birth) => {
                let age = age_breakdown(birth, today).ok_or_else(|| {
                    ValidationError::new(
                        ErrorCode::AgeFutureBirthDate,
                        "Birth date cannot be in the future",
                    )
                })?;
                if self.allow_decimals {
                    age.decimal_years
                } else {
                    f64::from(age.years)
                }
            }
        };

        if !self.allow_decimals && years.fract() != 0.0 {
            return Err(ValidationError::new(
                ErrorCode::AgeNotInteger,
                "Age must be a whole number",
            ));
        }
        if years < self.min {
            return Err(ValidationError::new(
                ErrorCode::AgeBelowMinimum,
                format!("Age must be at least {}", self.min),
            )
            .with_param("min", self.min.to_string()));
        }
        if years > self.max {
            return Err(ValidationError::new(
                ErrorCode::AgeAboveMaximum,
                format!("Age must be at most {}", self.max),
            )
            .with_param("max", self.max.to_string()));
        }

        let category = self
            .categories
            .iter()
            .find(|(_, from, to)| years >= *from && years <= *to)
            .map(|(name, _, _)| name.clone());

        if let Some(expected) = &self.expected_category {
            if category.as_deref() != Some(expected.as_str()) {
                return Err(ValidationError::new(
                    ErrorCode::AgeOutsideCategory,
                    format!("Age is outside the '{expected}' category"),
                )
                .with_param("category", expected));
            }
        }

        Ok(ValidAge { years, category })
    }
}

impl Default for AgeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for AgeValidator {
    type Input = Option<AgeInput>;
    type Output = ValidAge;

    fn validate(&self, input: &Option<AgeInput>) -> ValidationResult<ValidAge> {
        self.validate_at(input, Utc::now().date_naive())
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Age")
            .with_description("Age bounds and category lookup")
            .with_tag("personal")
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Gender field validator.

use crate::core::{
    ErrorCode, ValidationError, ValidationResult, Validator, ValidatorMetadata,
};

// ============================================================================
// GENDER VALIDATOR
// ============================================================================

/// Validates a gender value against an allowed-values list, with an
/// abbreviation-expansion fallback and an optional free-text fallback.
///
/// Check order: required, allowed list, abbreviation expansion, free-text
/// fallback (length-capped). The normalized value is the matched canonical
/// value, case-folded unless case-sensitive mode is on.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::personal::GenderValidator;
///
/// let validator = GenderValidator::new();
/// assert_eq!(validator.validate("Female").unwrap(), "female");
/// assert_eq!(validator.validate("m").unwrap(), "male");
/// assert!(validator.validate("dragon").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct GenderValidator {
    allowed: Vec<String>,
    abbreviations: Vec<(String, String)>,
    case_sensitive: bool,
    allow_custom: bool,
    max_custom_length: usize,
}

impl GenderValidator {
    /// Creates a gender validator with default settings.
    ///
    /// Defaults: the common five values, one-letter abbreviations for the
    /// binary pair plus `nb`, case-insensitive, no free-text fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed: [
                "male",
                "female",
                "non-binary",
                "other",
                "prefer-not-to-say",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            abbreviations: [("m", "male"), ("f", "female"), ("nb", "non-binary")]
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            case_sensitive: false,
            allow_custom: false,
            max_custom_length: 30,
        }
    }

    /// Replaces the allowed-values list.
    #[must_use = "builder methods must be chained or built"]
    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = values.into_iter().map(Into::into).collect();
        self
    }

    /// Compares values exactly instead of case-folding.
    #[must_use = "builder methods must be chained or built"]
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Accepts free-text values up to `max_length` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_custom(mut self, max_length: usize) -> Self {
        self.allow_custom = true;
        self.max_custom_length = max_length;
        self
    }

    fn fold(&self, value: &str) -> String {
        if self.case_sensitive {
            value.to_string()
        } else {
            value.to_ascii_lowercase()
        }
    }
}

impl Default for GenderValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for GenderValidator {
    type Input = str;
    type Output = String;

    fn validate(&self, input: &str) -> ValidationResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::GenderRequired,
                "Gender is required",
            ));
        }

        let value = self.fold(trimmed);

        if self.allowed.iter().any(|a| self.fold(a) == value) {
            return Ok(value);
        }

        if let Some((_, expanded)) = self
            .abbreviations
            .iter()
            .find(|(abbr, _)| self.fold(abbr) == value)
        {
            return Ok(self.fold(expanded));
        }

        if self.allow_custom {
            if value.chars().count() > self.max_custom_length {
                return Err(ValidationError::new(
                    ErrorCode::GenderTooLong,
                    format!(
                        "Gender must be at most {} characters",
                        self.max_custom_length
                    ),
                )
                .with_param("max", self.max_custom_length.to_string()));
            }
            return Ok(value);
        }

        Err(ValidationError::new(
            ErrorCode::GenderNotAllowed,
            format!("Gender '{trimmed}' is not in the allowed list"),
        ))
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Gender")
            .with_description("Allowed-value lookup with abbreviation fallback")
            .with_tag("personal")
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Personal name validator.

use crate::core::{
    ErrorCode, ValidationComplexity, ValidationError, ValidationResult, Validator,
    ValidatorMetadata,
};

// ============================================================================
// NAME VALIDATOR
// ============================================================================

/// Validates a personal name: length bounds plus a letters-and-spaces
/// character set, optionally extended with apostrophes and hyphens.
///
/// Check order: required, minimum length, maximum length, characters.
/// The normalized value is the trimmed input.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::personal::NameValidator;
///
/// let validator = NameValidator::new();
/// assert!(validator.validate("Mary O'Brien-Smith").is_ok());
/// assert!(validator.validate("R2D2").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct NameValidator {
    min_length: usize,
    max_length: usize,
    allow_punctuation: bool,
}

impl NameValidator {
    /// Creates a name validator with default settings.
    ///
    /// Defaults: 2 to 50 characters, apostrophes and hyphens allowed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_length: 2,
            max_length: 50,
            allow_punctuation: true,
        }
    }

    /// Overrides the length bounds.
    #[must_use = "builder methods must be chained or built"]
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Restricts the name to letters and spaces only.
    #[must_use = "builder methods must be chained or built"]
    pub fn letters_only(mut self) -> Self {
        self.allow_punctuation = false;
        self
    }

    fn char_allowed(&self, c: char) -> bool {
        c.is_alphabetic()
            || c == ' '
            || (self.allow_punctuation && (c == '\'' || c == '-'))
    }
}

impl Default for NameValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NameValidator {
    type Input = str;
    type Output = String;

    fn validate(&self, input: &str) -> ValidationResult<String> {
        let name = input.trim();
        if name.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::NameRequired,
                "Name is required",
            ));
        }

        let len = name.chars().count();
        if len < self.min_length {
            return Err(ValidationError::new(
                ErrorCode::NameTooShort,
                format!("Name must be at least {} characters", self.min_length),
            )
            .with_param("min", self.min_length.to_string()));
        }
        if len > self.max_length {
            return Err(ValidationError::new(
                ErrorCode::NameTooLong,
                format!("Name must be at most {} characters", self.max_length),
            )
            .with_param("max", self.max_length.to_string()));
        }

        if let Some(bad) = name.chars().find(|c| !self.char_allowed(*c)) {
            return Err(ValidationError::new(
                ErrorCode::NameInvalidChars,
                "Name contains invalid characters",
            )
            .with_param("character", bad.to_string()));
        }

        Ok(name.to_string())
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Name")
            .with_description("Personal name length and character set")
            .with_complexity(ValidationComplexity::Linear)
            .with_tag("personal")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_plain_and_punctuated_names() {
        let validator = NameValidator::new();
        assert_eq!(validator.validate(" Jane Doe ").unwrap(), "Jane Doe");
        assert!(validator.validate("O'Connor").is_ok());
        assert!(validator.validate("Smith-Jones").is_ok());
    }

    #[test]
    fn empty_is_required() {
        let validator = NameValidator::new();
        assert_eq!(
            validator.validate("").unwrap_err().code(),
            ErrorCode::NameRequired
        );
    }

    #[test]
    fn length_bounds() {
        let validator = NameValidator::new();
        assert_eq!(
            validator.validate("J").unwrap_err().code(),
            ErrorCode::NameTooShort
        );
        let long = "a".repeat(51);
        assert_eq!(
            validator.validate(&long).unwrap_err().code(),
            ErrorCode::NameTooLong
        );
    }

    #[test]
    fn digits_rejected() {
        let validator = NameValidator::new();
        assert_eq!(
            validator.validate("Jane 2nd").unwrap_err().code(),
            ErrorCode::NameInvalidChars
        );
    }

    #[test]
    fn letters_only_mode() {
        let validator = NameValidator::new().letters_only();
        assert_eq!(
            validator.validate("O'Connor").unwrap_err().code(),
            ErrorCode::NameInvalidChars
        );
    }
}

//! Generic text validator driven by a composable rule list.

use crate::core::{
    ErrorCode, ValidationComplexity, ValidationError, ValidationResult, Validator,
    ValidatorMetadata,
};
use crate::rules::{CasePolicy, CharClass, RuleSet};

// ============================================================================
// TEXT VALIDATOR
// ============================================================================

/// Validates free-form text against an ordered rule list.
///
/// The input is trimmed before the rules run, and the trimmed string is
/// returned as the normalized value.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::rules::CharClass;
/// use fieldcheck::validators::basic::TextValidator;
///
/// let validator = TextValidator::new()
///     .length(2, 10)
///     .char_class(CharClass::Alphanumeric);
///
/// assert_eq!(validator.validate("  ab12 ").unwrap(), "ab12");
/// assert!(validator.validate("a").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextValidator {
    rules: RuleSet,
}

impl TextValidator {
    /// Creates a text validator with no rules beyond the required check.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the trimmed length to fall within `min..=max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.rules = self.rules.length(min, max);
        self
    }

    /// Restricts the input to a character class.
    #[must_use = "builder methods must be chained or built"]
    pub fn char_class(mut self, class: CharClass) -> Self {
        self.rules = self.rules.char_class(class);
        self
    }

    /// Enforces a letter-case policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn case(mut self, policy: CasePolicy) -> Self {
        self.rules = self.rules.case(policy);
        self
    }

    /// Rejects the listed values (case-insensitively).
    #[must_use = "builder methods must be chained or built"]
    pub fn disallow<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules = self.rules.disallow(values);
        self
    }

    /// Requires the input to match a precompiled pattern.
    #[must_use = "builder methods must be chained or built"]
    pub fn matches(mut self, pattern: regex::Regex) -> Self {
        self.rules = self.rules.matches(pattern);
        self
    }
}

impl Validator for TextValidator {
    type Input = str;
    type Output = String;

    fn validate(&self, input: &str) -> ValidationResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::TextRequired,
                "Text is required",
            ));
        }
        self.rules.check(trimmed)?;
        Ok(trimmed.to_string())
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Text")
            .with_description(format!("Text with {} rules", self.rules.len()))
            .with_complexity(ValidationComplexity::Linear)
            .with_tag("basic")
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
    fn empty_and_whitespace_fail_required() {
        let validator = TextValidator::new();
        assert_eq!(
            validator.validate("").unwrap_err().code(),
            ErrorCode::TextRequired
        );
        assert_eq!(
            validator.validate("   ").unwrap_err().code(),
            ErrorCode::TextRequired
        );
    }

    #[test]
    fn trims_before_rules_run() {
        let validator = TextValidator::new().length(3, 3);
        assert_eq!(validator.validate(" abc ").unwrap(), "abc");
    }

    #[test]
    fn first_failing_rule_wins() {
        let validator = TextValidator::new()
            .length(1, 2)
            .char_class(CharClass::Digits);
        // Length rule was registered first, so it reports first.
        assert_eq!(
            validator.validate("abc").unwrap_err().code(),
            ErrorCode::TextTooLong
        );
    }
}

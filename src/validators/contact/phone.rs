//! Phone number validator.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::{
    ErrorCode, ValidationComplexity, ValidationError, ValidationResult, Validator,
    ValidatorMetadata,
};

/// Permitted characters for the subscriber part: digits, grouping
/// punctuation, and an optional leading `+`.
static SUBSCRIBER_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ().\-]*$").expect("valid regex"));

// ============================================================================
// PHONE VALIDATOR
// ============================================================================

/// Validates phone numbers.
///
/// The number may carry an extension introduced by `x` or `ext`
/// (`555-1234 x42`); the extension is validated separately and does not
/// count toward the digit bounds.
///
/// Check order: required, format, country code required, country code
/// allowed, digit minimum, digit maximum, extension shape. The normalized
/// value is the trimmed input.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::contact::PhoneValidator;
///
/// let validator = PhoneValidator::new();
/// assert!(validator.validate("(555) 123-4567").is_ok());
/// assert!(validator.validate("call me").is_err());
///
/// let intl = PhoneValidator::new()
///     .require_country_code()
///     .allowed_country_codes(["1", "44"]);
/// assert!(intl.validate("+44 20 7946 0958").is_ok());
/// assert!(intl.validate("+49 30 123456").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PhoneValidator {
    require_country_code: bool,
    allowed_country_codes: Vec<String>,
    min_digits: usize,
    max_digits: usize,
}

impl PhoneValidator {
    /// Creates a phone validator with default settings.
    ///
    /// Defaults: country code optional, any country, 7 to 15 digits
    /// (E.164 upper bound).
    #[must_use]
    pub fn new() -> Self {
        Self {
            require_country_code: false,
            allowed_country_codes: Vec::new(),
            min_digits: 7,
            max_digits: 15,
        }
    }

    /// Requires a leading `+` country code.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_country_code(mut self) -> Self {
        self.require_country_code = true;
        self
    }

    /// Restricts `+`-prefixed numbers to the listed country-code prefixes.
    #[must_use = "builder methods must be chained or built"]
    pub fn allowed_country_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_country_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the digit-count bounds for the subscriber part.
    #[must_use = "builder methods must be chained or built"]
    pub fn digit_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_digits = min;
        self.max_digits = max;
        self
    }

    /// Splits off an `x`/`ext` extension, returning (subscriber, extension).
    fn split_extension(input: &str) -> (&str, Option<&str>) {
        let lower = input.to_ascii_lowercase();
        let marker = lower.find("ext").or_else(|| lower.find('x'));
        match marker {
            Some(at) => {
                let rest = &input[at..];
                let ext = rest
                    .trim_start_matches(|c: char| c.is_ascii_alphabetic() || c == '.')
                    .trim();
                (input[..at].trim_end(), Some(ext))
            }
            None => (input, None),
        }
    }
}

impl Default for PhoneValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PhoneValidator {
    type Input = str;
    type Output = String;

    fn validate(&self, input: &str) -> ValidationResult<String> {
        let phone = input.trim();
        if phone.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::PhoneRequired,
                "Phone number is required",
            ));
        }

        let (subscriber, extension) = Self::split_extension(phone);

        if !SUBSCRIBER_SHAPE.is_match(subscriber) {
            return Err(ValidationError::new(
                ErrorCode::PhoneInvalidFormat,
                "Phone number contains invalid characters",
            ));
        }

        if self.require_country_code && !subscriber.starts_with('+') {
            return Err(ValidationError::new(
                ErrorCode::PhoneCountryCodeRequired,
                "Phone number must start with a + country code",
            ));
        }

        let digits: String = subscriber.chars().filter(char::is_ascii_digit).collect();

        if subscriber.starts_with('+') && !self.allowed_country_codes.is_empty() {
            let allowed = self
                .allowed_country_codes
                .iter()
                .any(|code| digits.starts_with(code.as_str()));
            if !allowed {
                return Err(ValidationError::new(
                    ErrorCode::PhoneCountryCodeNotAllowed,
                    "Phone country code is not allowed",
                ));
            }
        }

        if digits.len() < self.min_digits {
            return Err(ValidationError::new(
                ErrorCode::PhoneTooShort,
                format!("Phone number must have at least {} digits", self.min_digits),
            )
            .with_param("min", self.min_digits.to_string())
            .with_param("actual", digits.len().to_string()));
        }
        if digits.len() > self.max_digits {
            return Err(ValidationError::new(
                ErrorCode::PhoneTooLong,
                format!("Phone number must have at most {} digits", self.max_digits),
            )
            .with_param("max", self.max_digits.to_string())
            .with_param("actual", digits.len().to_string()));
        }

        if let Some(ext) = extension {
            if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_digit()) {
                return Err(ValidationError::new(
                    ErrorCode::PhoneExtensionInvalid,
                    "Phone extension must be numeric",
                ));
            }
        }

        Ok(phone.to_string())
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Phone")
            .with_description("Phone number shape, country code and digit bounds")
            .with_complexity(ValidationComplexity::Linear)
            .with_tag("contact")
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Username validator.

use crate::core::{
    ErrorCode, ValidationError, ValidationResult, Validator, ValidatorMetadata,
};

// ============================================================================
// USERNAME VALIDATOR
// ============================================================================

/// Validates usernames: length bounds, character rules and a reserved
/// name blocklist.
///
/// Allowed characters are ASCII letters, digits and the extra symbols
/// configured via [`allow_symbols`](Self::allow_symbols) (underscore by
/// default). The normalized output is lower-cased unless the validator
/// is case sensitive.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::authentication::UsernameValidator;
///
/// let validator = UsernameValidator::new().reserve(["admin", "root"]);
/// assert_eq!(validator.validate("Alice_92").unwrap(), "alice_92");
/// assert!(validator.validate("Admin").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UsernameValidator {
    min_length: usize,
    max_length: usize,
    allow_spaces: bool,
    extra_symbols: String,
    reserved: Vec<String>,
    case_sensitive: bool,
}

impl UsernameValidator {
    /// Creates a username validator with default settings.
    ///
    /// Defaults: 3 to 30 characters, no spaces, underscore allowed,
    /// empty blocklist, case insensitive.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_length: 3,
            max_length: 30,
            allow_spaces: false,
            extra_symbols: "_".to_string(),
            reserved: Vec::new(),
            case_sensitive: false,
        }
    }

    /// Sets the minimum length in characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = length;
        self
    }

    /// Sets the maximum length in characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }

    /// Permits spaces inside the username.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_spaces(mut self) -> Self {
        self.allow_spaces = true;
        self
    }

    /// Sets the non-alphanumeric characters that are allowed.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_symbols(mut self, symbols: impl Into<String>) -> Self {
        self.extra_symbols = symbols.into();
        self
    }

    /// Adds reserved names that are rejected outright.
    #[must_use = "builder methods must be chained or built"]
    pub fn reserve<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(names.into_iter().map(Into::into));
        self
    }

    /// Compares reserved names exactly and keeps the input casing in
    /// the output.
    #[must_use = "builder methods must be chained or built"]
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }
}

impl Default for UsernameValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for UsernameValidator {
    type Input = str;
    type Output = String;

    fn validate(&self, input: &str) -> ValidationResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::UsernameRequired,
                "Username is required",
            ));
        }

        let length = trimmed.chars().count();
        if length < self.min_length {
            return Err(ValidationError::new(
                ErrorCode::UsernameTooShort,
                format!("Username must be at least {} characters", self.min_length),
            )
            .with_param("min_length", self.min_length.to_string()));
        }
        if length > self.max_length {
            return Err(ValidationError::new(
                ErrorCode::UsernameTooLong,
                format!("Username must be at most {} characters", self.max_length),
            )
            .with_param("max_length", self.max_length.to_string()));
        }

        if !self.allow_spaces && trimmed.contains(char::is_whitespace) {
            return Err(ValidationError::new(
                ErrorCode::UsernameContainsSpaces,
                "Username must not contain spaces",
            ));
        }

        let valid_char = |c: char| {
            c.is_ascii_alphanumeric()
                || self.extra_symbols.contains(c)
                || (self.allow_spaces && c == ' ')
        };
        if let Some(bad) = trimmed.chars().find(|c| !valid_char(*c)) {
            return Err(ValidationError::new(
                ErrorCode::UsernameInvalidChars,
                format!("Username contains invalid character '{bad}'"),
            )
            .with_param("char", bad.to_string()));
        }

        let reserved = if self.case_sensitive {
            self.reserved.iter().any(|r| r == trimmed)
        } else {
            self.reserved.iter().any(|r| r.eq_ignore_ascii_case(trimmed))
        };
        if reserved {
            return Err(ValidationError::new(
                ErrorCode::UsernameReserved,
                "Username is reserved",
            ));
        }

        if self.case_sensitive {
            Ok(trimmed.to_string())
        } else {
            Ok(trimmed.to_lowercase())
        }
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Username")
            .with_description("Username length, character and reserved-name rules")
            .with_tag("authentication")
    }
}

// ============================================================================
// TESTS
// ============================================================================

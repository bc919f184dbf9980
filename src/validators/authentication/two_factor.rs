//! Two-factor verification code validator.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{
    ErrorCode, ValidationError, ValidationResult, Validator, ValidatorMetadata,
};

// ============================================================================
// TWO-FACTOR INPUT
// ============================================================================

/// Delivery channel of a verification code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwoFactorMethod {
    Totp,
    Sms,
    Email,
}

impl TwoFactorMethod {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Totp => "totp",
            Self::Sms => "sms",
            Self::Email => "email",
        }
    }
}

/// Code to check, with the channel it arrived on and when it was
/// issued (for the freshness window).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFactorInput {
    pub code: String,
    pub method: TwoFactorMethod,
    pub issued_at: Option<DateTime<Utc>>,
}

impl TwoFactorInput {
    #[must_use]
    pub fn new(code: impl Into<String>, method: TwoFactorMethod) -> Self {
        Self {
            code: code.into(),
            method,
            issued_at: None,
        }
    }

    #[must_use]
    pub fn issued_at(mut self, at: DateTime<Utc>) -> Self {
        self.issued_at = Some(at);
        self
    }
}

// ============================================================================
// TWO-FACTOR VALIDATOR
// ============================================================================

/// Validates two-factor verification codes.
///
/// Codes must be exactly `code_length` digits. When the input carries
/// an issue timestamp, codes older than the freshness window are
/// rejected. Only the structure is checked; this never verifies a code
/// against a shared secret.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::authentication::{
///     TwoFactorInput, TwoFactorMethod, TwoFactorValidator,
/// };
///
/// let validator = TwoFactorValidator::new();
/// let input = TwoFactorInput::new("492816", TwoFactorMethod::Totp);
/// assert_eq!(validator.validate(&input).unwrap(), "492816");
/// ```
#[derive(Debug, Clone)]
pub struct TwoFactorValidator {
    code_length: usize,
    allowed_methods: Vec<TwoFactorMethod>,
    freshness: Duration,
}

impl TwoFactorValidator {
    /// Creates a two-factor validator with default settings.
    ///
    /// Defaults: 6-digit codes, all delivery methods, 5 minute
    /// freshness window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            code_length: 6,
            allowed_methods: vec![
                TwoFactorMethod::Totp,
                TwoFactorMethod::Sms,
                TwoFactorMethod::Email,
            ],
            freshness: Duration::minutes(5),
        }
    }

    /// Sets the exact code length.
    #[must_use = "builder methods must be chained or built"]
    pub fn code_length(mut self, length: usize) -> Self {
        self.code_length = length;
        self
    }

    /// Restricts the accepted delivery methods.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = TwoFactorMethod>,
    {
        self.allowed_methods = methods.into_iter().collect();
        self
    }

    /// Sets the freshness window applied when the input has an issue
    /// timestamp.
    #[must_use = "builder methods must be chained or built"]
    pub fn freshness(mut self, window: Duration) -> Self {
        self.freshness = window;
        self
    }

    fn validate_at(
        &self,
        input: &TwoFactorInput,
        now: DateTime<Utc>,
    ) -> ValidationResult<String> {
        let code = input.code.trim();
        if code.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::TwoFactorRequired,
                "Verification code is required",
            ));
        }

        if code.chars().count() != self.code_length {
            return Err(ValidationError::new(
                ErrorCode::TwoFactorInvalidLength,
                format!("Verification code must be {} digits", self.code_length),
            )
            .with_param("length", self.code_length.to_string()));
        }

        if !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new(
                ErrorCode::TwoFactorNotNumeric,
                "Verification code must contain only digits",
            ));
        }

        if !self.allowed_methods.contains(&input.method) {
            return Err(ValidationError::new(
                ErrorCode::TwoFactorTypeNotAllowed,
                format!("Delivery method '{}' is not allowed", input.method.as_str()),
            )
            .with_param("method", input.method.as_str()));
        }

        if let Some(issued_at) = input.issued_at {
            if now - issued_at > self.freshness {
                return Err(ValidationError::new(
                    ErrorCode::TwoFactorExpired,
                    "Verification code has expired",
                ));
            }
        }

        Ok(code.to_string())
    }
}

impl Default for TwoFactorValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for TwoFactorValidator {
    type Input = TwoFactorInput;
    type Output = String;

    fn validate(&self, input: &TwoFactorInput) -> ValidationResult<String> {
        self.validate_at(input, Utc::now())
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("TwoFactor")
            .with_description("Verification code structure and freshness rules")
            .with_tag("authentication")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn six_digit_code_passes() {
        let validator = TwoFactorValidator::new();
        let input = TwoFactorInput::new("492816", TwoFactorMethod::Totp);
        assert_eq!(validator.validate(&input).unwrap(), "492816");
    }

    #[test]
    fn exact_length_enforced() {
        let validator = TwoFactorValidator::new();
        for code in ["12345", "1234567"] {
            let input = TwoFactorInput::new(code, TwoFactorMethod::Totp);
            assert_eq!(
                validator.validate(&input).unwrap_err().code(),
                ErrorCode::TwoFactorInvalidLength
            );
        }
        let eight = TwoFactorValidator::new().code_length(8);
        assert!(eight
            .validate(&TwoFactorInput::new("12345678", TwoFactorMethod::Totp))
            .is_ok());
    }

    #[test]
    fn digits_only() {
        let validator = TwoFactorValidator::new();
        let input = TwoFactorInput::new("49a816", TwoFactorMethod::Totp);
        assert_eq!(
            validator.validate(&input).unwrap_err().code(),
            ErrorCode::TwoFactorNotNumeric
        );
    }

    #[test]
    fn method_allowlist() {
        let validator = TwoFactorValidator::new().allow_methods([TwoFactorMethod::Totp]);
        let input = TwoFactorInput::new("492816", TwoFactorMethod::Sms);
        assert_eq!(
            validator.validate(&input).unwrap_err().code(),
            ErrorCode::TwoFactorTypeNotAllowed
        );
    }

    #[test]
    fn freshness_window() {
        let validator = TwoFactorValidator::new();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let stale = TwoFactorInput::new("492816", TwoFactorMethod::Sms)
            .issued_at(Utc.with_ymd_and_hms(2024, 6, 1, 11, 50, 0).unwrap());
        assert_eq!(
            validator.validate_at(&stale, now).unwrap_err().code(),
            ErrorCode::TwoFactorExpired
        );
        let fresh = TwoFactorInput::new("492816", TwoFactorMethod::Sms)
            .issued_at(Utc.with_ymd_and_hms(2024, 6, 1, 11, 58, 0).unwrap());
        assert!(validator.validate_at(&fresh, now).is_ok());
    }

    #[test]
    fn empty_is_required() {
        let validator = TwoFactorValidator::new();
        let input = TwoFactorInput::new("  ", TwoFactorMethod::Email);
        assert_eq!(
            validator.validate(&input).unwrap_err().code(),
            ErrorCode::TwoFactorRequired
        );
    }
}

//! Passport number validator.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{
    ErrorCode, ValidationComplexity, ValidationError, ValidationResult, Validator,
    ValidatorMetadata,
};

/// Per-authority passport number patterns, keyed by ISO country code.
/// Applied to the upper-cased, space-stripped number.
static AUTHORITY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("US", r"^\d{9}$"),
        ("GB", r"^\d{9}$"),
        ("CA", r"^[A-Z]{2}\d{6}$"),
        ("AU", r"^[A-Z]\d{7}$"),
        ("DE", r"^[CFGHJKLMNPRTVWXYZ0-9]{9}$"),
        ("FR", r"^\d{2}[A-Z]{2}\d{5}$"),
        ("IN", r"^[A-Z]\d{7}$"),
        ("CN", r"^[EG]\d{8}$"),
    ]
    .iter()
    .map(|(code, pattern)| (*code, Regex::new(pattern).expect("valid regex")))
    .collect()
});

/// Fallback shape for authorities not in the table.
static GENERIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{6,9}$").expect("valid regex"));

// ============================================================================
// PASSPORT INPUT / OUTPUT
// ============================================================================

/// Passport details to validate. Only the number and authority are
/// mandatory; dates enable the expiry and document-age checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Passport {
    pub number: String,
    /// ISO country code of the issuing authority.
    pub authority: String,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
}

/// A validated passport: normalized number plus the authority that
/// supplied the matching pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidPassport {
    /// Upper-cased, space-stripped passport number.
    pub number: String,
    /// Upper-cased issuing authority code.
    pub authority: String,
    /// Whether the number matched an authority-specific pattern rather
    /// than the generic fallback.
    pub authority_known: bool,
}

/// What to do with authorities missing from the pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownAuthorityPolicy {
    /// Fall back to the generic 6-9 alphanumeric pattern. The default.
    #[default]
    GenericPattern,
    /// Reject the passport outright.
    Reject,
}

// ============================================================================
// PASSPORT VALIDATOR
// ============================================================================

/// Validates passport numbers against per-authority patterns.
///
/// Check order: number required, authority lookup (per the unknown-
/// authority policy), number format, expiry required/past/near, document
/// age. The normalized number is upper-cased with spaces removed.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::personal::{Passport, PassportValidator};
///
/// let validator = PassportValidator::new();
/// let input = Passport {
///     number: "ab 123456".to_string(),
///     authority: "ca".to_string(),
///     ..Default::default()
/// };
/// let valid = validator.validate(&input).unwrap();
/// assert_eq!(valid.number, "AB123456");
/// assert_eq!(valid.authority, "CA");
/// ```
#[derive(Debug, Clone)]
pub struct PassportValidator {
    unknown_policy: UnknownAuthorityPolicy,
    require_expiry: bool,
    expiry_warning_days: Option<u64>,
    max_document_age_years: Option<u32>,
}

impl PassportValidator {
    /// Creates a passport validator with default settings.
    ///
    /// Defaults: unknown authorities fall back to the generic pattern,
    /// expiry optional, no warning window, no document-age limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            unknown_policy: UnknownAuthorityPolicy::default(),
            require_expiry: false,
            expiry_warning_days: None,
            max_document_age_years: None,
        }
    }

    /// Rejects passports from authorities missing in the pattern table.
    #[must_use = "builder methods must be chained or built"]
    pub fn reject_unknown_authorities(mut self) -> Self {
        self.unknown_policy = UnknownAuthorityPolicy::Reject;
        self
    }

    /// Requires an expiry date to be supplied.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_expiry(mut self) -> Self {
        self.require_expiry = true;
        self
    }

    /// Reports `PASSPORT_EXPIRES_SOON` when the expiry falls within the
    /// given number of days.
    #[must_use = "builder methods must be chained or built"]
    pub fn expiry_warning_days(mut self, days: u64) -> Self {
        self.expiry_warning_days = Some(days);
        self
    }

    /// Caps the document age derived from the issue date.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_document_age_years(mut self, years: u32) -> Self {
        self.max_document_age_years = Some(years);
        self
    }

    fn validate_at(&self, input: &Passport, today: NaiveDate) -> ValidationResult<ValidPassport> {
        let number: String = input
            .number
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if number.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::PassportRequired,
                "Passport number is required",
            ));
        }

        let authority = input.authority.trim().to_ascii_uppercase();
        let pattern = AUTHORITY_PATTERNS
            .iter()
            .find(|(code, _)| *code == authority)
            .map(|(_, pattern)| pattern);

        let (pattern, authority_known) = match pattern {
            Some(pattern) => (pattern, true),
            None => match self.unknown_policy {
                UnknownAuthorityPolicy::GenericPattern => (&*GENERIC_PATTERN, false),
                UnknownAuthorityPolicy::Reject => {
                    return Err(ValidationError::new(
                        ErrorCode::PassportUnknownAuthority,
                        format!("Unknown passport authority '{authority}'"),
                    )
                    .with_param("authority", authority));
                }
            },
        };

        if !pattern.is_match(&number) {
            return Err(ValidationError::new(
                ErrorCode::PassportInvalidFormat,
                format!("Passport number format is invalid for authority '{authority}'"),
            )
            .with_param("authority", authority));
        }

        if self.require_expiry && input.expiry_date.is_none() {
            return Err(ValidationError::new(
                ErrorCode::PassportExpiryRequired,
                "Passport expiry date is required",
            ));
        }
        if let Some(expiry) = input.expiry_date {
            if expiry < today {
                return Err(ValidationError::new(
                    ErrorCode::PassportExpired,
                    "Passport has expired",
                ));
            }
            if let Some(days) = self.expiry_warning_days {
                let horizon = today.checked_add_days(Days::new(days)).unwrap_or(today);
                if expiry <= horizon {
                    return Err(ValidationError::new(
                        ErrorCode::PassportExpiresSoon,
                        format!("Passport expires within {days} days"),
                    )
                    .with_param("days", days.to_string()));
                }
            }
        }

        if let (Some(max_years), Some(issued)) =
            (self.max_document_age_years, input.issue_date)
        {
            let age_days = (today - issued).num_days();
            if age_days > i64::from(max_years) * 365 {
                return Err(ValidationError::new(
                    ErrorCode::PassportTooOld,
                    format!("Passport is older than {max_years} years"),
                )
                .with_param("max_years", max_years.to_string()));
            }
        }

        Ok(ValidPassport {
            number,
            authority,
            authority_known,
        })
    }
}

impl Default for PassportValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PassportValidator {
    type Input = Passport;
    type Output = ValidPassport;

    fn validate(&self, input: &Passport) -> ValidationResult<ValidPassport> {
        self.validate_at(input, Utc::now().date_naive())
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Passport")
            .with_description("Per-authority passport number patterns")
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn passport(number: &str, authority: &str) -> Passport {
        Passport {
            number: number.to_string(),
            authority: authority.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn known_authority_patterns() {
        let validator = PassportValidator::new();
        assert!(validator.validate(&passport("123456789", "US")).is_ok());
        assert!(validator.validate(&passport("AB123456", "CA")).is_ok());
        assert!(validator.validate(&passport("N1234567", "AU")).is_ok());
        assert!(validator.validate(&passport("12AB12345", "FR")).is_ok());
        assert!(validator.validate(&passport("E12345678", "CN")).is_ok());
    }

    #[test]
    fn format_mismatch_for_authority() {
        let validator = PassportValidator::new();
        // A Canadian-shaped number is not a valid US passport.
        assert_eq!(
            validator.validate(&passport("AB123456", "US")).unwrap_err().code(),
            ErrorCode::PassportInvalidFormat
        );
    }

    #[test]
    fn empty_number_is_required() {
        let validator = PassportValidator::new();
        assert_eq!(
            validator.validate(&passport("  ", "US")).unwrap_err().code(),
            ErrorCode::PassportRequired
        );
    }

    #[test]
    fn unknown_authority_policies() {
        let generic = PassportValidator::new();
        let result = generic.validate(&passport("X1234567", "ZZ")).unwrap();
        assert!(!result.authority_known);

        let strict = PassportValidator::new().reject_unknown_authorities();
        assert_eq!(
            strict.validate(&passport("X1234567", "ZZ")).unwrap_err().code(),
            ErrorCode::PassportUnknownAuthority
        );
    }

    #[test]
    fn normalizes_case_and_spaces() {
        let validator = PassportValidator::new();
        let result = validator.validate(&passport("ab 123456", "ca")).unwrap();
        assert_eq!(result.number, "AB123456");
        assert_eq!(result.authority, "CA");
    }

    #[test]
    fn expiry_checks() {
        let today = date(2024, 6, 1);
        let mut input = passport("123456789", "US");

        let required = PassportValidator::new().require_expiry();
        assert_eq!(
            required.validate_at(&input, today).unwrap_err().code(),
            ErrorCode::PassportExpiryRequired
        );

        input.expiry_date = Some(date(2024, 1, 1));
        let validator = PassportValidator::new();
        assert_eq!(
            validator.validate_at(&input, today).unwrap_err().code(),
            ErrorCode::PassportExpired
        );

        input.expiry_date = Some(date(2024, 6, 20));
        let warning = PassportValidator::new().expiry_warning_days(30);
        assert_eq!(
            warning.validate_at(&input, today).unwrap_err().code(),
            ErrorCode::PassportExpiresSoon
        );

        input.expiry_date = Some(date(2030, 1, 1));
        assert!(warning.validate_at(&input, today).is_ok());
    }

    #[test]
    fn document_age_cap() {
        let today = date(2024, 6, 1);
        let mut input = passport("123456789", "US");
        input.issue_date = Some(date(2010, 1, 1));
        let validator = PassportValidator::new().max_document_age_years(10);
        assert_eq!(
            validator.validate_at(&input, today).unwrap_err().code(),
            ErrorCode::PassportTooOld
        );
    }
}

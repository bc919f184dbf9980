//! Validation error types and the stable error-code contract.
//!
//! Every rule violation is reported as a [`ValidationError`] carrying an
//! [`ErrorCode`]. Codes are symbolic, upper-snake-case identifiers that
//! callers branch on programmatically; they are part of the public
//! interface and must not be renamed across versions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ERROR CODE
// ============================================================================

/// Stable symbolic error codes, grouped by validation domain.
///
/// The wire form (via [`ErrorCode::as_str`] and serde) is the
/// UPPER_SNAKE_CASE name, e.g. `EMAIL_REQUIRED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // Generic text rules
    TextRequired,
    TextTooShort,
    TextTooLong,
    TextInvalidChars,
    TextCaseMismatch,
    TextPatternMismatch,
    TextDisallowed,

    // Numeric rules
    NumberRequired,
    NumberNotInteger,
    NumberTooSmall,
    NumberTooLarge,

    // Email
    EmailRequired,
    EmailTooLong,
    EmailInvalidFormat,
    EmailDomainNotAllowed,
    EmailDomainBlocked,

    // Phone
    PhoneRequired,
    PhoneInvalidFormat,
    PhoneCountryCodeRequired,
    PhoneCountryCodeNotAllowed,
    PhoneTooShort,
    PhoneTooLong,
    PhoneExtensionInvalid,

    // Address
    AddressRequired,
    AddressStreetRequired,
    AddressCityRequired,
    AddressStateRequired,
    AddressPostalCodeRequired,
    AddressCountryRequired,
    AddressFieldTooLong,
    AddressPostalCodeInvalid,

    // URL
    UrlRequired,
    UrlTooLong,
    UrlInvalidFormat,
    UrlSchemeNotAllowed,
    UrlDomainNotAllowed,
    UrlIpNotAllowed,
    UrlTldNotAllowed,
    UrlPortNotAllowed,
    UrlPathRequired,
    UrlPathInvalid,
    UrlQueryParamMissing,
    UrlQueryParamNotAllowed,
    UrlFragmentNotAllowed,
    UrlCredentialsNotAllowed,

    // Name
    NameRequired,
    NameTooShort,
    NameTooLong,
    NameInvalidChars,

    // Age
    AgeRequired,
    AgeNotInteger,
    AgeBelowMinimum,
    AgeAboveMaximum,
    AgeOutsideCategory,
    AgeFutureBirthDate,

    // Date of birth
    DobRequired,
    DobInvalidFormat,
    DobFutureDate,
    DobBelowMinimumAge,
    DobAboveMaximumAge,
    DobOutsideRanges,

    // Gender
    GenderRequired,
    GenderNotAllowed,
    GenderTooLong,

    // Passport
    PassportRequired,
    PassportInvalidFormat,
    PassportUnknownAuthority,
    PassportExpiryRequired,
    PassportExpired,
    PassportExpiresSoon,
    PassportTooOld,

    // Username
    UsernameRequired,
    UsernameTooShort,
    UsernameTooLong,
    UsernameContainsSpaces,
    UsernameInvalidChars,
    UsernameReserved,

    // Password
    PasswordRequired,
    PasswordTooShort,
    PasswordTooLong,
    PasswordMissingUppercase,
    PasswordMissingLowercase,
    PasswordMissingDigit,
    PasswordMissingSpecial,
    PasswordTooCommon,
    PasswordContainsUsername,

    // API key
    ApiKeyRequired,
    ApiKeyTooShort,
    ApiKeyTooLong,
    ApiKeyInvalidChars,
    ApiKeyPrefixInvalid,

    // Token
    TokenRequired,
    TokenTooShort,
    TokenTooLong,
    TokenInvalidFormat,
    TokenPrefixNotAllowed,
    TokenExpired,

    // Two-factor code
    TwoFactorRequired,
    TwoFactorInvalidLength,
    TwoFactorNotNumeric,
    TwoFactorTypeNotAllowed,
    TwoFactorExpired,

    // Credit card
    CardNumberRequired,
    CardInvalidFormat,
    CardTypeNotAllowed,
    CardInvalidChecksum,
    CardExpiryRequired,
    CardExpiryInvalidFormat,
    CardExpired,
    CardCvvRequired,
    CardCvvInvalid,
    CardHolderNameRequired,

    // Bank account
    BankAccountNumberRequired,
    BankAccountNumberInvalid,
    BankRoutingNumberRequired,
    BankRoutingNumberInvalidFormat,
    BankRoutingNumberInvalidChecksum,
    BankAccountNameRequired,
    BankAccountTypeNotAllowed,
}

impl ErrorCode {
    /// Returns the stable upper-snake-case identifier for this code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextRequired => "TEXT_REQUIRED",
            Self::TextTooShort => "TEXT_TOO_SHORT",
            Self::TextTooLong => "TEXT_TOO_LONG",
            Self::TextInvalidChars => "TEXT_INVALID_CHARS",
            Self::TextCaseMismatch => "TEXT_CASE_MISMATCH",
            Self::TextPatternMismatch => "TEXT_PATTERN_MISMATCH",
            Self::TextDisallowed => "TEXT_DISALLOWED",

            Self::NumberRequired => "NUMBER_REQUIRED",
            Self::NumberNotInteger => "NUMBER_NOT_INTEGER",
            Self::NumberTooSmall => "NUMBER_TOO_SMALL",
            Self::NumberTooLarge => "NUMBER_TOO_LARGE",

            Self::EmailRequired => "EMAIL_REQUIRED",
            Self::EmailTooLong => "EMAIL_TOO_LONG",
            Self::EmailInvalidFormat => "EMAIL_INVALID_FORMAT",
            Self::EmailDomainNotAllowed => "EMAIL_DOMAIN_NOT_ALLOWED",
            Self::EmailDomainBlocked => "EMAIL_DOMAIN_BLOCKED",

            Self::PhoneRequired => "PHONE_REQUIRED",
            Self::PhoneInvalidFormat => "PHONE_INVALID_FORMAT",
            Self::PhoneCountryCodeRequired => "PHONE_COUNTRY_CODE_REQUIRED",
            Self::PhoneCountryCodeNotAllowed => "PHONE_COUNTRY_CODE_NOT_ALLOWED",
            Self::PhoneTooShort => "PHONE_TOO_SHORT",
            Self::PhoneTooLong => "PHONE_TOO_LONG",
            Self::PhoneExtensionInvalid => "PHONE_EXTENSION_INVALID",

            Self::AddressRequired => "ADDRESS_REQUIRED",
            Self::AddressStreetRequired => "ADDRESS_STREET_REQUIRED",
            Self::AddressCityRequired => "ADDRESS_CITY_REQUIRED",
            Self::AddressStateRequired => "ADDRESS_STATE_REQUIRED",
            Self::AddressPostalCodeRequired => "ADDRESS_POSTAL_CODE_REQUIRED",
            Self::AddressCountryRequired => "ADDRESS_COUNTRY_REQUIRED",
            Self::AddressFieldTooLong => "ADDRESS_FIELD_TOO_LONG",
            Self::AddressPostalCodeInvalid => "ADDRESS_POSTAL_CODE_INVALID",

            Self::UrlRequired => "URL_REQUIRED",
            Self::UrlTooLong => "URL_TOO_LONG",
            Self::UrlInvalidFormat => "URL_INVALID_FORMAT",
            Self::UrlSchemeNotAllowed => "URL_SCHEME_NOT_ALLOWED",
            Self::UrlDomainNotAllowed => "URL_DOMAIN_NOT_ALLOWED",
            Self::UrlIpNotAllowed => "URL_IP_NOT_ALLOWED",
            Self::UrlTldNotAllowed => "URL_TLD_NOT_ALLOWED",
            Self::UrlPortNotAllowed => "URL_PORT_NOT_ALLOWED",
            Self::UrlPathRequired => "URL_PATH_REQUIRED",
            Self::UrlPathInvalid => "URL_PATH_INVALID",
            Self::UrlQueryParamMissing => "URL_QUERY_PARAM_MISSING",
            Self::UrlQueryParamNotAllowed => "URL_QUERY_PARAM_NOT_ALLOWED",
            Self::UrlFragmentNotAllowed => "URL_FRAGMENT_NOT_ALLOWED",
            Self::UrlCredentialsNotAllowed => "URL_CREDENTIALS_NOT_ALLOWED",

            Self::NameRequired => "NAME_REQUIRED",
            Self::NameTooShort => "NAME_TOO_SHORT",
            Self::NameTooLong => "NAME_TOO_LONG",
            Self::NameInvalidChars => "NAME_INVALID_CHARS",

            Self::AgeRequired => "AGE_REQUIRED",
            Self::AgeNotInteger => "AGE_NOT_INTEGER",
            Self::AgeBelowMinimum => "AGE_BELOW_MINIMUM",
            Self::AgeAboveMaximum => "AGE_ABOVE_MAXIMUM",
            Self::AgeOutsideCategory => "AGE_OUTSIDE_CATEGORY",
            Self::AgeFutureBirthDate => "AGE_FUTURE_BIRTH_DATE",

            Self::DobRequired => "DOB_REQUIRED",
            Self::DobInvalidFormat => "DOB_INVALID_FORMAT",
            Self::DobFutureDate => "DOB_FUTURE_DATE",
            Self::DobBelowMinimumAge => "DOB_BELOW_MINIMUM_AGE",
            Self::DobAboveMaximumAge => "DOB_ABOVE_MAXIMUM_AGE",
            Self::DobOutsideRanges => "DOB_OUTSIDE_RANGES",

            Self::GenderRequired => "GENDER_REQUIRED",
            Self::GenderNotAllowed => "GENDER_NOT_ALLOWED",
            Self::GenderTooLong => "GENDER_TOO_LONG",

            Self::PassportRequired => "PASSPORT_REQUIRED",
            Self::PassportInvalidFormat => "PASSPORT_INVALID_FORMAT",
            Self::PassportUnknownAuthority => "PASSPORT_UNKNOWN_AUTHORITY",
            Self::PassportExpiryRequired => "PASSPORT_EXPIRY_REQUIRED",
            Self::PassportExpired => "PASSPORT_EXPIRED",
            Self::PassportExpiresSoon => "PASSPORT_EXPIRES_SOON",
            Self::PassportTooOld => "PASSPORT_TOO_OLD",

            Self::UsernameRequired => "USERNAME_REQUIRED",
            Self::UsernameTooShort => "USERNAME_TOO_SHORT",
            Self::UsernameTooLong => "USERNAME_TOO_LONG",
            Self::UsernameContainsSpaces => "USERNAME_CONTAINS_SPACES",
            Self::UsernameInvalidChars => "USERNAME_INVALID_CHARS",
            Self::UsernameReserved => "USERNAME_RESERVED",

            Self::PasswordRequired => "PASSWORD_REQUIRED",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::PasswordTooLong => "PASSWORD_TOO_LONG",
            Self::PasswordMissingUppercase => "PASSWORD_MISSING_UPPERCASE",
            Self::PasswordMissingLowercase => "PASSWORD_MISSING_LOWERCASE",
            Self::PasswordMissingDigit => "PASSWORD_MISSING_DIGIT",
            Self::PasswordMissingSpecial => "PASSWORD_MISSING_SPECIAL",
            Self::PasswordTooCommon => "PASSWORD_TOO_COMMON",
            Self::PasswordContainsUsername => "PASSWORD_CONTAINS_USERNAME",

            Self::ApiKeyRequired => "API_KEY_REQUIRED",
            Self::ApiKeyTooShort => "API_KEY_TOO_SHORT",
            Self::ApiKeyTooLong => "API_KEY_TOO_LONG",
            Self::ApiKeyInvalidChars => "API_KEY_INVALID_CHARS",
            Self::ApiKeyPrefixInvalid => "API_KEY_PREFIX_INVALID",

            Self::TokenRequired => "TOKEN_REQUIRED",
            Self::TokenTooShort => "TOKEN_TOO_SHORT",
            Self::TokenTooLong => "TOKEN_TOO_LONG",
            Self::TokenInvalidFormat => "TOKEN_INVALID_FORMAT",
            Self::TokenPrefixNotAllowed => "TOKEN_PREFIX_NOT_ALLOWED",
            Self::TokenExpired => "TOKEN_EXPIRED",

            Self::TwoFactorRequired => "TWO_FACTOR_REQUIRED",
            Self::TwoFactorInvalidLength => "TWO_FACTOR_INVALID_LENGTH",
            Self::TwoFactorNotNumeric => "TWO_FACTOR_NOT_NUMERIC",
            Self::TwoFactorTypeNotAllowed => "TWO_FACTOR_TYPE_NOT_ALLOWED",
            Self::TwoFactorExpired => "TWO_FACTOR_EXPIRED",

            Self::CardNumberRequired => "CARD_NUMBER_REQUIRED",
            Self::CardInvalidFormat => "CARD_INVALID_FORMAT",
            Self::CardTypeNotAllowed => "CARD_TYPE_NOT_ALLOWED",
            Self::CardInvalidChecksum => "CARD_INVALID_CHECKSUM",
            Self::CardExpiryRequired => "CARD_EXPIRY_REQUIRED",
            Self::CardExpiryInvalidFormat => "CARD_EXPIRY_INVALID_FORMAT",
            Self::CardExpired => "CARD_EXPIRED",
            Self::CardCvvRequired => "CARD_CVV_REQUIRED",
            Self::CardCvvInvalid => "CARD_CVV_INVALID",
            Self::CardHolderNameRequired => "CARD_HOLDER_NAME_REQUIRED",

            Self::BankAccountNumberRequired => "BANK_ACCOUNT_NUMBER_REQUIRED",
            Self::BankAccountNumberInvalid => "BANK_ACCOUNT_NUMBER_INVALID",
            Self::BankRoutingNumberRequired => "BANK_ROUTING_NUMBER_REQUIRED",
            Self::BankRoutingNumberInvalidFormat => "BANK_ROUTING_NUMBER_INVALID_FORMAT",
            Self::BankRoutingNumberInvalidChecksum => "BANK_ROUTING_NUMBER_INVALID_CHECKSUM",
            Self::BankAccountNameRequired => "BANK_ACCOUNT_NAME_REQUIRED",
            Self::BankAccountTypeNotAllowed => "BANK_ACCOUNT_TYPE_NOT_ALLOWED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single rule violation.
///
/// Each `validate` call reports at most one error: validators apply their
/// rules in a fixed order and stop at the first failure.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ValidationError {
    /// Stable symbolic code for programmatic branching.
    code: ErrorCode,
    /// Human-readable description of the violation.
    message: String,
    /// Optional structured parameters (expected/actual values and the like).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    params: Vec<(String, String)>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// Attaches a structured parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// The stable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured parameters attached to this error.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Result type returned by every validator.
pub type ValidationResult<T> = Result<T, ValidationError>;

// ============================================================================
// TESTS
// ============================================================================

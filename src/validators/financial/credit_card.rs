//! Credit card validator.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Days, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    ErrorCode, ValidationComplexity, ValidationError, ValidationResult, Validator,
    ValidatorMetadata,
};

// ============================================================================
// CARD TYPES
// ============================================================================

/// Card networks detected from the number's issuer pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Diners,
    Jcb,
}

impl CardType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::Diners => "diners",
            Self::Jcb => "jcb",
        }
    }

    /// CVV length for the network. Amex uses 4 digits, everyone else 3.
    #[must_use]
    pub fn cvv_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            _ => 3,
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issuer patterns, checked in order against the digits-only number.
static CARD_PATTERNS: LazyLock<Vec<(CardType, Regex)>> = LazyLock::new(|| {
    [
        (CardType::Visa, r"^4\d{12}(?:\d{3})?$"),
        (
            CardType::Mastercard,
            r"^(5[1-5]\d{14}|2(22[1-9]|2[3-9]\d|[3-6]\d{2}|7[01]\d|720)\d{12})$",
        ),
        (CardType::Amex, r"^3[47]\d{13}$"),
        (CardType::Discover, r"^6(?:011|5\d{2})\d{12}$"),
        (CardType::Diners, r"^3(?:0[0-5]|[68]\d)\d{11}$"),
        (CardType::Jcb, r"^(?:2131|1800|35\d{3})\d{11}$"),
    ]
    .iter()
    .map(|(card_type, pattern)| {
        (*card_type, Regex::new(pattern).expect("valid regex"))
    })
    .collect()
});

/// Detects the card network from a digits-only number.
#[must_use]
pub fn detect_card_type(digits: &str) -> Option<CardType> {
    CARD_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(digits))
        .map(|(card_type, _)| *card_type)
}

/// Luhn checksum over a digits-only string. Doubles every second digit
/// from the right, subtracting 9 from products above 9.
#[must_use]
pub fn luhn_valid(digits: &str) -> bool {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let sum: u32 = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// Masks all but the last four digits with `*`, regrouped in blocks of
/// four: `4111111111111111` becomes `**** **** **** 1111`.
#[must_use]
pub fn mask_card_number(number: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.len() <= 4 {
        return digits;
    }
    let masked: String = "*"
        .repeat(digits.len() - 4)
        .chars()
        .chain(digits.chars().skip(digits.len() - 4))
        .collect();
    masked
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).expect("ascii chunk"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// CARD INPUT / OUTPUT
// ============================================================================

/// Card details to validate. Only the number is mandatory; expiry, CVV
/// and holder name are checked when the validator requires them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    /// `MM/YY` or `MM/YYYY`.
    pub expiry: Option<String>,
    pub cvv: Option<String>,
    pub holder_name: Option<String>,
}

impl CardDetails {
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn expiry(mut self, expiry: impl Into<String>) -> Self {
        self.expiry = Some(expiry.into());
        self
    }

    #[must_use]
    pub fn cvv(mut self, cvv: impl Into<String>) -> Self {
        self.cvv = Some(cvv.into());
        self
    }

    #[must_use]
    pub fn holder_name(mut self, name: impl Into<String>) -> Self {
        self.holder_name = Some(name.into());
        self
    }
}

/// A validated card: the detected network and a display-safe masked
/// number. The raw PAN is never carried past validation, so the value
/// is safe to serialize into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidCard {
    /// All but the last four digits replaced with `*`, regrouped in
    /// blocks of four.
    pub number: String,
    pub card_type: CardType,
}

// ============================================================================
// CREDIT CARD VALIDATOR
// ============================================================================

/// Validates credit card details.
///
/// Check order: number required, network detection and allowlist, Luhn
/// checksum, expiry, CVV, holder name. Spaces and dashes in the number
/// are ignored. A card counts as expired only after the last day of
/// its expiry month has passed.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::financial::{CardDetails, CardType, CreditCardValidator};
///
/// let validator = CreditCardValidator::new();
/// let valid = validator.validate(&CardDetails::new("4111 1111 1111 1111")).unwrap();
/// assert_eq!(valid.card_type, CardType::Visa);
/// assert_eq!(valid.number, "**** **** **** 1111");
/// ```
#[derive(Debug, Clone)]
pub struct CreditCardValidator {
    allowed_types: Vec<CardType>,
    check_luhn: bool,
    require_expiry: bool,
    require_cvv: bool,
    require_holder_name: bool,
}

impl CreditCardValidator {
    /// Creates a card validator with default settings.
    ///
    /// Defaults: all networks accepted, Luhn on, expiry/CVV/holder name
    /// checked only when supplied.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed_types: Vec::new(),
            check_luhn: true,
            require_expiry: false,
            require_cvv: false,
            require_holder_name: false,
        }
    }

    /// Restricts the accepted card networks.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = CardType>,
    {
        self.allowed_types = types.into_iter().collect();
        self
    }

    /// Skips the Luhn checksum.
    #[must_use = "builder methods must be chained or built"]
    pub fn skip_luhn(mut self) -> Self {
        self.check_luhn = false;
        self
    }

    /// Requires an expiry date.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_expiry(mut self) -> Self {
        self.require_expiry = true;
        self
    }

    /// Requires a CVV.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_cvv(mut self) -> Self {
        self.require_cvv = true;
        self
    }

    /// Requires the cardholder name.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_holder_name(mut self) -> Self {
        self.require_holder_name = true;
        self
    }

    fn validate_at(
        &self,
        input: &CardDetails,
        today: NaiveDate,
    ) -> ValidationResult<ValidCard> {
        let digits: String = input
            .number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if digits.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::CardNumberRequired,
                "Card number is required",
            ));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new(
                ErrorCode::CardInvalidFormat,
                "Card number must contain only digits",
            ));
        }

        let card_type = detect_card_type(&digits).ok_or_else(|| {
            ValidationError::new(
                ErrorCode::CardInvalidFormat,
                "Card number does not match a known network",
            )
        })?;
        trace!(card_type = card_type.as_str(), "detected card network");

        if !self.allowed_types.is_empty() && !self.allowed_types.contains(&card_type) {
            return Err(ValidationError::new(
                ErrorCode::CardTypeNotAllowed,
                format!("Card network '{card_type}' is not accepted"),
            )
            .with_param("card_type", card_type.as_str()));
        }

        if self.check_luhn && !luhn_valid(&digits) {
            return Err(ValidationError::new(
                ErrorCode::CardInvalidChecksum,
                "Card number failed the checksum",
            ));
        }

        if self.require_expiry && input.expiry.is_none() {
            return Err(ValidationError::new(
                ErrorCode::CardExpiryRequired,
                "Card expiry is required",
            ));
        }
        if let Some(expiry) = &input.expiry {
            let last_day = parse_expiry(expiry).ok_or_else(|| {
                ValidationError::new(
                    ErrorCode::CardExpiryInvalidFormat,
                    "Card expiry must be MM/YY or MM/YYYY",
                )
            })?;
            if last_day < today {
                return Err(ValidationError::new(
                    ErrorCode::CardExpired,
                    "Card has expired",
                ));
            }
        }

        if self.require_cvv && input.cvv.is_none() {
            return Err(ValidationError::new(
                ErrorCode::CardCvvRequired,
                "CVV is required",
            ));
        }
        if let Some(cvv) = &input.cvv {
            let expected = card_type.cvv_length();
            if cvv.len() != expected || !cvv.chars().all(|c| c.is_ascii_digit()) {
                return Err(ValidationError::new(
                    ErrorCode::CardCvvInvalid,
                    format!("CVV must be {expected} digits for {card_type}"),
                )
                .with_param("expected_length", expected.to_string()));
            }
        }

        if self.require_holder_name
            && input.holder_name.as_deref().is_none_or(|name| name.trim().is_empty())
        {
            return Err(ValidationError::new(
                ErrorCode::CardHolderNameRequired,
                "Cardholder name is required",
            ));
        }

        Ok(ValidCard {
            number: mask_card_number(&digits),
            card_type,
        })
    }
}

/// Parses `MM/YY` or `MM/YYYY` into the last calendar day of that
/// month. Two-digit years map to 2000-2099.
fn parse_expiry(expiry: &str) -> Option<NaiveDate> {
    let (month, year) = expiry.trim().split_once('/')?;
    let month: u32 = month.trim().parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    let year = year.trim();
    let year: i32 = match year.len() {
        2 => 2000 + year.parse::<i32>().ok()?,
        4 => year.parse().ok()?,
        _ => return None,
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    next_month.checked_sub_days(Days::new(1)).filter(|d| d >= &first)
}

impl Default for CreditCardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for CreditCardValidator {
    type Input = CardDetails;
    type Output = ValidCard;

    fn validate(&self, input: &CardDetails) -> ValidationResult<ValidCard> {
        self.validate_at(input, Utc::now().date_naive())
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("CreditCard")
            .with_description("Card network, checksum, expiry and CVV rules")
            .with_complexity(ValidationComplexity::Linear)
            .with_tag("financial")
    }
}

// ============================================================================
// TESTS
// ============================================================================

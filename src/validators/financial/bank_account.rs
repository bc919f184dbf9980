//! US bank account validator.

use serde::{Deserialize, Serialize};

use crate::core::{
    ErrorCode, ValidationError, ValidationResult, Validator, ValidatorMetadata,
};

/// ABA routing number checksum. Weights 3, 7 and 1 repeat across the
/// nine digits; the weighted sum must be divisible by 10.
#[must_use]
pub fn routing_number_valid(digits: &str) -> bool {
    if digits.len() != 9 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    const WEIGHTS: [u32; 9] = [3, 7, 1, 3, 7, 1, 3, 7, 1];
    let sum: u32 = digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .zip(WEIGHTS)
        .map(|(d, w)| d * w)
        .sum();
    sum % 10 == 0
}

// ============================================================================
// BANK ACCOUNT INPUT / OUTPUT
// ============================================================================

/// Checking or savings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountType {
    Checking,
    Savings,
}

impl BankAccountType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
        }
    }
}

/// Account details to validate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub account_number: String,
    pub routing_number: String,
    pub holder_name: String,
    pub account_type: Option<BankAccountType>,
}

/// A validated account with whitespace stripped from its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidBankAccount {
    pub account_number: String,
    pub routing_number: String,
    pub holder_name: String,
    pub account_type: Option<BankAccountType>,
}

// ============================================================================
// BANK ACCOUNT VALIDATOR
// ============================================================================

/// Validates US bank account details.
///
/// Check order: account number shape, routing number shape and ABA
/// checksum, holder name, account type allowlist. Account numbers are
/// 4 to 17 digits.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::financial::{BankAccount, BankAccountValidator};
///
/// let validator = BankAccountValidator::new();
/// let input = BankAccount {
///     account_number: "123456789012".to_string(),
///     routing_number: "021000021".to_string(),
///     holder_name: "Ada Lovelace".to_string(),
///     account_type: None,
/// };
/// assert!(validator.validate(&input).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BankAccountValidator {
    min_account_digits: usize,
    max_account_digits: usize,
    check_routing_checksum: bool,
    require_holder_name: bool,
    allowed_types: Vec<BankAccountType>,
}

impl BankAccountValidator {
    /// Creates a bank account validator with default settings.
    ///
    /// Defaults: account number 4 to 17 digits, ABA checksum on,
    /// holder name required, both account types allowed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_account_digits: 4,
            max_account_digits: 17,
            check_routing_checksum: true,
            require_holder_name: true,
            allowed_types: Vec::new(),
        }
    }

    /// Sets the account number digit bounds.
    #[must_use = "builder methods must be chained or built"]
    pub fn account_digits(mut self, min: usize, max: usize) -> Self {
        self.min_account_digits = min;
        self.max_account_digits = max;
        self
    }

    /// Skips the ABA checksum, keeping the nine-digit shape check.
    #[must_use = "builder methods must be chained or built"]
    pub fn skip_routing_checksum(mut self) -> Self {
        self.check_routing_checksum = false;
        self
    }

    /// Makes the holder name optional.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional_holder_name(mut self) -> Self {
        self.require_holder_name = false;
        self
    }

    /// Restricts the accepted account types.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = BankAccountType>,
    {
        self.allowed_types = types.into_iter().collect();
        self
    }
}

impl Default for BankAccountValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for BankAccountValidator {
    type Input = BankAccount;
    type Output = ValidBankAccount;

    fn validate(&self, input: &BankAccount) -> ValidationResult<ValidBankAccount> {
        let account_number = input.account_number.trim();
        if account_number.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::BankAccountNumberRequired,
                "Account number is required",
            ));
        }
        let digits_ok = account_number.chars().all(|c| c.is_ascii_digit());
        if !digits_ok
            || account_number.len() < self.min_account_digits
            || account_number.len() > self.max_account_digits
        {
            return Err(ValidationError::new(
                ErrorCode::BankAccountNumberInvalid,
                format!(
                    "Account number must be {} to {} digits",
                    self.min_account_digits, self.max_account_digits
                ),
            )
            .with_param("min_digits", self.min_account_digits.to_string())
            .with_param("max_digits", self.max_account_digits.to_string()));
        }

        let routing_number = input.routing_number.trim();
        if routing_number.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::BankRoutingNumberRequired,
                "Routing number is required",
            ));
        }
        if routing_number.len() != 9 || !routing_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new(
                ErrorCode::BankRoutingNumberInvalidFormat,
                "Routing number must be exactly 9 digits",
            ));
        }
        if self.check_routing_checksum && !routing_number_valid(routing_number) {
            return Err(ValidationError::new(
                ErrorCode::BankRoutingNumberInvalidChecksum,
                "Routing number failed the checksum",
            ));
        }

        let holder_name = input.holder_name.trim();
        if self.require_holder_name && holder_name.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::BankAccountNameRequired,
                "Account holder name is required",
            ));
        }

        if let Some(account_type) = input.account_type {
            if !self.allowed_types.is_empty() && !self.allowed_types.contains(&account_type) {
                return Err(ValidationError::new(
                    ErrorCode::BankAccountTypeNotAllowed,
                    format!("Account type '{}' is not allowed", account_type.as_str()),
                )
                .with_param("account_type", account_type.as_str()));
            }
        }

        Ok(ValidBankAccount {
            account_number: account_number.to_string(),
            routing_number: routing_number.to_string(),
            holder_name: holder_name.to_string(),
            account_type: input.account_type,
        })
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("BankAccount")
            .with_description("US account and ABA routing number rules")
            .with_tag("financial")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn account(account_number: &str, routing_number: &str) -> BankAccount {
        BankAccount {
            account_number: account_number.to_string(),
            routing_number: routing_number.to_string(),
            holder_name: "Ada Lovelace".to_string(),
            account_type: None,
        }
    }

    mod routing {
        use super::*;

        #[test]
        fn known_good_numbers() {
            // Published ABA numbers for large US banks.
            assert!(routing_number_valid("021000021"));
            assert!(routing_number_valid("011401533"));
            assert!(routing_number_valid("121000358"));
        }

        #[test]
        fn single_digit_change_fails() {
            assert!(!routing_number_valid("021000022"));
        }

        #[test]
        fn wrong_shape_fails() {
            assert!(!routing_number_valid("12345678"));
            assert!(!routing_number_valid("1234567890"));
            assert!(!routing_number_valid("02100002a"));
        }
    }

    #[test]
    fn valid_account_passes() {
        let validator = BankAccountValidator::new();
        let valid = validator.validate(&account("123456789012", "021000021")).unwrap();
        assert_eq!(valid.routing_number, "021000021");
    }

    #[test]
    fn account_number_bounds() {
        let validator = BankAccountValidator::new();
        assert_eq!(
            validator.validate(&account("123", "021000021")).unwrap_err().code(),
            ErrorCode::BankAccountNumberInvalid
        );
        assert_eq!(
            validator
                .validate(&account("123456789012345678", "021000021"))
                .unwrap_err()
                .code(),
            ErrorCode::BankAccountNumberInvalid
        );
    }

    #[test]
    fn routing_number_errors() {
        let validator = BankAccountValidator::new();
        assert_eq!(
            validator.validate(&account("12345678", "12345")).unwrap_err().code(),
            ErrorCode::BankRoutingNumberInvalidFormat
        );
        assert_eq!(
            validator.validate(&account("12345678", "021000022")).unwrap_err().code(),
            ErrorCode::BankRoutingNumberInvalidChecksum
        );
        assert!(BankAccountValidator::new()
            .skip_routing_checksum()
            .validate(&account("12345678", "021000022"))
            .is_ok());
    }

    #[test]
    fn holder_name_required_by_default() {
        let validator = BankAccountValidator::new();
        let mut input = account("12345678", "021000021");
        input.holder_name = "  ".to_string();
        assert_eq!(
            validator.validate(&input).unwrap_err().code(),
            ErrorCode::BankAccountNameRequired
        );
        assert!(BankAccountValidator::new()
            .optional_holder_name()
            .validate(&input)
            .is_ok());
    }

    #[test]
    fn account_type_allowlist() {
        let validator =
            BankAccountValidator::new().allow_types([BankAccountType::Checking]);
        let mut input = account("12345678", "021000021");
        input.account_type = Some(BankAccountType::Savings);
        assert_eq!(
            validator.validate(&input).unwrap_err().code(),
            ErrorCode::BankAccountTypeNotAllowed
        );
        input.account_type = Some(BankAccountType::Checking);
        assert!(validator.validate(&input).is_ok());
    }
}

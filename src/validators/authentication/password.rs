//! Password strength validator.

use crate::core::{
    ErrorCode, ValidationError, ValidationResult, Validator, ValidatorMetadata,
};

/// Passwords rejected outright when the common-password check is on.
/// Matched case-insensitively.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "123456",
    "12345678",
    "123456789",
    "qwerty",
    "qwerty123",
    "abc123",
    "letmein",
    "welcome",
    "monkey",
    "dragon",
    "iloveyou",
    "admin",
];

// ============================================================================
// PASSWORD INPUT
// ============================================================================

/// Password to check, optionally together with the account's username
/// so the contains-username rule can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordInput {
    Plain(String),
    WithUsername { password: String, username: String },
}

impl PasswordInput {
    fn password(&self) -> &str {
        match self {
            Self::Plain(password) => password,
            Self::WithUsername { password, .. } => password,
        }
    }

    fn username(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::WithUsername { username, .. } => Some(username),
        }
    }
}

impl From<&str> for PasswordInput {
    fn from(password: &str) -> Self {
        Self::Plain(password.to_string())
    }
}

// ============================================================================
// PASSWORD VALIDATOR
// ============================================================================

/// Validates password strength.
///
/// Check order: required, length bounds, uppercase, lowercase, digit,
/// special character, common-password blocklist, contains-username.
/// Each rule reports its own error code so callers can show targeted
/// guidance. The output is `()`; passwords are never echoed back.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::authentication::{PasswordInput, PasswordValidator};
///
/// let validator = PasswordValidator::new();
/// assert!(validator.validate(&"Str0ng!pass".into()).is_ok());
/// assert!(validator.validate(&"weak".into()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
    require_uppercase: bool,
    require_lowercase: bool,
    require_digit: bool,
    require_special: bool,
    reject_common: bool,
    reject_username: bool,
}

impl PasswordValidator {
    /// Creates a password validator with default settings.
    ///
    /// Defaults: 8 to 128 characters, all character classes required,
    /// common passwords rejected, username containment rejected when a
    /// username is supplied.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
            reject_common: true,
            reject_username: true,
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

    /// Drops the uppercase-letter requirement.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional_uppercase(mut self) -> Self {
        self.require_uppercase = false;
        self
    }

    /// Drops the lowercase-letter requirement.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional_lowercase(mut self) -> Self {
        self.require_lowercase = false;
        self
    }

    /// Drops the digit requirement.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional_digit(mut self) -> Self {
        self.require_digit = false;
        self
    }

    /// Drops the special-character requirement.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional_special(mut self) -> Self {
        self.require_special = false;
        self
    }

    /// Skips the common-password blocklist.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_common(mut self) -> Self {
        self.reject_common = false;
        self
    }

    /// Skips the contains-username check.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_username(mut self) -> Self {
        self.reject_username = false;
        self
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PasswordValidator {
    type Input = PasswordInput;
    type Output = ();

    fn validate(&self, input: &PasswordInput) -> ValidationResult<()> {
        let password = input.password();
        if password.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::PasswordRequired,
                "Password is required",
            ));
        }

        let length = password.chars().count();
        if length < self.min_length {
            return Err(ValidationError::new(
                ErrorCode::PasswordTooShort,
                format!("Password must be at least {} characters", self.min_length),
            )
            .with_param("min_length", self.min_length.to_string()));
        }
        if length > self.max_length {
            return Err(ValidationError::new(
                ErrorCode::PasswordTooLong,
                format!("Password must be at most {} characters", self.max_length),
            )
            .with_param("max_length", self.max_length.to_string()));
        }

        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            return Err(ValidationError::new(
                ErrorCode::PasswordMissingUppercase,
                "Password must contain an uppercase letter",
            ));
        }
        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            return Err(ValidationError::new(
                ErrorCode::PasswordMissingLowercase,
                "Password must contain a lowercase letter",
            ));
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new(
                ErrorCode::PasswordMissingDigit,
                "Password must contain a digit",
            ));
        }
        if self.require_special && password.chars().all(char::is_alphanumeric) {
            return Err(ValidationError::new(
                ErrorCode::PasswordMissingSpecial,
                "Password must contain a special character",
            ));
        }

        if self.reject_common {
            let lowered = password.to_lowercase();
            if COMMON_PASSWORDS.contains(&lowered.as_str()) {
                return Err(ValidationError::new(
                    ErrorCode::PasswordTooCommon,
                    "Password is too common",
                ));
            }
        }

        if self.reject_username {
            if let Some(username) = input.username() {
                if !username.is_empty()
                    && password.to_lowercase().contains(&username.to_lowercase())
                {
                    return Err(ValidationError::new(
                        ErrorCode::PasswordContainsUsername,
                        "Password must not contain the username",
                    ));
                }
            }
        }

        Ok(())
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Password")
            .with_description("Password strength rules")
            .with_tag("authentication")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(validator: &PasswordValidator, password: &str) -> ValidationResult<()> {
        validator.validate(&password.into())
    }

    fn with_username(password: &str, username: &str) -> PasswordInput {
        PasswordInput::WithUsername {
            password: password.to_string(),
            username: username.to_string(),
        }
    }

    #[test]
    fn strong_password_passes() {
        let validator = PasswordValidator::new();
        assert!(check(&validator, "Str0ng!pass").is_ok());
    }

    #[test]
    fn each_missing_class_has_its_own_code() {
        let validator = PasswordValidator::new();
        assert_eq!(
            check(&validator, "str0ng!pass").unwrap_err().code(),
            ErrorCode::PasswordMissingUppercase
        );
        assert_eq!(
            check(&validator, "STR0NG!PASS").unwrap_err().code(),
            ErrorCode::PasswordMissingLowercase
        );
        assert_eq!(
            check(&validator, "Strong!pass").unwrap_err().code(),
            ErrorCode::PasswordMissingDigit
        );
        assert_eq!(
            check(&validator, "Str0ngpass").unwrap_err().code(),
            ErrorCode::PasswordMissingSpecial
        );
    }

    #[test]
    fn length_bounds() {
        let validator = PasswordValidator::new();
        assert_eq!(
            check(&validator, "S1!a").unwrap_err().code(),
            ErrorCode::PasswordTooShort
        );
        let short = PasswordValidator::new().max_length(10);
        assert_eq!(
            check(&short, "Str0ng!pass-too-long").unwrap_err().code(),
            ErrorCode::PasswordTooLong
        );
    }

    #[test]
    fn common_passwords_rejected() {
        let relaxed = PasswordValidator::new()
            .optional_uppercase()
            .optional_digit()
            .optional_special();
        assert_eq!(
            check(&relaxed, "password123").unwrap_err().code(),
            ErrorCode::PasswordTooCommon
        );
        assert!(check(&relaxed.clone().allow_common(), "password123").is_ok());
    }

    #[test]
    fn username_containment() {
        let validator = PasswordValidator::new();
        assert_eq!(
            validator
                .validate(&with_username("Alice!2024x", "alice"))
                .unwrap_err()
                .code(),
            ErrorCode::PasswordContainsUsername
        );
        assert!(validator
            .validate(&with_username("Str0ng!pass", "alice"))
            .is_ok());
        assert!(validator
            .clone()
            .allow_username()
            .validate(&with_username("Alice!2024x", "alice"))
            .is_ok());
    }

    #[test]
    fn empty_is_required() {
        let validator = PasswordValidator::new();
        assert_eq!(
            check(&validator, "").unwrap_err().code(),
            ErrorCode::PasswordRequired
        );
    }
}

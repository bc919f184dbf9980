//! Email address validator.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::{
    ErrorCode, ValidationComplexity, ValidationError, ValidationResult, Validator,
    ValidatorMetadata,
};

/// Practical everyday check: something@something.tld, no whitespace.
static SIMPLE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Stricter shape: constrained local part, hyphen-safe DNS labels.
static STRICT_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("valid regex")
});

// ============================================================================
// EMAIL VALIDATOR
// ============================================================================

/// How strictly the address shape is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailMode {
    /// `local@domain.tld` with no whitespace. The default.
    #[default]
    Simple,
    /// Constrained local-part characters and DNS-label rules.
    Strict,
}

/// Validates email addresses.
///
/// Check order: required, length, format, blocked domains, allowed domains.
/// The normalized value is the trimmed, lower-cased address.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::contact::EmailValidator;
///
/// let validator = EmailValidator::new();
/// assert_eq!(validator.validate("User@Example.COM").unwrap(), "user@example.com");
/// assert!(validator.validate("not-an-email").is_err());
///
/// let corporate = EmailValidator::new()
///     .allowed_domains(["example.com"])
///     .match_subdomains();
/// assert!(corporate.validate("a@mail.example.com").is_ok());
/// assert!(corporate.validate("a@elsewhere.com").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EmailValidator {
    max_length: usize,
    mode: EmailMode,
    allowed_domains: Vec<String>,
    blocked_domains: Vec<String>,
    match_subdomains: bool,
}

impl EmailValidator {
    /// Maximum address length per RFC 5321.
    pub const DEFAULT_MAX_LENGTH: usize = 254;

    /// Creates an email validator with default settings.
    ///
    /// Defaults: simple mode, max length 254, no domain lists, exact
    /// domain matching.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_length: Self::DEFAULT_MAX_LENGTH,
            mode: EmailMode::default(),
            allowed_domains: Vec::new(),
            blocked_domains: Vec::new(),
            match_subdomains: false,
        }
    }

    /// Overrides the maximum address length.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Switches to the strict format check.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self) -> Self {
        self.mode = EmailMode::Strict;
        self
    }

    /// Only accepts addresses from the listed domains.
    #[must_use = "builder methods must be chained or built"]
    pub fn allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_domains = domains
            .into_iter()
            .map(|d| d.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Rejects addresses from the listed domains.
    #[must_use = "builder methods must be chained or built"]
    pub fn blocked_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_domains = domains
            .into_iter()
            .map(|d| d.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Makes domain lists suffix-aware, so `example.com` also covers
    /// `mail.example.com`.
    #[must_use = "builder methods must be chained or built"]
    pub fn match_subdomains(mut self) -> Self {
        self.match_subdomains = true;
        self
    }

    fn domain_matches(&self, domain: &str, listed: &str) -> bool {
        domain == listed
            || (self.match_subdomains && domain.ends_with(&format!(".{listed}")))
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    type Input = str;
    type Output = String;

    fn validate(&self, input: &str) -> ValidationResult<String> {
        let email = input.trim().to_ascii_lowercase();
        if email.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::EmailRequired,
                "Email is required",
            ));
        }

        if email.chars().count() > self.max_length {
            return Err(ValidationError::new(
                ErrorCode::EmailTooLong,
                format!("Email must be at most {} characters", self.max_length),
            )
            .with_param("max", self.max_length.to_string()));
        }

        let pattern = match self.mode {
            EmailMode::Simple => &*SIMPLE_EMAIL,
            EmailMode::Strict => &*STRICT_EMAIL,
        };
        if !pattern.is_match(&email) {
            return Err(ValidationError::new(
                ErrorCode::EmailInvalidFormat,
                "Email format is invalid",
            ));
        }

        // Format already guarantees exactly the shape local@domain.
        let domain = email.rsplit('@').next().unwrap_or_default();

        if self
            .blocked_domains
            .iter()
            .any(|blocked| self.domain_matches(domain, blocked))
        {
            return Err(ValidationError::new(
                ErrorCode::EmailDomainBlocked,
                format!("Email domain '{domain}' is blocked"),
            )
            .with_param("domain", domain));
        }

        if !self.allowed_domains.is_empty()
            && !self
                .allowed_domains
                .iter()
                .any(|allowed| self.domain_matches(domain, allowed))
        {
            return Err(ValidationError::new(
                ErrorCode::EmailDomainNotAllowed,
                format!("Email domain '{domain}' is not allowed"),
            )
            .with_param("domain", domain));
        }

        Ok(email)
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Email")
            .with_description("Email address format and domain policy")
            .with_complexity(ValidationComplexity::Linear)
            .with_tag("contact")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod format {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn accepts_plain_address() {
            let validator = EmailValidator::new();
            assert_eq!(validator.validate("a@b.com").unwrap(), "a@b.com");
        }

        #[test]
        fn empty_is_required() {
            let validator = EmailValidator::new();
            assert_eq!(
                validator.validate("").unwrap_err().code(),
                ErrorCode::EmailRequired
            );
        }

        #[test]
        fn rejects_missing_at_or_dot() {
            let validator = EmailValidator::new();
            assert_eq!(
                validator.validate("nobody").unwrap_err().code(),
                ErrorCode::EmailInvalidFormat
            );
            assert_eq!(
                validator.validate("a@b").unwrap_err().code(),
                ErrorCode::EmailInvalidFormat
            );
        }

        #[test]
        fn strict_mode_rejects_double_dots_in_domain() {
            let strict = EmailValidator::new().strict();
            assert!(strict.validate("a@b..com").is_err());
            assert!(strict.validate("first.last@example.co.uk").is_ok());
        }

        #[test]
        fn length_limit_applies_before_format() {
            let validator = EmailValidator::new().max_length(10);
            assert_eq!(
                validator.validate("not an email but very long").unwrap_err().code(),
                ErrorCode::EmailTooLong
            );
        }
    }

    mod normalization {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn trims_and_lowercases() {
            let validator = EmailValidator::new();
            assert_eq!(
                validator.validate("  John.Doe@Example.COM  ").unwrap(),
                "john.doe@example.com"
            );
        }
    }

    mod domains {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn exact_match_by_default() {
            let validator = EmailValidator::new().allowed_domains(["example.com"]);
            assert!(validator.validate("user@example.com").is_ok());
            assert_eq!(
                validator.validate("user@sub.example.com").unwrap_err().code(),
                ErrorCode::EmailDomainNotAllowed
            );
        }

        #[test]
        fn subdomains_when_enabled() {
            let validator = EmailValidator::new()
                .allowed_domains(["example.com"])
                .match_subdomains();
            assert!(validator.validate("user@sub.example.com").is_ok());
            // Suffix matching must not accept lookalike domains.
            assert!(validator.validate("user@notexample.com").is_err());
        }

        #[test]
        fn blocklist_wins_over_allowlist() {
            let validator = EmailValidator::new()
                .allowed_domains(["example.com"])
                .blocked_domains(["example.com"]);
            assert_eq!(
                validator.validate("user@example.com").unwrap_err().code(),
                ErrorCode::EmailDomainBlocked
            );
        }

        #[test]
        fn domain_lists_are_case_insensitive() {
            let validator = EmailValidator::new().blocked_domains(["Spam.COM"]);
            assert_eq!(
                validator.validate("user@spam.com").unwrap_err().code(),
                ErrorCode::EmailDomainBlocked
            );
        }
    }
}

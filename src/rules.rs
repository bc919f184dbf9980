//! Composable predicate rules for text validation.
//!
//! Dynamic string constraints are expressed as an explicit ordered list of
//! [`Rule`]s evaluated in sequence, rather than by splicing regex fragments
//! together at runtime. Each rule either passes or produces a
//! `TEXT_*`-coded error; evaluation stops at the first failure.

use regex::Regex;

use crate::core::{ErrorCode, ValidationError, ValidationResult};

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

/// Character-class membership checks.
#[derive(Debug, Clone)]
pub enum CharClass {
    /// ASCII letters only.
    Alphabetic,
    /// ASCII letters and digits.
    Alphanumeric,
    /// ASCII digits only.
    Digits,
    /// ASCII letters and digits plus the given extra characters.
    AlphanumericWith(String),
}

impl CharClass {
    fn allows(&self, c: char) -> bool {
        match self {
            Self::Alphabetic => c.is_ascii_alphabetic(),
            Self::Alphanumeric => c.is_ascii_alphanumeric(),
            Self::Digits => c.is_ascii_digit(),
            Self::AlphanumericWith(extra) => c.is_ascii_alphanumeric() || extra.contains(c),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Alphabetic => "letters".to_string(),
            Self::Alphanumeric => "letters and digits".to_string(),
            Self::Digits => "digits".to_string(),
            Self::AlphanumericWith(extra) => format!("letters, digits or '{extra}'"),
        }
    }
}

/// Letter-case requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    /// No uppercase letters allowed.
    Lower,
    /// No lowercase letters allowed.
    Upper,
}

// ============================================================================
// RULES
// ============================================================================

/// A single composable text rule.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Character count must fall within `min..=max`.
    LengthRange { min: usize, max: usize },
    /// Every character must belong to the class.
    CharClass(CharClass),
    /// Letter case must match the policy.
    Case(CasePolicy),
    /// Input must not equal any listed value (compared case-insensitively).
    Disallow(Vec<String>),
    /// Input must match the precompiled pattern.
    Matches(Regex),
}

impl Rule {
    fn check(&self, input: &str) -> ValidationResult<()> {
        match self {
            Self::LengthRange { min, max } => {
                let len = input.chars().count();
                if len < *min {
                    Err(ValidationError::new(
                        ErrorCode::TextTooShort,
                        format!("must be at least {min} characters"),
                    )
                    .with_param("min", min.to_string())
                    .with_param("actual", len.to_string()))
                } else if len > *max {
                    Err(ValidationError::new(
                        ErrorCode::TextTooLong,
                        format!("must be at most {max} characters"),
                    )
                    .with_param("max", max.to_string())
                    .with_param("actual", len.to_string()))
                } else {
                    Ok(())
                }
            }
            Self::CharClass(class) => {
                match input.chars().find(|c| !class.allows(*c)) {
                    None => Ok(()),
                    Some(bad) => Err(ValidationError::new(
                        ErrorCode::TextInvalidChars,
                        format!("may only contain {}", class.describe()),
                    )
                    .with_param("character", bad.to_string())),
                }
            }
            Self::Case(policy) => {
                let ok = match policy {
                    CasePolicy::Lower => !input.chars().any(|c| c.is_ascii_uppercase()),
                    CasePolicy::Upper => !input.chars().any(|c| c.is_ascii_lowercase()),
                };
                if ok {
                    Ok(())
                } else {
                    Err(ValidationError::new(
                        ErrorCode::TextCaseMismatch,
                        match policy {
                            CasePolicy::Lower => "must be lower-case",
                            CasePolicy::Upper => "must be upper-case",
                        },
                    ))
                }
            }
            Self::Disallow(values) => {
                if values.iter().any(|v| v.eq_ignore_ascii_case(input)) {
                    Err(ValidationError::new(
                        ErrorCode::TextDisallowed,
                        "value is not allowed",
                    ))
                } else {
                    Ok(())
                }
            }
            Self::Matches(pattern) => {
                if pattern.is_match(input) {
                    Ok(())
                } else {
                    Err(ValidationError::new(
                        ErrorCode::TextPatternMismatch,
                        format!("must match pattern {}", pattern.as_str()),
                    ))
                }
            }
        }
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// An ordered list of rules evaluated against a string.
///
/// # Examples
///
/// ```
/// use fieldcheck::rules::{CasePolicy, CharClass, RuleSet};
///
/// let rules = RuleSet::new()
///     .length(3, 20)
///     .char_class(CharClass::Alphanumeric)
///     .case(CasePolicy::Lower);
///
/// assert!(rules.check("abc123").is_ok());
/// assert!(rules.check("ABC").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set (accepts everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a length-range rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.rules.push(Rule::LengthRange { min, max });
        self
    }

    /// Appends a character-class rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn char_class(mut self, class: CharClass) -> Self {
        self.rules.push(Rule::CharClass(class));
        self
    }

    /// Appends a case rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn case(mut self, policy: CasePolicy) -> Self {
        self.rules.push(Rule::Case(policy));
        self
    }

    /// Appends a blocklist rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn disallow<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .push(Rule::Disallow(values.into_iter().map(Into::into).collect()));
        self
    }

    /// Appends a precompiled-pattern rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn matches(mut self, pattern: Regex) -> Self {
        self.rules.push(Rule::Matches(pattern));
        self
    }

    /// Runs the rules in order, stopping at the first failure.
    pub fn check(&self, input: &str) -> ValidationResult<()> {
        for rule in &self.rules {
            rule.check(input)?;
        }
        Ok(())
    }

    /// Number of rules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

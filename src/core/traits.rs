//! The core validation trait.

use super::error::{ValidationError, ValidationResult};
use super::metadata::ValidatorMetadata;

/// The contract every concrete validator implements.
///
/// A validator is constructed once from an immutable configuration and may
/// then be invoked any number of times. `validate` is a pure function of the
/// configuration and the input: no I/O, no mutation, no hidden state, which
/// also makes every validator safe to share across threads.
///
/// On success the validator returns its normalized output (trimmed,
/// case-folded, masked, plus any derived metadata such as a detected card
/// type). On failure it returns the first violated rule as a
/// [`ValidationError`]; rules are applied in a fixed, documented order and
/// evaluation short-circuits.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::contact::EmailValidator;
///
/// let validator = EmailValidator::new();
/// let email = validator.validate("  A@b.com ").unwrap();
/// assert_eq!(email, "a@b.com");
/// ```
pub trait Validator {
    /// Input type accepted by this validator.
    type Input: ?Sized;
    /// Normalized output produced on success.
    type Output;

    /// Runs the validator's rule sequence against `input`.
    fn validate(&self, input: &Self::Input) -> ValidationResult<Self::Output>;

    /// Introspection metadata for this validator.
    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::default()
    }
}

/// Extension methods for composing validators.
pub trait ValidatorExt: Validator + Sized {
    /// Requires both validators to pass; returns the right-hand output.
    fn and<R>(self, right: R) -> super::combinator::And<Self, R>
    where
        R: Validator<Input = Self::Input>,
    {
        super::combinator::And::new(self, right)
    }

    /// Requires at least one validator to pass.
    fn or<R>(self, right: R) -> super::combinator::Or<Self, R>
    where
        R: Validator<Input = Self::Input, Output = Self::Output>,
    {
        super::combinator::Or::new(self, right)
    }

    /// Inverts this validator: passes iff the inner validator fails.
    fn not(self, error: ValidationError) -> super::combinator::Not<Self> {
        super::combinator::Not::new(self, error)
    }
}

impl<T: Validator> ValidatorExt for T {}

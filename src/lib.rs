//! Field-level input validation with stable error codes.
//!
//! Every validator is an immutable configuration struct implementing
//! [`Validator`]: a pure function from a borrowed input to a
//! `Result<Output, ValidationError>`. `Ok` carries the normalized value
//! (trimmed, lower-cased, digits-only and so on, per validator); `Err`
//! carries a machine-readable `UPPER_SNAKE` code plus a human message.
//! Validators hold no mutable state and can be shared freely across
//! threads.
//!
//! # Examples
//!
//! ```
//! use fieldcheck::core::Validator;
//! use fieldcheck::validators::contact::EmailValidator;
//!
//! let validator = EmailValidator::new();
//! assert_eq!(
//!     validator.validate("  User@Example.COM ").unwrap(),
//!     "user@example.com",
//! );
//!
//! let error = validator.validate("not-an-email").unwrap_err();
//! assert_eq!(error.code().as_str(), "EMAIL_INVALID_FORMAT");
//! ```
//!
//! Error codes are part of the public contract and never change once
//! released; match on [`ErrorCode`](core::ErrorCode) or its string form
//! to drive field-level UI messages.

pub mod core;
pub mod rules;
pub mod validators;

pub use core::{
    ErrorCode, ValidationComplexity, ValidationError, ValidationResult, Validator,
    ValidatorExt, ValidatorMetadata,
};
pub use rules::{CasePolicy, CharClass, Rule, RuleSet};

//! Shared helpers for the integration suites.
#![allow(dead_code)]

use fieldcheck::core::{ErrorCode, ValidationError, ValidationResult};

/// Asserts that a result failed with the given code.
pub fn assert_code<T: std::fmt::Debug>(result: ValidationResult<T>, code: ErrorCode) {
    match result {
        Ok(value) => panic!("expected {code:?}, got Ok({value:?})"),
        Err(error) => assert_eq!(error.code(), code, "unexpected error: {error}"),
    }
}

/// Looks up a named param on an error.
pub fn param<'a>(error: &'a ValidationError, key: &str) -> Option<&'a str> {
    error
        .params()
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

//! The error surface is a public contract: codes are stable
//! UPPER_SNAKE strings and errors serialize to a predictable JSON
//! shape for API responses.

mod common;

use fieldcheck::core::{ErrorCode, ValidationError, Validator};
use fieldcheck::validators::basic::NumberValidator;
use fieldcheck::validators::contact::EmailValidator;
use serde_json::json;

#[test]
fn codes_round_trip_through_serde_as_strings() {
    let serialized = serde_json::to_value(ErrorCode::EmailInvalidFormat).unwrap();
    assert_eq!(serialized, json!("EMAIL_INVALID_FORMAT"));
    let parsed: ErrorCode = serde_json::from_value(json!("CARD_INVALID_CHECKSUM")).unwrap();
    assert_eq!(parsed, ErrorCode::CardInvalidChecksum);
}

#[test]
fn errors_serialize_with_code_message_and_params() {
    let error = ValidationError::new(ErrorCode::NumberTooSmall, "Value must be at least 5")
        .with_param("min", "5");
    let value = serde_json::to_value(&error).unwrap();
    assert_eq!(value["code"], json!("NUMBER_TOO_SMALL"));
    assert_eq!(value["message"], json!("Value must be at least 5"));
    assert_eq!(value["params"][0][0], json!("min"));
    assert_eq!(value["params"][0][1], json!("5"));
}

#[test]
fn validator_errors_carry_their_bound_params() {
    let validator = NumberValidator::new().min(10.0);
    let error = validator.validate(&Some(3.0)).unwrap_err();
    assert_eq!(error.code(), ErrorCode::NumberTooSmall);
    assert_eq!(common::param(&error, "min"), Some("10"));
}

#[test]
fn display_pairs_code_with_message() {
    let error = EmailValidator::new().validate("nope").unwrap_err();
    let rendered = error.to_string();
    assert!(rendered.starts_with("EMAIL_INVALID_FORMAT: "), "got {rendered}");
}

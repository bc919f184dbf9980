//! End-to-end checks for the financial namespace: card and bank
//! account details as a checkout form would submit them.

mod common;

use common::assert_code;
use fieldcheck::core::{ErrorCode, Validator};
use fieldcheck::validators::financial::{
    BankAccount, BankAccountValidator, CardDetails, CardType, CreditCardValidator,
    mask_card_number,
};

#[test]
fn checkout_card_happy_path() {
    let validator = CreditCardValidator::new()
        .require_expiry()
        .require_cvv()
        .require_holder_name();
    let input = CardDetails::new("4111 1111 1111 1111")
        .expiry("12/2039")
        .cvv("123")
        .holder_name("Ada Lovelace");
    let valid = validator.validate(&input).unwrap();
    assert_eq!(valid.card_type, CardType::Visa);
    assert_eq!(valid.number, "**** **** **** 1111");
}

#[test]
fn card_success_value_never_serializes_the_pan() {
    let valid = CreditCardValidator::new()
        .validate(&CardDetails::new("4111 1111 1111 1111"))
        .unwrap();
    let json = serde_json::to_string(&valid).unwrap();
    assert!(
        !json.contains("4111111111111111"),
        "success value leaked the full card number: {json}"
    );
    assert!(json.contains("**** **** **** 1111"));
}

#[test]
fn card_errors_surface_in_check_order() {
    let validator = CreditCardValidator::new().allow_types([CardType::Visa]);

    // Network allowlist fires before the checksum.
    assert_code(
        validator.validate(&CardDetails::new("5500000000000004")),
        ErrorCode::CardTypeNotAllowed,
    );
    assert_code(
        validator.validate(&CardDetails::new("4111111111111112")),
        ErrorCode::CardInvalidChecksum,
    );
    assert_code(
        validator.validate(&CardDetails::new("4111111111111111").expiry("13/25")),
        ErrorCode::CardExpiryInvalidFormat,
    );
}

#[test]
fn amex_needs_four_digit_cvv() {
    let validator = CreditCardValidator::new();
    assert_code(
        validator.validate(&CardDetails::new("340000000000009").cvv("123")),
        ErrorCode::CardCvvInvalid,
    );
    assert!(validator
        .validate(&CardDetails::new("340000000000009").cvv("1234"))
        .is_ok());
}

#[test]
fn masking_never_leaks_more_than_last_four() {
    for number in ["4111111111111111", "340000000000009", "30000000000004"] {
        let masked = mask_card_number(number);
        let digits: String = masked.chars().filter(|c| c.is_ascii_digit()).collect();
        assert!(digits.len() <= 4, "leaked digits in {masked}");
    }
}

#[test]
fn bank_account_end_to_end() {
    let validator = BankAccountValidator::new();
    let input = BankAccount {
        account_number: "000123456789".to_string(),
        routing_number: "021000021".to_string(),
        holder_name: "Ada Lovelace".to_string(),
        account_type: None,
    };
    assert!(validator.validate(&input).is_ok());

    let bad_routing = BankAccount {
        routing_number: "021000022".to_string(),
        ..input.clone()
    };
    assert_code(
        validator.validate(&bad_routing),
        ErrorCode::BankRoutingNumberInvalidChecksum,
    );
}

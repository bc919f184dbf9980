//! End-to-end checks for the contact namespace: email, phone, URL and
//! postal address.

mod common;

use common::assert_code;
use fieldcheck::core::{ErrorCode, Validator};
use fieldcheck::validators::contact::{
    Address, AddressValidator, EmailValidator, PhoneValidator, UrlValidator,
    normalize_url,
};
use regex::Regex;

#[test]
fn email_normalizes_and_enforces_domain_policy() {
    let validator = EmailValidator::new()
        .allowed_domains(["example.com"])
        .match_subdomains();

    assert_eq!(
        validator.validate("  User@Mail.Example.COM ").unwrap(),
        "user@mail.example.com",
    );
    assert_code(
        validator.validate("user@elsewhere.org"),
        ErrorCode::EmailDomainNotAllowed,
    );
}

#[test]
fn email_blocklist_wins_over_format() {
    let validator = EmailValidator::new().blocked_domains(["mailinator.com"]);
    assert_code(
        validator.validate("signup@mailinator.com"),
        ErrorCode::EmailDomainBlocked,
    );
}

#[test]
fn phone_accepts_common_layouts() {
    let validator = PhoneValidator::new();
    for input in [
        "+1 (555) 123-4567",
        "555-123-4567",
        "+44 20 7946 0958",
        "5551234567 ext. 89",
    ] {
        assert!(validator.validate(input).is_ok(), "rejected {input}");
    }
}

#[test]
fn phone_country_code_policy() {
    let validator = PhoneValidator::new()
        .require_country_code()
        .allowed_country_codes(["1", "44"]);
    assert!(validator.validate("+1 555 123 4567").is_ok());
    assert_code(
        validator.validate("555 123 4567"),
        ErrorCode::PhoneCountryCodeRequired,
    );
    assert_code(
        validator.validate("+49 30 123456"),
        ErrorCode::PhoneCountryCodeNotAllowed,
    );
}

#[test]
fn url_policy_stack() {
    let validator = UrlValidator::new()
        .allowed_domains(["example.com"])
        .match_subdomains()
        .forbid_ip_hosts()
        .denied_ports([8080])
        .forbid_fragment();

    assert!(validator.validate("https://api.example.com/v1/users").is_ok());
    assert_code(
        validator.validate("https://192.168.0.1/admin"),
        ErrorCode::UrlIpNotAllowed,
    );
    assert_code(
        validator.validate("https://example.com:8080/"),
        ErrorCode::UrlPortNotAllowed,
    );
    assert_code(
        validator.validate("https://example.com/page#section"),
        ErrorCode::UrlFragmentNotAllowed,
    );
}

#[test]
fn url_output_is_normalized() {
    let validator = UrlValidator::new();
    assert_eq!(
        validator.validate("HTTPS://Example.COM:443/").unwrap(),
        "https://example.com",
    );
    assert_eq!(
        normalize_url("http://Example.com:80/a?b=c"),
        Some("http://example.com/a?b=c".to_string()),
    );
}

#[test]
fn address_reports_first_failing_field() {
    let validator = AddressValidator::new()
        .postal_code_pattern(Regex::new(r"^\d{5}(-\d{4})?$").unwrap());

    let address = Address {
        street: "221B Baker Street".to_string(),
        city: "London".to_string(),
        state: String::new(),
        postal_code: "NW1 6XE".to_string(),
        country: "GB".to_string(),
    };
    assert_code(
        validator.validate(&address),
        ErrorCode::AddressPostalCodeInvalid,
    );

    let valid = Address {
        street: " 1600 Pennsylvania Ave ".to_string(),
        city: "Washington".to_string(),
        state: "DC".to_string(),
        postal_code: "20500".to_string(),
        country: "US".to_string(),
    };
    let normalized = validator.validate(&valid).unwrap();
    assert_eq!(normalized.street, "1600 Pennsylvania Ave");
}

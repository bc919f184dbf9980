//! Postal address validator.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{
    ErrorCode, ValidationComplexity, ValidationError, ValidationResult, Validator,
    ValidatorMetadata,
};

// ============================================================================
// ADDRESS INPUT
// ============================================================================

/// A structured postal address. Empty fields count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    fn is_blank(&self) -> bool {
        [
            &self.street,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|f| f.trim().is_empty())
    }
}

// ============================================================================
// ADDRESS VALIDATOR
// ============================================================================

/// Validates a structured postal address.
///
/// Check order: whole-struct required, per-field required flags, per-field
/// max lengths, postal-code pattern. The normalized value is the address
/// with every field trimmed.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::contact::{Address, AddressValidator};
///
/// let validator = AddressValidator::new();
/// let input = Address {
///     street: "1 Main St ".to_string(),
///     city: "Springfield".to_string(),
///     postal_code: "12345".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(validator.validate(&input).unwrap().street, "1 Main St");
/// ```
#[derive(Debug, Clone)]
pub struct AddressValidator {
    require_street: bool,
    require_city: bool,
    require_state: bool,
    require_postal_code: bool,
    require_country: bool,
    max_street: usize,
    max_city: usize,
    max_state: usize,
    max_postal_code: usize,
    max_country: usize,
    postal_code_pattern: Option<Regex>,
}

impl AddressValidator {
    /// Creates an address validator with default settings.
    ///
    /// Defaults: street, city and postal code required; state and country
    /// optional; generous per-field max lengths; no postal-code pattern.
    #[must_use]
    pub fn new() -> Self {
        Self {
            require_street: true,
            require_city: true,
            require_state: false,
            require_postal_code: true,
            require_country: false,
            max_street: 100,
            max_city: 50,
            max_state: 50,
            max_postal_code: 20,
            max_country: 56,
            postal_code_pattern: None,
        }
    }

    /// Sets which fields are required, in declaration order
    /// (street, city, state, postal code, country).
    #[must_use = "builder methods must be chained or built"]
    pub fn required_fields(
        mut self,
        street: bool,
        city: bool,
        state: bool,
        postal_code: bool,
        country: bool,
    ) -> Self {
        self.require_street = street;
        self.require_city = city;
        self.require_state = state;
        self.require_postal_code = postal_code;
        self.require_country = country;
        self
    }

    /// Overrides the street max length.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_street(mut self, max: usize) -> Self {
        self.max_street = max;
        self
    }

    /// Overrides the postal-code max length.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_postal_code(mut self, max: usize) -> Self {
        self.max_postal_code = max;
        self
    }

    /// Requires the postal code to match a precompiled pattern.
    #[must_use = "builder methods must be chained or built"]
    pub fn postal_code_pattern(mut self, pattern: Regex) -> Self {
        self.postal_code_pattern = Some(pattern);
        self
    }

    fn check_field(
        name: &str,
        value: &str,
        required: bool,
        max: usize,
        required_code: ErrorCode,
    ) -> ValidationResult<()> {
        if value.is_empty() {
            if required {
                return Err(ValidationError::new(
                    required_code,
                    format!("Address {name} is required"),
                ));
            }
            return Ok(());
        }
        if value.chars().count() > max {
            return Err(ValidationError::new(
                ErrorCode::AddressFieldTooLong,
                format!("Address {name} must be at most {max} characters"),
            )
            .with_param("field", name)
            .with_param("max", max.to_string()));
        }
        Ok(())
    }
}

impl Default for AddressValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for AddressValidator {
    type Input = Address;
    type Output = Address;

    fn validate(&self, input: &Address) -> ValidationResult<Address> {
        if input.is_blank() {
            return Err(ValidationError::new(
                ErrorCode::AddressRequired,
                "Address is required",
            ));
        }

        let normalized = Address {
            street: input.street.trim().to_string(),
            city: input.city.trim().to_string(),
            state: input.state.trim().to_string(),
            postal_code: input.postal_code.trim().to_string(),
            country: input.country.trim().to_string(),
        };

        Self::check_field(
            "street",
            &normalized.street,
            self.require_street,
            self.max_street,
            ErrorCode::AddressStreetRequired,
        )?;
        Self::check_field(
            "city",
            &normalized.city,
            self.require_city,
            self.max_city,
            ErrorCode::AddressCityRequired,
        )?;
        Self::check_field(
            "state",
            &normalized.state,
            self.require_state,
            self.max_state,
            ErrorCode::AddressStateRequired,
        )?;
        Self::check_field(
            "postal code",
            &normalized.postal_code,
            self.require_postal_code,
            self.max_postal_code,
            ErrorCode::AddressPostalCodeRequired,
        )?;
        Self::check_field(
            "country",
            &normalized.country,
            self.require_country,
            self.max_country,
            ErrorCode::AddressCountryRequired,
        )?;

        if let Some(pattern) = &self.postal_code_pattern {
            if !normalized.postal_code.is_empty() && !pattern.is_match(&normalized.postal_code) {
                return Err(ValidationError::new(
                    ErrorCode::AddressPostalCodeInvalid,
                    "Postal code format is invalid",
                ));
            }
        }

        Ok(normalized)
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("Address")
            .with_description("Structured postal address")
            .with_complexity(ValidationComplexity::Linear)
            .with_tag("contact")
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Date-of-birth validator with age breakdown.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{
    ErrorCode, ValidationError, ValidationResult, Validator, ValidatorMetadata,
};

// ============================================================================
// AGE BREAKDOWN
// ============================================================================

/// Elapsed time between a birth date and a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeBreakdown {
    /// Whole years.
    pub years: u32,
    /// Whole months past the last birthday.
    pub months: u32,
    /// Days past the last whole month.
    pub days: u32,
    /// Fractional years (365.25-day years).
    pub decimal_years: f64,
}

/// Computes the calendar breakdown from `birth` to `today`.
///
/// Returns `None` when `birth` is after `today`.
pub(crate) fn age_breakdown(birth: NaiveDate, today: NaiveDate) -> Option<AgeBreakdown> {
    if birth > today {
        return None;
    }

    let mut years = today.year() - birth.year();
    let mut months = today.month() as i32 - birth.month() as i32;
    let mut days = today.day() as i32 - birth.day() as i32;

    if days < 0 {
        months -= 1;
        days += days_in_preceding_month(today);
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let total_days = (today - birth).num_days();
    Some(AgeBreakdown {
        years: years as u32,
        months: months as u32,
        days: days as u32,
        decimal_years: total_days as f64 / 365.25,
    })
}

/// Number of days in the month preceding `date`'s month.
fn days_in_preceding_month(date: NaiveDate) -> i32 {
    let first = date.with_day(1);
    match first.and_then(|d| d.pred_opt()) {
        Some(last_of_prev) => last_of_prev.day() as i32,
        // Only reachable at the minimum representable date.
        None => 30,
    }
}

// ============================================================================
// DATE OF BIRTH VALIDATOR
// ============================================================================

/// A validated date of birth with its derived age breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateOfBirth {
    pub date: NaiveDate,
    pub age: AgeBreakdown,
}

/// Validates a date-of-birth string.
///
/// Accepted formats: ISO `YYYY-MM-DD` and US `MM/DD/YYYY`. Check order:
/// required, parse, future-date policy, minimum age, maximum age, named
/// valid ranges. Success always carries the age breakdown.
///
/// # Examples
///
/// ```
/// use fieldcheck::core::Validator;
/// use fieldcheck::validators::personal::DobValidator;
///
/// let validator = DobValidator::new();
/// let dob = validator.validate("1990-06-15").unwrap();
/// assert!(dob.age.years >= 30);
/// assert!(validator.validate("06/15/1990").is_ok());
/// assert!(validator.validate("15/06/1990").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DobValidator {
    allow_future: bool,
    min_age: Option<u32>,
    max_age: Option<u32>,
    valid_ranges: Vec<(String, NaiveDate, NaiveDate)>,
}

impl DobValidator {
    /// Creates a date-of-birth validator with default settings.
    ///
    /// Defaults: future dates rejected, no age bounds, no named ranges.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_future: false,
            min_age: None,
            max_age: None,
            valid_ranges: Vec::new(),
        }
    }

    /// Accepts dates in the future (no age breakdown constraints apply).
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_future(mut self) -> Self {
        self.allow_future = true;
        self
    }

    /// Requires the derived age to be at least `years`.
    #[must_use = "builder methods must be chained or built"]
    pub fn min_age(mut self, years: u32) -> Self {
        self.min_age = Some(years);
        self
    }

    /// Requires the derived age to be at most `years`.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_age(mut self, years: u32) -> Self {
        self.max_age = Some(years);
        self
    }

    /// Adds a named valid date range (inclusive). When any ranges are
    /// declared, the date must fall inside at least one of them.
    #[must_use = "builder methods must be chained or built"]
    pub fn valid_range(
        mut self,
        name: impl Into<String>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Self {
        self.valid_ranges.push((name.into(), from, to));
        self
    }

    fn parse(input: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(input, "%m/%d/%Y"))
            .ok()
    }

    fn validate_at(&self, input: &str, today: NaiveDate) -> ValidationResult<DateOfBirth> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                ErrorCode::DobRequired,
                "Date of birth is required",
            ));
        }

        let date = Self::parse(trimmed).ok_or_else(|| {
            ValidationError::new(
                ErrorCode::DobInvalidFormat,
                "Date of birth must be YYYY-MM-DD or MM/DD/YYYY",
            )
        })?;

        if date > today && !self.allow_future {
            return Err(ValidationError::new(
                ErrorCode::DobFutureDate,
                "Date of birth cannot be in the future",
            ));
        }

        // A future date (when allowed) has no meaningful age; report
        // zero and skip the age bounds.
        let age = match age_breakdown(date, today) {
            Some(age) => {
                if let Some(min) = self.min_age {
                    if age.years < min {
                        return Err(ValidationError::new(
                            ErrorCode::DobBelowMinimumAge,
                            format!("Must be at least {min} years old"),
                        )
                        .with_param("min", min.to_string())
                        .with_param("actual", age.years.to_string()));
                    }
                }
                if let Some(max) = self.max_age {
                    if age.years > max {
                        return Err(ValidationError::new(
                            ErrorCode::DobAboveMaximumAge,
                            format!("Must be at most {max} years old"),
                        )
                        .with_param("max", max.to_string())
                        .with_param("actual", age.years.to_string()));
                    }
                }
                age
            }
            None => AgeBreakdown {
                years: 0,
                months: 0,
                days: 0,
                decimal_years: 0.0,
            },
        };

        if !self.valid_ranges.is_empty()
            && !self
                .valid_ranges
                .iter()
                .any(|(_, from, to)| date >= *from && date <= *to)
        {
            return Err(ValidationError::new(
                ErrorCode::DobOutsideRanges,
                "Date of birth is outside every valid range",
            ));
        }

        Ok(DateOfBirth { date, age })
    }
}

impl Default for DobValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for DobValidator {
    type Input = str;
    type Output = DateOfBirth;

    fn validate(&self, input: &str) -> ValidationResult<DateOfBirth> {
        self.validate_at(input, Utc::now().date_naive())
    }

    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::named("DateOfBirth")
            .with_description("Birth date parsing, age bounds and ranges")
            .with_tag("personal")
    }
}

// ============================================================================
// TESTS
// ============================================================================

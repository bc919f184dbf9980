//! Logical combinators over validators sharing an input type.

use super::error::{ValidationError, ValidationResult};
use super::metadata::{ValidatorMetadata, ValidationComplexity};
use super::traits::Validator;

// ============================================================================
// AND
// ============================================================================

/// Both validators must pass. Short-circuits on the left failure and
/// returns the right-hand validator's output.
#[derive(Debug, Clone)]
pub struct And<L, R> {
    left: L,
    right: R,
}

impl<L, R> And<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Validator for And<L, R>
where
    L: Validator,
    R: Validator<Input = L::Input>,
{
    type Input = L::Input;
    type Output = R::Output;

    fn validate(&self, input: &Self::Input) -> ValidationResult<Self::Output> {
        self.left.validate(input)?;
        self.right.validate(input)
    }

    fn metadata(&self) -> ValidatorMetadata {
        let (l, r) = (self.left.metadata(), self.right.metadata());
        ValidatorMetadata::named(format!("({} AND {})", l.name, r.name))
            .with_complexity(l.complexity.combine(r.complexity))
    }
}

// ============================================================================
// OR
// ============================================================================

/// At least one validator must pass. The right-hand error wins when both
/// fail; the left output wins when both would pass.
#[derive(Debug, Clone)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<L, R> Or<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Validator for Or<L, R>
where
    L: Validator,
    R: Validator<Input = L::Input, Output = L::Output>,
{
    type Input = L::Input;
    type Output = L::Output;

    fn validate(&self, input: &Self::Input) -> ValidationResult<Self::Output> {
        match self.left.validate(input) {
            Ok(output) => Ok(output),
            Err(_) => self.right.validate(input),
        }
    }

    fn metadata(&self) -> ValidatorMetadata {
        let (l, r) = (self.left.metadata(), self.right.metadata());
        ValidatorMetadata::named(format!("({} OR {})", l.name, r.name))
            .with_complexity(l.complexity.combine(r.complexity))
    }
}

// ============================================================================
// NOT
// ============================================================================

/// Passes iff the inner validator fails, reporting a caller-supplied error
/// when it does not.
#[derive(Debug, Clone)]
pub struct Not<V> {
    inner: V,
    error: ValidationError,
}

impl<V> Not<V> {
    pub fn new(inner: V, error: ValidationError) -> Self {
        Self { inner, error }
    }
}

impl<V: Validator> Validator for Not<V> {
    type Input = V::Input;
    type Output = ();

    fn validate(&self, input: &Self::Input) -> ValidationResult<()> {
        match self.inner.validate(input) {
            Ok(_) => Err(self.error.clone()),
            Err(_) => Ok(()),
        }
    }

    fn metadata(&self) -> ValidatorMetadata {
        let inner = self.inner.metadata();
        ValidatorMetadata::named(format!("NOT {}", inner.name))
            .with_complexity(ValidationComplexity::Constant.combine(inner.complexity))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorCode;
    use crate::core::traits::ValidatorExt;

    struct MinLen(usize);

    impl Validator for MinLen {
        type Input = str;
        type Output = ();

        fn validate(&self, input: &str) -> ValidationResult<()> {
            if input.chars().count() >= self.0 {
                Ok(())
            } else {
                Err(ValidationError::new(ErrorCode::TextTooShort, "too short"))
            }
        }
    }

    struct MaxLen(usize);

    impl Validator for MaxLen {
        type Input = str;
        type Output = ();

        fn validate(&self, input: &str) -> ValidationResult<()> {
            if input.chars().count() <= self.0 {
                Ok(())
            } else {
                Err(ValidationError::new(ErrorCode::TextTooLong, "too long"))
            }
        }
    }

    #[test]
    fn and_requires_both() {
        let v = MinLen(3).and(MaxLen(5));
        assert!(v.validate("abcd").is_ok());
        assert_eq!(
            v.validate("ab").unwrap_err().code(),
            ErrorCode::TextTooShort
        );
        assert_eq!(
            v.validate("abcdef").unwrap_err().code(),
            ErrorCode::TextTooLong
        );
    }

    #[test]
    fn or_accepts_either() {
        let v = MinLen(10).or(MinLen(2));
        assert!(v.validate("abc").is_ok());
        assert!(v.validate("a").is_err());
    }

    #[test]
    fn not_inverts() {
        let v = MinLen(3).not(ValidationError::new(
            ErrorCode::TextDisallowed,
            "must be shorter than 3",
        ));
        assert!(v.validate("ab").is_ok());
        assert_eq!(
            v.validate("abc").unwrap_err().code(),
            ErrorCode::TextDisallowed
        );
    }
}

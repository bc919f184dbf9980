//! Core validation contract: errors, the [`Validator`] trait, metadata,
//! and logical combinators.

mod combinator;
mod error;
mod metadata;
mod traits;

pub use combinator::{And, Not, Or};
pub use error::{ErrorCode, ValidationError, ValidationResult};
pub use metadata::{ValidationComplexity, ValidatorMetadata};
pub use traits::{Validator, ValidatorExt};

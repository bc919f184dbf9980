//! Personal-detail validators: name, age, date of birth, gender, passport.

mod age;
mod date_of_birth;
mod gender;
mod name;
mod passport;

pub use age::{AgeInput, AgeValidator, ValidAge};
pub use date_of_birth::{AgeBreakdown, DateOfBirth, DobValidator};
pub use gender::GenderValidator;
pub use name::NameValidator;
pub use passport::{Passport, PassportValidator, UnknownAuthorityPolicy, ValidPassport};

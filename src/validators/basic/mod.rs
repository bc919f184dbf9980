//! Generic building-block validators.

mod number;
mod text;

pub use number::NumberValidator;
pub use text::TextValidator;

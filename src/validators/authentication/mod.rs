//! Credential and session validators: username, password, API key,
//! token, two-factor code.

mod api_key;
mod password;
mod token;
mod two_factor;
mod username;

pub use api_key::ApiKeyValidator;
pub use password::{PasswordInput, PasswordValidator};
pub use token::{TokenInput, TokenValidator};
pub use two_factor::{TwoFactorInput, TwoFactorMethod, TwoFactorValidator};
pub use username::UsernameValidator;

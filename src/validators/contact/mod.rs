//! Contact-information validators: email, phone, address, URL.

mod address;
mod email;
mod phone;
mod url;

pub use address::{Address, AddressValidator};
pub use email::{EmailMode, EmailValidator};
pub use phone::PhoneValidator;
pub use url::{UrlParts, UrlValidator, normalize_url, parse_url};

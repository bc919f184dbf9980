//! Concrete validators, grouped by domain.
//!
//! Each validator is an independent struct with a chained builder API.
//! They share only the [`Validator`](crate::core::Validator) contract
//! and the crate-wide error codes.

pub mod authentication;
pub mod basic;
pub mod contact;
pub mod financial;
pub mod personal;

//! Payment-detail validators: credit card and US bank account.

mod bank_account;
mod credit_card;

pub use bank_account::{
    BankAccount, BankAccountType, BankAccountValidator, ValidBankAccount,
    routing_number_valid,
};
pub use credit_card::{
    CardDetails, CardType, CreditCardValidator, ValidCard, detect_card_type,
    luhn_valid, mask_card_number,
};

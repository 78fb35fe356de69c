//! Transaction management for the dashboard.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, `TransactionBuilder` and `Amount`
//! - The in-memory `TransactionStore`
//! - The sample data a fresh store is seeded with

mod core;
mod sample;
mod store;

pub use core::{
    Amount, DATE_FORMAT, DEFAULT_MERCHANT_ID, DEFAULT_MERCHANT_NAME, ParseAmountError,
    Transaction, TransactionBuilder, TransactionId, format_date,
};
pub use store::TransactionStore;

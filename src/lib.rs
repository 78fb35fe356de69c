//! Savenum is a bookkeeping dashboard for online merchants.
//!
//! Income and expense entries are recorded against a fixed two-level chart
//! of accounts, kept in an in-memory [TransactionStore] and summarised as
//! by-day totals over selectable date windows and as the category
//! composition of the current month.
//!
//! This library provides the store, the aggregation engine, a CSV bridge for
//! importing and exporting transactions, and an HTML report renderer. The
//! `savenum` binary ties them together.

#![warn(missing_docs)]

use rust_decimal::Decimal;

pub mod chart_of_accounts;
pub mod color;
pub mod config;
pub mod dashboard;
mod html;
pub mod spreadsheet;
pub mod timezone;
pub mod transaction;

pub use chart_of_accounts::{Category, TransactionType};
pub use color::Color;
pub use config::{Config, ImportDefaults};
pub use dashboard::{
    DailyTotal, DashboardSettings, DashboardSummary, DateWindow, DayLabel, MonthlyBreakdown,
    Slice, render_report,
};
pub use html::format_currency;
pub use spreadsheet::{
    ImportOutcome, SkipReason, SkippedRow, export_chart_of_accounts, export_transactions,
    import_transactions,
};
pub use transaction::{
    Amount, ParseAmountError, Transaction, TransactionBuilder, TransactionId, TransactionStore,
};

/// The errors that may occur in the application.
///
/// Problems with individual rows of an imported spreadsheet are not errors,
/// they are reported as [SkipReason]s and the import carries on.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A monetary amount was negative.
    ///
    /// Whether money was earned or spent is given by the transaction type,
    /// so amounts are never stored with a sign.
    #[error("{0} is not a valid amount, amounts must be zero or positive")]
    NegativeAmount(Decimal),

    /// The spreadsheet could not be read or written as CSV.
    #[error("could not process the spreadsheet: {0}")]
    InvalidSpreadsheet(String),

    /// Reading or writing a file failed.
    #[error("an I/O error occurred: {0}")]
    Io(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JsonSerialization(String),
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::InvalidSpreadsheet(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JsonSerialization(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::Error;

    #[test]
    fn io_errors_keep_their_message() {
        let error = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");

        let error = Error::from(error);

        assert_eq!(error, Error::Io("file missing".to_owned()));
        assert!(error.to_string().contains("file missing"));
    }

    #[test]
    fn negative_amount_message_names_the_value() {
        let message = Error::NegativeAmount(Decimal::new(-125, 1)).to_string();

        assert!(message.contains("-12.5"));
    }
}

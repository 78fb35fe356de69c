//! Moving transactions in and out of spreadsheets.
//!
//! Spreadsheets are exchanged as CSV documents with a header row. The
//! transaction sheet uses the column names
//! `id,merchantId,merchantName,type,category,description,date,amount`.

mod date;
mod export;
mod import;

pub use export::{
    CHART_OF_ACCOUNTS_FILE_NAME, TRANSACTIONS_FILE_NAME, export_chart_of_accounts,
    export_transactions,
};
pub use import::{ImportOutcome, SkipReason, SkippedRow, import_transactions};

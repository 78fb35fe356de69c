//! Writing transactions and the chart of accounts to spreadsheets.

use std::io::Write;

use crate::{Error, chart_of_accounts, transaction::Transaction};

/// The default file name for exported transactions.
pub const TRANSACTIONS_FILE_NAME: &str = "transactions.csv";

/// The default file name for the chart of accounts reference.
pub const CHART_OF_ACCOUNTS_FILE_NAME: &str = "plano-de-contas.csv";

const TRANSACTION_HEADER: [&str; 8] = [
    "id",
    "merchantId",
    "merchantName",
    "type",
    "category",
    "description",
    "date",
    "amount",
];

const CHART_OF_ACCOUNTS_HEADER: [&str; 3] = ["Tipo", "Categoria", "Descrição"];

/// Write `transactions` as CSV, one row per transaction in the order given.
///
/// The header row is always written, even when there are no transactions.
/// Dates are written as `dd-MM-yyyy` and types as `Receita` or `Despesa`, so
/// the output can be read back with
/// [import_transactions](crate::spreadsheet::import_transactions).
///
/// # Errors
/// Returns [Error::InvalidSpreadsheet] if a row cannot be written and
/// [Error::Io] if the writer cannot be flushed.
pub fn export_transactions<W: Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(TRANSACTION_HEADER)?;
    for transaction in transactions {
        writer.serialize(transaction)?;
    }
    writer.flush()?;

    tracing::info!("Exported {} transactions", transactions.len());
    Ok(())
}

/// Write the chart of accounts reference as CSV.
///
/// # Errors
/// Returns [Error::InvalidSpreadsheet] if a row cannot be written and
/// [Error::Io] if the writer cannot be flushed.
pub fn export_chart_of_accounts<W: Write>(writer: W) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(CHART_OF_ACCOUNTS_HEADER)?;
    for entry in chart_of_accounts::entries() {
        writer.write_record([
            entry.transaction_type.label(),
            entry.category.name(),
            entry.description,
        ])?;
    }
    writer.flush()?;

    Ok(())
}

//! Reading transactions from a spreadsheet.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    chart_of_accounts::{Category, TransactionType, default_category, permits},
    config::ImportDefaults,
    spreadsheet::date::parse_cell_date,
    transaction::{Amount, ParseAmountError, Transaction, TransactionBuilder},
};

/// The transactions read from a spreadsheet and the rows that were left out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportOutcome {
    /// The rows that became transactions, in sheet order.
    pub accepted: Vec<TransactionBuilder>,
    /// The rows that were skipped and why.
    pub skipped: Vec<SkippedRow>,
}

/// A spreadsheet row that was not imported.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// The position of the row among the data rows, starting at 1 for the row
    /// after the header.
    pub row: usize,
    /// Why the row was skipped.
    pub reason: SkipReason,
}

/// Why a spreadsheet row could not be imported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    /// The row could not be decoded, for example it has too few cells.
    #[error("the row could not be read: {0}")]
    MalformedRow(String),

    /// The date cell is empty.
    #[error("the date is missing")]
    MissingDate,

    /// The date cell is not a valid date.
    #[error("\"{0}\" is not a valid date, expected dd-MM-yyyy, dd/MM/yyyy or a date serial")]
    InvalidDate(String),

    /// The type cell is empty or not a transaction type.
    #[error("\"{0}\" is not a transaction type, expected \"Receita\" or \"Despesa\"")]
    InvalidType(String),

    /// The amount is below zero.
    #[error("{0} is negative, amounts must be zero or positive")]
    NegativeAmount(Decimal),
}

/// The cells of one transaction row, before validation.
///
/// Columns that are missing from the sheet are treated as blank.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImportRow {
    merchant_id: Option<String>,
    merchant_name: Option<String>,
    #[serde(rename = "type")]
    transaction_type: Option<String>,
    category: Option<String>,
    description: Option<String>,
    date: Option<String>,
    amount: Option<String>,
}

/// Read transactions from a CSV document with a header row.
///
/// The columns `merchantId`, `merchantName`, `type`, `category`,
/// `description`, `date` and `amount` are read, other columns such as `id`
/// are ignored. A row that cannot be turned into a transaction is recorded in
/// [ImportOutcome::skipped] and the import carries on with the next row.
///
/// # Errors
/// Returns [Error::InvalidSpreadsheet] if the header row cannot be read and
/// [Error::Io] if reading fails part way through.
pub fn import_transactions<R: Read>(
    reader: R,
    defaults: &ImportDefaults,
) -> Result<ImportOutcome, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    tracing::debug!("Importing spreadsheet with columns {headers:?}");

    let mut outcome = ImportOutcome::default();

    for (index, result) in reader.deserialize::<ImportRow>().enumerate() {
        let row = index + 1;

        let parsed = match result {
            Ok(import_row) => parse_row(import_row, defaults),
            Err(error) if error.is_io_error() => return Err(Error::from(error)),
            Err(error) => Err(SkipReason::MalformedRow(error.to_string())),
        };

        match parsed {
            Ok(builder) => outcome.accepted.push(builder),
            Err(reason) => {
                tracing::warn!("Skipping spreadsheet row {row}: {reason}");
                outcome.skipped.push(SkippedRow { row, reason });
            }
        }
    }

    tracing::info!(
        "Imported {} transactions, skipped {} rows",
        outcome.accepted.len(),
        outcome.skipped.len()
    );

    Ok(outcome)
}

fn parse_row(row: ImportRow, defaults: &ImportDefaults) -> Result<TransactionBuilder, SkipReason> {
    let date_cell = non_blank(row.date).ok_or(SkipReason::MissingDate)?;
    let date = parse_cell_date(&date_cell).ok_or(SkipReason::InvalidDate(date_cell))?;

    let type_cell = non_blank(row.transaction_type).unwrap_or_default();
    let transaction_type: TransactionType = type_cell
        .parse()
        .map_err(|_| SkipReason::InvalidType(type_cell.clone()))?;

    let amount = parse_amount(row.amount.as_deref())?;
    let category = resolve_category(transaction_type, non_blank(row.category));

    let merchant_id = row
        .merchant_id
        .as_deref()
        .and_then(|cell| cell.parse::<i64>().ok())
        .filter(|id| *id != 0)
        .unwrap_or(defaults.merchant_id);
    let merchant_name =
        non_blank(row.merchant_name).unwrap_or_else(|| defaults.merchant_name.clone());

    let mut builder = Transaction::build(transaction_type, category, date, amount)
        .merchant(merchant_id, &merchant_name);

    if let Some(description) = non_blank(row.description) {
        builder = builder.description(&description);
    }

    Ok(builder)
}

/// Blank and missing amounts count as zero, as do cells that are not numbers.
fn parse_amount(cell: Option<&str>) -> Result<Amount, SkipReason> {
    let Some(cell) = cell.filter(|cell| !cell.is_empty()) else {
        return Ok(Amount::ZERO);
    };

    match cell.parse::<Amount>() {
        Ok(amount) => Ok(amount),
        Err(ParseAmountError::Negative(value)) => Err(SkipReason::NegativeAmount(value)),
        Err(ParseAmountError::NotANumber(_)) => {
            tracing::debug!("Amount \"{cell}\" is not a number, using 0");
            Ok(Amount::ZERO)
        }
    }
}

/// Use the type's default category when the cell is blank.
///
/// A category outside the chart, or one the type does not permit, is kept
/// as written so that exported transactions import unchanged.
fn resolve_category(transaction_type: TransactionType, cell: Option<String>) -> Category {
    let Some(name) = cell else {
        return default_category(transaction_type);
    };

    let category = Category::from_name(&name);
    if !permits(transaction_type, &category) {
        tracing::warn!(
            "Category \"{name}\" is not in the chart of accounts for {transaction_type}, keeping it"
        );
    }

    category
}

fn non_blank(cell: Option<String>) -> Option<String> {
    cell.filter(|cell| !cell.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        Error,
        chart_of_accounts::{Category, TransactionType},
        config::ImportDefaults,
        spreadsheet::import::{SkipReason, SkippedRow, import_transactions},
        transaction::Amount,
    };

    fn import(text: &str) -> crate::spreadsheet::ImportOutcome {
        import_transactions(text.as_bytes(), &ImportDefaults::default()).unwrap()
    }

    #[test]
    fn imports_complete_rows() {
        let outcome = import(
            "id,merchantId,merchantName,type,category,description,date,amount\n\
             9,2,Loja Dois,Receita,Vendas de Produtos,Venda Shopee,07-03-2025,150.5\n\
             10,2,Loja Dois,Despesa,Taxas de Pagamento,Taxa PIX,08/03/2025,3\n",
        );

        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.accepted.len(), 2);

        let sale = &outcome.accepted[0];
        assert_eq!(sale.merchant_id, 2);
        assert_eq!(sale.merchant_name, "Loja Dois");
        assert_eq!(sale.transaction_type, TransactionType::Income);
        assert_eq!(sale.category, Category::ProductSales);
        assert_eq!(sale.description.as_deref(), Some("Venda Shopee"));
        assert_eq!(sale.date, date!(2025 - 03 - 07));
        assert_eq!(sale.amount.value(), Decimal::new(1505, 1));

        let fee = &outcome.accepted[1];
        assert_eq!(fee.transaction_type, TransactionType::Expense);
        assert_eq!(fee.category, Category::PaymentFees);
        assert_eq!(fee.date, date!(2025 - 03 - 08));
    }

    #[test]
    fn impossible_date_is_skipped_and_later_rows_still_imported() {
        let outcome = import(
            "type,category,date,amount\n\
             Despesa,Custos Diretos,31-02-2025,10\n\
             Despesa,Custos Diretos,01-03-2025,20\n",
        );

        assert_eq!(
            outcome.skipped,
            vec![SkippedRow {
                row: 1,
                reason: SkipReason::InvalidDate("31-02-2025".to_owned())
            }]
        );
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.accepted[0].amount, Amount::from_whole(20));
    }

    #[test]
    fn date_serials_are_accepted() {
        let outcome = import("type,date,amount\nReceita,45723,100\n");

        assert_eq!(outcome.accepted[0].date, date!(2025 - 03 - 07));
    }

    #[test]
    fn blank_cells_use_defaults() {
        let defaults = ImportDefaults {
            merchant_id: 7,
            merchant_name: "Loja Sete".to_owned(),
        };

        let outcome = import_transactions(
            "merchantId,merchantName,type,category,description,date,amount\n\
             ,,Despesa,,,07-03-2025,\n\
             0,,Receita,,,07-03-2025,abc\n"
                .as_bytes(),
            &defaults,
        )
        .unwrap();

        assert!(outcome.skipped.is_empty());
        for builder in &outcome.accepted {
            assert_eq!(builder.merchant_id, 7);
            assert_eq!(builder.merchant_name, "Loja Sete");
            assert_eq!(builder.description, None);
            assert_eq!(builder.amount, Amount::ZERO);
        }
        assert_eq!(outcome.accepted[0].category, Category::DirectCosts);
        assert_eq!(outcome.accepted[1].category, Category::ProductSales);
    }

    #[test]
    fn missing_columns_are_treated_as_blank() {
        let outcome = import("date,type\n07-03-2025,Despesa\n");

        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.accepted[0].merchant_id, 1);
        assert_eq!(outcome.accepted[0].merchant_name, "Loja Principal");
        assert_eq!(outcome.accepted[0].amount, Amount::ZERO);
    }

    #[test]
    fn unknown_type_is_skipped() {
        let outcome = import(
            "type,date,amount\n\
             Transferência,07-03-2025,10\n\
             ,07-03-2025,10\n\
             Income,07-03-2025,10\n",
        );

        assert_eq!(
            outcome.skipped,
            vec![
                SkippedRow {
                    row: 1,
                    reason: SkipReason::InvalidType("Transferência".to_owned())
                },
                SkippedRow {
                    row: 2,
                    reason: SkipReason::InvalidType(String::new())
                },
            ]
        );
        assert_eq!(outcome.accepted[0].transaction_type, TransactionType::Income);
    }

    #[test]
    fn categories_outside_the_chart_are_kept() {
        let outcome = import(
            "type,category,date,amount\n\
             Receita,Custos Diretos,07-03-2025,10\n\
             Despesa,Conta de Energia,07-03-2025,10\n\
             Despesa,  ,07-03-2025,10\n",
        );

        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.accepted[0].category, Category::DirectCosts);
        assert_eq!(
            outcome.accepted[1].category,
            Category::Unknown("Conta de Energia".to_owned())
        );
        assert_eq!(outcome.accepted[2].category, Category::DirectCosts);
    }

    #[test]
    fn fractional_and_scientific_amounts_are_exact() {
        let outcome = import(
            "type,date,amount\n\
             Despesa,07-03-2025,0.1\n\
             Despesa,07-03-2025,2.5e1\n",
        );

        assert_eq!(outcome.accepted[0].amount.value(), Decimal::new(1, 1));
        assert_eq!(outcome.accepted[1].amount, Amount::from_whole(25));
    }

    #[test]
    fn negative_amount_is_skipped() {
        let outcome = import("type,date,amount\nDespesa,07-03-2025,-25\n");

        assert!(outcome.accepted.is_empty());
        assert_eq!(
            outcome.skipped,
            vec![SkippedRow {
                row: 1,
                reason: SkipReason::NegativeAmount(Decimal::from(-25))
            }]
        );
    }

    #[test]
    fn missing_date_is_skipped() {
        let outcome = import("type,date,amount\nDespesa,,10\n");

        assert_eq!(outcome.skipped[0].reason, SkipReason::MissingDate);
    }

    #[test]
    fn ragged_row_is_skipped() {
        let outcome = import(
            "type,date,amount\n\
             Despesa,07-03-2025\n\
             Despesa,07-03-2025,10\n",
        );

        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].row, 1);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::MalformedRow(_)
        ));
        assert_eq!(outcome.accepted.len(), 1);
    }

    #[test]
    fn unreadable_header_is_an_error() {
        let bytes: &[u8] = b"type,\xFF\xFEdate\n";

        let result = import_transactions(bytes, &ImportDefaults::default());

        assert!(matches!(result, Err(Error::InvalidSpreadsheet(_))));
    }
}

//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    chart_of_accounts::{Category, TransactionType, default_category, permits},
};

/// The merchant that transactions belong to unless stated otherwise.
pub const DEFAULT_MERCHANT_ID: i64 = 1;
/// The display name of [DEFAULT_MERCHANT_ID].
pub const DEFAULT_MERCHANT_NAME: &str = "Loja Principal";

/// The textual form of transaction dates, e.g. `07-03-2025`.
pub const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[day]-[month]-[year]");

/// Format `date` as `dd-MM-yyyy`.
pub fn format_date(date: Date) -> String {
    // The format only uses calendar components, which every Date has.
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

// ============================================================================
// MODELS
// ============================================================================

/// Identifies a transaction for the lifetime of a [TransactionStore](super::TransactionStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TransactionId(u64);

impl TransactionId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount of money, always zero or positive.
///
/// Whether the money was earned or spent is given by the [TransactionType]
/// of the transaction, never by the sign of the amount. The value is kept as
/// an exact decimal so that sums do not depend on the order of the terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// No money.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Create an amount.
    ///
    /// # Errors
    /// Returns [Error::NegativeAmount] if `value` is below zero.
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value < Decimal::ZERO {
            return Err(Error::NegativeAmount(value));
        }

        if value.is_zero() {
            // Drops the sign of -0 so it displays as "0".
            Ok(Self::ZERO)
        } else {
            Ok(Self(value))
        }
    }

    /// Create an amount from a whole number of reais.
    pub fn from_whole(value: u32) -> Self {
        Self(Decimal::from(value))
    }

    /// The amount as a number.
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Parse plain decimal text such as `150.50`, or scientific notation such
    /// as `1.5e2`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let value = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|_| ParseAmountError::NotANumber(text.to_owned()))?;

        Amount::new(value).map_err(|_| ParseAmountError::Negative(value))
    }
}

/// The reasons text cannot be parsed as an [Amount].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAmountError {
    /// The text is not a number.
    #[error("\"{0}\" is not a number")]
    NotANumber(String),
    /// The number is below zero.
    #[error("{0} is negative")]
    Negative(Decimal),
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] and add the builder
/// to a [TransactionStore](super::TransactionStore), which assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The merchant the transaction belongs to.
    pub merchant_id: i64,
    /// The display name of the merchant.
    pub merchant_name: String,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category within the chart of accounts.
    pub category: Category,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// When the transaction happened.
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
    /// The amount of money spent or earned in this transaction.
    pub amount: Amount,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        transaction_type: TransactionType,
        category: Category,
        date: Date,
        amount: Amount,
    ) -> TransactionBuilder {
        TransactionBuilder {
            merchant_id: DEFAULT_MERCHANT_ID,
            merchant_name: DEFAULT_MERCHANT_NAME.to_owned(),
            transaction_type,
            category,
            description: None,
            date,
            amount,
        }
    }

    /// The amount with income as positive and expenses as negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount.value(),
            TransactionType::Expense => -self.amount.value(),
        }
    }

    /// Whether the category is one the chart of accounts permits for the type.
    pub fn has_permitted_category(&self) -> bool {
        permits(self.transaction_type, &self.category)
    }
}

fn serialize_date<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_date(*date))
}

/// A builder for creating [Transaction] instances.
///
/// The merchant defaults to [DEFAULT_MERCHANT_ID] and [DEFAULT_MERCHANT_NAME]
/// and the description is empty until set.
///
/// # Examples
///
/// ```
/// use savenum::{Amount, Category, Transaction, TransactionStore, TransactionType};
/// use time::macros::date;
///
/// let mut store = TransactionStore::new();
/// let id = store.add(
///     Transaction::build(
///         TransactionType::Expense,
///         Category::PaymentFees,
///         date!(2025 - 03 - 07),
///         Amount::from_whole(35),
///     )
///     .description("Taxa PIX"),
/// );
///
/// assert_eq!(store.get(id).unwrap().description.as_deref(), Some("Taxa PIX"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The merchant the transaction belongs to.
    pub merchant_id: i64,
    /// The display name of the merchant.
    pub merchant_name: String,
    /// Whether money was earned or spent.
    pub transaction_type: TransactionType,
    /// The category within the chart of accounts.
    pub category: Category,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// When the transaction happened.
    pub date: Date,
    /// The amount of money spent or earned.
    pub amount: Amount,
}

impl TransactionBuilder {
    /// Set the merchant for the transaction.
    pub fn merchant(mut self, merchant_id: i64, merchant_name: &str) -> Self {
        self.merchant_id = merchant_id;
        self.merchant_name = merchant_name.to_owned();
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Change the transaction type.
    ///
    /// The category is reset to the first category of the new type, since the
    /// old category is unlikely to be valid for it.
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        if transaction_type != self.transaction_type {
            self.transaction_type = transaction_type;
            self.category = default_category(transaction_type);
        }
        self
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub(crate) fn finalise(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            merchant_id: self.merchant_id,
            merchant_name: self.merchant_name,
            transaction_type: self.transaction_type,
            category: self.category,
            description: self.description,
            date: self.date,
            amount: self.amount,
        }
    }
}

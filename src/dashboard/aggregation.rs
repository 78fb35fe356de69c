//! Transaction data aggregation for the dashboard charts.
//!
//! Provides functions to filter transactions by date window and type, total
//! them by day of the month, and break the current month down by type and by
//! category.

use std::{collections::HashMap, fmt::Display, hash::Hash};

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use time::{Date, Month, PrimitiveDateTime};

use crate::{
    chart_of_accounts::{Category, TransactionType},
    color::Color,
    dashboard::window::{DateWindow, is_in_current_month},
    transaction::Transaction,
};

/// A day of the month without the year, displayed as `dd/MM`.
///
/// Transactions on the same day and month of different years share a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayLabel {
    day: u8,
    month: Month,
}

impl DayLabel {
    /// The label for `date`.
    pub fn of(date: Date) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
        }
    }

    /// The key labels are ordered by, `month * 31 + day`.
    pub fn sort_key(self) -> u16 {
        u16::from(u8::from(self.month)) * 31 + u16::from(self.day)
    }
}

impl Display for DayLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:02}", self.day, u8::from(self.month))
    }
}

impl Serialize for DayLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The total for one day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTotal {
    /// The day the total is for.
    pub label: DayLabel,
    /// The summed amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

/// One slice of a composition chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    /// The type or category label.
    pub name: String,
    /// The summed amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    /// The colour to draw the slice with.
    pub color: Color,
}

/// The composition of the current calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    /// Income against expenses.
    pub by_type: Vec<Slice>,
    /// Totals per category.
    pub by_category: Vec<Slice>,
    /// Income minus expenses.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_income: Decimal,
}

/// The transactions dated inside `window`.
pub fn in_window(
    transactions: &[Transaction],
    window: DateWindow,
    now: PrimitiveDateTime,
) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(move |transaction| window.contains(transaction.date, now))
}

fn of_type(
    transactions: &[Transaction],
    transaction_type: TransactionType,
    window: DateWindow,
    now: PrimitiveDateTime,
) -> impl Iterator<Item = &Transaction> {
    in_window(transactions, window, now)
        .filter(move |transaction| transaction.transaction_type == transaction_type)
}

/// Sums `value` per day and sorts the days by [DayLabel::sort_key].
fn group_by_day<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
    value: impl Fn(&Transaction) -> Decimal,
) -> Vec<DailyTotal> {
    let mut totals: HashMap<DayLabel, Decimal> = HashMap::new();

    for transaction in transactions {
        *totals.entry(DayLabel::of(transaction.date)).or_default() += value(transaction);
    }

    let mut totals: Vec<DailyTotal> = totals
        .into_iter()
        .map(|(label, value)| DailyTotal { label, value })
        .collect();
    totals.sort_by_key(|total| total.label.sort_key());
    totals
}

/// Sums amounts per key, keeping keys in the order they are first seen.
fn sum_in_first_seen_order<'a, K>(
    transactions: impl Iterator<Item = &'a Transaction>,
    key: impl Fn(&Transaction) -> K,
) -> Vec<(K, Decimal)>
where
    K: Eq + Hash + Clone,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut totals: Vec<(K, Decimal)> = Vec::new();

    for transaction in transactions {
        let key = key(transaction);
        let amount = transaction.amount.value();

        match positions.get(&key) {
            Some(&position) => totals[position].1 += amount,
            None => {
                positions.insert(key.clone(), totals.len());
                totals.push((key, amount));
            }
        }
    }

    totals
}

/// Expenses in `window` totalled per day.
pub fn expenses_by_day(
    transactions: &[Transaction],
    window: DateWindow,
    now: PrimitiveDateTime,
) -> Vec<DailyTotal> {
    group_by_day(
        of_type(transactions, TransactionType::Expense, window, now),
        |transaction| transaction.amount.value(),
    )
}

/// Income in `window` totalled per day.
pub fn revenue_by_day(
    transactions: &[Transaction],
    window: DateWindow,
    now: PrimitiveDateTime,
) -> Vec<DailyTotal> {
    group_by_day(
        of_type(transactions, TransactionType::Income, window, now),
        |transaction| transaction.amount.value(),
    )
}

/// Income minus expenses in `window` totalled per day.
pub fn net_income_by_day(
    transactions: &[Transaction],
    window: DateWindow,
    now: PrimitiveDateTime,
) -> Vec<DailyTotal> {
    group_by_day(
        in_window(transactions, window, now),
        Transaction::signed_amount,
    )
}

/// The sum of all expenses in `window`.
pub fn total_expenses(
    transactions: &[Transaction],
    window: DateWindow,
    now: PrimitiveDateTime,
) -> Decimal {
    of_type(transactions, TransactionType::Expense, window, now)
        .map(|transaction| transaction.amount.value())
        .sum()
}

/// The sum of all income in `window`.
pub fn total_revenue(
    transactions: &[Transaction],
    window: DateWindow,
    now: PrimitiveDateTime,
) -> Decimal {
    of_type(transactions, TransactionType::Income, window, now)
        .map(|transaction| transaction.amount.value())
        .sum()
}

/// Income minus expenses in `window`.
pub fn net_income(
    transactions: &[Transaction],
    window: DateWindow,
    now: PrimitiveDateTime,
) -> Decimal {
    in_window(transactions, window, now)
        .map(Transaction::signed_amount)
        .sum()
}

/// Breaks the calendar month of `now` down by type and by category.
pub fn current_month_breakdown(
    transactions: &[Transaction],
    now: PrimitiveDateTime,
) -> MonthlyBreakdown {
    let this_month = || {
        transactions
            .iter()
            .filter(move |transaction| is_in_current_month(transaction.date, now))
    };

    let by_type = sum_in_first_seen_order(this_month(), |transaction| transaction.transaction_type)
        .into_iter()
        .map(|(transaction_type, value)| Slice {
            name: transaction_type.label().to_owned(),
            value,
            color: Color::for_type(transaction_type),
        })
        .collect();

    let by_category = sum_in_first_seen_order(this_month(), |transaction| {
        transaction.category.clone()
    })
    .into_iter()
    .map(|(category, value): (Category, Decimal)| Slice {
        color: Color::for_category(&category),
        name: String::from(category),
        value,
    })
    .collect();

    MonthlyBreakdown {
        by_type,
        by_category,
        net_income: this_month().map(Transaction::signed_amount).sum(),
    }
}

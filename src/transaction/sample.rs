//! The transactions a fresh store is seeded with.

use time::macros::date;

use crate::{
    chart_of_accounts::{Category, TransactionType},
    transaction::core::{Amount, Transaction, TransactionBuilder},
};

/// The sample transactions, in display order.
pub(super) fn sample_transactions() -> Vec<TransactionBuilder> {
    vec![
        Transaction::build(
            TransactionType::Income,
            Category::ProductSales,
            date!(2025 - 03 - 07),
            Amount::from_whole(5000),
        )
        .description("Venda Marketplace"),
        Transaction::build(
            TransactionType::Expense,
            Category::DirectCosts,
            date!(2025 - 03 - 07),
            Amount::from_whole(500),
        )
        .description("Compra de Estoque"),
        Transaction::build(
            TransactionType::Expense,
            Category::OperatingExpenses,
            date!(2025 - 03 - 07),
            Amount::from_whole(200),
        )
        .description("Conta de Energia"),
    ]
}

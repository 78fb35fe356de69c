//! Table view listing every transaction, newest first.

use maud::{Markup, html};

use crate::{
    chart_of_accounts::TransactionType,
    color::Color,
    html::{
        CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    transaction::{Transaction, format_date},
};

const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for income, red for expenses).
fn amount_color_class(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => TABLE_CELL_GREEN_STYLE,
        TransactionType::Expense => TABLE_CELL_RED_STYLE,
    }
}

/// Renders the transaction list.
///
/// Expects `transactions` already ordered for display.
pub(super) fn transactions_table(transactions: &[&Transaction]) -> Markup {
    html! {
        section class="w-full mx-auto mb-8" {
            h3 class="text-xl font-semibold mb-4" { "Transações" }

            @if transactions.is_empty() {
                p class="text-gray-600 dark:text-gray-400" {
                    "Nenhuma transação registrada."
                }
            } @else {
                div id="transactions-table" class="overflow-x-auto rounded-lg shadow" {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                        thead class=(TABLE_HEADER_STYLE) {
                            tr {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Data" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Loja" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Tipo" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Categoria" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Descrição" }
                                th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Valor" }
                            }
                        }
                        tbody {
                            @for transaction in transactions {
                                (transaction_row(transaction))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let amount = format_currency(transaction.signed_amount());
    let badge_style = format!(
        "background-color: {}",
        Color::for_category(&transaction.category)
    );
    let amount_style = amount_color_class(transaction.transaction_type);

    html! {
        tr class=(TABLE_ROW_STYLE) {
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} {
                (format_date(transaction.date))
            }
            td class=(TABLE_CELL_STYLE) { (transaction.merchant_name) }
            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type) }
            td class=(TABLE_CELL_STYLE) {
                span
                    class=(CATEGORY_BADGE_STYLE)
                    style=(badge_style)
                {
                    (transaction.category)
                }
            }
            td class=(TABLE_CELL_STYLE) {
                (transaction.description.as_deref().unwrap_or(""))
            }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap " (amount_style)} {
                (amount)
            }
        }
    }
}

//! The full dashboard page.

use maud::{Markup, html};

use crate::{
    dashboard::{
        cards::headline_cards_view,
        charts::{charts_script, charts_view, dashboard_charts},
        summary::DashboardSummary,
        tables::transactions_table,
    },
    html::{PAGE_CONTAINER_STYLE, base},
    transaction::{TransactionStore, format_date},
};

/// Render the dashboard for `store` as a standalone HTML document.
///
/// `summary` should have been computed from the same `store`.
pub fn render_report(store: &TransactionStore, summary: &DashboardSummary) -> String {
    let charts = dashboard_charts(summary);
    let transactions = store.sorted_by_date_desc();

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE) {
            (header_view(summary))
            (headline_cards_view(summary))
            (charts_view(&charts))
            (transactions_table(&transactions))
        }
    };

    base("Painel", &[charts_script(&charts)], &content).into_string()
}

fn header_view(summary: &DashboardSummary) -> Markup {
    html! {
        header class="w-full flex justify-between items-baseline" {
            h1 class="text-2xl font-bold" { "Painel Financeiro" }

            span class="text-sm text-gray-600 dark:text-gray-400" {
                @match summary.last_updated {
                    Some(date) => { "Última atualização: " (format_date(date)) }
                    None => { "Sem transações" }
                }
            }
        }
    }
}

//! Card components for the headline figures.
//!
//! Shows one card per windowed total plus the current month's net income.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    dashboard::summary::{DashboardSummary, WindowedSeries},
    html::format_currency,
};

const TEXT_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TEXT_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Which colour a card's figure is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardTone {
    Revenue,
    Expense,
    /// Green when zero or positive, red otherwise.
    Signed,
}

fn tone_class(tone: CardTone, value: Decimal) -> &'static str {
    match tone {
        CardTone::Revenue => TEXT_GREEN_STYLE,
        CardTone::Expense => TEXT_RED_STYLE,
        CardTone::Signed if value >= Decimal::ZERO => TEXT_GREEN_STYLE,
        CardTone::Signed => TEXT_RED_STYLE,
    }
}

/// Renders the row of headline cards.
pub(super) fn headline_cards_view(summary: &DashboardSummary) -> Markup {
    html! {
        section class="w-full mx-auto mt-8 mb-8" {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4" {
                (windowed_card("Receitas", &summary.revenue, CardTone::Revenue))
                (windowed_card("Despesas", &summary.expenses, CardTone::Expense))
                (windowed_card("Lucro Líquido", &summary.net_income, CardTone::Signed))
                (headline_card(
                    "Lucro do Mês",
                    "Mês atual",
                    summary.current_month.net_income,
                    CardTone::Signed,
                ))
            }
        }
    }
}

fn windowed_card(title: &str, series: &WindowedSeries, tone: CardTone) -> Markup {
    headline_card(
        title,
        &format!("Período: {}", series.window),
        series.total,
        tone,
    )
}

fn headline_card(title: &str, subtitle: &str, value: Decimal, tone: CardTone) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            aria-label=(format!("{title}: {}", format_currency(value)))
        {
            div class="flex justify-between items-baseline mb-3" {
                h4 class="text-lg font-semibold truncate" { (title) }
                span class="text-sm text-gray-600 dark:text-gray-400" { (subtitle) }
            }

            div class={"text-3xl font-bold " (tone_class(tone, value))} {
                (format_currency(value))
            }
        }
    }
}

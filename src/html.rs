use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";
const TAILWIND_SCRIPT_URL: &str = "https://cdn.tailwindcss.com";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Category badge style
pub const CATEGORY_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-white rounded-full";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub enum HeadElement {
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

/// A complete, self-contained HTML document.
///
/// Styling and ECharts are loaded from public CDNs so the page can be opened
/// straight from disk.
pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Savenum" }

                script src=(TAILWIND_SCRIPT_URL) {}
                script src=(ECHARTS_SCRIPT_URL) {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                    }
                }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

/// Format `amount` as Brazilian reais, e.g. `R$ 1.234,56` or `-R$ 12,30`.
///
/// The amount is rounded to the nearest cent, and an amount that rounds to
/// zero is never shown with a minus sign.
pub fn format_currency(amount: Decimal) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("R$ ")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-R$ ")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if cents.is_zero() {
        // numfmt formats zero as "0", so it is spelled out here.
        return "R$ 0,00".to_owned();
    }

    let number = cents.abs().to_f64().unwrap_or_default();
    let formatted_string = if cents.is_sign_negative() {
        negative_fmt.fmt_string(number)
    } else {
        positive_fmt.fmt_string(number)
    };

    with_brazilian_separators(&formatted_string)
}

/// Swap numfmt's `1,234.5` separators for `1.234,50`.
///
/// numfmt drops trailing zeros from the cents, so they are added back.
fn with_brazilian_separators(formatted: &str) -> String {
    let swapped: String = formatted
        .chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            other => other,
        })
        .collect();

    match swapped.rsplit_once(',') {
        Some((whole, cents)) => format!("{whole},{cents:0<2}"),
        None => format!("{swapped},00"),
    }
}

#[cfg(test)]
mod tests {
    use maud::{PreEscaped, html};
    use rust_decimal::Decimal;
    use scraper::{Html, Selector};

    use crate::html::{HeadElement, base, format_currency, with_brazilian_separators};

    fn reais(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn formats_reais_with_brazilian_separators() {
        assert_eq!(format_currency(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_currency(reais("12.3")), "R$ 12,30");
        assert_eq!(format_currency(reais("0.05")), "R$ 0,05");
        assert_eq!(format_currency(reais("999.999")), "R$ 1.000,00");
        assert_eq!(format_currency(reais("1234.56")), "R$ 1.234,56");
        assert_eq!(format_currency(reais("1234567")), "R$ 1.234.567,00");
    }

    #[test]
    fn formats_negative_values_with_leading_minus() {
        assert_eq!(format_currency(reais("-4300.5")), "-R$ 4.300,50");
        assert_eq!(format_currency(reais("-0.001")), "R$ 0,00");
    }

    #[test]
    fn separators_are_swapped_and_cents_padded() {
        assert_eq!(with_brazilian_separators("R$ 1,234.5"), "R$ 1.234,50");
        assert_eq!(with_brazilian_separators("R$ 1,000"), "R$ 1.000,00");
        assert_eq!(with_brazilian_separators("-R$ 0.25"), "-R$ 0,25");
    }

    #[test]
    fn base_page_is_valid_html() {
        let page = base(
            "Painel",
            &[HeadElement::ScriptSource(PreEscaped("let x = 1;".to_owned()))],
            &html!(p { "Olá" }),
        )
        .into_string();

        let document = Html::parse_document(&page);
        assert!(
            document.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            document.errors
        );
        let title_selector = Selector::parse("title").unwrap();
        let title = document.select(&title_selector).next().unwrap();
        assert_eq!(title.text().collect::<String>(), "Painel - Savenum");

        let linked_selector = Selector::parse("script[src]").unwrap();
        assert_eq!(document.select(&linked_selector).count(), 2);

        let inline_selector = Selector::parse("script:not([src])").unwrap();
        assert_eq!(document.select(&inline_selector).count(), 1);
    }
}

//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations for the dashboard summary:
//! - **Expenses**, **Revenue** and **Net Income**: bar charts of daily totals
//!   over each chart's own date window
//! - **Receitas x Despesas** and **Categorias**: pie charts of the current
//!   month's composition
//!
//! Each chart is generated as a JSON configuration for the ECharts library and
//! rendered with a corresponding HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title, VisualMap, VisualMapPiece},
    datatype::DataPointItem,
    element::{AxisPointer, AxisPointerType, AxisType, ItemStyle, Orient, Tooltip, Trigger},
    series::{bar::Bar, pie::Pie},
};
use maud::{Markup, PreEscaped, html};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    color::{Color, EXPENSE_COLOR, REVENUE_COLOR},
    dashboard::{
        aggregation::{DailyTotal, Slice},
        summary::{DashboardSummary, WindowedSeries},
    },
    html::HeadElement,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(crate) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Builds every chart shown on the dashboard, in display order.
pub(crate) fn dashboard_charts(summary: &DashboardSummary) -> Vec<DashboardChart> {
    vec![
        DashboardChart {
            id: "expenses-chart",
            options: daily_bar_chart("Despesas", &summary.expenses, BarColor::Expense)
                .to_string(),
        },
        DashboardChart {
            id: "revenue-chart",
            options: daily_bar_chart("Receitas", &summary.revenue, BarColor::Revenue)
                .to_string(),
        },
        DashboardChart {
            id: "net-income-chart",
            options: daily_bar_chart("Lucro Líquido", &summary.net_income, BarColor::BySign)
                .to_string(),
        },
        DashboardChart {
            id: "type-composition-chart",
            options: pie_chart("Receitas x Despesas", &summary.current_month.by_type)
                .to_string(),
        },
        DashboardChart {
            id: "category-composition-chart",
            options: pie_chart("Categorias", &summary.current_month.by_category)
                .to_string(),
        },
    ]
}

/// Renders the HTML containers for dashboard charts.
pub(crate) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded bg-white shadow-lg"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with responsive resizing.
pub(crate) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id,
                // Keeps user-supplied names from closing the script element.
                chart.options.replace("</", "<\\/")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarColor {
    Expense,
    Revenue,
    /// Green for days with a profit, red for days with a loss.
    BySign,
}

fn daily_bar_chart(title: &str, series: &WindowedSeries, color: BarColor) -> Chart {
    let (labels, values) = label_and_value_pairs(&series.by_day);

    let bars = Bar::new().name(title).data(values);
    let bars = match color {
        BarColor::Expense => bars.item_style(solid_fill(EXPENSE_COLOR)),
        BarColor::Revenue => bars.item_style(solid_fill(REVENUE_COLOR)),
        BarColor::BySign => bars,
    };

    let mut chart = Chart::new()
        .title(
            Title::new()
                .text(title)
                .subtext(format!("Período: {}", series.window)),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value));

    if color == BarColor::BySign {
        let (loss, profit) = (EXPENSE_COLOR.to_string(), REVENUE_COLOR.to_string());
        chart = chart.visual_map(VisualMap::new().show(false).pieces(vec![
            VisualMapPiece::new().lt(0).color(loss.as_str()),
            VisualMapPiece::new().gte(0).color(profit.as_str()),
        ]));
    }

    chart.series(bars)
}

fn pie_chart(title: &str, slices: &[Slice]) -> Chart {
    let data: Vec<DataPointItem> = slices
        .iter()
        .map(|slice| {
            DataPointItem::new(chart_value(slice.value))
                .name(slice.name.as_str())
                .item_style(solid_fill(slice.color))
        })
        .collect();

    Chart::new()
        .title(Title::new().text(title).subtext("Mês atual"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(
            Legend::new()
                .orient(Orient::Vertical)
                .left("left")
                .top("middle"),
        )
        .series(
            Pie::new()
                .name(title)
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

fn solid_fill(color: Color) -> ItemStyle {
    ItemStyle::new().color(color.to_string().as_str())
}

/// ECharts plots plain numbers, so exact sums are converted only here.
fn chart_value(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Splits daily totals into x-axis labels and bar values.
fn label_and_value_pairs(totals: &[DailyTotal]) -> (Vec<String>, Vec<f64>) {
    totals
        .iter()
        .map(|total| (total.label.to_string(), chart_value(total.value)))
        .unzip()
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

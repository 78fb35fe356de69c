//! Everything the dashboard shows, computed for one point in time.

use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, PrimitiveDateTime};

use crate::{
    dashboard::{
        aggregation::{
            DailyTotal, MonthlyBreakdown, current_month_breakdown, expenses_by_day, net_income,
            net_income_by_day, revenue_by_day, total_expenses, total_revenue,
        },
        window::DateWindow,
    },
    transaction::TransactionStore,
};

/// The window chosen for each of the three by-day charts.
///
/// Each chart is filtered independently of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    /// The window for the expense chart and total.
    pub expenses_window: DateWindow,
    /// The window for the revenue chart and total.
    pub revenue_window: DateWindow,
    /// The window for the net income chart and total.
    pub net_income_window: DateWindow,
}

/// A by-day chart together with its headline figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowedSeries {
    /// The window the figures cover.
    pub window: DateWindow,
    /// The sum over the window.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// The window's transactions totalled per day.
    pub by_day: Vec<DailyTotal>,
}

/// The derived views of the store shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// When the summary was computed.
    #[serde(skip)]
    pub now: PrimitiveDateTime,
    /// The latest transaction date.
    #[serde(serialize_with = "serialize_optional_date")]
    pub last_updated: Option<Date>,
    /// Expenses over the expense window.
    pub expenses: WindowedSeries,
    /// Income over the revenue window.
    pub revenue: WindowedSeries,
    /// Income minus expenses over the net income window.
    pub net_income: WindowedSeries,
    /// The composition of the current calendar month.
    pub current_month: MonthlyBreakdown,
}

impl DashboardSummary {
    /// Compute the summary of `store` as seen at `now`.
    ///
    /// Nothing is cached, every call recomputes from the full store.
    pub fn compute(
        store: &TransactionStore,
        settings: DashboardSettings,
        now: PrimitiveDateTime,
    ) -> Self {
        let transactions = store.transactions();

        let expenses = WindowedSeries {
            window: settings.expenses_window,
            total: total_expenses(transactions, settings.expenses_window, now),
            by_day: expenses_by_day(transactions, settings.expenses_window, now),
        };
        let revenue = WindowedSeries {
            window: settings.revenue_window,
            total: total_revenue(transactions, settings.revenue_window, now),
            by_day: revenue_by_day(transactions, settings.revenue_window, now),
        };
        let net_income = WindowedSeries {
            window: settings.net_income_window,
            total: net_income(transactions, settings.net_income_window, now),
            by_day: net_income_by_day(transactions, settings.net_income_window, now),
        };

        tracing::debug!(
            "Computed dashboard summary for {} transactions at {now}",
            transactions.len()
        );

        Self {
            now,
            last_updated: store.last_updated(),
            expenses,
            revenue,
            net_income,
            current_month: current_month_breakdown(transactions, now),
        }
    }

    /// Serialize the summary as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [crate::Error::JsonSerialization] if serialization fails.
    pub fn to_json(&self) -> Result<String, crate::Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn serialize_optional_date<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&crate::transaction::format_date(*date)),
        None => serializer.serialize_none(),
    }
}

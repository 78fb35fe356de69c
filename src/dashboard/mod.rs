//! Dashboard module
//!
//! Turns the transaction store into the figures shown on the dashboard:
//! by-day totals over selectable date windows, the current month's
//! composition, and the HTML report that displays them.

mod aggregation;
mod cards;
mod charts;
mod summary;
mod tables;
mod view;
mod window;

pub use aggregation::{
    DailyTotal, DayLabel, MonthlyBreakdown, Slice, current_month_breakdown, expenses_by_day,
    in_window, net_income, net_income_by_day, revenue_by_day, total_expenses, total_revenue,
};
pub use summary::{DashboardSettings, DashboardSummary, WindowedSeries};
pub use view::render_report;
pub use window::{DateWindow, ParseDateWindowError, is_in_current_month};

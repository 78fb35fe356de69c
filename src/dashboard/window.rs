//! Date windows that limit which transactions a chart covers.

use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

use serde::Serialize;
use time::{Date, Duration, Month, PrimitiveDateTime};

/// How far back from now a chart looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DateWindow {
    /// The last seven days.
    #[serde(rename = "1W")]
    LastWeek,
    /// The last calendar month.
    #[default]
    #[serde(rename = "1M")]
    LastMonth,
    /// The last calendar year.
    #[serde(rename = "1Y")]
    LastYear,
    /// Every transaction.
    #[serde(rename = "ALL")]
    AllTime,
}

impl DateWindow {
    /// All windows in the order they are offered.
    pub const ALL: [DateWindow; 4] = [
        DateWindow::LastWeek,
        DateWindow::LastMonth,
        DateWindow::LastYear,
        DateWindow::AllTime,
    ];

    /// The short label shown on the window selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::LastWeek => "1W",
            Self::LastMonth => "1M",
            Self::LastYear => "1Y",
            Self::AllTime => "ALL",
        }
    }

    /// The inclusive range `[now - duration, now]`, or `None` for
    /// [DateWindow::AllTime].
    pub fn bounds(self, now: PrimitiveDateTime) -> Option<RangeInclusive<PrimitiveDateTime>> {
        let start = match self {
            Self::LastWeek => now - Duration::days(7),
            Self::LastMonth => now.replace_date(previous_month(now.date())),
            Self::LastYear => now.replace_date(previous_year(now.date())),
            Self::AllTime => return None,
        };

        Some(start..=now)
    }

    /// Whether a transaction dated `date` falls inside the window ending `now`.
    ///
    /// Transactions are treated as happening at the start of their day.
    pub fn contains(self, date: Date, now: PrimitiveDateTime) -> bool {
        match self.bounds(now) {
            Some(bounds) => bounds.contains(&date.midnight()),
            None => true,
        }
    }
}

impl Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The string is not one of the window labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a date window, expected one of 1W, 1M, 1Y or ALL")]
pub struct ParseDateWindowError(pub String);

impl FromStr for DateWindow {
    type Err = ParseDateWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateWindow::ALL
            .into_iter()
            .find(|window| window.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDateWindowError(s.to_owned()))
    }
}

/// Whether `date` is in the same calendar month as `now`.
pub fn is_in_current_month(date: Date, now: PrimitiveDateTime) -> bool {
    date.year() == now.year() && date.month() == now.month()
}

/// The same day one month earlier, clamped to the length of that month.
fn previous_month(date: Date) -> Date {
    let (year, month) = match date.month() {
        Month::January => (date.year() - 1, Month::December),
        month => (date.year(), month.previous()),
    };

    clamped_date(year, month, date.day())
}

/// The same day one year earlier, 29 February becomes 28 February.
fn previous_year(date: Date) -> Date {
    clamped_date(date.year() - 1, date.month(), date.day())
}

/// Only a year outside the range `time` supports can fail, and then the
/// earliest supported date is used.
fn clamped_date(year: i32, month: Month, day: u8) -> Date {
    let day = day.min(month.length(year));
    Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN)
}

#[cfg(test)]
mod tests {
    use time::{
        Date,
        macros::{date, datetime},
    };

    use crate::dashboard::window::{DateWindow, is_in_current_month, previous_year};

    #[test]
    fn all_time_has_no_bounds() {
        let now = datetime!(2025 - 03 - 07 12:00);

        assert_eq!(DateWindow::AllTime.bounds(now), None);
        assert!(DateWindow::AllTime.contains(date!(1999 - 01 - 01), now));
        assert!(DateWindow::AllTime.contains(date!(2099 - 01 - 01), now));
    }

    #[test]
    fn last_week_is_seven_days_before_now() {
        let now = datetime!(2025 - 03 - 07 12:00);

        let bounds = DateWindow::LastWeek.bounds(now).unwrap();

        assert_eq!(*bounds.start(), datetime!(2025 - 02 - 28 12:00));
        assert_eq!(*bounds.end(), now);
    }

    #[test]
    fn start_of_window_is_inclusive_at_midnight() {
        let now = datetime!(2025 - 03 - 07 00:00);

        assert!(DateWindow::LastWeek.contains(date!(2025 - 02 - 28), now));
        assert!(!DateWindow::LastWeek.contains(date!(2025 - 02 - 27), now));
    }

    #[test]
    fn first_day_drops_out_once_now_passes_midnight() {
        let now = datetime!(2025 - 03 - 07 09:30);

        assert!(!DateWindow::LastWeek.contains(date!(2025 - 02 - 28), now));
        assert!(DateWindow::LastWeek.contains(date!(2025 - 03 - 01), now));
    }

    #[test]
    fn today_is_inside_and_tomorrow_is_outside() {
        let now = datetime!(2025 - 03 - 07 09:30);

        for window in [
            DateWindow::LastWeek,
            DateWindow::LastMonth,
            DateWindow::LastYear,
        ] {
            assert!(window.contains(date!(2025 - 03 - 07), now), "{window}");
            assert!(!window.contains(date!(2025 - 03 - 08), now), "{window}");
        }
    }

    #[test]
    fn last_month_clamps_to_shorter_month() {
        let bounds = DateWindow::LastMonth
            .bounds(datetime!(2025 - 03 - 31 00:00))
            .unwrap();
        assert_eq!(*bounds.start(), datetime!(2025 - 02 - 28 00:00));

        let bounds = DateWindow::LastMonth
            .bounds(datetime!(2024 - 03 - 31 00:00))
            .unwrap();
        assert_eq!(*bounds.start(), datetime!(2024 - 02 - 29 00:00));
    }

    #[test]
    fn year_before_earliest_date_stays_at_earliest_date() {
        assert_eq!(previous_year(Date::MIN), Date::MIN);
    }

    #[test]
    fn last_month_crosses_year_boundary() {
        let bounds = DateWindow::LastMonth
            .bounds(datetime!(2025 - 01 - 15 08:00))
            .unwrap();

        assert_eq!(*bounds.start(), datetime!(2024 - 12 - 15 08:00));
    }

    #[test]
    fn last_year_moves_leap_day_to_28th() {
        let bounds = DateWindow::LastYear
            .bounds(datetime!(2024 - 02 - 29 00:00))
            .unwrap();

        assert_eq!(*bounds.start(), datetime!(2023 - 02 - 28 00:00));
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("1w".parse(), Ok(DateWindow::LastWeek));
        assert_eq!("1M".parse(), Ok(DateWindow::LastMonth));
        assert_eq!("1y".parse(), Ok(DateWindow::LastYear));
        assert_eq!("all".parse(), Ok(DateWindow::AllTime));
        assert!("2W".parse::<DateWindow>().is_err());
    }

    #[test]
    fn default_window_is_last_month() {
        assert_eq!(DateWindow::default(), DateWindow::LastMonth);
    }

    #[test]
    fn current_month_ignores_other_years() {
        let now = datetime!(2025 - 03 - 15 10:00);

        assert!(is_in_current_month(date!(2025 - 03 - 01), now));
        assert!(is_in_current_month(date!(2025 - 03 - 31), now));
        assert!(!is_in_current_month(date!(2024 - 03 - 15), now));
        assert!(!is_in_current_month(date!(2025 - 04 - 01), now));
    }
}

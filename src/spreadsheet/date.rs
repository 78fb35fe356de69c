//! Reading dates from spreadsheet cells.

use time::{
    Date, Duration, format_description::BorrowedFormatItem,
    macros::{date, format_description},
};

use crate::transaction::DATE_FORMAT;

const SLASH_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

/// Day zero of spreadsheet date serials.
///
/// Serial 1 is 31 December 1899 rather than 1 January 1900 because of the
/// leap year bug carried over from Lotus 1-2-3. Using 30 December as the
/// epoch gives the right date for every serial from 61 (1 March 1900) on.
const SERIAL_EPOCH: Date = date!(1899 - 12 - 30);

/// Interpret a spreadsheet cell as a date.
///
/// A number is taken as a date serial, its fractional (time of day) part is
/// ignored. Text is tried as `dd-MM-yyyy` and then `dd/MM/yyyy`.
///
/// Returns `None` if the cell is not a valid calendar date.
pub(super) fn parse_cell_date(cell: &str) -> Option<Date> {
    let cell = cell.trim();

    if let Ok(serial) = cell.parse::<f64>() {
        return date_from_serial(serial);
    }

    Date::parse(cell, DATE_FORMAT)
        .or_else(|_| Date::parse(cell, SLASH_DATE_FORMAT))
        .ok()
}

fn date_from_serial(serial: f64) -> Option<Date> {
    if !serial.is_finite() {
        return None;
    }

    let days = serial.floor();
    if days.abs() > i32::MAX as f64 {
        return None;
    }

    SERIAL_EPOCH.checked_add(Duration::days(days as i64))
}

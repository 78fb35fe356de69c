//! Application settings resolved at start-up.

use crate::transaction::{DEFAULT_MERCHANT_ID, DEFAULT_MERCHANT_NAME};

/// The canonical timezone used when none is given.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Settings shared by the library entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Canonical timezone name, e.g. "America/Sao_Paulo", used to get the
    /// current local date and time.
    pub timezone: String,
    /// Whether a fresh store starts with the sample transactions.
    pub seed_sample_data: bool,
    /// Values filled in for cells left blank in imported spreadsheets.
    pub import_defaults: ImportDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_owned(),
            seed_sample_data: true,
            import_defaults: ImportDefaults::default(),
        }
    }
}

/// The merchant assigned to imported rows that do not name one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDefaults {
    /// Used when `merchantId` is blank, zero or not a number.
    pub merchant_id: i64,
    /// Used when `merchantName` is blank.
    pub merchant_name: String,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            merchant_id: DEFAULT_MERCHANT_ID,
            merchant_name: DEFAULT_MERCHANT_NAME.to_owned(),
        }
    }
}

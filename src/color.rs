//! Display colours for transaction types and categories.

use std::fmt::Display;

use serde::{Serialize, Serializer};

use crate::chart_of_accounts::{Category, TransactionType};

/// An RGB colour, displayed as a `#RRGGBB` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

/// The colour for income.
pub const REVENUE_COLOR: Color = Color::from_hex(0x10B981);
/// The colour for expenses.
pub const EXPENSE_COLOR: Color = Color::from_hex(0xEF4444);

impl Color {
    /// Create a colour from its red, green and blue components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// The colour used for slices and series of `transaction_type`.
    pub fn for_type(transaction_type: TransactionType) -> Self {
        match transaction_type {
            TransactionType::Income => REVENUE_COLOR,
            TransactionType::Expense => EXPENSE_COLOR,
        }
    }

    /// The colour used for `category` in charts.
    ///
    /// Categories outside the chart of accounts get a colour derived from the
    /// MD5 digest of their name, so the same name always gets the same colour.
    pub fn for_category(category: &Category) -> Self {
        match category {
            Category::ProductSales => Self::from_hex(0x3B82F6),
            Category::CustomerPaidShipping => Self::from_hex(0x6366F1),
            Category::FinancialIncome => Self::from_hex(0x8B5CF6),
            Category::OtherIncome => Self::from_hex(0xEC4899),
            Category::DirectCosts => Self::from_hex(0xF59E0B),
            Category::MerchandisePurchases => Self::from_hex(0xD97706),
            Category::PackagingAndSupplies => Self::from_hex(0xB45309),
            Category::ShippingAndLogistics => Self::from_hex(0x92400E),
            Category::MarketplaceCommissions => Self::from_hex(0x059669),
            Category::PaymentFees => Self::from_hex(0x047857),
            Category::OperatingExpenses => Self::from_hex(0xDC2626),
            Category::PlatformsAndTools => Self::from_hex(0xB91C1C),
            Category::MarketingAndAdvertising => Self::from_hex(0x991B1B),
            Category::TaxesAndFees => Self::from_hex(0x7F1D1D),
            Category::EquipmentAndMaintenance => Self::from_hex(0x4B5563),
            Category::Unknown(name) => {
                let digest = md5::compute(name.as_bytes()).0;
                Self::rgb(digest[0], digest[1], digest[2])
            }
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        chart_of_accounts::{Category, TransactionType, entries},
        color::{Color, EXPENSE_COLOR, REVENUE_COLOR},
    };

    #[test]
    fn displays_as_upper_case_hex() {
        assert_eq!(Color::from_hex(0x3B82F6).to_string(), "#3B82F6");
        assert_eq!(Color::rgb(0, 10, 255).to_string(), "#000AFF");
    }

    #[test]
    fn type_colors_are_green_and_red() {
        assert_eq!(Color::for_type(TransactionType::Income), REVENUE_COLOR);
        assert_eq!(Color::for_type(TransactionType::Expense), EXPENSE_COLOR);
        assert_eq!(REVENUE_COLOR.to_string(), "#10B981");
        assert_eq!(EXPENSE_COLOR.to_string(), "#EF4444");
    }

    #[test]
    fn known_categories_use_palette() {
        assert_eq!(
            Color::for_category(&Category::ProductSales).to_string(),
            "#3B82F6"
        );
        assert_eq!(
            Color::for_category(&Category::EquipmentAndMaintenance).to_string(),
            "#4B5563"
        );
    }

    #[test]
    fn every_chart_category_has_a_distinct_color() {
        let mut colors: Vec<Color> = entries()
            .map(|entry| Color::for_category(entry.category))
            .collect();
        colors.sort_by_key(|color| color.to_string());
        colors.dedup();

        assert_eq!(colors.len(), 15);
    }

    #[test]
    fn unknown_category_color_is_deterministic() {
        let first = Color::for_category(&Category::Unknown("Conta de Energia".to_owned()));
        let second = Color::for_category(&Category::Unknown("Conta de Energia".to_owned()));
        let other = Color::for_category(&Category::Unknown("Compra de Estoque".to_owned()));

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&REVENUE_COLOR).unwrap();

        assert_eq!(json, "\"#10B981\"");
    }
}

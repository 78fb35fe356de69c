//! The chart of accounts: the two transaction types and the categories each
//! type permits.
//!
//! The chart is fixed configuration data. It is used to constrain the
//! category of a transaction to its type, to pick a sensible category when the
//! type changes, and to produce the reference spreadsheet that explains each
//! category to the merchant.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransactionType {
    /// Money earned, shown as "Receita".
    #[serde(rename = "Receita")]
    Income,
    /// Money spent, shown as "Despesa".
    #[serde(rename = "Despesa")]
    Expense,
}

impl TransactionType {
    /// The display label used in spreadsheets and reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Receita",
            Self::Expense => "Despesa",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The string could not be interpreted as a [TransactionType].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a transaction type, expected \"Receita\" or \"Despesa\"")]
pub struct ParseTransactionTypeError(pub String);

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Receita" | "Income" => Ok(Self::Income),
            "Despesa" | "Expense" => Ok(Self::Expense),
            other => Err(ParseTransactionTypeError(other.to_owned())),
        }
    }
}

/// The second level of the chart of accounts.
///
/// Categories outside the chart can still show up, for example when a
/// transaction is edited by hand, and are kept as [Category::Unknown] so the
/// original name is not lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// Money received from the sales platforms.
    ProductSales,
    /// Shipping paid for by the customer.
    CustomerPaidShipping,
    /// Cashback and interest on account balances.
    FinancialIncome,
    /// Refunds and promotional bonuses.
    OtherIncome,
    /// Costs directly related to a sale.
    DirectCosts,
    /// Purchases from suppliers and manufacturing.
    MerchandisePurchases,
    /// Boxes, labels, tape and protective material.
    PackagingAndSupplies,
    /// Shipping, pickups and carriers.
    ShippingAndLogistics,
    /// Fees charged by the marketplaces.
    MarketplaceCommissions,
    /// Card, PIX and advance payment fees.
    PaymentFees,
    /// Fixed and variable running costs.
    OperatingExpenses,
    /// ERP, software and paid listings.
    PlatformsAndTools,
    /// Sponsored ads and influencers.
    MarketingAndAdvertising,
    /// MEI, Simples Nacional and invoice taxes.
    TaxesAndFees,
    /// Computers, printers and rent.
    EquipmentAndMaintenance,
    /// A category that is not part of the chart of accounts.
    Unknown(String),
}

impl Category {
    /// Look up a category by its display name.
    ///
    /// Names that are not in the chart of accounts produce [Category::Unknown].
    pub fn from_name(name: &str) -> Self {
        ALL_CATEGORIES
            .iter()
            .flat_map(|categories| categories.iter())
            .find(|category| category.name() == name)
            .cloned()
            .unwrap_or_else(|| Self::Unknown(name.to_owned()))
    }

    /// The display name of the category.
    pub fn name(&self) -> &str {
        match self {
            Self::ProductSales => "Vendas de Produtos",
            Self::CustomerPaidShipping => "Frete Pago pelo Cliente",
            Self::FinancialIncome => "Receitas Financeiras",
            Self::OtherIncome => "Outras Receitas",
            Self::DirectCosts => "Custos Diretos",
            Self::MerchandisePurchases => "Compra de Mercadorias",
            Self::PackagingAndSupplies => "Embalagens e Insumos",
            Self::ShippingAndLogistics => "Frete e Logística",
            Self::MarketplaceCommissions => "Comissões dos Marketplaces",
            Self::PaymentFees => "Taxas de Pagamento",
            Self::OperatingExpenses => "Despesas Operacionais",
            Self::PlatformsAndTools => "Plataformas e Ferramentas",
            Self::MarketingAndAdvertising => "Marketing e Publicidade",
            Self::TaxesAndFees => "Impostos e Taxas",
            Self::EquipmentAndMaintenance => "Equipamentos e Manutenção",
            Self::Unknown(name) => name,
        }
    }

    /// The explanation shown in the chart of accounts reference, `None` for
    /// unknown categories.
    pub fn description(&self) -> Option<&'static str> {
        let description = match self {
            Self::ProductSales => "Valor recebido das plataformas",
            Self::CustomerPaidShipping => "Quando o cliente arca com a entrega",
            Self::FinancialIncome => "Cashback, juros sobre saldo em conta",
            Self::OtherIncome => "Reembolsos e bônus promocionais",
            Self::DirectCosts => "Custos relacionados à venda",
            Self::MerchandisePurchases => "Custos com fornecedores e fabricação",
            Self::PackagingAndSupplies => "Caixas, etiquetas, fitas, proteção",
            Self::ShippingAndLogistics => "Custos com envio, coletas e transportadoras",
            Self::MarketplaceCommissions => "Taxas cobradas pelos marketplaces",
            Self::PaymentFees => "Tarifas de antecipação, taxas do cartão e PIX",
            Self::OperatingExpenses => "Custos fixos e variáveis do negócio",
            Self::PlatformsAndTools => "ERP, softwares, anúncios pagos",
            Self::MarketingAndAdvertising => "Anúncios patrocinados, influencers",
            Self::TaxesAndFees => "MEI, Simples Nacional, notas fiscais",
            Self::EquipmentAndMaintenance => "Computador, impressora, aluguel",
            Self::Unknown(_) => return None,
        };

        Some(description)
    }

    /// The transaction type this category belongs to, `None` for unknown
    /// categories.
    pub fn transaction_type(&self) -> Option<TransactionType> {
        match self {
            Self::ProductSales
            | Self::CustomerPaidShipping
            | Self::FinancialIncome
            | Self::OtherIncome => Some(TransactionType::Income),
            Self::Unknown(_) => None,
            _ => Some(TransactionType::Expense),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::from_name(value)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Unknown(name) => name,
            category => category.name().to_owned(),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Category::from)
    }
}

const INCOME_CATEGORIES: &[Category] = &[
    Category::ProductSales,
    Category::CustomerPaidShipping,
    Category::FinancialIncome,
    Category::OtherIncome,
];

const EXPENSE_CATEGORIES: &[Category] = &[
    Category::DirectCosts,
    Category::MerchandisePurchases,
    Category::PackagingAndSupplies,
    Category::ShippingAndLogistics,
    Category::MarketplaceCommissions,
    Category::PaymentFees,
    Category::OperatingExpenses,
    Category::PlatformsAndTools,
    Category::MarketingAndAdvertising,
    Category::TaxesAndFees,
    Category::EquipmentAndMaintenance,
];

const ALL_CATEGORIES: [&[Category]; 2] = [INCOME_CATEGORIES, EXPENSE_CATEGORIES];

/// The categories permitted for `transaction_type`, in display order.
pub fn categories(transaction_type: TransactionType) -> &'static [Category] {
    match transaction_type {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

/// The category to select when a transaction is switched to `transaction_type`.
pub fn default_category(transaction_type: TransactionType) -> Category {
    match transaction_type {
        TransactionType::Income => Category::ProductSales,
        TransactionType::Expense => Category::DirectCosts,
    }
}

/// Whether `category` may be used for a transaction of `transaction_type`.
pub fn permits(transaction_type: TransactionType, category: &Category) -> bool {
    categories(transaction_type).contains(category)
}

/// A row of the chart of accounts reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartEntry {
    /// The type the category belongs to.
    pub transaction_type: TransactionType,
    /// The category.
    pub category: &'static Category,
    /// What the category is used for.
    pub description: &'static str,
}

/// Every row of the chart of accounts, income categories first.
pub fn entries() -> impl Iterator<Item = ChartEntry> {
    [TransactionType::Income, TransactionType::Expense]
        .into_iter()
        .flat_map(|transaction_type| {
            categories(transaction_type)
                .iter()
                .map(move |category| ChartEntry {
                    transaction_type,
                    category,
                    description: category.description().unwrap_or_default(),
                })
        })
}

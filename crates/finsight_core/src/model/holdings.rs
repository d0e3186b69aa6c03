//! Investment holding definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad asset class used for allocation and correlation grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Stock,
    Bond,
    Cash,
    RealEstate,
    Commodity,
    Crypto,
    Other,
}

impl AssetClass {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Stock => "Stocks",
            AssetClass::Bond => "Bonds",
            AssetClass::Cash => "Cash",
            AssetClass::RealEstate => "Real Estate",
            AssetClass::Commodity => "Commodities",
            AssetClass::Crypto => "Crypto",
            AssetClass::Other => "Other",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tax treatment of the account a holding sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxLocation {
    /// Regular brokerage - dividends and realized gains taxed yearly
    Taxable,
    /// 401k, Traditional IRA - taxed as income on withdrawal
    TaxDeferred,
    /// Roth IRA, Roth 401k, HSA - qualified withdrawals untaxed
    TaxFree,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentHolding {
    pub symbol: String,
    /// Current market value
    pub value: f64,
    /// Total amount paid for the position
    pub cost_basis: f64,
    pub asset_class: AssetClass,
    pub tax_location: TaxLocation,
    /// Annual expense ratio in percent (0.03 means 0.03%)
    #[serde(default)]
    pub expense_ratio: Option<f64>,
    /// Trailing dividend yield in percent
    #[serde(default)]
    pub dividend_yield: Option<f64>,
}

impl InvestmentHolding {
    #[must_use]
    pub fn unrealized_gain(&self) -> f64 {
        self.value - self.cost_basis
    }
}

//! Aggregate results returned by the analytics components
//!
//! Percentages in these structures are on a 0-100 scale.

use serde::{Deserialize, Serialize};

use super::holdings::AssetClass;
use super::tax::AppliedBracket;

// ============================================================================
// Paycheck
// ============================================================================

/// Take-home estimate produced by the paycheck simulator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub gross: f64,
    pub total_pre_tax: f64,
    pub total_post_tax: f64,
    /// Gross minus pre-tax deductions, never below zero
    pub taxable_income: f64,
    pub total_tax: f64,
    pub take_home: f64,
    /// `total_tax / gross` as a fraction
    pub effective_rate: f64,
    pub applied_brackets: Vec<AppliedBracket>,
}

/// A [`SimulationResult`] divided into a single pay period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaycheckBreakdown {
    pub periods_per_year: u32,
    pub gross: f64,
    pub pre_tax: f64,
    pub tax: f64,
    pub post_tax: f64,
    pub take_home: f64,
}

// ============================================================================
// Cashflow
// ============================================================================

/// Totals for one calendar month of a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    pub year: i16,
    pub month: i8,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Change between the last two months of a trend
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthOverMonth {
    pub income_delta: f64,
    pub expenses_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub monthly_amount: f64,
    /// Share of projected expenses
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashflowForecast {
    pub projected_income: f64,
    pub projected_expenses: f64,
    pub net_cashflow: f64,
    /// `net_cashflow / projected_income * 100`, 0 without income
    pub savings_rate: f64,
    pub monthly_trend: Vec<MonthPoint>,
    pub month_over_month: MonthOverMonth,
    /// Projected expenses per category, largest first
    pub expenses_by_category: Vec<CategoryTotal>,
}

// ============================================================================
// Diversification
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceBreakdown {
    pub source_name: String,
    pub percentage: f64,
    /// Points this source adds to the stability score
    pub score_contribution: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiversificationMetrics {
    pub overall_score: f64,
    pub source_count: usize,
    pub primary_dependency_pct: f64,
    pub stability_score: f64,
    pub growth_potential: f64,
    pub breakdown: Vec<SourceBreakdown>,
}

// ============================================================================
// Portfolio
// ============================================================================

/// Holdings grouped under one asset class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetClassBucket {
    pub asset_class: AssetClass,
    pub total_value: f64,
    pub holding_count: usize,
    pub current_allocation_pct: f64,
    pub target_allocation_pct: Option<f64>,
    /// `current - target`, present only when a target exists
    pub drift_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPerformance {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_gain: f64,
    pub total_gain_pct: f64,
    /// Value-weighted expense ratio in percent
    pub weighted_expense_ratio: f64,
    /// Value-weighted dividend yield in percent
    pub weighted_dividend_yield: f64,
    pub estimated_annual_fees: f64,
    pub estimated_annual_income: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxEfficiency {
    pub taxable_value: f64,
    pub tax_deferred_value: f64,
    pub tax_free_value: f64,
    /// 0-100, higher when more value sits in tax-advantaged accounts
    pub efficiency_score: f64,
    pub recommendations: Vec<String>,
}

/// Heuristic pairwise correlation estimate between holdings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub assets: Vec<String>,
    /// Row-major, `matrix[i][j]` pairs `assets[i]` with `assets[j]`
    pub matrix: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.assets.iter().position(|s| s == a)?;
        let j = self.assets.iter().position(|s| s == b)?;
        Some(self.matrix[i][j])
    }
}

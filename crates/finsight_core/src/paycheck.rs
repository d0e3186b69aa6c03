//! Paycheck simulation: pre-tax deductions, progressive tax, post-tax deductions

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result, check_amount};
use crate::model::{
    Deduction, PaycheckBreakdown, Recurrence, SimulationResult, TaxBracket, TaxClass,
};
use crate::taxes::compute_tax;

/// Deductions for one simulation request, split by tax treatment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaycheckDeductions {
    #[serde(default)]
    pub pre_tax: Vec<Deduction>,
    #[serde(default)]
    pub post_tax: Vec<Deduction>,
}

impl PaycheckDeductions {
    /// Split a mixed list by each deduction's `tax_class`
    pub fn from_deductions(deductions: impl IntoIterator<Item = Deduction>) -> Self {
        let (pre_tax, post_tax) = deductions
            .into_iter()
            .partition(|d| d.tax_class == TaxClass::PreTax);
        Self { pre_tax, post_tax }
    }
}

fn sum_deductions(deductions: &[Deduction]) -> Result<f64> {
    deductions
        .iter()
        .try_fold(0.0, |acc, d| -> Result<f64> {
            Ok(acc + check_amount("deduction", d.amount)?)
        })
}

/// Estimate take-home pay for `base_salary`.
///
/// Pre-tax deductions exceeding the salary clamp taxable income at zero. The
/// take-home figure is not clamped: post-tax deductions larger than the
/// remaining pay show up as a negative take-home.
pub fn simulate(
    base_salary: f64,
    deductions: &PaycheckDeductions,
    brackets: &[TaxBracket],
) -> Result<SimulationResult> {
    if !base_salary.is_finite() || base_salary <= 0.0 {
        return Err(AnalyticsError::InvalidSalary(base_salary));
    }

    let total_pre_tax = sum_deductions(&deductions.pre_tax)?;
    let total_post_tax = sum_deductions(&deductions.post_tax)?;

    let taxable_income = (base_salary - total_pre_tax).max(0.0);
    let tax = compute_tax(taxable_income, brackets)?;
    let take_home = taxable_income - tax.total_tax - total_post_tax;

    Ok(SimulationResult {
        gross: base_salary,
        total_pre_tax,
        total_post_tax,
        taxable_income,
        total_tax: tax.total_tax,
        take_home,
        effective_rate: tax.total_tax / base_salary,
        applied_brackets: tax.applied_brackets,
    })
}

impl SimulationResult {
    /// Divide an annual simulation into one pay period. One-time pay is a
    /// single period.
    #[must_use]
    pub fn per_period(&self, recurrence: Recurrence) -> PaycheckBreakdown {
        let periods = recurrence.periods_per_year().unwrap_or(1);
        let divisor = f64::from(periods);
        PaycheckBreakdown {
            periods_per_year: periods,
            gross: self.gross / divisor,
            pre_tax: self.total_pre_tax / divisor,
            tax: self.total_tax / divisor,
            post_tax: self.total_post_tax / divisor,
            take_home: self.take_home / divisor,
        }
    }
}

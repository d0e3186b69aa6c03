//! Recurrence normalization
//!
//! Every downstream component compares records through their monthly
//! equivalent. The conversion factors are exact ratios; call sites never
//! approximate them (a weekly amount is `52/12` months, not `4.33`).

use crate::error::{Result, check_amount};
use crate::model::Recurrence;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Multiplier converting one occurrence into its monthly equivalent
#[must_use]
pub fn monthly_factor(recurrence: Recurrence) -> f64 {
    match recurrence.periods_per_year() {
        Some(periods) => f64::from(periods) / MONTHS_PER_YEAR,
        // One-time amounts land whole in the month they occur
        None => 1.0,
    }
}

/// Normalize an amount to a per-month figure.
///
/// One-time amounts (`Recurrence::None`) are returned unchanged: they count
/// fully in their occurrence month and are never amortized.
pub fn monthly_equivalent(amount: f64, recurrence: Recurrence) -> Result<f64> {
    let amount = check_amount("amount", amount)?;
    Ok(amount * monthly_factor(recurrence))
}

/// Normalize an amount to a per-year figure. One-time amounts are returned
/// unchanged.
pub fn annual_equivalent(amount: f64, recurrence: Recurrence) -> Result<f64> {
    let amount = check_amount("amount", amount)?;
    Ok(match recurrence.periods_per_year() {
        Some(periods) => amount * f64::from(periods),
        None => amount,
    })
}

/// Parse a textual recurrence tag and normalize in one step
pub fn monthly_equivalent_tagged(amount: f64, recurrence: &str) -> Result<f64> {
    monthly_equivalent(amount, recurrence.parse()?)
}

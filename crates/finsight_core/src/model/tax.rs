use serde::{Deserialize, Serialize};

use crate::error::{BracketTableError, Result};

const BOUND_TOLERANCE: f64 = 1e-9;

/// A contiguous income range taxed at a single marginal rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: f64,
    /// `None` means the bracket extends to infinity
    #[serde(default)]
    pub upper_bound: Option<f64>,
    /// Marginal rate as a fraction (0.22 for 22%)
    pub rate: f64,
}

impl TaxBracket {
    #[must_use]
    pub fn new(lower_bound: f64, upper_bound: Option<f64>, rate: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate,
        }
    }

    /// Width of the bracket, infinite for the top bracket
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper_bound
            .map_or(f64::INFINITY, |upper| upper - self.lower_bound)
    }
}

/// Check that brackets ascend from zero, are contiguous, end unbounded, and
/// carry rates in `[0, 1]`.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<()> {
    let Some(first) = brackets.first() else {
        return Err(BracketTableError::Empty.into());
    };
    if first.lower_bound.abs() > BOUND_TOLERANCE || !first.lower_bound.is_finite() {
        return Err(BracketTableError::NonZeroStart(first.lower_bound).into());
    }

    let last_index = brackets.len() - 1;
    for (index, bracket) in brackets.iter().enumerate() {
        if !bracket.rate.is_finite() || bracket.rate < 0.0 || bracket.rate > 1.0 {
            return Err(BracketTableError::InvalidRate {
                index,
                rate: bracket.rate,
            }
            .into());
        }

        if index > 0 {
            // Safe: every bracket before the last was checked to be bounded
            let expected = brackets[index - 1].upper_bound.unwrap_or(f64::INFINITY);
            if (bracket.lower_bound - expected).abs() > BOUND_TOLERANCE
                || !bracket.lower_bound.is_finite()
            {
                return Err(BracketTableError::Gap {
                    index,
                    expected,
                    found: bracket.lower_bound,
                }
                .into());
            }
        }

        match bracket.upper_bound {
            Some(upper) if !(upper > bracket.lower_bound) => {
                return Err(BracketTableError::Descending { index }.into());
            }
            Some(_) if index == last_index => return Err(BracketTableError::BoundedTop.into()),
            None if index != last_index => {
                return Err(BracketTableError::UnboundedBeforeEnd { index }.into());
            }
            _ => {}
        }
    }

    Ok(())
}

pub(crate) fn brackets_from_thresholds(thresholds: &[(f64, f64)]) -> Vec<TaxBracket> {
    thresholds
        .iter()
        .enumerate()
        .map(|(i, &(lower, rate))| {
            let upper = thresholds.get(i + 1).map(|&(next, _)| next);
            TaxBracket::new(lower, upper, rate)
        })
        .collect()
}

/// A bracket table that has passed [`validate_brackets`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxTable {
    brackets: Vec<TaxBracket>,
}

impl TaxTable {
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self> {
        validate_brackets(&brackets)?;
        Ok(Self { brackets })
    }

    /// Build a table from `(threshold, rate)` pairs where each threshold is
    /// the start of a bracket.
    pub fn from_thresholds(thresholds: &[(f64, f64)]) -> Result<Self> {
        Self::new(brackets_from_thresholds(thresholds))
    }

    /// Wrap brackets known to be valid, such as built-in tables
    pub(crate) fn from_trusted(brackets: Vec<TaxBracket>) -> Self {
        debug_assert!(validate_brackets(&brackets).is_ok());
        Self { brackets }
    }

    #[must_use]
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    #[must_use]
    pub fn top_rate(&self) -> f64 {
        self.brackets.iter().map(|b| b.rate).fold(0.0, f64::max)
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxTable {
    type Error = crate::error::AnalyticsError;

    fn try_from(value: Vec<TaxBracket>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TaxTable> for Vec<TaxBracket> {
    fn from(value: TaxTable) -> Self {
        value.brackets
    }
}

impl AsRef<[TaxBracket]> for TaxTable {
    fn as_ref(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

/// Income range covered by an applied bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketRange {
    pub lower: f64,
    pub upper: Option<f64>,
}

/// One bracket's share of a tax computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedBracket {
    pub rate: f64,
    /// Tax owed within this bracket
    pub amount: f64,
    pub range: BracketRange,
    /// Portion of taxable income that fell in this bracket
    pub taxable_in_bracket: f64,
}

/// Result of applying a bracket table to a taxable income
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxComputation {
    pub taxable_income: f64,
    pub total_tax: f64,
    pub applied_brackets: Vec<AppliedBracket>,
    /// `total_tax / taxable_income`, 0 when there is no income
    pub effective_rate: f64,
    /// Rate of the highest bracket reached, 0 when there is no income
    pub marginal_rate: f64,
}

/// Tax effect of a change in taxable income
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxImpactPrediction {
    pub current_income: f64,
    pub projected_income: f64,
    pub current_tax: f64,
    pub projected_tax: f64,
    pub tax_delta: f64,
    pub current_marginal_rate: f64,
    pub projected_marginal_rate: f64,
    pub current_effective_rate: f64,
    pub projected_effective_rate: f64,
    /// Change in after-tax income
    pub net_income_change: f64,
}

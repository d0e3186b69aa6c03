//! Progressive income tax calculation
//!
//! Brackets are validated on every call. A malformed table is an error, never
//! replaced by a default here: callers pick their fallback table (see
//! [`TaxTable::us_federal_2024_single`](crate::model::TaxTable::us_federal_2024_single))
//! before calling in.

use crate::error::{AnalyticsError, Result};
use crate::model::{
    AppliedBracket, BracketRange, TaxBracket, TaxComputation, TaxImpactPrediction,
    validate_brackets,
};

/// Apply a marginal-rate table to a taxable income
pub fn compute_tax(taxable_income: f64, brackets: &[TaxBracket]) -> Result<TaxComputation> {
    validate_brackets(brackets)?;
    if !taxable_income.is_finite() {
        return Err(AnalyticsError::InvalidAmount {
            field: "taxable_income",
            value: taxable_income,
        });
    }

    if taxable_income <= 0.0 {
        return Ok(TaxComputation {
            taxable_income: taxable_income.max(0.0),
            ..Default::default()
        });
    }

    let mut remaining = taxable_income;
    let mut total_tax = 0.0;
    let mut applied_brackets = Vec::new();

    for bracket in brackets {
        if remaining <= 0.0 {
            break;
        }

        let income_in_bracket = remaining.min(bracket.width());
        let tax = income_in_bracket * bracket.rate;
        total_tax += tax;
        remaining -= income_in_bracket;

        if income_in_bracket > 0.0 {
            applied_brackets.push(AppliedBracket {
                rate: bracket.rate,
                amount: tax,
                range: BracketRange {
                    lower: bracket.lower_bound,
                    upper: bracket.upper_bound,
                },
                taxable_in_bracket: income_in_bracket,
            });
        }
    }

    let marginal_rate = applied_brackets.last().map_or(0.0, |b| b.rate);

    Ok(TaxComputation {
        taxable_income,
        total_tax,
        applied_brackets,
        effective_rate: total_tax / taxable_income,
        marginal_rate,
    })
}

/// Tax owed on `additional_income` stacked on top of `base_income`
pub fn marginal_tax(additional_income: f64, base_income: f64, brackets: &[TaxBracket]) -> Result<f64> {
    let with_additional = compute_tax(base_income + additional_income, brackets)?;
    let without = compute_tax(base_income, brackets)?;
    Ok(with_additional.total_tax - without.total_tax)
}

/// Predict how taxes move when taxable income changes by `income_change`
/// (which may be negative). The projected income is floored at zero.
pub fn predict_tax_impact(
    current_income: f64,
    income_change: f64,
    brackets: &[TaxBracket],
) -> Result<TaxImpactPrediction> {
    if !income_change.is_finite() {
        return Err(AnalyticsError::InvalidAmount {
            field: "income_change",
            value: income_change,
        });
    }

    let projected_income = (current_income + income_change).max(0.0);
    let current = compute_tax(current_income, brackets)?;
    let projected = compute_tax(projected_income, brackets)?;
    let tax_delta = projected.total_tax - current.total_tax;

    Ok(TaxImpactPrediction {
        current_income,
        projected_income,
        current_tax: current.total_tax,
        projected_tax: projected.total_tax,
        tax_delta,
        current_marginal_rate: current.marginal_rate,
        projected_marginal_rate: projected.marginal_rate,
        current_effective_rate: current.effective_rate,
        projected_effective_rate: projected.effective_rate,
        net_income_change: (projected_income - current_income.max(0.0)) - tax_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BracketTableError;

    fn three_brackets() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(0.0, Some(11_600.0), 0.10),
            TaxBracket::new(11_600.0, Some(47_150.0), 0.12),
            TaxBracket::new(47_150.0, None, 0.22),
        ]
    }

    #[test]
    fn test_first_bracket_only() {
        let result = compute_tax(5_000.0, &three_brackets()).unwrap();
        assert!((result.total_tax - 500.0).abs() < 0.01);
        assert_eq!(result.applied_brackets.len(), 1);
        assert!((result.marginal_rate - 0.10).abs() < f64::EPSILON);
    }

    #[test]
    fn test_three_bracket_scenario() {
        // 11,600 * 10% + 35,550 * 12% + 2,850 * 22% = 1,160 + 4,266 + 627
        let result = compute_tax(50_000.0, &three_brackets()).unwrap();
        assert!(
            (result.total_tax - 6_053.0).abs() < 0.01,
            "Expected 6053, got {}",
            result.total_tax
        );
        let amounts: Vec<f64> = result.applied_brackets.iter().map(|b| b.amount).collect();
        assert!((amounts[0] - 1_160.0).abs() < 0.01);
        assert!((amounts[1] - 4_266.0).abs() < 0.01);
        assert!((amounts[2] - 627.0).abs() < 0.01);
        assert_eq!(result.applied_brackets[2].range.upper, None);
        assert!((result.effective_rate - 6_053.0 / 50_000.0).abs() < 1e-9);
        assert!((result.marginal_rate - 0.22).abs() < f64::EPSILON);
    }

    #[test]
    fn test_income_on_bracket_edge() {
        let result = compute_tax(11_600.0, &three_brackets()).unwrap();
        assert_eq!(result.applied_brackets.len(), 1);
        assert!((result.total_tax - 1_160.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_and_negative_income() {
        for income in [0.0, -2_500.0] {
            let result = compute_tax(income, &three_brackets()).unwrap();
            assert_eq!(result.total_tax, 0.0);
            assert!(result.applied_brackets.is_empty());
            assert_eq!(result.effective_rate, 0.0);
        }
    }

    #[test]
    fn test_empty_table_is_an_error() {
        assert_eq!(
            compute_tax(10_000.0, &[]),
            Err(AnalyticsError::InvalidBracketTable(BracketTableError::Empty))
        );
    }

    #[test]
    fn test_invalid_table_checked_even_for_zero_income() {
        let descending = [
            TaxBracket::new(0.0, Some(10_000.0), 0.1),
            TaxBracket::new(5_000.0, None, 0.2),
        ];
        assert!(compute_tax(0.0, &descending).is_err());
    }

    #[test]
    fn test_nan_income_rejected() {
        assert!(matches!(
            compute_tax(f64::NAN, &three_brackets()),
            Err(AnalyticsError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_marginal_tax() {
        // 35,000 sits in the 12% bracket; the next 15,000 spans 12% and 22%
        let marginal = marginal_tax(15_000.0, 35_000.0, &three_brackets()).unwrap();
        let expected = 12_150.0 * 0.12 + 2_850.0 * 0.22;
        assert!((marginal - expected).abs() < 0.01);
    }

    #[test]
    fn test_predict_raise() {
        let prediction = predict_tax_impact(45_000.0, 5_000.0, &three_brackets()).unwrap();
        assert!((prediction.projected_income - 50_000.0).abs() < f64::EPSILON);
        assert!((prediction.projected_tax - 6_053.0).abs() < 0.01);
        assert!(prediction.tax_delta > 0.0);
        assert!((prediction.current_marginal_rate - 0.12).abs() < f64::EPSILON);
        assert!((prediction.projected_marginal_rate - 0.22).abs() < f64::EPSILON);
        assert!((prediction.net_income_change - (5_000.0 - prediction.tax_delta)).abs() < 1e-9);
    }

    #[test]
    fn test_predict_income_drop_floors_at_zero() {
        let prediction = predict_tax_impact(10_000.0, -20_000.0, &three_brackets()).unwrap();
        assert_eq!(prediction.projected_income, 0.0);
        assert_eq!(prediction.projected_tax, 0.0);
        assert!((prediction.tax_delta + 1_000.0).abs() < 0.01);
        assert!((prediction.net_income_change + 9_000.0).abs() < 0.01);
    }
}

//! Cashflow forecasting
//!
//! Recurring records are held constant and replayed month by month. A record
//! counts in a month when it is active on that month's reference date (the
//! `as_of` day stepped forward, clamped to month length). One-time records
//! count only in the month of their `start_date`; undated one-time records
//! count in the `as_of` month.

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use crate::date_math::{add_months, months_remaining, same_month};
use crate::error::Result;
use crate::model::{
    CashflowForecast, CategoryTotal, ExpenseRecord, IncomeRecord, MonthOverMonth, MonthPoint,
    Recurrence,
};
use crate::recurrence::monthly_equivalent;

/// Amount a record contributes to the month containing `reference`
fn month_contribution(
    amount: f64,
    recurrence: Recurrence,
    start: Option<Date>,
    active: bool,
    reference: Date,
    as_of: Date,
) -> Result<f64> {
    let counts = match recurrence {
        Recurrence::None => match start {
            Some(occurs) => same_month(occurs, reference),
            None => same_month(as_of, reference),
        },
        _ => active,
    };
    // Normalize even when not counted so invalid amounts always surface
    let monthly = monthly_equivalent(amount, recurrence)?;
    Ok(if counts { monthly } else { 0.0 })
}

fn income_for_month(records: &[IncomeRecord], reference: Date, as_of: Date) -> Result<f64> {
    records.iter().try_fold(0.0, |acc, r| -> Result<f64> {
        Ok(acc
            + month_contribution(
                r.amount,
                r.recurrence,
                r.start_date,
                r.is_active_on(reference),
                reference,
                as_of,
            )?)
    })
}

fn expense_contributions(
    records: &[ExpenseRecord],
    reference: Date,
    as_of: Date,
) -> Result<Vec<(&str, f64)>> {
    let mut contributions = Vec::with_capacity(records.len());
    for r in records {
        let amount = month_contribution(
            r.amount,
            r.recurrence,
            r.start_date,
            r.is_active_on(reference),
            reference,
            as_of,
        )?;
        contributions.push((r.category.as_str(), amount));
    }
    Ok(contributions)
}

fn expenses_for_month(records: &[ExpenseRecord], reference: Date, as_of: Date) -> Result<f64> {
    Ok(expense_contributions(records, reference, as_of)?
        .iter()
        .map(|(_, amount)| amount)
        .sum())
}

fn group_by_category(contributions: &[(&str, f64)], total: f64) -> Vec<CategoryTotal> {
    let mut totals: FxHashMap<&str, f64> = FxHashMap::default();
    for &(category, amount) in contributions {
        if amount > 0.0 {
            *totals.entry(category).or_insert(0.0) += amount;
        }
    }

    let mut categories: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, monthly_amount)| CategoryTotal {
            category: category.to_string(),
            monthly_amount,
            percentage: if total > 0.0 {
                monthly_amount / total * 100.0
            } else {
                0.0
            },
        })
        .collect();
    categories.sort_by(|a, b| {
        b.monthly_amount
            .total_cmp(&a.monthly_amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    categories
}

/// Savings rate in percent, 0 when there is no income
#[must_use]
pub fn savings_rate(income: f64, net: f64) -> f64 {
    if income > 0.0 { net / income * 100.0 } else { 0.0 }
}

/// Project monthly income and expenses from `as_of` for `horizon_months`
/// calendar months.
///
/// The trend stops early if stepping forward leaves the supported calendar
/// range. `month_over_month` compares the last two trend points.
pub fn forecast(
    income_records: &[IncomeRecord],
    expense_records: &[ExpenseRecord],
    as_of: Date,
    horizon_months: u32,
) -> Result<CashflowForecast> {
    let projected_income = income_for_month(income_records, as_of, as_of)?;
    let contributions = expense_contributions(expense_records, as_of, as_of)?;
    let projected_expenses: f64 = contributions.iter().map(|(_, amount)| amount).sum();
    let expenses_by_category = group_by_category(&contributions, projected_expenses);

    let net_cashflow = projected_income - projected_expenses;

    let points = horizon_months.min(months_remaining(as_of));
    let mut monthly_trend = Vec::with_capacity(points as usize);
    for offset in 0..horizon_months {
        let Some(reference) = add_months(as_of, offset) else {
            break;
        };
        let income = income_for_month(income_records, reference, as_of)?;
        let expenses = expenses_for_month(expense_records, reference, as_of)?;
        monthly_trend.push(MonthPoint {
            year: reference.year(),
            month: reference.month(),
            income,
            expenses,
            net: income - expenses,
        });
    }

    let month_over_month = match monthly_trend.as_slice() {
        [.., previous, last] => MonthOverMonth {
            income_delta: last.income - previous.income,
            expenses_delta: last.expenses - previous.expenses,
        },
        _ => MonthOverMonth::default(),
    };

    Ok(CashflowForecast {
        projected_income,
        projected_expenses,
        net_cashflow,
        savings_rate: savings_rate(projected_income, net_cashflow),
        monthly_trend,
        month_over_month,
        expenses_by_category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExpenseBuilder, IncomeBuilder};
    use crate::error::AnalyticsError;
    use jiff::civil::date;

    #[test]
    fn test_empty_records() {
        let result = forecast(&[], &[], date(2025, 1, 15), 3).unwrap();
        assert_eq!(result.projected_income, 0.0);
        assert_eq!(result.projected_expenses, 0.0);
        assert_eq!(result.savings_rate, 0.0);
        assert_eq!(result.monthly_trend.len(), 3);
        assert!(result.expenses_by_category.is_empty());
        assert_eq!(result.month_over_month, MonthOverMonth::default());
    }

    #[test]
    fn test_savings_rate() {
        let incomes = [IncomeBuilder::salary("Acme").amount(5_000.0).monthly().build()];
        let expenses = [
            ExpenseBuilder::new("Rent").amount(2_000.0).monthly().category("Housing").build(),
            ExpenseBuilder::new("Insurance")
                .amount(1_200.0)
                .annual()
                .category("Insurance")
                .build(),
        ];
        let result = forecast(&incomes, &expenses, date(2025, 1, 15), 12).unwrap();

        assert!((result.projected_income - 5_000.0).abs() < 1e-9);
        assert!((result.projected_expenses - 2_100.0).abs() < 1e-9);
        assert!((result.net_cashflow - 2_900.0).abs() < 1e-9);
        assert!((result.savings_rate - 58.0).abs() < 1e-9);

        assert_eq!(result.expenses_by_category[0].category, "Housing");
        assert!((result.expenses_by_category[0].percentage - 2_000.0 / 2_100.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_savings_rate_allowed() {
        let incomes = [IncomeBuilder::salary("Acme").amount(1_000.0).monthly().build()];
        let expenses = [ExpenseBuilder::new("Rent").amount(1_500.0).monthly().build()];
        let result = forecast(&incomes, &expenses, date(2025, 1, 1), 1).unwrap();
        assert!((result.savings_rate + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_expenses_without_income() {
        let expenses = [ExpenseBuilder::new("Rent").amount(1_500.0).monthly().build()];
        let result = forecast(&[], &expenses, date(2025, 1, 1), 1).unwrap();
        assert_eq!(result.savings_rate, 0.0);
        assert!(result.savings_rate.is_finite());
    }

    #[test]
    fn test_one_time_counts_only_in_its_month() {
        let incomes = [
            IncomeBuilder::salary("Acme").amount(4_000.0).monthly().build(),
            IncomeBuilder::new("Bonus")
                .amount(3_000.0)
                .once_on(date(2025, 3, 10))
                .build(),
        ];
        let result = forecast(&incomes, &[], date(2025, 1, 15), 4).unwrap();

        assert!((result.projected_income - 4_000.0).abs() < 1e-9);
        let incomes_by_month: Vec<f64> = result.monthly_trend.iter().map(|p| p.income).collect();
        assert_eq!(incomes_by_month, vec![4_000.0, 4_000.0, 7_000.0, 4_000.0]);
        assert!((result.month_over_month.income_delta + 3_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_undated_one_time_counts_in_as_of_month() {
        let expenses = [ExpenseBuilder::new("Laptop").amount(1_800.0).once().build()];
        let result = forecast(&[], &expenses, date(2025, 5, 2), 2).unwrap();
        assert!((result.projected_expenses - 1_800.0).abs() < 1e-9);
        assert_eq!(result.monthly_trend[1].expenses, 0.0);
        assert!((result.month_over_month.expenses_delta + 1_800.0).abs() < 1e-9);
    }

    #[test]
    fn test_active_window_respected() {
        let incomes = [
            IncomeBuilder::salary("Old job")
                .amount(3_000.0)
                .monthly()
                .ending(date(2025, 2, 28))
                .build(),
            IncomeBuilder::salary("New job")
                .amount(4_500.0)
                .monthly()
                .starting(date(2025, 3, 1))
                .build(),
        ];
        let result = forecast(&incomes, &[], date(2025, 1, 15), 3).unwrap();
        assert!((result.projected_income - 3_000.0).abs() < 1e-9);

        let months: Vec<(i8, f64)> = result
            .monthly_trend
            .iter()
            .map(|p| (p.month, p.income))
            .collect();
        assert_eq!(months, vec![(1, 3_000.0), (2, 3_000.0), (3, 4_500.0)]);
        assert!((result.month_over_month.income_delta - 1_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_year_rollover() {
        let result = forecast(&[], &[], date(2025, 11, 30), 4).unwrap();
        let months: Vec<(i16, i8)> = result.monthly_trend.iter().map(|p| (p.year, p.month)).collect();
        assert_eq!(months, vec![(2025, 11), (2025, 12), (2026, 1), (2026, 2)]);
    }

    #[test]
    fn test_single_point_has_no_delta() {
        let incomes = [IncomeBuilder::salary("Acme").amount(5_000.0).monthly().build()];
        let result = forecast(&incomes, &[], date(2025, 1, 1), 1).unwrap();
        assert_eq!(result.month_over_month, MonthOverMonth::default());
    }

    #[test]
    fn test_huge_horizon_stops_at_calendar_end() {
        let incomes = [IncomeBuilder::salary("Acme").amount(5_000.0).monthly().build()];
        let result = forecast(&incomes, &[], date(2025, 1, 1), u32::MAX).unwrap();

        // 2025-01 through 9999-12
        assert_eq!(result.monthly_trend.len(), 95_700);
        let last = result.monthly_trend.last().unwrap();
        assert_eq!((last.year, last.month), (9999, 12));
        assert_eq!(last.income, 5_000.0);
        assert_eq!(result.month_over_month, MonthOverMonth::default());
    }

    #[test]
    fn test_invalid_amount_surfaces_even_when_inactive() {
        let expenses = [ExpenseBuilder::new("Broken")
            .amount(-10.0)
            .monthly()
            .starting(date(2030, 1, 1))
            .build()];
        assert!(matches!(
            forecast(&[], &expenses, date(2025, 1, 1), 1),
            Err(AnalyticsError::InvalidAmount { .. })
        ));
    }
}

//! Income diversification scoring
//!
//! The score is shown to users as an absolute number, so every weight below
//! is part of the public behavior. Changing one is a breaking change.
//!
//! | Component            | Weight | Input                                     |
//! |----------------------|--------|-------------------------------------------|
//! | Source count         | 0.25   | `min(source_count, 5) / 5 * 100`          |
//! | Concentration        | 0.30   | `100 - primary_dependency_pct`            |
//! | Stability            | 0.25   | share-weighted recurrence regularity      |
//! | Growth potential     | 0.20   | category diversity + growth-category share |
//!
//! [`score`] looks at every record it is given, including ones whose
//! `end_date` has passed. [`score_as_of`] keeps only the records active on a
//! reference date, the same window check the cashflow forecast uses.

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use crate::error::{Result, check_amount};
use crate::model::{DiversificationMetrics, IncomeCategory, IncomeRecord, Recurrence, SourceBreakdown};
use crate::recurrence::monthly_equivalent;

pub const SOURCE_COUNT_WEIGHT: f64 = 0.25;
pub const CONCENTRATION_WEIGHT: f64 = 0.30;
pub const STABILITY_WEIGHT: f64 = 0.25;
pub const GROWTH_WEIGHT: f64 = 0.20;

/// Number of sources at which the source-count component maxes out
pub const SOURCE_COUNT_CAP: usize = 5;

/// Growth points per distinct income category beyond the first
pub const CATEGORY_DIVERSITY_POINTS: f64 = 15.0;
pub const CATEGORY_DIVERSITY_CAP: f64 = 40.0;
/// Growth points for 100% of income coming from growth categories
pub const GROWTH_SHARE_POINTS: f64 = 60.0;

/// How dependable a recurrence is, 0-100
#[must_use]
pub fn regularity(recurrence: Recurrence) -> f64 {
    match recurrence {
        Recurrence::Weekly | Recurrence::BiWeekly | Recurrence::Monthly => 100.0,
        Recurrence::Quarterly => 80.0,
        Recurrence::SemiAnnual => 70.0,
        Recurrence::Annual => 60.0,
        Recurrence::None => 20.0,
    }
}

#[derive(Default)]
struct SourceTotals {
    monthly: f64,
    /// Sum of monthly amount times regularity, divided by the grand total later
    weighted_regularity: f64,
}

/// Score how dependent a household is on a few income sources
pub fn score(income_records: &[IncomeRecord]) -> Result<DiversificationMetrics> {
    let mut sources: FxHashMap<&str, SourceTotals> = FxHashMap::default();
    let mut category_totals: FxHashMap<IncomeCategory, f64> = FxHashMap::default();
    let mut total = 0.0;

    for record in income_records {
        let monthly = monthly_equivalent(record.amount, record.recurrence)?;
        let entry = sources.entry(record.source.as_str()).or_default();
        entry.monthly += monthly;
        entry.weighted_regularity += monthly * regularity(record.recurrence);
        *category_totals.entry(record.category).or_insert(0.0) += monthly;
        total += monthly;
    }

    // Individually valid amounts can still sum past f64::MAX
    let total = check_amount("total", total)?;
    for totals in sources.values() {
        check_amount("total", totals.weighted_regularity)?;
    }

    if total <= 0.0 {
        return Ok(DiversificationMetrics::default());
    }

    let mut breakdown: Vec<SourceBreakdown> = sources
        .into_iter()
        .filter(|(_, totals)| totals.monthly > 0.0)
        .map(|(name, totals)| SourceBreakdown {
            source_name: name.to_string(),
            percentage: totals.monthly / total * 100.0,
            score_contribution: totals.weighted_regularity / total,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.percentage
            .total_cmp(&a.percentage)
            .then_with(|| a.source_name.cmp(&b.source_name))
    });

    let source_count = breakdown.len();
    let primary_dependency_pct = breakdown.first().map_or(0.0, |s| s.percentage);
    let stability_score: f64 = breakdown.iter().map(|s| s.score_contribution).sum();

    let active_categories: Vec<(IncomeCategory, f64)> = category_totals
        .into_iter()
        .filter(|(_, amount)| *amount > 0.0)
        .collect();
    let diversity_points = (CATEGORY_DIVERSITY_POINTS
        * active_categories.len().saturating_sub(1) as f64)
        .min(CATEGORY_DIVERSITY_CAP);
    let growth_share = active_categories
        .iter()
        .filter(|(category, _)| category.is_growth())
        .map(|(_, amount)| amount)
        .sum::<f64>()
        / total;
    let growth_potential = (diversity_points + GROWTH_SHARE_POINTS * growth_share).min(100.0);

    let count_points = source_count.min(SOURCE_COUNT_CAP) as f64 / SOURCE_COUNT_CAP as f64 * 100.0;
    let overall_score = (SOURCE_COUNT_WEIGHT * count_points
        + CONCENTRATION_WEIGHT * (100.0 - primary_dependency_pct)
        + STABILITY_WEIGHT * stability_score
        + GROWTH_WEIGHT * growth_potential)
        .clamp(0.0, 100.0);

    Ok(DiversificationMetrics {
        overall_score,
        source_count,
        primary_dependency_pct,
        stability_score,
        growth_potential,
        breakdown,
    })
}

/// [`score`] over the records active on `as_of`
pub fn score_as_of(income_records: &[IncomeRecord], as_of: Date) -> Result<DiversificationMetrics> {
    let active: Vec<IncomeRecord> = income_records
        .iter()
        .filter(|record| record.is_active_on(as_of))
        .cloned()
        .collect();
    score(&active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IncomeBuilder;
    use crate::error::AnalyticsError;
    use jiff::civil::date;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty() {
        let metrics = score(&[]).unwrap();
        assert_eq!(metrics.overall_score, 0.0);
        assert_eq!(metrics.source_count, 0);
        assert!(metrics.breakdown.is_empty());
    }

    #[test]
    fn test_zero_amounts_only() {
        let incomes = [IncomeBuilder::salary("Acme").amount(0.0).monthly().build()];
        let metrics = score(&incomes).unwrap();
        assert_eq!(metrics, DiversificationMetrics::default());
    }

    #[test]
    fn test_single_salary() {
        let incomes = [IncomeBuilder::salary("Acme").amount(6_000.0).monthly().build()];
        let metrics = score(&incomes).unwrap();

        assert_eq!(metrics.source_count, 1);
        assert!(approx(metrics.primary_dependency_pct, 100.0));
        assert!(approx(metrics.stability_score, 100.0));
        assert!(approx(metrics.growth_potential, 0.0));
        // 0.25 * 20 + 0.30 * 0 + 0.25 * 100 + 0.20 * 0
        assert!(approx(metrics.overall_score, 30.0));
    }

    #[test]
    fn test_records_grouped_by_source() {
        let incomes = [
            IncomeBuilder::salary("Acme").amount(4_000.0).monthly().build(),
            IncomeBuilder::salary("Acme").amount(12_000.0).annual().build(),
            IncomeBuilder::new("Etsy shop")
                .amount(1_000.0)
                .monthly()
                .category(IncomeCategory::Business)
                .build(),
        ];
        let metrics = score(&incomes).unwrap();

        assert_eq!(metrics.source_count, 2);
        assert_eq!(metrics.breakdown[0].source_name, "Acme");
        assert!(approx(metrics.breakdown[0].percentage, 5_000.0 / 6_000.0 * 100.0));
        // Acme: (4000 * 100 + 1000 * 60) / 6000, Etsy: 1000 * 100 / 6000
        assert!(approx(metrics.breakdown[0].score_contribution, 460_000.0 / 6_000.0));
        assert!(approx(metrics.stability_score, 560_000.0 / 6_000.0));
    }

    #[test]
    fn test_growth_potential() {
        let incomes = [
            IncomeBuilder::salary("Acme").amount(5_000.0).monthly().build(),
            IncomeBuilder::new("Dividends")
                .amount(3_000.0)
                .quarterly()
                .category(IncomeCategory::Investment)
                .build(),
            IncomeBuilder::new("Duplex")
                .amount(1_500.0)
                .monthly()
                .category(IncomeCategory::Rental)
                .build(),
        ];
        let metrics = score(&incomes).unwrap();

        // three categories: 30 diversity points; growth share = 2500 / 7500
        let expected = 30.0 + 60.0 * (2_500.0 / 7_500.0);
        assert!(approx(metrics.growth_potential, expected));
        assert!(metrics.overall_score > 30.0 && metrics.overall_score <= 100.0);
    }

    #[test]
    fn test_one_time_lowers_stability() {
        let recurring = [IncomeBuilder::new("Gig").amount(1_000.0).monthly().build()];
        let once = [IncomeBuilder::new("Gig").amount(1_000.0).once().build()];
        let recurring = score(&recurring).unwrap();
        let once = score(&once).unwrap();
        assert!(once.stability_score < recurring.stability_score);
        assert!(approx(once.stability_score, 20.0));
    }

    #[test]
    fn test_breakdown_sums_to_100() {
        let incomes: Vec<IncomeRecord> = (1..=7)
            .map(|i| {
                IncomeBuilder::new(format!("Client {i}"))
                    .amount(f64::from(i) * 137.5)
                    .monthly()
                    .build()
            })
            .collect();
        let metrics = score(&incomes).unwrap();
        let sum: f64 = metrics.breakdown.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 0.01);
        assert_eq!(metrics.source_count, 7);
        assert!(metrics.overall_score <= 100.0);
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let incomes = [
            IncomeBuilder::salary("Acme").amount(1e308).monthly().build(),
            IncomeBuilder::new("Globex").amount(1e308).monthly().build(),
        ];
        assert!(matches!(
            score(&incomes),
            Err(AnalyticsError::InvalidAmount { field: "total", .. })
        ));
    }

    #[test]
    fn test_overflowing_regularity_rejected() {
        // the sum is finite but amount * regularity is not
        let incomes = [IncomeBuilder::salary("Acme").amount(1e307).monthly().build()];
        assert!(matches!(
            score(&incomes),
            Err(AnalyticsError::InvalidAmount { field: "total", .. })
        ));
    }

    #[test]
    fn test_score_as_of_skips_ended_income() {
        let incomes = [
            IncomeBuilder::salary("Old job")
                .amount(3_000.0)
                .monthly()
                .ending(date(2022, 6, 30))
                .build(),
            IncomeBuilder::salary("New job")
                .amount(4_500.0)
                .monthly()
                .starting(date(2022, 7, 1))
                .build(),
        ];

        assert_eq!(score(&incomes).unwrap().source_count, 2);

        let current = score_as_of(&incomes, date(2025, 1, 1)).unwrap();
        assert_eq!(current.source_count, 1);
        assert_eq!(current.breakdown[0].source_name, "New job");
        assert!(approx(current.primary_dependency_pct, 100.0));

        let before = score_as_of(&incomes, date(2022, 1, 1)).unwrap();
        assert_eq!(before.breakdown[0].source_name, "Old job");
    }
}

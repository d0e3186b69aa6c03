//! Portfolio analytics over investment holdings
//!
//! Allocation, performance, tax-location efficiency, and a correlation
//! heuristic. Every function validates holding values and cost bases first.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::config::TargetAllocation;
use crate::error::{Result, check_amount};
use crate::model::{
    AssetClass, AssetClassBucket, CorrelationMatrix, InvestmentHolding, PortfolioPerformance,
    TaxEfficiency, TaxLocation,
};

/// Check every holding and return the `(value, cost_basis)` totals. Sums
/// that overflow are rejected as well.
fn validate_holdings(holdings: &[InvestmentHolding]) -> Result<(f64, f64)> {
    let mut total_value = 0.0;
    let mut total_cost = 0.0;
    for h in holdings {
        total_cost += check_amount("cost_basis", h.cost_basis)?;
        total_value += check_amount("value", h.value)?;
    }
    Ok((check_amount("total", total_value)?, check_amount("total", total_cost)?))
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

// ============================================================================
// Allocation
// ============================================================================

/// Group holdings by asset class, largest bucket first
pub fn allocate(holdings: &[InvestmentHolding]) -> Result<Vec<AssetClassBucket>> {
    let (total, _) = validate_holdings(holdings)?;

    let mut by_class: FxHashMap<AssetClass, (f64, usize)> = FxHashMap::default();
    for holding in holdings {
        let entry = by_class.entry(holding.asset_class).or_insert((0.0, 0));
        entry.0 += holding.value;
        entry.1 += 1;
    }

    let mut buckets: Vec<AssetClassBucket> = by_class
        .into_iter()
        .map(|(asset_class, (value, count))| AssetClassBucket {
            asset_class,
            total_value: value,
            holding_count: count,
            current_allocation_pct: percent_of(value, total),
            target_allocation_pct: None,
            drift_pct: None,
        })
        .collect();
    sort_buckets(&mut buckets);
    Ok(buckets)
}

/// [`allocate`] plus target percentages and drift. Classes with a target but
/// no holdings get an empty bucket so their shortfall is visible.
pub fn allocate_with_targets(
    holdings: &[InvestmentHolding],
    targets: &TargetAllocation,
) -> Result<Vec<AssetClassBucket>> {
    let mut buckets = allocate(holdings)?;

    for (asset_class, _) in targets.iter() {
        if !buckets.iter().any(|b| b.asset_class == asset_class) {
            buckets.push(AssetClassBucket {
                asset_class,
                total_value: 0.0,
                holding_count: 0,
                current_allocation_pct: 0.0,
                target_allocation_pct: None,
                drift_pct: None,
            });
        }
    }

    for bucket in &mut buckets {
        if let Some(target) = targets.target_for(bucket.asset_class) {
            bucket.target_allocation_pct = Some(target);
            bucket.drift_pct = Some(bucket.current_allocation_pct - target);
        }
    }

    sort_buckets(&mut buckets);
    Ok(buckets)
}

fn sort_buckets(buckets: &mut [AssetClassBucket]) {
    buckets.sort_by(|a, b| {
        b.total_value
            .total_cmp(&a.total_value)
            .then_with(|| a.asset_class.cmp(&b.asset_class))
    });
}

// ============================================================================
// Performance
// ============================================================================

/// Gains and value-weighted cost/yield figures. Holdings without an expense
/// ratio or dividend yield count as zero in the weighted averages.
pub fn performance(holdings: &[InvestmentHolding]) -> Result<PortfolioPerformance> {
    let (total_value, total_cost) = validate_holdings(holdings)?;

    let mut expense_weighted = 0.0;
    let mut yield_weighted = 0.0;
    for holding in holdings {
        if let Some(ratio) = holding.expense_ratio {
            expense_weighted += holding.value * check_amount("expense_ratio", ratio)?;
        }
        if let Some(dividend_yield) = holding.dividend_yield {
            yield_weighted += holding.value * check_amount("dividend_yield", dividend_yield)?;
        }
    }

    check_amount("total", expense_weighted)?;
    check_amount("total", yield_weighted)?;

    let weighted = |sum: f64| {
        if total_value > 0.0 {
            sum / total_value
        } else {
            0.0
        }
    };
    let weighted_expense_ratio = weighted(expense_weighted);
    let weighted_dividend_yield = weighted(yield_weighted);
    let total_gain = total_value - total_cost;

    Ok(PortfolioPerformance {
        total_value,
        total_cost,
        total_gain,
        total_gain_pct: percent_of(total_gain, total_cost),
        weighted_expense_ratio,
        weighted_dividend_yield,
        estimated_annual_fees: total_value * weighted_expense_ratio / 100.0,
        estimated_annual_income: total_value * weighted_dividend_yield / 100.0,
    })
}

// ============================================================================
// Tax efficiency
// ============================================================================

const TAXABLE_CREDIT: f64 = 0.4;
const TAX_DEFERRED_CREDIT: f64 = 0.8;
const TAX_FREE_CREDIT: f64 = 1.0;

const MAX_TAXABLE_PCT: f64 = 60.0;
const MIN_TAX_FREE_PCT: f64 = 10.0;
const MAX_TAX_DEFERRED_PCT: f64 = 80.0;
const HIGH_DIVIDEND_YIELD: f64 = 3.0;

/// Score how much of the portfolio sits in tax-advantaged accounts and list
/// asset-location suggestions. Recommendations come out in a fixed order.
pub fn tax_efficiency(holdings: &[InvestmentHolding]) -> Result<TaxEfficiency> {
    let (total, _) = validate_holdings(holdings)?;

    let mut taxable_value = 0.0;
    let mut tax_deferred_value = 0.0;
    let mut tax_free_value = 0.0;
    for holding in holdings {
        match holding.tax_location {
            TaxLocation::Taxable => taxable_value += holding.value,
            TaxLocation::TaxDeferred => tax_deferred_value += holding.value,
            TaxLocation::TaxFree => tax_free_value += holding.value,
        }
    }

    if total <= 0.0 {
        return Ok(TaxEfficiency::default());
    }

    let taxable_pct = percent_of(taxable_value, total);
    let deferred_pct = percent_of(tax_deferred_value, total);
    let free_pct = percent_of(tax_free_value, total);

    let efficiency_score = (TAXABLE_CREDIT * taxable_pct
        + TAX_DEFERRED_CREDIT * deferred_pct
        + TAX_FREE_CREDIT * free_pct)
        .clamp(0.0, 100.0);

    let taxable_holdings = || {
        holdings
            .iter()
            .filter(|h| h.tax_location == TaxLocation::Taxable && h.value > 0.0)
    };

    let mut recommendations = Vec::new();
    if taxable_pct > MAX_TAXABLE_PCT {
        recommendations.push(format!(
            "Increase tax-deferred allocation: {taxable_pct:.1}% of the portfolio is in taxable accounts"
        ));
    }
    if free_pct < MIN_TAX_FREE_PCT {
        recommendations.push(format!(
            "Consider tax-free (Roth) contributions: only {free_pct:.1}% is held tax-free"
        ));
    }
    let taxable_bonds: Vec<&str> = taxable_holdings()
        .filter(|h| h.asset_class == AssetClass::Bond)
        .map(|h| h.symbol.as_str())
        .collect();
    if !taxable_bonds.is_empty() {
        recommendations.push(format!(
            "Hold bonds in tax-deferred accounts: {} held in taxable accounts",
            taxable_bonds.join(", ")
        ));
    }
    let high_yield: Vec<&str> = taxable_holdings()
        .filter(|h| h.dividend_yield.is_some_and(|y| y > HIGH_DIVIDEND_YIELD))
        .map(|h| h.symbol.as_str())
        .collect();
    if !high_yield.is_empty() {
        recommendations.push(format!(
            "Move high-dividend holdings to tax-advantaged accounts: {}",
            high_yield.join(", ")
        ));
    }
    if deferred_pct > MAX_TAX_DEFERRED_PCT {
        recommendations.push(format!(
            "Diversify tax treatment: {deferred_pct:.1}% is tax-deferred and will be taxed as income on withdrawal"
        ));
    }

    Ok(TaxEfficiency {
        taxable_value,
        tax_deferred_value,
        tax_free_value,
        efficiency_score,
        recommendations,
    })
}

// ============================================================================
// Correlation heuristic
// ============================================================================
//
// This is not a statistical correlation. Pairs are placed in a band by asset
// class: same class high, stock/bond low or negative, anything with cash near
// zero, everything else moderate.

/// Inclusive `(low, high)` correlation band for a pair of classes
#[must_use]
pub fn correlation_band(a: AssetClass, b: AssetClass) -> (f64, f64) {
    use AssetClass::{Bond, Cash, Stock};
    match (a, b) {
        (Cash, _) | (_, Cash) if a != b => (-0.05, 0.05),
        _ if a == b => (0.7, 0.95),
        (Stock, Bond) | (Bond, Stock) => (-0.3, 0.1),
        _ => (0.2, 0.5),
    }
}

/// Deterministic point estimate inside each band
#[must_use]
pub fn correlation_estimate(a: AssetClass, b: AssetClass) -> f64 {
    use AssetClass::{Bond, Cash, Stock};
    match (a, b) {
        (Cash, _) | (_, Cash) if a != b => 0.0,
        _ if a == b => 0.85,
        (Stock, Bond) | (Bond, Stock) => -0.10,
        _ => 0.35,
    }
}

fn build_matrix(
    holdings: &[InvestmentHolding],
    mut estimate: impl FnMut(AssetClass, AssetClass) -> f64,
) -> CorrelationMatrix {
    let n = holdings.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let value = estimate(holdings[i].asset_class, holdings[j].asset_class);
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }

    CorrelationMatrix {
        assets: holdings.iter().map(|h| h.symbol.clone()).collect(),
        matrix,
    }
}

/// Reproducible correlation estimate: the same holdings always give the same
/// matrix.
#[must_use]
pub fn correlate(holdings: &[InvestmentHolding]) -> CorrelationMatrix {
    build_matrix(holdings, correlation_estimate)
}

/// Correlation estimate with each pair drawn uniformly from its band. The
/// same `seed` reproduces the same matrix.
#[must_use]
pub fn correlate_seeded(holdings: &[InvestmentHolding], seed: u64) -> CorrelationMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    build_matrix(holdings, |a, b| {
        let (low, high) = correlation_band(a, b);
        rng.random_range(low..=high)
    })
}

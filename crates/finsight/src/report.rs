//! Plain-text summaries of analytics results

use finsight_core::model::{
    AssetClassBucket, CashflowForecast, CorrelationMatrix, DiversificationMetrics,
    PaycheckBreakdown, PortfolioPerformance, SimulationResult, TaxComputation, TaxEfficiency,
    TaxImpactPrediction,
};

use crate::util::format::{format_currency, format_percent, format_rate, format_signed_currency};

fn heading(title: &str) -> Vec<String> {
    vec![title.to_string(), "=".repeat(title.len())]
}

fn row(label: &str, value: impl AsRef<str>) -> String {
    format!("  {label:<26}{:>16}", value.as_ref())
}

pub fn render_tax(result: &TaxComputation) -> String {
    let mut lines = heading("Income tax");
    lines.push(row("Taxable income", format_currency(result.taxable_income)));
    lines.push(row("Total tax", format_currency(result.total_tax)));
    lines.push(row("Effective rate", format_rate(result.effective_rate)));
    lines.push(row("Marginal rate", format_rate(result.marginal_rate)));

    if !result.applied_brackets.is_empty() {
        lines.push(String::new());
        lines.push("  Bracket breakdown".to_string());
        for bracket in &result.applied_brackets {
            let range = match bracket.range.upper {
                Some(upper) => format!(
                    "{} - {}",
                    format_currency(bracket.range.lower),
                    format_currency(upper)
                ),
                None => format!("{}+", format_currency(bracket.range.lower)),
            };
            lines.push(format!(
                "  {:>7}  {range:<30}{:>14} taxed {:>12}",
                format_rate(bracket.rate),
                format_currency(bracket.taxable_in_bracket),
                format_currency(bracket.amount),
            ));
        }
    }
    lines.join("\n")
}

pub fn render_impact(prediction: &TaxImpactPrediction) -> String {
    let mut lines = heading("Tax impact");
    lines.push(row("Current income", format_currency(prediction.current_income)));
    lines.push(row("Projected income", format_currency(prediction.projected_income)));
    lines.push(row("Current tax", format_currency(prediction.current_tax)));
    lines.push(row("Projected tax", format_currency(prediction.projected_tax)));
    lines.push(row("Tax change", format_signed_currency(prediction.tax_delta)));
    lines.push(row(
        "Marginal rate",
        format!(
            "{} -> {}",
            format_rate(prediction.current_marginal_rate),
            format_rate(prediction.projected_marginal_rate)
        ),
    ));
    lines.push(row(
        "Effective rate",
        format!(
            "{} -> {}",
            format_rate(prediction.current_effective_rate),
            format_rate(prediction.projected_effective_rate)
        ),
    ));
    lines.push(row(
        "After-tax income change",
        format_signed_currency(prediction.net_income_change),
    ));
    lines.join("\n")
}

pub fn render_paycheck(result: &SimulationResult, per_period: &PaycheckBreakdown) -> String {
    let mut lines = heading("Paycheck");
    lines.push(format!(
        "  {:<26}{:>16}{:>16}",
        "",
        "Annual",
        format!("Per period (x{})", per_period.periods_per_year)
    ));
    let pairs = [
        ("Gross pay", result.gross, per_period.gross),
        ("Pre-tax deductions", result.total_pre_tax, per_period.pre_tax),
        ("Income tax", result.total_tax, per_period.tax),
        ("Post-tax deductions", result.total_post_tax, per_period.post_tax),
        ("Take-home pay", result.take_home, per_period.take_home),
    ];
    for (label, annual, period) in pairs {
        lines.push(format!(
            "  {label:<26}{:>16}{:>16}",
            format_currency(annual),
            format_currency(period)
        ));
    }
    lines.push(row("Effective rate", format_rate(result.effective_rate)));
    lines.join("\n")
}

pub fn render_forecast(forecast: &CashflowForecast) -> String {
    let mut lines = heading("Cashflow forecast");
    lines.push(row("Projected income", format_currency(forecast.projected_income)));
    lines.push(row("Projected expenses", format_currency(forecast.projected_expenses)));
    lines.push(row("Net cashflow", format_signed_currency(forecast.net_cashflow)));
    lines.push(row("Savings rate", format_percent(forecast.savings_rate)));

    if !forecast.expenses_by_category.is_empty() {
        lines.push(String::new());
        lines.push("  Expenses by category".to_string());
        for category in &forecast.expenses_by_category {
            lines.push(format!(
                "    {:<24}{:>16}{:>9}",
                category.category,
                format_currency(category.monthly_amount),
                format_percent(category.percentage)
            ));
        }
    }

    if !forecast.monthly_trend.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "    {:<10}{:>16}{:>16}{:>16}",
            "Month", "Income", "Expenses", "Net"
        ));
        for point in &forecast.monthly_trend {
            lines.push(format!(
                "    {:<10}{:>16}{:>16}{:>16}",
                format!("{:04}-{:02}", point.year, point.month),
                format_currency(point.income),
                format_currency(point.expenses),
                format_signed_currency(point.net)
            ));
        }
        lines.push(row(
            "Last month income change",
            format_signed_currency(forecast.month_over_month.income_delta),
        ));
        lines.push(row(
            "Last month expense change",
            format_signed_currency(forecast.month_over_month.expenses_delta),
        ));
    }
    lines.join("\n")
}

pub fn render_diversification(metrics: &DiversificationMetrics) -> String {
    let mut lines = heading("Income diversification");
    if metrics.source_count == 0 {
        lines.push("  No income sources".to_string());
        return lines.join("\n");
    }

    lines.push(row("Overall score", format!("{:.1} / 100", metrics.overall_score)));
    lines.push(row("Income sources", metrics.source_count.to_string()));
    lines.push(row("Primary dependency", format_percent(metrics.primary_dependency_pct)));
    lines.push(row("Stability", format!("{:.1}", metrics.stability_score)));
    lines.push(row("Growth potential", format!("{:.1}", metrics.growth_potential)));
    lines.push(String::new());
    for source in &metrics.breakdown {
        lines.push(format!(
            "    {:<28}{:>9}  stability +{:.1}",
            source.source_name,
            format_percent(source.percentage),
            source.score_contribution
        ));
    }
    lines.join("\n")
}

pub fn render_portfolio(
    buckets: &[AssetClassBucket],
    performance: &PortfolioPerformance,
    efficiency: &TaxEfficiency,
    correlation: &CorrelationMatrix,
) -> String {
    let mut lines = heading("Portfolio");
    if buckets.is_empty() {
        lines.push("  No holdings".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "    {:<14}{:>16}{:>9}{:>9}{:>9}",
        "Class", "Value", "Current", "Target", "Drift"
    ));
    for bucket in buckets {
        let target = bucket
            .target_allocation_pct
            .map_or_else(|| "-".to_string(), format_percent);
        let drift = bucket
            .drift_pct
            .map_or_else(|| "-".to_string(), |d| format!("{d:+.1}%"));
        lines.push(format!(
            "    {:<14}{:>16}{:>9}{:>9}{:>9}",
            bucket.asset_class.label(),
            format_currency(bucket.total_value),
            format_percent(bucket.current_allocation_pct),
            target,
            drift
        ));
    }

    lines.push(String::new());
    lines.push(row("Total value", format_currency(performance.total_value)));
    lines.push(row("Total cost", format_currency(performance.total_cost)));
    lines.push(row(
        "Unrealized gain",
        format!(
            "{} ({})",
            format_signed_currency(performance.total_gain),
            format_percent(performance.total_gain_pct)
        ),
    ));
    lines.push(row(
        "Expense ratio",
        format!("{:.3}%", performance.weighted_expense_ratio),
    ));
    lines.push(row("Annual fees", format_currency(performance.estimated_annual_fees)));
    lines.push(row(
        "Dividend yield",
        format!("{:.2}%", performance.weighted_dividend_yield),
    ));
    lines.push(row("Annual dividends", format_currency(performance.estimated_annual_income)));

    lines.push(String::new());
    lines.push(row("Tax efficiency", format!("{:.1} / 100", efficiency.efficiency_score)));
    lines.push(row("Taxable", format_currency(efficiency.taxable_value)));
    lines.push(row("Tax-deferred", format_currency(efficiency.tax_deferred_value)));
    lines.push(row("Tax-free", format_currency(efficiency.tax_free_value)));
    for recommendation in &efficiency.recommendations {
        lines.push(format!("  - {recommendation}"));
    }

    if correlation.assets.len() > 1 {
        lines.push(String::new());
        lines.push("  Estimated correlation".to_string());
        let header: String = correlation
            .assets
            .iter()
            .map(|symbol| format!("{symbol:>8}"))
            .collect();
        lines.push(format!("    {:<8}{header}", ""));
        for (symbol, values) in correlation.assets.iter().zip(&correlation.matrix) {
            let cells: String = values.iter().map(|v| format!("{v:>8.2}")).collect();
            lines.push(format!("    {symbol:<8}{cells}"));
        }
    }
    lines.join("\n")
}

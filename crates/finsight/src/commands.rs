use std::path::{Path, PathBuf};

use clap::Subcommand;
use finsight_core::cashflow::forecast;
use finsight_core::diversification::score_as_of;
use finsight_core::paycheck::simulate;
use finsight_core::portfolio::{
    allocate_with_targets, correlate, correlate_seeded, performance, tax_efficiency,
};
use finsight_core::taxes::{compute_tax, predict_tax_impact};
use jiff::civil::Date;

use crate::data::{Household, HistoryEntry, record_paycheck};
use crate::report;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Progressive tax on a taxable income
    Tax {
        #[arg(long)]
        income: f64,
    },
    /// Tax effect of an income change
    Impact {
        #[arg(long)]
        income: f64,
        #[arg(long, allow_hyphen_values = true)]
        change: f64,
    },
    /// Take-home pay after deductions and tax
    Paycheck {
        /// Append the result to the history file in the data directory
        #[arg(long)]
        save: bool,
    },
    /// Monthly cashflow projection
    Forecast {
        /// Reference date (YYYY-MM-DD), defaults to the household's as_of or today
        #[arg(long)]
        as_of: Option<Date>,
        #[arg(long)]
        months: Option<u32>,
    },
    /// Income diversification score
    Diversification,
    /// Allocation, performance, tax efficiency and correlation
    Portfolio {
        /// Sample correlations within their bands using this seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Every summary the household supports
    Report,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Tax { .. } => "tax",
            Command::Impact { .. } => "impact",
            Command::Paycheck { .. } => "paycheck",
            Command::Forecast { .. } => "forecast",
            Command::Diversification => "diversification",
            Command::Portfolio { .. } => "portfolio",
            Command::Report => "report",
        }
    }
}

/// Where a command runs: the household file it was given and the data
/// directory for saved history
#[derive(Debug, Clone)]
pub struct Context {
    pub household_path: PathBuf,
    pub data_dir: PathBuf,
    pub today: Date,
}

impl Context {
    pub fn new(household_path: &Path, data_dir: &Path) -> Self {
        Self {
            household_path: household_path.to_path_buf(),
            data_dir: data_dir.to_path_buf(),
            today: jiff::Zoned::now().date(),
        }
    }
}

/// Run a command against a loaded household and return the text to print
pub fn execute(command: &Command, household: &Household, ctx: &Context) -> color_eyre::Result<String> {
    tracing::info!(command = command.name(), household = %ctx.household_path.display(), "Running command");

    match command {
        Command::Tax { income } => tax(household, *income),
        Command::Impact { income, change } => impact(household, *income, *change),
        Command::Paycheck { save } => paycheck(household, ctx, *save),
        Command::Forecast { as_of, months } => cashflow(household, ctx, *as_of, *months),
        Command::Diversification => diversification(household, ctx),
        Command::Portfolio { seed } => portfolio(household, *seed),
        Command::Report => full_report(household, ctx),
    }
}

fn tax(household: &Household, income: f64) -> color_eyre::Result<String> {
    let table = household.tax_table();
    let result = compute_tax(income, table.brackets())?;
    Ok(report::render_tax(&result))
}

fn impact(household: &Household, income: f64, change: f64) -> color_eyre::Result<String> {
    let table = household.tax_table();
    let prediction = predict_tax_impact(income, change, table.brackets())?;
    Ok(report::render_impact(&prediction))
}

fn paycheck(household: &Household, ctx: &Context, save: bool) -> color_eyre::Result<String> {
    let (base_salary, deductions, pay_period) = household.paycheck_inputs()?;
    let table = household.tax_table();
    let result = simulate(base_salary, &deductions, table.brackets())?;
    let per_period = result.per_period(pay_period);
    let text = report::render_paycheck(&result, &per_period);

    if save {
        let entry = HistoryEntry {
            recorded_at: jiff::Timestamp::now(),
            household: ctx.household_path.display().to_string(),
            pay_period,
            result,
            per_period,
        };
        record_paycheck(&ctx.data_dir, entry);
    }
    Ok(text)
}

fn cashflow(
    household: &Household,
    ctx: &Context,
    as_of: Option<Date>,
    months: Option<u32>,
) -> color_eyre::Result<String> {
    let as_of = as_of.or(household.as_of).unwrap_or(ctx.today);
    let months = months.unwrap_or_else(|| household.horizon_months());
    tracing::debug!(%as_of, months, "Forecasting cashflow");

    let result = forecast(&household.incomes, &household.expenses, as_of, months)?;
    Ok(report::render_forecast(&result))
}

/// Scores only the incomes still active on the household's reference date
fn diversification(household: &Household, ctx: &Context) -> color_eyre::Result<String> {
    let as_of = household.as_of.unwrap_or(ctx.today);
    let metrics = score_as_of(&household.incomes, as_of)?;
    Ok(report::render_diversification(&metrics))
}

fn portfolio(household: &Household, seed: Option<u64>) -> color_eyre::Result<String> {
    let holdings = &household.holdings;
    let buckets = allocate_with_targets(holdings, &household.target_allocation())?;
    let perf = performance(holdings)?;
    let efficiency = tax_efficiency(holdings)?;
    let correlation = match seed {
        Some(seed) => correlate_seeded(holdings, seed),
        None => correlate(holdings),
    };
    Ok(report::render_portfolio(&buckets, &perf, &efficiency, &correlation))
}

fn full_report(household: &Household, ctx: &Context) -> color_eyre::Result<String> {
    let mut sections = Vec::new();

    match household.paycheck_inputs() {
        Ok(_) => sections.push(paycheck(household, ctx, false)?),
        Err(e) => tracing::info!(reason = %e, "Skipping paycheck section"),
    }
    sections.push(cashflow(household, ctx, None, None)?);
    sections.push(diversification(household, ctx)?);
    if !household.holdings.is_empty() {
        sections.push(portfolio(household, None)?);
    }

    Ok(sections.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::history::load_history;
    use tempfile::tempdir;

    const HOUSEHOLD: &str = r#"
incomes:
  - source: Acme Corp
    amount: 6500
    recurrence: monthly
    category: salary
    deductions:
      - name: 401k
        amount: 500
        tax_class: pre_tax
  - source: Design work
    amount: 1500
    recurrence: monthly
    category: freelance
expenses:
  - name: Rent
    amount: 2000
    recurrence: monthly
    category: Housing
holdings:
  - symbol: VTI
    value: 30000
    cost_basis: 22000
    asset_class: stock
    tax_location: tax_deferred
  - symbol: BND
    value: 10000
    cost_basis: 10500
    asset_class: bond
    tax_location: taxable
as_of: 2025-06-15
horizon_months: 3
"#;

    fn setup() -> (tempfile::TempDir, Household, Context) {
        let dir = tempdir().unwrap();
        let household = Household::from_yaml(HOUSEHOLD).unwrap();
        let ctx = Context {
            household_path: dir.path().join("household.yaml"),
            data_dir: dir.path().join("data"),
            today: jiff::civil::date(2025, 1, 1),
        };
        (dir, household, ctx)
    }

    #[test]
    fn test_tax_command_uses_fallback_table() {
        let (_dir, household, ctx) = setup();
        let text = execute(&Command::Tax { income: 50_000.0 }, &household, &ctx).unwrap();
        assert!(text.contains("$6,053.00"));
    }

    #[test]
    fn test_negative_income_change() {
        let (_dir, household, ctx) = setup();
        let command = Command::Impact {
            income: 60_000.0,
            change: -80_000.0,
        };
        let text = execute(&command, &household, &ctx).unwrap();
        assert!(text.contains("Projected income"));
        assert!(text.contains("$0.00"));
    }

    #[test]
    fn test_forecast_uses_household_as_of() {
        let (_dir, household, ctx) = setup();
        let command = Command::Forecast {
            as_of: None,
            months: None,
        };
        let text = execute(&command, &household, &ctx).unwrap();
        assert!(text.contains("2025-06"));
        assert!(text.contains("2025-08"));
        assert!(!text.contains("2025-09"));

        let command = Command::Forecast {
            as_of: Some(jiff::civil::date(2026, 1, 1)),
            months: Some(1),
        };
        let text = execute(&command, &household, &ctx).unwrap();
        assert!(text.contains("2026-01"));
    }

    #[test]
    fn test_paycheck_save_appends_history() {
        let (_dir, household, ctx) = setup();
        let unsaved = execute(&Command::Paycheck { save: false }, &household, &ctx).unwrap();
        assert_eq!(load_history(&ctx.data_dir).unwrap().entries.len(), 0);

        let saved = execute(&Command::Paycheck { save: true }, &household, &ctx).unwrap();
        assert_eq!(saved, unsaved);

        let history = load_history(&ctx.data_dir).unwrap();
        assert_eq!(history.entries.len(), 1);
        assert!((history.entries[0].result.gross - 78_000.0).abs() < 1e-9);
        assert!((history.entries[0].result.total_pre_tax - 6_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_paycheck_save_failure_keeps_output() {
        let (dir, household, mut ctx) = setup();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let expected = execute(&Command::Paycheck { save: false }, &household, &ctx).unwrap();
        ctx.data_dir = blocker;
        let text = execute(&Command::Paycheck { save: true }, &household, &ctx).unwrap();
        assert_eq!(text, expected);
    }

    #[test]
    fn test_portfolio_seeded_reproducible() {
        let (_dir, household, ctx) = setup();
        let command = Command::Portfolio { seed: Some(11) };
        let first = execute(&command, &household, &ctx).unwrap();
        let second = execute(&command, &household, &ctx).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("Hold bonds in tax-deferred accounts"));
    }

    #[test]
    fn test_report_includes_every_section() {
        let (_dir, household, ctx) = setup();
        let text = execute(&Command::Report, &household, &ctx).unwrap();
        for title in ["Paycheck", "Cashflow forecast", "Income diversification", "Portfolio"] {
            assert!(text.contains(title), "missing {title}");
        }
    }

    #[test]
    fn test_report_without_salary_skips_paycheck() {
        let (_dir, _household, ctx) = setup();
        let household = Household::default();
        let text = execute(&Command::Report, &household, &ctx).unwrap();
        assert!(!text.contains("Paycheck"));
        assert!(text.contains("No income sources"));
    }

    #[test]
    fn test_diversification_ignores_ended_income() {
        let (_dir, mut household, ctx) = setup();
        let text = execute(&Command::Diversification, &household, &ctx).unwrap();
        assert!(text.contains("Design work"));

        household.incomes[1].end_date = Some(jiff::civil::date(2024, 12, 31));
        let text = execute(&Command::Diversification, &household, &ctx).unwrap();
        assert!(!text.contains("Design work"));
        assert!(text.contains("100.0%"));
    }

    #[test]
    fn test_huge_forecast_horizon_is_truncated() {
        let (_dir, household, ctx) = setup();
        let command = Command::Forecast {
            as_of: Some(jiff::civil::date(9999, 10, 1)),
            months: Some(u32::MAX),
        };
        let text = execute(&command, &household, &ctx).unwrap();
        assert!(text.contains("9999-12"));
    }

    #[test]
    fn test_invalid_amount_is_an_error() {
        let (_dir, mut household, ctx) = setup();
        household.incomes[1].amount = -1.0;
        assert!(execute(&Command::Diversification, &household, &ctx).is_err());
    }
}

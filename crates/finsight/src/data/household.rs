use std::fs;
use std::path::Path;

use color_eyre::eyre::{WrapErr, eyre};
use finsight_core::config::TargetAllocation;
use finsight_core::model::{
    Deduction, ExpenseRecord, IncomeCategory, IncomeRecord, InvestmentHolding, Recurrence,
    TaxTable,
};
use finsight_core::paycheck::PaycheckDeductions;
use finsight_core::recurrence::annual_equivalent;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Paycheck simulation inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaycheckData {
    /// Annual gross salary
    pub base_salary: f64,
    /// Pay period used for the per-paycheck breakdown
    #[serde(default = "default_pay_period")]
    pub pay_period: Recurrence,
    /// Annual deduction amounts
    #[serde(default)]
    pub deductions: Vec<Deduction>,
}

fn default_pay_period() -> Recurrence {
    Recurrence::BiWeekly
}

/// A household file: everything the analytics need in one YAML document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Household {
    /// Stored bracket table; the 2024 US federal single table when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_brackets: Option<TaxTable>,
    #[serde(default)]
    pub incomes: Vec<IncomeRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub holdings: Vec<InvestmentHolding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetAllocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paycheck: Option<PaycheckData>,
    /// Forecast reference date; today when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_months: Option<u32>,
}

impl Household {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Save to YAML string
    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read household file {}", path.display()))?;
        let household = Self::from_yaml(&content)
            .wrap_err_with(|| format!("Failed to parse household file {}", path.display()))?;

        tracing::debug!(
            incomes = household.incomes.len(),
            expenses = household.expenses.len(),
            holdings = household.holdings.len(),
            "Household loaded"
        );
        Ok(household)
    }

    /// The stored bracket table, or the documented federal fallback
    pub fn tax_table(&self) -> TaxTable {
        match &self.tax_brackets {
            Some(table) => table.clone(),
            None => {
                tracing::info!("No tax brackets in household file, using 2024 US federal single");
                TaxTable::us_federal_2024_single()
            }
        }
    }

    /// Stored targets, or the balanced 60/30/10 mix
    pub fn target_allocation(&self) -> TargetAllocation {
        match &self.targets {
            Some(targets) => targets.clone(),
            None => {
                tracing::info!("No allocation targets in household file, using 60/30/10");
                TargetAllocation::balanced()
            }
        }
    }

    /// Paycheck inputs from the `paycheck` section, or derived from the salary
    /// incomes when the section is missing.
    pub fn paycheck_inputs(&self) -> color_eyre::Result<(f64, PaycheckDeductions, Recurrence)> {
        if let Some(paycheck) = &self.paycheck {
            return Ok((
                paycheck.base_salary,
                PaycheckDeductions::from_deductions(paycheck.deductions.iter().cloned()),
                paycheck.pay_period,
            ));
        }

        let salaries: Vec<&IncomeRecord> = self
            .incomes
            .iter()
            .filter(|income| income.category == IncomeCategory::Salary)
            .collect();
        let Some(first) = salaries.first() else {
            return Err(eyre!(
                "Household has no paycheck section and no salary income to derive one from"
            ));
        };

        let mut base_salary = 0.0;
        let mut deductions = Vec::new();
        for income in &salaries {
            base_salary += annual_equivalent(income.amount, income.recurrence)?;
            for deduction in &income.deductions {
                deductions.push(Deduction {
                    amount: annual_equivalent(deduction.amount, income.recurrence)?,
                    ..deduction.clone()
                });
            }
        }
        tracing::info!(
            salaries = salaries.len(),
            base_salary,
            "Derived paycheck inputs from salary incomes"
        );

        Ok((
            base_salary,
            PaycheckDeductions::from_deductions(deductions),
            first.recurrence,
        ))
    }

    pub fn horizon_months(&self) -> u32 {
        self.horizon_months.unwrap_or(DEFAULT_HORIZON_MONTHS)
    }
}

//! Income, expense and deduction records
//!
//! Records are plain values handed to the engine by the caller. They carry
//! no identity beyond their `source`/`name` and never reference each other.

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// How often a record repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Recurrence {
    /// One-time event, counted fully in the month it occurs
    None,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Recurrence {
    pub const ALL: [Recurrence; 7] = [
        Recurrence::None,
        Recurrence::Weekly,
        Recurrence::BiWeekly,
        Recurrence::Monthly,
        Recurrence::Quarterly,
        Recurrence::SemiAnnual,
        Recurrence::Annual,
    ];

    /// Number of occurrences per year, `None` for one-time records
    #[must_use]
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Recurrence::None => None,
            Recurrence::Weekly => Some(52),
            Recurrence::BiWeekly => Some(26),
            Recurrence::Monthly => Some(12),
            Recurrence::Quarterly => Some(4),
            Recurrence::SemiAnnual => Some(2),
            Recurrence::Annual => Some(1),
        }
    }

    #[must_use]
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }

    /// Canonical tag used for serialization
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Weekly => "weekly",
            Recurrence::BiWeekly => "bi_weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Quarterly => "quarterly",
            Recurrence::SemiAnnual => "semi_annual",
            Recurrence::Annual => "annual",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "none" | "once" | "one_time" => Ok(Recurrence::None),
            "weekly" => Ok(Recurrence::Weekly),
            "bi_weekly" | "biweekly" => Ok(Recurrence::BiWeekly),
            "monthly" => Ok(Recurrence::Monthly),
            "quarterly" => Ok(Recurrence::Quarterly),
            "semi_annual" | "semiannual" | "semi_annually" => Ok(Recurrence::SemiAnnual),
            "annual" | "annually" | "yearly" => Ok(Recurrence::Annual),
            _ => Err(AnalyticsError::UnsupportedFrequency(s.to_string())),
        }
    }
}

impl TryFrom<String> for Recurrence {
    type Error = AnalyticsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Recurrence> for String {
    fn from(value: Recurrence) -> Self {
        value.as_str().to_string()
    }
}

/// Whether an amount is taken out before or after income tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxClass {
    #[default]
    PreTax,
    PostTax,
}

/// A paycheck deduction (401k, health premium, union dues, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deduction {
    pub name: String,
    pub amount: f64,
    pub tax_class: TaxClass,
}

impl Deduction {
    pub fn pre_tax(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            tax_class: TaxClass::PreTax,
        }
    }

    pub fn post_tax(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            tax_class: TaxClass::PostTax,
        }
    }
}

/// Kind of income, used for growth-potential scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    #[default]
    Salary,
    Business,
    Freelance,
    Investment,
    Passive,
    Rental,
    Other,
}

impl IncomeCategory {
    /// Categories whose income tends to compound or scale independently of hours worked
    #[must_use]
    pub fn is_growth(&self) -> bool {
        matches!(
            self,
            IncomeCategory::Investment
                | IncomeCategory::Passive
                | IncomeCategory::Business
                | IncomeCategory::Rental
        )
    }
}

/// Returns true when `date` falls inside the optional `[start, end]` window
pub(crate) fn is_active_on(start: Option<Date>, end: Option<Date>, date: Date) -> bool {
    start.is_none_or(|s| s <= date) && end.is_none_or(|e| date <= e)
}

/// A single income stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    /// Name of the payer or stream; records sharing a source are scored together
    pub source: String,
    pub amount: f64,
    pub recurrence: Recurrence,
    #[serde(default)]
    pub tax_class: TaxClass,
    #[serde(default)]
    pub category: IncomeCategory,
    #[serde(default)]
    pub deductions: Vec<Deduction>,
    /// First date the income applies; for one-time income, the date it occurs
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl IncomeRecord {
    #[must_use]
    pub fn is_active_on(&self, date: Date) -> bool {
        is_active_on(self.start_date, self.end_date, date)
    }
}

/// A single expense stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub name: String,
    pub amount: f64,
    pub recurrence: Recurrence,
    #[serde(default = "default_category")]
    pub category: String,
    /// First date the expense applies; for one-time expenses, the date it occurs
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
}

fn default_category() -> String {
    "Uncategorized".to_string()
}

impl ExpenseRecord {
    #[must_use]
    pub fn is_active_on(&self, date: Date) -> bool {
        is_active_on(self.start_date, self.end_date, date)
    }
}

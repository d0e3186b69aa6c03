//! Fluent builders for records and holdings
//!
//! Builders never validate; invalid amounts surface as errors from the
//! analytics functions that consume the built values.

use jiff::civil::Date;

use crate::model::{
    AssetClass, Deduction, ExpenseRecord, IncomeCategory, IncomeRecord, InvestmentHolding,
    Recurrence, TaxClass, TaxLocation,
};

// ============================================================================
// Income
// ============================================================================

#[derive(Debug, Clone)]
pub struct IncomeBuilder {
    source: String,
    amount: f64,
    recurrence: Recurrence,
    tax_class: TaxClass,
    category: IncomeCategory,
    deductions: Vec<Deduction>,
    start_date: Option<Date>,
    end_date: Option<Date>,
}

impl IncomeBuilder {
    /// Income from `source`, monthly and uncategorized (`Other`) until set
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            amount: 0.0,
            recurrence: Recurrence::Monthly,
            tax_class: TaxClass::PreTax,
            category: IncomeCategory::Other,
            deductions: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }

    /// Employer salary
    pub fn salary(employer: impl Into<String>) -> Self {
        Self::new(employer).category(IncomeCategory::Salary)
    }

    #[must_use]
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    #[must_use]
    pub fn weekly(self) -> Self {
        self.recurrence(Recurrence::Weekly)
    }

    #[must_use]
    pub fn bi_weekly(self) -> Self {
        self.recurrence(Recurrence::BiWeekly)
    }

    #[must_use]
    pub fn monthly(self) -> Self {
        self.recurrence(Recurrence::Monthly)
    }

    #[must_use]
    pub fn quarterly(self) -> Self {
        self.recurrence(Recurrence::Quarterly)
    }

    #[must_use]
    pub fn semi_annual(self) -> Self {
        self.recurrence(Recurrence::SemiAnnual)
    }

    #[must_use]
    pub fn annual(self) -> Self {
        self.recurrence(Recurrence::Annual)
    }

    /// One-time income without a date
    #[must_use]
    pub fn once(self) -> Self {
        self.recurrence(Recurrence::None)
    }

    /// One-time income received on `date`
    #[must_use]
    pub fn once_on(self, date: Date) -> Self {
        self.recurrence(Recurrence::None).starting(date)
    }

    #[must_use]
    pub fn category(mut self, category: IncomeCategory) -> Self {
        self.category = category;
        self
    }

    /// Mark the income as already taxed (e.g. Roth distributions, gifts)
    #[must_use]
    pub fn post_tax_income(mut self) -> Self {
        self.tax_class = TaxClass::PostTax;
        self
    }

    #[must_use]
    pub fn pre_tax(mut self, name: impl Into<String>, amount: f64) -> Self {
        self.deductions.push(Deduction::pre_tax(name, amount));
        self
    }

    #[must_use]
    pub fn post_tax(mut self, name: impl Into<String>, amount: f64) -> Self {
        self.deductions.push(Deduction::post_tax(name, amount));
        self
    }

    #[must_use]
    pub fn starting(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    #[must_use]
    pub fn ending(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    #[must_use]
    pub fn build(self) -> IncomeRecord {
        IncomeRecord {
            source: self.source,
            amount: self.amount,
            recurrence: self.recurrence,
            tax_class: self.tax_class,
            category: self.category,
            deductions: self.deductions,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

// ============================================================================
// Expenses
// ============================================================================

#[derive(Debug, Clone)]
pub struct ExpenseBuilder {
    name: String,
    amount: f64,
    recurrence: Recurrence,
    category: Option<String>,
    start_date: Option<Date>,
    end_date: Option<Date>,
}

impl ExpenseBuilder {
    /// Monthly expense; the category defaults to the expense name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: 0.0,
            recurrence: Recurrence::Monthly,
            category: None,
            start_date: None,
            end_date: None,
        }
    }

    #[must_use]
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    #[must_use]
    pub fn weekly(self) -> Self {
        self.recurrence(Recurrence::Weekly)
    }

    #[must_use]
    pub fn monthly(self) -> Self {
        self.recurrence(Recurrence::Monthly)
    }

    #[must_use]
    pub fn quarterly(self) -> Self {
        self.recurrence(Recurrence::Quarterly)
    }

    #[must_use]
    pub fn annual(self) -> Self {
        self.recurrence(Recurrence::Annual)
    }

    #[must_use]
    pub fn once(self) -> Self {
        self.recurrence(Recurrence::None)
    }

    #[must_use]
    pub fn once_on(self, date: Date) -> Self {
        self.recurrence(Recurrence::None).starting(date)
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn starting(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    #[must_use]
    pub fn ending(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    #[must_use]
    pub fn build(self) -> ExpenseRecord {
        let category = self.category.unwrap_or_else(|| self.name.clone());
        ExpenseRecord {
            name: self.name,
            amount: self.amount,
            recurrence: self.recurrence,
            category,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

// ============================================================================
// Holdings
// ============================================================================

#[derive(Debug, Clone)]
pub struct HoldingBuilder {
    holding: InvestmentHolding,
    cost_basis: Option<f64>,
}

impl HoldingBuilder {
    /// Holding in a taxable account with zero value until set
    pub fn new(symbol: impl Into<String>, asset_class: AssetClass) -> Self {
        Self {
            holding: InvestmentHolding {
                symbol: symbol.into(),
                value: 0.0,
                cost_basis: 0.0,
                asset_class,
                tax_location: TaxLocation::Taxable,
                expense_ratio: None,
                dividend_yield: None,
            },
            cost_basis: None,
        }
    }

    pub fn stock(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetClass::Stock)
    }

    pub fn bond(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetClass::Bond)
    }

    pub fn cash(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetClass::Cash)
    }

    pub fn real_estate(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetClass::RealEstate)
    }

    /// Market value; the cost basis defaults to it when not set
    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.holding.value = value;
        self
    }

    #[must_use]
    pub fn cost_basis(mut self, cost_basis: f64) -> Self {
        self.cost_basis = Some(cost_basis);
        self
    }

    #[must_use]
    pub fn expense_ratio(mut self, pct: f64) -> Self {
        self.holding.expense_ratio = Some(pct);
        self
    }

    #[must_use]
    pub fn dividend_yield(mut self, pct: f64) -> Self {
        self.holding.dividend_yield = Some(pct);
        self
    }

    #[must_use]
    pub fn tax_location(mut self, location: TaxLocation) -> Self {
        self.holding.tax_location = location;
        self
    }

    #[must_use]
    pub fn tax_deferred(self) -> Self {
        self.tax_location(TaxLocation::TaxDeferred)
    }

    #[must_use]
    pub fn tax_free(self) -> Self {
        self.tax_location(TaxLocation::TaxFree)
    }

    #[must_use]
    pub fn build(self) -> InvestmentHolding {
        InvestmentHolding {
            cost_basis: self.cost_basis.unwrap_or(self.holding.value),
            ..self.holding
        }
    }
}

mod holdings;
mod records;
mod results;
pub(crate) mod tax;

pub use holdings::{AssetClass, InvestmentHolding, TaxLocation};
pub use records::{
    Deduction, ExpenseRecord, IncomeCategory, IncomeRecord, Recurrence, TaxClass,
};
pub use results::{
    AssetClassBucket, CashflowForecast, CategoryTotal, CorrelationMatrix, DiversificationMetrics,
    MonthOverMonth, MonthPoint, PaycheckBreakdown, PortfolioPerformance, SimulationResult,
    SourceBreakdown, TaxEfficiency,
};
pub use tax::{
    AppliedBracket, BracketRange, TaxBracket, TaxComputation, TaxImpactPrediction, TaxTable,
    validate_brackets,
};

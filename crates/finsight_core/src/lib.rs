//! Financial analytics engine
//!
//! Pure, synchronous calculation routines over in-memory financial records:
//! - Recurrence normalization to monthly equivalents
//! - Progressive income tax with bracket breakdowns
//! - Paycheck (take-home) simulation
//! - Cashflow forecasting with savings rate and month-over-month deltas
//! - Income diversification scoring
//! - Portfolio allocation, performance, tax-location efficiency and a
//!   correlation heuristic
//!
//! Nothing here performs I/O or keeps state between calls. Fallback data such
//! as [`TaxTable::us_federal_2024_single`](model::TaxTable::us_federal_2024_single)
//! is chosen by the caller and passed in explicitly.
//!
//! ```ignore
//! use finsight_core::config::IncomeBuilder;
//! use finsight_core::model::TaxTable;
//! use finsight_core::paycheck::{PaycheckDeductions, simulate};
//!
//! let table = TaxTable::us_federal_2024_single();
//! let result = simulate(85_000.0, &PaycheckDeductions::default(), table.brackets())?;
//! println!("take home: {:.2}", result.take_home);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Analytics components
// ============================================================================

pub mod cashflow;
pub mod diversification;
pub mod paycheck;
pub mod portfolio;
pub mod recurrence;
pub mod taxes;

// ============================================================================
// Supporting modules
// ============================================================================

pub mod config;
pub mod date_math;
pub mod error;
pub mod model;

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{AnalyticsError, BracketTableError, Result};
pub use recurrence::monthly_equivalent;
pub use taxes::compute_tax;

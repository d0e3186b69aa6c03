//! Explicit defaults and builders
//!
//! Fallback data such as the default tax table and target allocation are
//! plain values the caller chooses to pass in. The engine never substitutes
//! them on its own.
//!
//! # Builder DSL
//!
//! ```ignore
//! use finsight_core::config::{ExpenseBuilder, HoldingBuilder, IncomeBuilder};
//!
//! let salary = IncomeBuilder::salary("Acme Corp")
//!     .amount(3_200.0)
//!     .bi_weekly()
//!     .pre_tax("401k", 250.0)
//!     .build();
//!
//! let rent = ExpenseBuilder::new("Rent")
//!     .amount(1_850.0)
//!     .monthly()
//!     .category("Housing")
//!     .build();
//!
//! let vti = HoldingBuilder::stock("VTI")
//!     .value(25_000.0)
//!     .cost_basis(18_000.0)
//!     .tax_deferred()
//!     .build();
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::tax::brackets_from_thresholds;
use crate::model::{AssetClass, TaxTable};

pub mod builders;

pub use builders::{ExpenseBuilder, HoldingBuilder, IncomeBuilder};

impl TaxTable {
    /// 2024 US federal brackets for a single filer.
    ///
    /// This is the documented fallback for callers without a stored table.
    #[must_use]
    pub fn us_federal_2024_single() -> Self {
        const THRESHOLDS: [(f64, f64); 7] = [
            (0.0, 0.10),
            (11_600.0, 0.12),
            (47_150.0, 0.22),
            (100_525.0, 0.24),
            (191_950.0, 0.32),
            (243_725.0, 0.35),
            (609_350.0, 0.37),
        ];
        Self::from_trusted(brackets_from_thresholds(&THRESHOLDS))
    }

    /// A single-bracket table taxing all income at `rate`
    pub fn flat(rate: f64) -> Result<Self> {
        Self::from_thresholds(&[(0.0, rate)])
    }
}

/// Target percentage per asset class, used to compute allocation drift
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetAllocation {
    targets: BTreeMap<AssetClass, f64>,
}

impl TargetAllocation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 60% stocks, 30% bonds, 10% cash
    #[must_use]
    pub fn balanced() -> Self {
        Self::new()
            .with(AssetClass::Stock, 60.0)
            .with(AssetClass::Bond, 30.0)
            .with(AssetClass::Cash, 10.0)
    }

    #[must_use]
    pub fn with(mut self, asset_class: AssetClass, target_pct: f64) -> Self {
        self.targets.insert(asset_class, target_pct);
        self
    }

    #[must_use]
    pub fn target_for(&self, asset_class: AssetClass) -> Option<f64> {
        self.targets.get(&asset_class).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        self.targets.iter().map(|(class, pct)| (*class, *pct))
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.targets.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxes::compute_tax;

    #[test]
    fn test_default_table_shape() {
        let table = TaxTable::us_federal_2024_single();
        let rates: Vec<f64> = table.brackets().iter().map(|b| b.rate).collect();
        assert_eq!(rates, vec![0.10, 0.12, 0.22, 0.24, 0.32, 0.35, 0.37]);
        assert_eq!(table.brackets().last().unwrap().upper_bound, None);
    }

    #[test]
    fn test_default_table_tax() {
        let table = TaxTable::us_federal_2024_single();
        let result = compute_tax(50_000.0, table.brackets()).unwrap();
        assert!((result.total_tax - 6_053.0).abs() < 0.01);
    }

    #[test]
    fn test_flat_table() {
        let table = TaxTable::flat(0.15).unwrap();
        let result = compute_tax(1_000.0, table.brackets()).unwrap();
        assert!((result.total_tax - 150.0).abs() < 1e-9);
        assert!(TaxTable::flat(-0.1).is_err());
    }

    #[test]
    fn test_target_allocation() {
        let targets = TargetAllocation::balanced();
        assert_eq!(targets.target_for(AssetClass::Stock), Some(60.0));
        assert_eq!(targets.target_for(AssetClass::Crypto), None);
        assert!((targets.total() - 100.0).abs() < f64::EPSILON);
        let classes: Vec<AssetClass> = targets.iter().map(|(c, _)| c).collect();
        assert_eq!(classes, vec![AssetClass::Stock, AssetClass::Bond, AssetClass::Cash]);
    }
}

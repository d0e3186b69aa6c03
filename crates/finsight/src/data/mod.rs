//! Household input files and saved history
//!
//! Directory structure:
//! ~/.finsight/
//!   history.yaml     # Saved paycheck simulations
//!   finsight.log     # Log output when --log-file is given

pub mod history;
pub mod household;

pub use history::{History, HistoryEntry, StorageError, record_paycheck};
pub use household::{Household, PaycheckData};

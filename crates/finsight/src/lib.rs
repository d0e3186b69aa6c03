//! finsight command-line front end
//!
//! Loads a household YAML file, substitutes documented fallbacks (the 2024
//! US federal tax table, a 60/30/10 target allocation) and prints summaries
//! computed by `finsight_core`.

pub mod commands;
pub mod data;
pub mod logging;
pub mod report;
pub mod util;

pub use commands::{Command, Context, execute};
pub use logging::init_logging;

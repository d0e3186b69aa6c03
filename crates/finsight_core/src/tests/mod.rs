//! Cross-component tests for the analytics engine
//!
//! Tests are organized by topic:
//! - `scenarios` - Worked numeric examples for each component
//! - `properties` - Invariants checked over generated inputs (proptest)
//! - `household` - A full household run through every component

//! Reporting utilities: formatted terminal output for chart builds.
//!
//! We keep formatting code in one place so:
//! - the data/chart code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;

//! Output helpers.
//!
//! - per-point CSV and chart-configuration JSON exports (`export`)

pub mod export;

pub use export::*;

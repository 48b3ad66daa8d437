//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw price records as they appear in the input JSON (`PriceRecord`)
//! - derived plottable series (`PriceSeries`, `PricePoint`, `LineStyle`)
//! - run configuration and application state (`ChartConfig`, `AppState`)

pub mod types;

pub use types::*;

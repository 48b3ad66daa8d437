//! Chart series construction.
//!
//! Responsibilities:
//!
//! - turn raw records into grouped, sorted, styled series (`series`)
//! - map series to the rendering collaborator's configuration object (`spec`)

pub mod series;
pub mod spec;

pub use series::*;
pub use spec::*;

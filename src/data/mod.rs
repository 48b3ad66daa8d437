//! Data loading.
//!
//! One retrieval per run: a JSON array of flat price records, from a local
//! file or an HTTP endpoint.

pub mod source;

pub use source::*;

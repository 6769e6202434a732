//! Terminal output for lookup results.
//!
//! - `format`: JSON and plain-table rendering of features and address plans

pub mod format;

pub use format::*;

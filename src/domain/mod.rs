//! Domain types used throughout the lookup path.
//!
//! This module defines:
//!
//! - tagged address components (`AddressComponent`, `TaggedAddress`)
//! - layer registration (`LayerRegistry`)
//! - query inputs (`QueryOptions`, `QueryParameters`)
//! - query outputs (`ParcelFeature`, `QueryOutcome`)

pub mod types;

pub use types::*;

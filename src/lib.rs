//! `sf-parcels` library crate.
//!
//! The binary (`parcels`) is a thin wrapper around this library so that:
//!
//! - lookups are testable without spawning processes or touching the network
//! - the resolver can be embedded behind other front ends (web handlers, jobs)
//! - collaborators (address tagger, feature query client) stay swappable

pub mod address;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod report;
pub mod resolver;

pub use domain::{LayerRegistry, ParcelFeature, QueryOptions, QueryOutcome};
pub use error::ResolveError;
pub use resolver::ParcelResolver;

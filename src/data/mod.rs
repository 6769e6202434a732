//! Remote data access.
//!
//! - `arcgis`: feature-layer `/query` client (`FeatureQuery` + `ArcgisClient`)

pub mod arcgis;

pub use arcgis::{ArcgisClient, FeatureQuery, query_url};

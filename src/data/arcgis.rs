//! ArcGIS feature-layer query integration.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::Settings;
use crate::domain::QueryParameters;
use crate::error::{AppError, ResolveError};

/// The remote query capability the resolver depends on.
///
/// Implementations send one GET to `<layer_url>/query` and hand back the parsed
/// JSON body. Network failures, non-2xx statuses and undecodable bodies are
/// failures; interpreting the body is left to the caller.
pub trait FeatureQuery {
    fn query(&self, layer_url: &str, params: &QueryParameters) -> Result<Value, ResolveError>;
}

impl<Q: FeatureQuery + ?Sized> FeatureQuery for &Q {
    fn query(&self, layer_url: &str, params: &QueryParameters) -> Result<Value, ResolveError> {
        (**self).query(layer_url, params)
    }
}

/// `<layer_url>/query`, tolerating a trailing slash on the layer URL.
pub fn query_url(layer_url: &str) -> String {
    format!("{}/query", layer_url.trim_end_matches('/'))
}

pub struct ArcgisClient {
    client: Client,
}

impl ArcgisClient {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        Self::new(settings.timeout)
    }
}

impl FeatureQuery for ArcgisClient {
    fn query(&self, layer_url: &str, params: &QueryParameters) -> Result<Value, ResolveError> {
        let url = query_url(layer_url);
        debug!(%url, where_clause = %params.where_clause, "querying feature layer");

        let resp = self
            .client
            .get(&url)
            .query(&params.to_query_pairs())
            .send()
            .map_err(|e| ResolveError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(ResolveError::Status {
                url,
                status: resp.status().as_u16(),
            });
        }

        resp.json::<Value>().map_err(|e| ResolveError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

//! Shared domain types.
//!
//! These types are intentionally small and serializable so they can be:
//!
//! - passed between the tagger, the normalizer and the resolver
//! - printed by the CLI (`--dry-run`, `--format json`)
//! - built by hand in tests

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Logical name of the parcel layer every lookup runs against.
pub const PARCEL_LAYER: &str = "parcel";

/// Attribute fields returned when the caller does not choose any.
pub const DEFAULT_OUT_FIELDS: &str = "blklot,block_num,lot_num,ADDRESS";

/// Labels produced by the address tagger.
///
/// The serialized names follow the usaddress vocabulary so tagged output can be
/// compared against other tooling built on that library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AddressComponent {
    AddressNumber,
    AddressNumberSuffix,
    StreetNamePreDirectional,
    StreetNamePreType,
    StreetName,
    StreetNamePostType,
    StreetNamePostDirectional,
    OccupancyType,
    OccupancyIdentifier,
    PlaceName,
    StateName,
    ZipCode,
}

impl AddressComponent {
    pub fn label(self) -> &'static str {
        match self {
            AddressComponent::AddressNumber => "AddressNumber",
            AddressComponent::AddressNumberSuffix => "AddressNumberSuffix",
            AddressComponent::StreetNamePreDirectional => "StreetNamePreDirectional",
            AddressComponent::StreetNamePreType => "StreetNamePreType",
            AddressComponent::StreetName => "StreetName",
            AddressComponent::StreetNamePostType => "StreetNamePostType",
            AddressComponent::StreetNamePostDirectional => "StreetNamePostDirectional",
            AddressComponent::OccupancyType => "OccupancyType",
            AddressComponent::OccupancyIdentifier => "OccupancyIdentifier",
            AddressComponent::PlaceName => "PlaceName",
            AddressComponent::StateName => "StateName",
            AddressComponent::ZipCode => "ZipCode",
        }
    }
}

/// An address decomposed into labeled components.
///
/// Produced once by a tagger and then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaggedAddress {
    components: BTreeMap<AddressComponent, String>,
}

impl TaggedAddress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; empty values are ignored.
    pub fn with(mut self, component: AddressComponent, value: impl Into<String>) -> Self {
        self.insert(component, value);
        self
    }

    pub(crate) fn insert(&mut self, component: AddressComponent, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.components.insert(component, value);
        }
    }

    pub fn get(&self, component: AddressComponent) -> Option<&str> {
        self.components.get(&component).map(String::as_str)
    }

    pub fn contains(&self, component: AddressComponent) -> bool {
        self.components.contains_key(&component)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AddressComponent, &str)> {
        self.components.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Named GIS layer endpoints.
///
/// Registration happens at startup; lookups treat an empty URL as unregistered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerRegistry {
    layers: BTreeMap<String, String>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) a layer. The URL is not validated.
    pub fn set_layer(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.layers.insert(name.into(), url.into());
    }

    pub fn with_layer(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.set_layer(name, url);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.layers
            .get(name)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Names from `required` that have no usable URL.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| self.get(name).is_none())
            .collect()
    }
}

/// Per-call overrides for a parcel lookup.
///
/// Anything left as `None` falls back to the default parameter template.
/// Suggestions (fallback tiers) are off unless explicitly requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub out_fields: Option<String>,
    pub return_geometry: Option<bool>,
    pub return_suggestions: bool,
}

impl QueryOptions {
    pub fn with_out_fields(mut self, fields: impl Into<String>) -> Self {
        self.out_fields = Some(fields.into());
        self
    }

    pub fn with_geometry(mut self, geometry: bool) -> Self {
        self.return_geometry = Some(geometry);
        self
    }

    pub fn with_suggestions(mut self, suggestions: bool) -> Self {
        self.return_suggestions = suggestions;
        self
    }
}

/// Query-string parameters for a feature-layer `/query` request.
///
/// Always built fresh from [`QueryParameters::from_options`]; nothing is shared
/// between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameters {
    #[serde(rename = "outFields")]
    pub out_fields: String,
    #[serde(rename = "returnGeometry")]
    pub return_geometry: bool,
    #[serde(rename = "f")]
    pub format: String,
    #[serde(rename = "where")]
    pub where_clause: String,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            out_fields: DEFAULT_OUT_FIELDS.to_string(),
            return_geometry: false,
            format: "json".to_string(),
            where_clause: String::new(),
        }
    }
}

impl QueryParameters {
    pub fn from_options(options: &QueryOptions) -> Self {
        let mut params = Self::default();
        if let Some(fields) = &options.out_fields {
            params.out_fields = fields.clone();
        }
        if let Some(geometry) = options.return_geometry {
            params.return_geometry = geometry;
        }
        params
    }

    /// Replace the filter predicate.
    pub fn with_where(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = where_clause.into();
        self
    }

    /// `(name, value)` pairs in the order they go on the query string.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("outFields", self.out_fields.clone()),
            ("returnGeometry", self.return_geometry.to_string()),
            ("f", self.format.clone()),
            ("where", self.where_clause.clone()),
        ]
    }
}

impl std::fmt::Display for QueryParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

/// One record returned by the feature service.
///
/// Only the requested attribute fields are present; `geometry` is present only
/// when the query asked for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParcelFeature {
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Value>,
}

impl ParcelFeature {
    /// Attribute value rendered as text. Numbers are formatted; nulls are `None`.
    pub fn attribute(&self, field: &str) -> Option<String> {
        match self.attributes.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Polygon rings, when geometry was requested.
    pub fn rings(&self) -> Option<&Vec<Value>> {
        self.geometry.as_ref()?.get("rings")?.as_array()
    }
}

/// Outcome of one lookup: features, no features, or a failure signal.
pub type QueryOutcome = Result<Vec<ParcelFeature>, crate::error::ResolveError>;

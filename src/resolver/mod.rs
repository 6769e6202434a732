//! Address / parcel-id lookup against the parcel feature layer.
//!
//! Address lookups run up to three queries, each only if the previous one came
//! back empty:
//!
//! 1. exact: house number + canonical street (+ unit when given)
//! 2. without unit: same, minus the unit clause (suggestions on, unit given)
//! 3. block: every address on the hundred-block, matched on the tagged street
//!    name as written (suggestions on)
//!
//! A failed query ends the lookup; later tiers never run after a failure.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::address::{AddressTagger, UsAddressTagger, canonical_street_name};
use crate::data::{FeatureQuery, query_url};
use crate::domain::{
    AddressComponent, LayerRegistry, PARCEL_LAYER, ParcelFeature, QueryOptions, QueryOutcome,
    QueryParameters, TaggedAddress,
};
use crate::error::ResolveError;

pub mod predicate;

const COMPONENT: &str = "ParcelResolver";

/// Which query of an address lookup is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Exact,
    WithoutUnit,
    Block,
    Parcel,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::Exact => "exact",
            Tier::WithoutUnit => "without-unit",
            Tier::Block => "block",
            Tier::Parcel => "parcel",
        };
        f.write_str(name)
    }
}

/// Upper-case the address and spell `#` as `UNIT ` so the tagger sees a unit designator.
pub fn prepare_address(address: &str) -> String {
    address.to_uppercase().replace('#', "UNIT ")
}

/// Everything derived from an address before any query is sent.
#[derive(Debug, Clone, Serialize)]
pub struct AddressPlan {
    pub prepared: String,
    pub tagged: TaggedAddress,
    pub house_number: Option<String>,
    pub street_name: Option<String>,
    pub raw_street_name: Option<String>,
    pub unit: Option<String>,
}

impl AddressPlan {
    /// Predicate for the exact query, if the address has enough to query on.
    pub fn exact_predicate(&self) -> Option<String> {
        let number = self.house_number.as_deref()?;
        let street = self.street_name.as_deref()?;
        Some(predicate::exact_address(number, street, self.unit.as_deref()))
    }
}

pub struct ParcelResolver<Q, T = UsAddressTagger> {
    layers: LayerRegistry,
    client: Q,
    tagger: T,
}

impl<Q: FeatureQuery> ParcelResolver<Q> {
    pub fn new(layers: LayerRegistry, client: Q) -> Self {
        Self {
            layers,
            client,
            tagger: UsAddressTagger,
        }
    }
}

impl<Q: FeatureQuery, T: AddressTagger> ParcelResolver<Q, T> {
    pub fn with_tagger<U: AddressTagger>(self, tagger: U) -> ParcelResolver<Q, U> {
        ParcelResolver {
            layers: self.layers,
            client: self.client,
            tagger,
        }
    }

    /// Register (or replace) a layer. Needs `&mut`, so no lookup can be in flight.
    pub fn set_layer(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.layers.set_layer(name, url);
    }

    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    /// Tag and canonicalize an address without querying.
    pub fn plan_address(&self, address: &str) -> AddressPlan {
        let prepared = prepare_address(address);
        let tagged = self.tagger.tag(&prepared);

        let house_number = tagged
            .get(AddressComponent::AddressNumber)
            .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .map(str::to_string);
        if house_number.is_none() && tagged.contains(AddressComponent::AddressNumber) {
            warn!(component = COMPONENT, %prepared, "house number is not numeric");
        }

        AddressPlan {
            street_name: canonical_street_name(&tagged),
            raw_street_name: tagged
                .get(AddressComponent::StreetName)
                .map(str::to_uppercase),
            unit: tagged
                .get(AddressComponent::OccupancyIdentifier)
                .map(str::to_uppercase),
            house_number,
            prepared,
            tagged,
        }
    }

    /// Parcels at `address`.
    ///
    /// `Ok(vec![])` means no match (including addresses without a house number
    /// or street name); `Err` means the layer is not configured or a query failed.
    pub fn resolve_by_address(&self, address: &str, options: &QueryOptions) -> QueryOutcome {
        let layer_url = self.parcel_layer()?;
        let plan = self.plan_address(address);

        let (Some(number), Some(street)) = (plan.house_number.as_deref(), plan.street_name.as_deref())
        else {
            debug!(component = COMPONENT, prepared = %plan.prepared, "address lacks house number or street name");
            return Ok(Vec::new());
        };

        let params = QueryParameters::from_options(options);
        let unit = plan.unit.as_deref();

        let exact = predicate::exact_address(number, street, unit);
        let features = self.run(Tier::Exact, layer_url, params.clone().with_where(exact))?;
        if !features.is_empty() || !options.return_suggestions {
            return Ok(features);
        }

        if unit.is_some() {
            let without_unit = predicate::exact_address(number, street, None);
            let features = self.run(Tier::WithoutUnit, layer_url, params.clone().with_where(without_unit))?;
            if !features.is_empty() {
                return Ok(features);
            }
        }

        // The block query matches on the street name as tagged, not canonicalized.
        let (Some((lower, upper)), Some(raw_street)) =
            (predicate::block_bounds(number), plan.raw_street_name.as_deref())
        else {
            warn!(component = COMPONENT, prepared = %plan.prepared, "no block range for address");
            return Ok(Vec::new());
        };
        let block = predicate::block_range(&lower, &upper, raw_street);
        self.run(Tier::Block, layer_url, params.with_where(block))
    }

    /// Parcels with this block-lot id. No fallback.
    pub fn resolve_by_parcel(&self, blklot: &str, options: &QueryOptions) -> QueryOutcome {
        let layer_url = self.parcel_layer()?;
        let params = QueryParameters::from_options(options).with_where(predicate::parcel(blklot));
        self.run(Tier::Parcel, layer_url, params)
    }

    fn parcel_layer(&self) -> Result<&str, ResolveError> {
        if let Some(layer) = self.layers.missing(&[PARCEL_LAYER]).first() {
            error!(component = COMPONENT, layer = *layer, "missing parcel layer");
            return Err(ResolveError::missing_layer(*layer));
        }
        self.layers
            .get(PARCEL_LAYER)
            .ok_or_else(|| ResolveError::missing_layer(PARCEL_LAYER))
    }

    fn run(&self, tier: Tier, layer_url: &str, params: QueryParameters) -> QueryOutcome {
        debug!(component = COMPONENT, %tier, where_clause = %params.where_clause, "running parcel query");

        let outcome = self
            .client
            .query(layer_url, &params)
            .and_then(|body| features_from_body(&query_url(layer_url), body));

        match outcome {
            Ok(features) => {
                debug!(component = COMPONENT, %tier, count = features.len(), "parcel query finished");
                Ok(features)
            }
            Err(err) => {
                error!(
                    component = COMPONENT,
                    %tier,
                    url = %query_url(layer_url),
                    params = %params,
                    error = %err,
                    "parcel query failed"
                );
                Err(err)
            }
        }
    }
}

/// Pull `features` out of a query response body.
///
/// A body without `features` has no features. An ArcGIS `error` object is a failure.
pub fn features_from_body(url: &str, mut body: Value) -> Result<Vec<ParcelFeature>, ResolveError> {
    if let Some(err) = body.get("error") {
        return Err(ResolveError::Service {
            code: err.get("code").and_then(Value::as_i64).unwrap_or_default(),
            message: err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        });
    }

    match body.get_mut("features").map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(features) => serde_json::from_value(features).map_err(|e| ResolveError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        }),
    }
}

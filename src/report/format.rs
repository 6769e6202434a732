//! Formatted terminal output.
//!
//! Formatting lives here so the resolver stays free of presentation concerns.

use crate::domain::{ParcelFeature, QueryParameters};
use crate::error::AppError;
use crate::resolver::AddressPlan;

/// Pretty JSON array of features, as returned by the service.
pub fn format_features_json(features: &[ParcelFeature]) -> Result<String, AppError> {
    serde_json::to_string_pretty(features)
        .map_err(|e| AppError::new(4, format!("Failed to serialize features: {e}")))
}

/// One row per feature with the requested attribute columns.
///
/// Features that carry geometry get a trailing ring count.
pub fn format_features_table(features: &[ParcelFeature], out_fields: &str) -> String {
    if features.is_empty() {
        return "No parcels found.\n".to_string();
    }

    let columns: Vec<&str> = out_fields
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != "*")
        .collect();
    let columns: Vec<String> = if columns.is_empty() {
        // `*` or nothing: show whatever the first feature came back with.
        features[0].attributes.keys().cloned().collect()
    } else {
        columns.into_iter().map(str::to_string).collect()
    };

    let show_rings = features.iter().any(|f| f.geometry.is_some());

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(features.len() + 1);
    let mut header: Vec<String> = columns.clone();
    if show_rings {
        header.push("rings".to_string());
    }
    rows.push(header);

    for feature in features {
        let mut row: Vec<String> = columns
            .iter()
            .map(|c| feature.attribute(c).unwrap_or_else(|| "-".to_string()))
            .collect();
        if show_rings {
            row.push(feature.rings().map_or("-".to_string(), |r| r.len().to_string()));
        }
        rows.push(row);
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|i| rows.iter().map(|r| r[i].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for (idx, row) in rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
        if idx == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("  "));
            out.push('\n');
        }
    }
    out.push_str(&format!("{} parcel(s)\n", features.len()));
    out
}

/// What an address lookup would send, without sending it.
pub fn format_address_plan(plan: &AddressPlan, params: &QueryParameters) -> String {
    let mut out = String::new();
    out.push_str(&format!("Prepared: {}\n", plan.prepared));
    out.push_str("Components:\n");
    for (component, value) in plan.tagged.iter() {
        out.push_str(&format!("  {:<26} {}\n", component.label(), value));
    }
    out.push_str(&format!(
        "Street name: {}\n",
        plan.street_name.as_deref().unwrap_or("-")
    ));
    match plan.exact_predicate() {
        Some(clause) => {
            out.push_str(&format!("Where: {clause}\n"));
            out.push_str(&format!("Params: {}\n", params.clone().with_where(clause)));
        }
        None => out.push_str("Where: - (no house number or street name; lookup returns nothing)\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{DEFAULT_OUT_FIELDS, LayerRegistry};
    use crate::resolver::ParcelResolver;

    fn feature(value: serde_json::Value) -> ParcelFeature {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn table_lists_requested_columns() {
        let features = vec![
            feature(json!({"attributes": {"blklot": "3512008", "ADDRESS": "1650 MISSION ST"}})),
            feature(json!({"attributes": {"blklot": "3512010", "ADDRESS": "1660 MISSION ST"}})),
        ];
        let table = format_features_table(&features, "blklot,ADDRESS");
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "blklot   ADDRESS");
        assert_eq!(lines[2], "3512008  1650 MISSION ST");
        assert_eq!(lines.last(), Some(&"2 parcel(s)"));
        assert!(!table.contains("rings"));
    }

    #[test]
    fn table_marks_missing_attributes_and_rings() {
        let features = vec![feature(json!({
            "attributes": {"blklot": "3512008"},
            "geometry": {"rings": [[[0.0, 0.0]], [[1.0, 1.0]]]}
        }))];
        let table = format_features_table(&features, DEFAULT_OUT_FIELDS);
        assert!(table.lines().next().unwrap().ends_with("rings"));
        assert!(table.contains("3512008  -"));
        assert!(table.lines().nth(2).unwrap().ends_with('2'));
    }

    #[test]
    fn empty_table() {
        assert_eq!(format_features_table(&[], DEFAULT_OUT_FIELDS), "No parcels found.\n");
    }

    #[test]
    fn json_omits_absent_geometry() {
        let features = vec![feature(json!({"attributes": {"blklot": "3512008"}}))];
        let out = format_features_json(&features).unwrap();
        assert!(out.contains("\"blklot\": \"3512008\""));
        assert!(!out.contains("geometry"));
    }

    #[test]
    fn plan_shows_predicate() {
        struct Unused;
        impl crate::data::FeatureQuery for Unused {
            fn query(
                &self,
                _: &str,
                _: &QueryParameters,
            ) -> Result<serde_json::Value, crate::error::ResolveError> {
                unreachable!("dry runs never query")
            }
        }

        let resolver = ParcelResolver::new(LayerRegistry::new(), Unused);
        let plan = resolver.plan_address("505 s van ness ave #2");
        let out = format_address_plan(&plan, &QueryParameters::default());
        assert!(out.contains("StreetNamePreDirectional"));
        assert!(out.contains("Street name: SOUTH VAN NESS"));
        assert!(out.contains(
            "Where: base_address_num=505 and street_name='SOUTH VAN NESS' and unit_address='2'"
        ));
    }
}

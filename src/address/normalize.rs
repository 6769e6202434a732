//! Street-name canonicalization.
//!
//! The parcel layer stores street names the way the city's master address list
//! spells them: numbered streets zero-padded (`01ST`), directionals spelled
//! out, `BAY SHORE` as two words, pre-types in front of the name. Each rule is
//! its own step so it can be tested on its own; `canonical_street_name` runs
//! them in order:
//!
//! 1. strip punctuation
//! 2. numbered streets
//! 3. spelling unification
//! 4. pre-type
//! 5. directionals
//! 6. whitespace
//!
//! Case is left alone; the resolver upper-cases the whole address before tagging.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{AddressComponent, TaggedAddress};

static NON_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z ]+").expect("valid regex"));

static SHORT_DIRECTIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([NSWE])\b").expect("valid regex"));

/// Spelled-out and unpadded ordinals and the padded form the layer uses.
const NUMBERED_STREETS: &[(&str, &[&str])] = &[
    ("01ST", &["1ST", "FIRST"]),
    ("02ND", &["2ND", "SECOND"]),
    ("03RD", &["3RD", "THIRD"]),
    ("04TH", &["4TH", "FOURTH"]),
    ("05TH", &["5TH", "FIFTH"]),
    ("06TH", &["6TH", "SIXTH"]),
    ("07TH", &["7TH", "SEVENTH"]),
    ("08TH", &["8TH", "EIGHTH"]),
    ("09TH", &["9TH", "NINTH"]),
    ("10TH", &["TENTH"]),
];

/// Canonical street name for the tagged address, or `None` without a `StreetName`.
pub fn canonical_street_name(tagged: &TaggedAddress) -> Option<String> {
    let name = tagged.get(AddressComponent::StreetName)?;

    let name = strip_punctuation(name);
    let name = pad_numbered_street(&name);
    let name = unify_spellings(&name);
    let name = prepend_pre_type(&name, tagged.get(AddressComponent::StreetNamePreType));
    let name = apply_directionals(
        &name,
        tagged.get(AddressComponent::StreetNamePreDirectional),
        tagged.contains(AddressComponent::StreetNamePostDirectional),
    );

    Some(collapse_whitespace(&name))
}

/// Drop everything except ASCII letters, digits and spaces (`O'FARRELL` -> `OFARRELL`).
pub fn strip_punctuation(name: &str) -> String {
    NON_NAME_CHARS.replace_all(name, "").into_owned()
}

/// Whole-name match only: `1ST` becomes `01ST`, `1ST AVE` is untouched.
pub fn pad_numbered_street(name: &str) -> String {
    NUMBERED_STREETS
        .iter()
        .find(|(_, spellings)| spellings.contains(&name))
        .map(|(canonical, _)| canonical.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// The layer spells it `BAY SHORE`; signage and people often write `BAYSHORE`.
pub fn unify_spellings(name: &str) -> String {
    name.replace("BAYSHORE", "BAY SHORE")
}

pub fn prepend_pre_type(name: &str, pre_type: Option<&str>) -> String {
    match pre_type {
        Some(pre_type) => format!("{pre_type} {name}"),
        None => name.to_string(),
    }
}

/// Only applies when the address carried a directional at all.
///
/// The pre-directional goes in front; then any standalone `N`/`S`/`W`/`E` in
/// the name is spelled out.
pub fn apply_directionals(name: &str, pre_directional: Option<&str>, has_post_directional: bool) -> String {
    if pre_directional.is_none() && !has_post_directional {
        return name.to_string();
    }

    let name = match pre_directional {
        Some(dir) => format!("{dir} {name}"),
        None => name.to_string(),
    };

    SHORT_DIRECTIONAL
        .replace_all(&name, |caps: &regex::Captures<'_>| match &caps[1] {
            "N" => "NORTH",
            "S" => "SOUTH",
            "W" => "WEST",
            _ => "EAST",
        })
        .into_owned()
}

pub fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! Rule-based US street-address tagger.
//!
//! The resolver only needs a handful of components (house number, street name,
//! directionals, pre-type, unit), so the default tagger is a small positional
//! parser over whitespace tokens rather than a trained model. Anything that
//! needs better recall can plug in its own `AddressTagger`.
//!
//! Layout handled, in order:
//!
//! ```text
//! NUMBER [PREDIR] [PRETYPE] NAME... [POSTTYPE] [POSTDIR] [OCCTYPE ID] [, PLACE [STATE] [ZIP]]
//! ```

use crate::address::vocab::{
    is_directional, is_occupancy_type, is_pre_type, is_state_code, is_street_type, is_zip_code,
};
use crate::domain::{AddressComponent, TaggedAddress};

/// Decomposes an upper-cased address string into labeled components.
pub trait AddressTagger {
    fn tag(&self, address: &str) -> TaggedAddress;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UsAddressTagger;

impl AddressTagger for UsAddressTagger {
    fn tag(&self, address: &str) -> TaggedAddress {
        let mut tagged = TaggedAddress::new();

        let mut segments = address.split(',');
        let mut tokens = tokenize(segments.next().unwrap_or(""));
        let mut locality: Vec<String> = segments.flat_map(tokenize).collect();

        // A trailing "CA 94103" on the street line belongs to the locality.
        let trailing = split_trailing_state_zip(&mut tokens);
        let had_trailing = !trailing.is_empty();
        if had_trailing && locality.is_empty() {
            let street_end = last_street_type_index(&tokens);
            if let Some(end) = street_end {
                let mut keep = if tokens.get(end + 1).is_some_and(|t| is_directional(t)) {
                    end + 2
                } else {
                    end + 1
                };
                // A unit between the street type and the city stays on the street line.
                if tokens.get(keep).is_some_and(|t| is_occupancy_type(t)) {
                    while tokens.get(keep).is_some_and(|t| is_occupancy_type(t)) {
                        keep += 1;
                    }
                    keep += 1;
                }
                if keep < tokens.len() {
                    locality.extend(tokens.drain(keep..));
                }
            }
        }
        locality.extend(trailing);

        let mut idx = 0;
        if let Some((number, suffix)) = tokens.first().and_then(|t| split_house_number(t)) {
            tagged.insert(AddressComponent::AddressNumber, number);
            if let Some(suffix) = suffix {
                tagged.insert(AddressComponent::AddressNumberSuffix, suffix);
            }
            idx = 1;
        }

        // Occupancy needs at least one street token before it.
        let occupancy_at = (idx + 1..tokens.len()).find(|&i| is_occupancy_type(&tokens[i]));
        let street_end = occupancy_at.unwrap_or(tokens.len());

        if let Some(at) = occupancy_at {
            tagged.insert(AddressComponent::OccupancyType, tokens[at].clone());
            // "UNIT #5" arrives here as "UNIT UNIT 5".
            let id_at = (at + 1..tokens.len()).find(|&i| !is_occupancy_type(&tokens[i]));
            if let Some(id_at) = id_at {
                tagged.insert(
                    AddressComponent::OccupancyIdentifier,
                    tokens[id_at].trim_start_matches('#').to_string(),
                );
                let mut rest = tokens[id_at + 1..].to_vec();
                rest.append(&mut locality);
                locality = rest;
            }
        }

        tag_street(&tokens[idx..street_end], &mut tagged);
        tag_locality(&locality, &mut tagged);

        tagged
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c| c == '.' || c == ','))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// `1650` -> (`1650`, None); `25A` -> (`25`, `A`); `1ST` is not a house number.
fn split_house_number(token: &str) -> Option<(String, Option<String>)> {
    let digits_end = token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    if digits_end == 0 {
        return None;
    }
    let (number, rest) = token.split_at(digits_end);
    let rest = rest.trim_start_matches('-');
    let suffix_ok = rest.is_empty()
        || rest == "1/2"
        || (rest.len() == 1 && rest.chars().all(|c| c.is_ascii_alphabetic()));
    if !suffix_ok {
        return None;
    }
    let suffix = (!rest.is_empty()).then(|| rest.to_string());
    Some((number.to_string(), suffix))
}

fn split_trailing_state_zip(tokens: &mut Vec<String>) -> Vec<String> {
    let mut out = Vec::new();
    if tokens.last().is_some_and(|t| is_zip_code(t)) {
        out.extend(tokens.pop());
        if tokens.last().is_some_and(|t| is_state_code(t)) && tokens.len() > 2 {
            if let Some(state) = tokens.pop() {
                out.insert(0, state);
            }
        }
    }
    out
}

fn last_street_type_index(tokens: &[String]) -> Option<usize> {
    // Index 0 is the house number and index 1 must remain part of the name.
    (2..tokens.len()).rev().find(|&i| is_street_type(&tokens[i]))
}

fn tag_street(tokens: &[String], tagged: &mut TaggedAddress) {
    let mut start = 0;
    let mut end = tokens.len();

    if end - start >= 2 && is_directional(&tokens[end - 1]) {
        tagged.insert(AddressComponent::StreetNamePostDirectional, tokens[end - 1].clone());
        end -= 1;
    }

    let mut has_post_type = false;
    if end - start >= 2 && is_street_type(&tokens[end - 1]) {
        tagged.insert(AddressComponent::StreetNamePostType, tokens[end - 1].clone());
        end -= 1;
        has_post_type = true;
    }

    if end - start >= 2 && is_directional(&tokens[start]) {
        tagged.insert(AddressComponent::StreetNamePreDirectional, tokens[start].clone());
        start += 1;
    }

    if !has_post_type && end - start >= 2 && is_pre_type(&tokens[start]) {
        tagged.insert(AddressComponent::StreetNamePreType, tokens[start].clone());
        start += 1;
    }

    if start < end {
        tagged.insert(AddressComponent::StreetName, tokens[start..end].join(" "));
    }
}

fn tag_locality(tokens: &[String], tagged: &mut TaggedAddress) {
    let mut end = tokens.len();
    if end > 0 && is_zip_code(&tokens[end - 1]) {
        tagged.insert(AddressComponent::ZipCode, tokens[end - 1].clone());
        end -= 1;
    }
    if end > 0 && is_state_code(&tokens[end - 1]) {
        tagged.insert(AddressComponent::StateName, tokens[end - 1].clone());
        end -= 1;
    }
    if end > 0 {
        tagged.insert(AddressComponent::PlaceName, tokens[..end].join(" "));
    }
}

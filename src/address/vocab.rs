//! Word lists used when tagging addresses.
//!
//! All entries are upper-case; callers upper-case input before matching.

/// Directional words and their USPS abbreviations.
const DIRECTIONALS: &[&str] = &[
    "N", "S", "E", "W", "NE", "NW", "SE", "SW", "NORTH", "SOUTH", "EAST", "WEST", "NORTHEAST",
    "NORTHWEST", "SOUTHEAST", "SOUTHWEST",
];

/// Street suffixes (USPS Publication 28, trimmed to the ones seen in city data).
const STREET_TYPES: &[&str] = &[
    "ALLEY", "ALY", "AV", "AVE", "AVENUE", "BLVD", "BOULEVARD", "CIR", "CIRCLE", "CT", "COURT",
    "CRES", "CRESCENT", "DR", "DRIVE", "EXPY", "EXPRESSWAY", "FWY", "FREEWAY", "HWY", "HIGHWAY",
    "LN", "LANE", "LOOP", "PKWY", "PARKWAY", "PL", "PLACE", "PLZ", "PLAZA", "RD", "ROAD", "ROW",
    "SQ", "SQUARE", "ST", "STREET", "STWY", "STAIRWAY", "TER", "TERRACE", "TRL", "TRAIL", "WALK",
    "WAY", "WY",
];

/// Street types that lead the name instead of trailing it ("AVENUE OF THE PALMS").
const PRE_TYPES: &[&str] = &[
    "AVENUE", "BOULEVARD", "CALLE", "CAMINO", "HIGHWAY", "PASEO", "ROUTE", "VIA",
];

/// Unit designators. `#` is rewritten to `UNIT` before tagging.
const OCCUPANCY_TYPES: &[&str] = &[
    "APARTMENT", "APT", "BLDG", "BUILDING", "FL", "FLOOR", "RM", "ROOM", "SPACE", "SPC", "STE",
    "SUITE", "UNIT",
];

const STATE_CODES: &[&str] = &[
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL", "IN",
    "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ",
    "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT", "WA",
    "WI", "WV", "WY",
];

pub fn is_directional(token: &str) -> bool {
    DIRECTIONALS.contains(&token)
}

pub fn is_street_type(token: &str) -> bool {
    STREET_TYPES.contains(&token)
}

pub fn is_pre_type(token: &str) -> bool {
    PRE_TYPES.contains(&token)
}

pub fn is_occupancy_type(token: &str) -> bool {
    OCCUPANCY_TYPES.contains(&token)
}

pub fn is_state_code(token: &str) -> bool {
    STATE_CODES.contains(&token)
}

/// `94103` or `94103-1234`.
pub fn is_zip_code(token: &str) -> bool {
    let (five, plus_four) = match token.split_once('-') {
        Some((a, b)) => (a, Some(b)),
        None => (token, None),
    };
    let digits = |s: &str, n: usize| s.len() == n && s.bytes().all(|b| b.is_ascii_digit());
    digits(five, 5) && plus_four.is_none_or(|p| digits(p, 4))
}

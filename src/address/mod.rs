//! Address handling: tagging raw text into components and canonicalizing the
//! street name into the parcel layer's naming conventions.
//!
//! - `tagger`: raw address -> `TaggedAddress`
//! - `normalize`: `TaggedAddress` -> canonical street name
//! - `vocab`: directional / street-type / occupancy word lists shared by both

pub mod normalize;
pub mod tagger;
pub mod vocab;

pub use normalize::canonical_street_name;
pub use tagger::{AddressTagger, UsAddressTagger};

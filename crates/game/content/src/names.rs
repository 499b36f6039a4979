//! Random display names.
//!
//! Names are `<Adjective><Kind>` such as `QuietHole`. They are not unique.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::ThingKind;

const ADJECTIVES: &[&str] = &[
    "Amber", "Ancient", "Bitter", "Bold", "Brave", "Brisk", "Calm", "Clever", "Crimson", "Curious",
    "Dusty", "Eager", "Fierce", "Gentle", "Gloomy", "Golden", "Grim", "Hollow", "Humble", "Icy",
    "Jolly", "Keen", "Lively", "Lonely", "Lucky", "Mellow", "Misty", "Nimble", "Noble", "Odd",
    "Pale", "Proud", "Quiet", "Rapid", "Restless", "Rusty", "Shy", "Silent", "Sleepy", "Sly",
    "Solemn", "Steady", "Stout", "Swift", "Tidy", "Vivid", "Wary", "Wild", "Wise", "Zesty",
];

/// Picks a random adjective from the built-in list.
pub fn random_adjective<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ADJECTIVES.choose(rng).copied().unwrap_or("Plain")
}

/// Random display name for a thing of `kind`.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R, kind: ThingKind) -> String {
    format!("{}{}", random_adjective(rng), kind.title())
}

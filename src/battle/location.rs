//! Human-readable battle locations.

use crate::record::BattleRecord;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Label used when a battle's planet is not known to the viewer.
pub const UNKNOWN_PLANET: &str = "Unknown";

/// Resolves planet numbers to names.
///
/// Implemented by whatever holds the viewer's picture of the universe.
pub trait PlanetLookup {
    /// Name of planet `num`, if known.
    fn planet_name(&self, num: u32) -> Option<&str>;
}

impl<S: BuildHasher> PlanetLookup for HashMap<u32, String, S> {
    fn planet_name(&self, num: u32) -> Option<&str> {
        self.get(&num).map(String::as_str)
    }
}

/// A lookup that knows no planets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlanets;

impl PlanetLookup for NoPlanets {
    fn planet_name(&self, _num: u32) -> Option<&str> {
        None
    }
}

/// Where a battle was fought.
///
/// Orbital battles are labeled with the planet name, or [`UNKNOWN_PLANET`]
/// if the lookup does not know it. Deep-space battles are labeled with
/// their galactic coordinates, e.g. `Space (120, 48.5)`. Planet number 0
/// counts as deep space.
#[must_use]
pub fn location_label(record: &BattleRecord, planets: &impl PlanetLookup) -> String {
    match record.planet_num.filter(|&num| num != 0) {
        Some(num) => planets
            .planet_name(num)
            .unwrap_or(UNKNOWN_PLANET)
            .to_owned(),
        None => format!("Space ({}, {})", record.position.x, record.position.y),
    }
}

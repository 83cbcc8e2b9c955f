//! Turn reports: the battles of one turn plus the planet names needed to
//! label them.

use crate::battle::PlanetLookup;
use crate::error::{RecordError, RecordResult};
use crate::record::BattleRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A planet known to the viewing player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetSummary {
    /// Planet number.
    pub num: u32,
    /// Display name.
    pub name: String,
}

/// Battles fought in one turn, as seen by one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Planets the player knows by name.
    #[serde(default)]
    pub planets: Vec<PlanetSummary>,
    /// Battle records.
    #[serde(default)]
    pub battles: Vec<BattleRecord>,
}

impl TurnReport {
    /// Parse a report from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the report format.
    pub fn from_json(json: &str) -> RecordResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a report from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> RecordResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Battle by number.
    #[must_use]
    pub fn battle(&self, num: u32) -> Option<&BattleRecord> {
        self.battles.iter().find(|b| b.num == num)
    }

    /// Take a battle out of the report by number.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::BattleNotFound`] if no battle has that number.
    pub fn take_battle(&mut self, num: u32) -> RecordResult<BattleRecord> {
        let index = self
            .battles
            .iter()
            .position(|b| b.num == num)
            .ok_or(RecordError::BattleNotFound { num })?;
        Ok(self.battles.swap_remove(index))
    }
}

impl PlanetLookup for TurnReport {
    fn planet_name(&self, num: u32) -> Option<&str> {
        self.planets
            .iter()
            .find(|p| p.num == num)
            .map(|p| p.name.as_str())
    }
}

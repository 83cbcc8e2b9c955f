//! Output formatting utilities for CLI.

use battleview::{Battle, PhaseSnapshot, PlanetLookup, TokenAction};
use serde::Serialize;

/// JSON-serializable expanded battle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JsonBattle<'a> {
    /// Battle number.
    pub(super) num: u32,
    /// Location label.
    pub(super) location: String,
    /// Rounds in the log.
    pub(super) total_rounds: usize,
    /// Logged actions, round 0 included.
    pub(super) total_phases: usize,
    /// Phases from the requested start onward.
    pub(super) phases: Vec<JsonPhase<'a>>,
}

/// JSON-serializable phase.
#[derive(Debug, Serialize)]
pub(super) struct JsonPhase<'a> {
    /// Phase index.
    pub(super) phase: usize,
    /// Action the phase is attributed to (null if none).
    pub(super) action: Option<&'a TokenAction>,
    /// Tokens by board cell, keyed `"x-y"`.
    pub(super) cells: &'a PhaseSnapshot,
}

impl<'a> JsonBattle<'a> {
    /// Create from an expanded battle, starting at `start` phase.
    pub(super) fn from_battle(battle: &'a Battle, planets: &impl PlanetLookup, start: usize) -> Self {
        Self {
            num: battle.num(),
            location: battle.location_label(planets),
            total_rounds: battle.total_rounds(),
            total_phases: battle.total_phases(),
            phases: battle
                .phases()
                .iter()
                .enumerate()
                .skip(start)
                .map(|(phase, cells)| JsonPhase {
                    phase,
                    action: battle.action_for_phase(phase),
                    cells,
                })
                .collect(),
        }
    }
}

/// Format one battle as a single summary line.
pub(super) fn format_battle_line(battle: &Battle, planets: &impl PlanetLookup) -> String {
    let players: Vec<String> = battle.players().iter().map(|p| format!("P{p}")).collect();
    format!(
        "#{:<4} {:<24} tokens: {:<3} players: {:<12} rounds: {:<3} phases: {}",
        battle.num(),
        battle.location_label(planets),
        battle.tokens().len(),
        players.join(","),
        battle.total_rounds(),
        battle.total_phases()
    )
}

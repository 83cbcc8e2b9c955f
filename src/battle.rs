//! Expanded battles and the queries a viewer runs against them.
//!
//! [`Battle::new`] validates a [`BattleRecord`] and expands it into one
//! [`PhaseSnapshot`] per phase. Afterwards the battle is immutable: every
//! query is a pure lookup returning `None` when nothing matches.
//!
//! # Phases
//!
//! - Phase 0 is the starting configuration
//! - Phase k is the state after the k-th replayed action
//! - Replay starts with round 1; round 0 actions are counted in
//!   [`Battle::total_phases`] but never replayed

mod expand;
mod invariants;
mod location;
mod phase;

pub use expand::{expand_phases, expanded_phase_count};
pub use invariants::{check_invariants, InvariantViolation};
pub use location::{location_label, NoPlanets, PlanetLookup, UNKNOWN_PLANET};
pub use phase::{GridKey, PhaseSnapshot, PhaseToken};

use crate::error::{RecordError, RecordResult};
use crate::record::{BattleRecord, Token, TokenAction};
use tracing::{debug, warn};

/// A battle record expanded into its full phase history.
#[derive(Debug, Clone)]
pub struct Battle {
    /// The record, tokens sorted by number.
    record: BattleRecord,
    /// All actions in log order.
    actions: Vec<TokenAction>,
    /// One snapshot per phase.
    phases: Vec<PhaseSnapshot>,
    /// Action count over every round, round 0 included.
    total_phases: usize,
    /// Number of rounds in the log.
    total_rounds: usize,
}

impl Battle {
    /// Validate and expand a battle record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no rounds or its token numbers
    /// are not exactly `1..=N`.
    pub fn new(mut record: BattleRecord) -> RecordResult<Self> {
        if record.actions_per_round.is_empty() {
            warn!(battle = record.num, "rejecting battle record without rounds");
            return Err(RecordError::NoRounds { battle: record.num });
        }

        record.tokens.sort_by_key(|t| t.num);
        if let Err(e) = check_numbering(record.num, &record.tokens) {
            warn!(battle = record.num, error = %e, "rejecting battle record");
            return Err(e);
        }

        let phases = expand_phases(&record.tokens, &record.actions_per_round);
        let actions: Vec<TokenAction> = record.actions_per_round.iter().flatten().cloned().collect();
        let total_phases = actions.len();
        let total_rounds = record.actions_per_round.len();

        debug!(
            battle = record.num,
            tokens = record.tokens.len(),
            rounds = total_rounds,
            snapshots = phases.len(),
            "expanded battle"
        );

        Ok(Self {
            record,
            actions,
            phases,
            total_phases,
            total_rounds,
        })
    }

    /// Battle number.
    #[must_use]
    pub fn num(&self) -> u32 {
        self.record.num
    }

    /// The underlying record, tokens sorted by number.
    #[must_use]
    pub fn record(&self) -> &BattleRecord {
        &self.record
    }

    /// Give back the record.
    #[must_use]
    pub fn into_record(self) -> BattleRecord {
        self.record
    }

    /// Tokens sorted by number.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.record.tokens
    }

    /// All actions of every round, flattened in log order.
    #[must_use]
    pub fn actions(&self) -> &[TokenAction] {
        &self.actions
    }

    /// Number of actions across all rounds, round 0 included.
    #[must_use]
    pub fn total_phases(&self) -> usize {
        self.total_phases
    }

    /// Number of rounds in the log.
    #[must_use]
    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }

    /// Number of phase snapshots actually produced.
    #[must_use]
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// All phase snapshots, phase 0 first.
    #[must_use]
    pub fn phases(&self) -> &[PhaseSnapshot] {
        &self.phases
    }

    /// Snapshot of one phase.
    #[must_use]
    pub fn phase(&self, phase: usize) -> Option<&PhaseSnapshot> {
        self.phases.get(phase)
    }

    /// Distinct player numbers taking part, ascending.
    #[must_use]
    pub fn players(&self) -> Vec<u32> {
        let mut players: Vec<u32> = self.record.tokens.iter().map(|t| t.player_num).collect();
        players.sort_unstable();
        players.dedup();
        players
    }

    /// Token by number.
    #[must_use]
    pub fn token(&self, num: u32) -> Option<&Token> {
        let index = usize::try_from(num.checked_sub(1)?).ok()?;
        self.record.tokens.get(index)
    }

    /// Tokens still on the board at `(x, y)` in `phase`.
    ///
    /// Fled and destroyed tokens are left out. Returns `None` if the phase
    /// does not exist or nothing ever stood in that cell during the phase.
    #[must_use]
    pub fn tokens_at_location(&self, phase: usize, x: i32, y: i32) -> Option<Vec<&PhaseToken>> {
        let tokens = self.phases.get(phase)?.tokens_at(GridKey::new(x, y))?;
        Some(tokens.iter().filter(|t| t.is_present()).collect())
    }

    /// The token `phase` is attributed to.
    #[must_use]
    pub fn action_token(&self, phase: usize) -> Option<&PhaseToken> {
        self.phases.get(phase)?.acting_token()
    }

    /// The action `phase` is attributed to.
    #[must_use]
    pub fn action_for_phase(&self, phase: usize) -> Option<&TokenAction> {
        self.action_token(phase)?.action.as_ref()
    }

    /// Where the battle was fought.
    #[must_use]
    pub fn location_label(&self, planets: &impl PlanetLookup) -> String {
        location_label(&self.record, planets)
    }
}

/// Check that sorted token numbers run `1..=N` without gaps or repeats.
fn check_numbering(battle: u32, tokens: &[Token]) -> RecordResult<()> {
    let mut expected = 1u32;
    let mut previous = None;

    for token in tokens {
        if previous == Some(token.num) {
            return Err(RecordError::DuplicateToken {
                battle,
                num: token.num,
            });
        }
        if token.num != expected {
            return Err(RecordError::TokenNumberGap {
                battle,
                expected,
                found: token.num,
            });
        }
        previous = Some(token.num);
        expected += 1;
    }

    Ok(())
}

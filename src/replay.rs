//! Battle playback and viewing.
//!
//! Every phase is precomputed when the [`Battle`] is built, so moving the
//! cursor is just an index change:
//!
//! - **Forward**: next phase
//! - **Backward**: previous phase
//! - **Jump to phase N**: any phase in `0..=last_phase`

mod render;
mod text;

pub use render::render_ascii;
pub use text::{describe_action, render_llm};

use crate::battle::{Battle, PhaseSnapshot, PhaseToken};
use crate::error::PlaybackError;
use crate::record::TokenAction;

/// Playback settings for an interactive viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Delay between phases while playing, in milliseconds.
    pub phase_delay_ms: u64,
    /// Phase shown first.
    pub start_phase: usize,
    /// Highlight this player's tokens; everyone else is dimmed.
    pub player: Option<u32>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            phase_delay_ms: 500,
            start_phase: 0,
            player: None,
        }
    }
}

/// Cursor over the phases of one battle.
#[derive(Debug, Clone)]
pub struct PhaseCursor {
    /// The battle being viewed.
    battle: Battle,
    /// Current phase.
    phase: usize,
}

impl PhaseCursor {
    /// Start viewing a battle at phase 0.
    #[must_use]
    pub fn new(battle: Battle) -> Self {
        Self { battle, phase: 0 }
    }

    /// Start viewing a battle at a specific phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase does not exist.
    pub fn at_phase(battle: Battle, phase: usize) -> Result<Self, PlaybackError> {
        let mut cursor = Self::new(battle);
        cursor.goto_phase(phase)?;
        Ok(cursor)
    }

    /// The battle being viewed.
    #[must_use]
    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Last phase that can be shown.
    #[must_use]
    pub fn last_phase(&self) -> usize {
        self.battle.phase_count().saturating_sub(1)
    }

    /// Whether the cursor is on the last phase.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase >= self.last_phase()
    }

    /// Snapshot of the current phase.
    #[must_use]
    pub fn snapshot(&self) -> Option<&PhaseSnapshot> {
        self.battle.phase(self.phase)
    }

    /// Token acting in the current phase.
    #[must_use]
    pub fn acting_token(&self) -> Option<&PhaseToken> {
        self.battle.action_token(self.phase)
    }

    /// Action of the current phase.
    #[must_use]
    pub fn action(&self) -> Option<&TokenAction> {
        self.battle.action_for_phase(self.phase)
    }

    /// Advance one phase.
    ///
    /// # Errors
    ///
    /// Returns an error if already on the last phase.
    pub fn step_forward(&mut self) -> Result<(), PlaybackError> {
        if self.is_finished() {
            return Err(PlaybackError::Finished);
        }
        self.phase += 1;
        Ok(())
    }

    /// Go back one phase.
    ///
    /// # Errors
    ///
    /// Returns an error if already at phase 0.
    pub fn step_backward(&mut self) -> Result<(), PlaybackError> {
        if self.phase == 0 {
            return Err(PlaybackError::PhaseOutOfBounds {
                requested: 0,
                last: self.last_phase(),
            });
        }
        self.phase -= 1;
        Ok(())
    }

    /// Jump to a specific phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase does not exist.
    pub fn goto_phase(&mut self, phase: usize) -> Result<(), PlaybackError> {
        let last = self.last_phase();
        if phase > last {
            return Err(PlaybackError::PhaseOutOfBounds {
                requested: phase,
                last,
            });
        }
        self.phase = phase;
        Ok(())
    }

    /// Back to the starting configuration.
    pub fn rewind(&mut self) {
        self.phase = 0;
    }

    /// Render the current phase as a colored ASCII board.
    #[must_use]
    pub fn render_ascii(&self, player: Option<u32>) -> String {
        render_ascii(&self.battle, self.phase, player)
    }

    /// Render the current phase as structured text.
    #[must_use]
    pub fn render_llm(&self) -> String {
        render_llm(&self.battle, self.phase)
    }
}

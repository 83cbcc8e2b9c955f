// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Battleview: phase-by-phase reconstruction of recorded tactical battles.
//!
//! The game server records a battle as the tokens that fought plus a list
//! of actions per round. This crate expands that log into one snapshot per
//! action so a viewer can step through the battle and ask, for any phase,
//! which tokens stand in a cell and who acted.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Playback (cursor, renderers)      │
//! ├─────────────────────────────────────┤
//! │   Battle (queries over phases)      │
//! ├─────────────────────────────────────┤
//! │   Phase expander + cell index       │
//! ├─────────────────────────────────────┤
//! │   Battle record (wire format)       │
//! └─────────────────────────────────────┘
//! ```
//!
//! The engine is read-only: it never simulates combat and never rewrites
//! the record it was given.

pub mod battle;
pub mod error;
pub mod record;
pub mod replay;
pub mod report;

pub use error::{PlaybackError, RecordError, RecordResult};

// Re-export key types at crate root for convenience
pub use battle::{Battle, GridKey, PhaseSnapshot, PhaseToken, PlanetLookup};
pub use record::{BattleRecord, GridPosition, Token, TokenAction, TokenActionType, Vector};
pub use replay::{PhaseCursor, PlaybackConfig};
pub use report::TurnReport;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Battle>();
        assert_send_sync::<PhaseSnapshot>();
    }
}

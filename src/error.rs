//! Error types for loading battle records and stepping through playback.

use std::io;

use thiserror::Error;

/// A battle record that cannot be turned into a phase history.
///
/// These are contract violations by whoever produced the record. They are
/// raised once, when a [`Battle`](crate::battle::Battle) is built, never
/// during queries.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Reading or writing a record file failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// The JSON did not match the record wire format.
    #[error("malformed battle record: {0}")]
    Json(#[from] serde_json::Error),
    /// `actionsPerRound` contained no rounds at all.
    #[error("battle {battle} has no rounds")]
    NoRounds {
        /// Battle number.
        battle: u32,
    },
    /// Two tokens share a number.
    #[error("battle {battle} lists token {num} more than once")]
    DuplicateToken {
        /// Battle number.
        battle: u32,
        /// The repeated token number.
        num: u32,
    },
    /// Token numbers are not a dense `1..=N` sequence.
    #[error("battle {battle} token numbering has a gap: expected {expected}, found {found}")]
    TokenNumberGap {
        /// Battle number.
        battle: u32,
        /// The number that should have come next.
        expected: u32,
        /// The number actually found.
        found: u32,
    },
    /// A turn report holds no battle with this number.
    #[error("battle {num} not found")]
    BattleNotFound {
        /// Requested battle number.
        num: u32,
    },
}

/// Errors from moving a [`PhaseCursor`](crate::replay::PhaseCursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Requested phase lies outside `0..=last`.
    #[error("phase {requested} out of bounds (last: {last})")]
    PhaseOutOfBounds {
        /// Requested phase.
        requested: usize,
        /// Last valid phase.
        last: usize,
    },
    /// Cursor already sits on the final phase.
    #[error("battle playback is already finished")]
    Finished,
}

/// Result type for record loading and validation.
pub type RecordResult<T> = Result<T, RecordError>;

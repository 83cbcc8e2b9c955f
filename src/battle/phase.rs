//! Per-phase token state and the board-cell index built from it.

use crate::record::{GridPosition, Token, TokenAction, TokenActionType};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Key of a battle-board cell within one phase snapshot.
///
/// Displays and serializes as `"<x>-<y>"`. Board cells only; a galactic
/// [`Vector`](crate::record::Vector) never converts into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey(GridPosition);

impl GridKey {
    /// Key for the cell at `(x, y)`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self(GridPosition::new(x, y))
    }

    /// The cell position.
    #[must_use]
    pub const fn position(self) -> GridPosition {
        self.0
    }
}

impl From<GridPosition> for GridKey {
    fn from(position: GridPosition) -> Self {
        Self(position)
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0.x, self.0.y)
    }
}

impl Serialize for GridKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A token as it stands in one phase.
///
/// Serializes flat, like the token itself plus `x`, `y`, `action`,
/// `ranAway` and `destroyed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseToken {
    /// The token as recorded at battle start.
    #[serde(flatten)]
    pub token: Token,
    /// Board position in this phase.
    #[serde(flatten)]
    pub position: GridPosition,
    /// The action this phase is attributed to, if this token performed it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TokenAction>,
    /// Token has fled the battle.
    pub ran_away: bool,
    /// Token has been destroyed.
    ///
    /// No logged action sets this yet; it is carried so location queries
    /// already honor it.
    pub destroyed: bool,
}

impl PhaseToken {
    /// Initial phase state of a token: at its starting cell, idle.
    #[must_use]
    pub fn from_token(token: &Token) -> Self {
        Self {
            token: token.clone(),
            position: token.position,
            action: None,
            ran_away: false,
            destroyed: false,
        }
    }

    /// Token number.
    #[must_use]
    pub fn num(&self) -> u32 {
        self.token.num
    }

    /// Cell this token occupies.
    #[must_use]
    pub fn key(&self) -> GridKey {
        GridKey::from(self.position)
    }

    /// Still on the board: neither fled nor destroyed.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !(self.ran_away || self.destroyed)
    }

    /// Attribute `action` to this token and apply its effect.
    pub(crate) fn apply(&mut self, action: &TokenAction) {
        self.action = Some(action.clone());
        match action.kind {
            TokenActionType::Move => {
                if let Some(to) = action.to {
                    self.position = to;
                }
            }
            TokenActionType::RanAway => self.ran_away = true,
            TokenActionType::Fire
            | TokenActionType::BeamFire
            | TokenActionType::TorpedoFire
            | TokenActionType::Other(_) => {}
        }
    }
}

/// Every token of one phase, grouped by board cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PhaseSnapshot {
    cells: BTreeMap<GridKey, Vec<PhaseToken>>,
}

impl PhaseSnapshot {
    /// Group tokens by cell. Within a cell, tokens keep their input order.
    #[must_use]
    pub fn group(tokens: Vec<PhaseToken>) -> Self {
        let mut cells: BTreeMap<GridKey, Vec<PhaseToken>> = BTreeMap::new();
        for token in tokens {
            cells.entry(token.key()).or_default().push(token);
        }
        Self { cells }
    }

    /// All tokens in a cell, fled and destroyed ones included.
    #[must_use]
    pub fn tokens_at(&self, key: GridKey) -> Option<&[PhaseToken]> {
        self.cells.get(&key).map(Vec::as_slice)
    }

    /// Occupied cells in `(x, y)` order.
    pub fn cells(&self) -> impl Iterator<Item = (GridKey, &[PhaseToken])> + '_ {
        self.cells.iter().map(|(key, tokens)| (*key, tokens.as_slice()))
    }

    /// Every token in the snapshot, cell by cell.
    pub fn tokens(&self) -> impl Iterator<Item = &PhaseToken> + '_ {
        self.cells.values().flatten()
    }

    /// Find a token by number.
    #[must_use]
    pub fn find(&self, num: u32) -> Option<&PhaseToken> {
        self.tokens().find(|t| t.num() == num)
    }

    /// The token this phase is attributed to.
    #[must_use]
    pub fn acting_token(&self) -> Option<&PhaseToken> {
        self.tokens().find(|t| t.action.is_some())
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of tokens across all cells.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Whether the snapshot holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase_token(num: u32, x: i32, y: i32) -> PhaseToken {
        PhaseToken::from_token(&Token::new(num, 1, 1, GridPosition::new(x, y)))
    }

    #[test]
    fn test_grid_key_display() {
        assert_eq!(GridKey::new(3, 4).to_string(), "3-4");
        assert_eq!(GridKey::new(-2, 0).to_string(), "-2-0");
    }

    #[test]
    fn test_group_by_cell() {
        let snapshot = PhaseSnapshot::group(vec![
            phase_token(1, 0, 0),
            phase_token(2, 5, 5),
            phase_token(3, 0, 0),
        ]);

        assert_eq!(snapshot.cell_count(), 2);
        assert_eq!(snapshot.token_count(), 3);
        let origin = snapshot.tokens_at(GridKey::new(0, 0)).unwrap();
        assert_eq!(origin.iter().map(PhaseToken::num).collect::<Vec<_>>(), vec![1, 3]);
        assert!(snapshot.tokens_at(GridKey::new(1, 1)).is_none());
    }

    #[test]
    fn test_apply_move_without_destination_keeps_position() {
        let mut token = phase_token(1, 2, 2);
        let mut action = TokenAction::new(TokenActionType::Move, 1, 1);
        action.to = None;
        token.apply(&action);
        assert_eq!(token.position, GridPosition::new(2, 2));
        assert_eq!(token.action, Some(action));
    }

    #[test]
    fn test_apply_ran_away_marks_absent() {
        let mut token = phase_token(1, 2, 2);
        token.apply(&TokenAction::ran_away(1, 1));
        assert!(token.ran_away);
        assert!(!token.is_present());
    }

    #[test]
    fn test_snapshot_serializes_with_string_keys() {
        let snapshot = PhaseSnapshot::group(vec![phase_token(1, 1, 2)]);
        let json = serde_json::to_value(&snapshot).unwrap();
        let cell = &json["1-2"][0];
        assert_eq!(cell["num"], 1);
        assert_eq!(cell["x"], 1);
        assert_eq!(cell["y"], 2);
        assert_eq!(cell["ranAway"], false);
        assert!(cell.get("action").is_none());
    }
}

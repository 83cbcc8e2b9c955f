//! Battle records as produced by the game server.
//!
//! A [`BattleRecord`] is the authoritative, read-only input: the tokens that
//! fought, where they started, and every action grouped by round. Field names
//! follow the server's camelCase JSON exactly so a record survives a
//! load/save cycle byte-for-byte in meaning.

mod enums;
mod position;

pub use enums::{BattleAttackWho, BattleTactic, BattleTarget, TokenActionType};
pub use position::{GridPosition, Vector};

use crate::error::RecordResult;
use position::lenient_position;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single combat unit taking part in a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Token number, 1-based and unique within the battle.
    pub num: u32,
    /// Owning player.
    pub player_num: u32,
    /// Ship design of the stack.
    pub design_num: u32,
    /// Starting board position.
    pub position: GridPosition,
    /// Damage carried into battle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_damage: Option<f64>,
    /// Number of damaged ships in the stack at battle start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_quantity_damaged: Option<u32>,
    /// Initiative, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative: Option<i32>,
    /// Board movement per round, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<i32>,
    /// Battle plan tactic.
    #[serde(default)]
    pub tactic: BattleTactic,
    /// First choice of target.
    #[serde(default)]
    pub primary_target: BattleTarget,
    /// Second choice of target.
    #[serde(default)]
    pub secondary_target: BattleTarget,
    /// Which players to engage.
    #[serde(default)]
    pub attack_who: BattleAttackWho,
}

impl Token {
    /// Create a token with default battle plan fields.
    #[must_use]
    pub fn new(num: u32, player_num: u32, design_num: u32, position: GridPosition) -> Self {
        Self {
            num,
            player_num,
            design_num,
            position,
            starting_damage: None,
            starting_quantity_damaged: None,
            initiative: None,
            movement: None,
            tactic: BattleTactic::default(),
            primary_target: BattleTarget::default(),
            secondary_target: BattleTarget::default(),
            attack_who: BattleAttackWho::default(),
        }
    }
}

/// One logged event.
///
/// Only `kind`, `token_num` and (for moves) `to` drive the replay. The
/// combat result fields are carried through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAction {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: TokenActionType,
    /// The acting token.
    pub token_num: u32,
    /// Round the action belongs to.
    #[serde(default)]
    pub round: u32,
    /// Board position before the action.
    #[serde(
        default,
        deserialize_with = "lenient_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub from: Option<GridPosition>,
    /// Board position after the action.
    #[serde(
        default,
        deserialize_with = "lenient_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub to: Option<GridPosition>,
    /// Weapon slot that fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u32>,
    /// Token fired upon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_num: Option<u32>,
    /// Snapshot of the target as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Box<Token>>,
    /// Ships destroyed by this action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_destroyed: Option<u32>,
    /// Damage absorbed by shields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_done_shields: Option<f64>,
    /// Damage dealt to armor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_done_armor: Option<f64>,
    /// Torpedoes that hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torpedo_hits: Option<u32>,
    /// Torpedoes that missed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torpedo_misses: Option<u32>,
}

impl TokenAction {
    /// A bare action with no positions or combat results.
    #[must_use]
    pub fn new(kind: TokenActionType, token_num: u32, round: u32) -> Self {
        Self {
            kind,
            token_num,
            round,
            from: None,
            to: None,
            slot: None,
            target_num: None,
            target: None,
            tokens_destroyed: None,
            damage_done_shields: None,
            damage_done_armor: None,
            torpedo_hits: None,
            torpedo_misses: None,
        }
    }

    /// A move between two board cells.
    #[must_use]
    pub fn movement(token_num: u32, round: u32, from: GridPosition, to: GridPosition) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::new(TokenActionType::Move, token_num, round)
        }
    }

    /// The token fleeing the battle.
    #[must_use]
    pub fn ran_away(token_num: u32, round: u32) -> Self {
        Self::new(TokenActionType::RanAway, token_num, round)
    }

    /// Weapons fire of the given kind against `target_num`.
    #[must_use]
    pub fn fire(kind: TokenActionType, token_num: u32, round: u32, target_num: u32) -> Self {
        Self {
            target_num: Some(target_num),
            ..Self::new(kind, token_num, round)
        }
    }
}

/// The full log of one battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRecord {
    /// Battle number, unique within a turn.
    pub num: u32,
    /// Planet the battle was fought over, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet_num: Option<u32>,
    /// Galactic position of the battle.
    #[serde(default)]
    pub position: Vector,
    /// Every token that took part.
    pub tokens: Vec<Token>,
    /// Actions grouped by round, in log order.
    pub actions_per_round: Vec<Vec<TokenAction>>,
}

impl BattleRecord {
    /// Parse a record from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the wire format,
    /// including a missing or `null` `actionsPerRound`.
    pub fn from_json(json: &str) -> RecordResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the record back to its wire JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> RecordResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a record from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> RecordResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the record as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> RecordResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Number of actions across all rounds, round 0 included.
    #[must_use]
    pub fn total_actions(&self) -> usize {
        self.actions_per_round.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample() -> BattleRecord {
        BattleRecord {
            num: 4,
            planet_num: Some(12),
            position: Vector::new(100.0, 220.5),
            tokens: vec![
                Token::new(1, 1, 3, GridPosition::new(0, 0)),
                Token::new(2, 2, 1, GridPosition::new(9, 9)),
            ],
            actions_per_round: vec![
                vec![],
                vec![TokenAction::movement(
                    1,
                    1,
                    GridPosition::new(0, 0),
                    GridPosition::new(1, 1),
                )],
            ],
        }
    }

    #[test]
    fn test_record_save_load_roundtrip() {
        let record = sample();
        let temp_file = NamedTempFile::new().expect("create temp file");
        record.save(temp_file.path()).expect("save record");

        let loaded = BattleRecord::load(temp_file.path()).expect("load record");
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_missing_actions_per_round_fails() {
        let json = r#"{"num": 1, "position": {"x": 0, "y": 0}, "tokens": []}"#;
        assert!(BattleRecord::from_json(json).is_err());
    }

    #[test]
    fn test_null_actions_per_round_fails() {
        let json = r#"{"num": 1, "tokens": [], "actionsPerRound": null}"#;
        assert!(BattleRecord::from_json(json).is_err());
    }

    #[test]
    fn test_malformed_move_destination_reads_as_absent() {
        let json = r#"{"type": 3, "tokenNum": 2, "round": 1, "from": {"x": 1, "y": 1}, "to": {"x": "left"}}"#;
        let action: TokenAction = serde_json::from_str(json).unwrap();
        assert_eq!(action.kind, TokenActionType::Move);
        assert_eq!(action.from, Some(GridPosition::new(1, 1)));
        assert_eq!(action.to, None);
    }

    #[test]
    fn test_camel_case_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("actionsPerRound").is_some());
        assert!(json.get("planetNum").is_some());
        let token = &json["tokens"][0];
        assert!(token.get("playerNum").is_some());
        assert!(token.get("primaryTarget").is_some());
        assert!(token.get("startingDamage").is_none());
        let action = &json["actionsPerRound"][1][0];
        assert_eq!(action["type"], 3);
        assert_eq!(action["tokenNum"], 1);
    }

    #[test]
    fn test_total_actions_counts_round_zero() {
        let mut record = sample();
        record.actions_per_round[0].push(TokenAction::ran_away(2, 0));
        assert_eq!(record.total_actions(), 2);
    }
}

//! Structured text output for LLM consumption.
//!
//! Machine-friendly but still readable: one fact per line, every token
//! listed with its position and status.

#![allow(clippy::format_push_string)]

use crate::battle::Battle;
use crate::record::{TokenAction, TokenActionType};

/// Render one phase of a battle to structured text.
///
/// Output format:
/// ```text
/// === BATTLE 4 PHASE 2 OF 12 ===
/// Rounds: 3  Logged actions: 14
///
/// ACTION:
/// - Token 2 fired torpedoes at token 1 (3 hits, 1 miss)
///
/// TOKENS:
/// - Token 1 (player 1, design 3) at (2, 2)
/// - Token 2 (player 2, design 1) at (5, 5), acting
///
/// CELLS:
/// - (2, 2): 1
/// - (5, 5): 2
/// ```
#[must_use]
pub fn render_llm(battle: &Battle, phase: usize) -> String {
    let mut output = String::new();

    let last = battle.phase_count().saturating_sub(1);
    output.push_str(&format!(
        "=== BATTLE {} PHASE {phase} OF {last} ===\n",
        battle.num()
    ));
    output.push_str(&format!(
        "Rounds: {}  Logged actions: {}\n\n",
        battle.total_rounds(),
        battle.total_phases()
    ));

    let Some(snapshot) = battle.phase(phase) else {
        output.push_str("NO SUCH PHASE\n");
        return output;
    };

    output.push_str("ACTION:\n");
    match battle.action_for_phase(phase) {
        Some(action) => output.push_str(&format!("- {}\n", describe_action(action))),
        None if phase == 0 => output.push_str("- none (starting positions)\n"),
        None => output.push_str("- none (action names no token in this battle)\n"),
    }
    output.push('\n');

    output.push_str("TOKENS:\n");
    let mut tokens: Vec<_> = snapshot.tokens().collect();
    tokens.sort_by_key(|t| t.num());
    for token in tokens {
        output.push_str(&format!(
            "- Token {} (player {}, design {}) ",
            token.num(),
            token.token.player_num,
            token.token.design_num
        ));
        if token.destroyed {
            output.push_str("destroyed");
        } else if token.ran_away {
            output.push_str("fled");
        } else {
            output.push_str(&format!("at {}", token.position));
        }
        if token.action.is_some() {
            output.push_str(", acting");
        }
        output.push('\n');
    }
    output.push('\n');

    output.push_str("CELLS:\n");
    for (key, cell) in snapshot.cells() {
        let nums: Vec<String> = cell
            .iter()
            .filter(|t| t.is_present())
            .map(|t| t.num().to_string())
            .collect();
        if !nums.is_empty() {
            output.push_str(&format!("- {}: {}\n", key.position(), nums.join(", ")));
        }
    }

    output
}

/// One-line description of an action.
#[must_use]
pub fn describe_action(action: &TokenAction) -> String {
    let actor = action.token_num;
    let target = action
        .target_num
        .map_or_else(String::new, |t| format!(" at token {t}"));

    let mut text = match action.kind {
        TokenActionType::Move => match (action.from, action.to) {
            (Some(from), Some(to)) => format!("Token {actor} moved from {from} to {to}"),
            (None, Some(to)) => format!("Token {actor} moved to {to}"),
            (_, None) => format!("Token {actor} held position"),
        },
        TokenActionType::RanAway => format!("Token {actor} ran away"),
        TokenActionType::Fire => format!("Token {actor} fired{target}"),
        TokenActionType::BeamFire => format!("Token {actor} fired beams{target}"),
        TokenActionType::TorpedoFire => format!("Token {actor} fired torpedoes{target}"),
        TokenActionType::Other(code) => format!("Token {actor} performed action {code}"),
    };

    let details = combat_details(action);
    if !details.is_empty() {
        text.push_str(&format!(" ({})", details.join(", ")));
    }

    text
}

/// Combat result fields worth showing, in display order.
fn combat_details(action: &TokenAction) -> Vec<String> {
    let mut details = Vec::new();

    if let Some(hits) = action.torpedo_hits {
        details.push(plural(hits, "hit", "hits"));
    }
    if let Some(misses) = action.torpedo_misses {
        details.push(plural(misses, "miss", "misses"));
    }
    if let Some(shields) = action.damage_done_shields.filter(|d| *d > 0.0) {
        details.push(format!("{shields} shield damage"));
    }
    if let Some(armor) = action.damage_done_armor.filter(|d| *d > 0.0) {
        details.push(format!("{armor} armor damage"));
    }
    if let Some(destroyed) = action.tokens_destroyed.filter(|d| *d > 0) {
        details.push(format!("{destroyed} destroyed"));
    }

    details
}

fn plural(count: u32, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BattleRecord, GridPosition, Token, Vector};

    fn create_test_battle() -> Battle {
        let mut torpedoes = TokenAction::fire(TokenActionType::TorpedoFire, 2, 1, 1);
        torpedoes.torpedo_hits = Some(3);
        torpedoes.torpedo_misses = Some(1);
        torpedoes.damage_done_armor = Some(12.0);

        Battle::new(BattleRecord {
            num: 4,
            planet_num: Some(2),
            position: Vector::default(),
            tokens: vec![
                Token::new(1, 1, 3, GridPosition::new(2, 2)),
                Token::new(2, 2, 1, GridPosition::new(5, 5)),
            ],
            actions_per_round: vec![vec![], vec![torpedoes, TokenAction::ran_away(1, 1)]],
        })
        .unwrap()
    }

    #[test]
    fn test_render_llm_basic() {
        let battle = create_test_battle();
        let output = render_llm(&battle, 0);

        assert!(output.contains("=== BATTLE 4 PHASE 0 OF 2 ==="));
        assert!(output.contains("Rounds: 2  Logged actions: 2"));
        assert!(output.contains("starting positions"));
        assert!(output.contains("- Token 1 (player 1, design 3) at (2, 2)"));
        assert!(output.contains("- (5, 5): 2"));
    }

    #[test]
    fn test_render_llm_action_and_flight() {
        let battle = create_test_battle();

        let output = render_llm(&battle, 1);
        assert!(output.contains("Token 2 fired torpedoes at token 1 (3 hits, 1 miss, 12 armor damage)"));
        assert!(output.contains("at (5, 5), acting"));

        let output = render_llm(&battle, 2);
        assert!(output.contains("- Token 1 (player 1, design 3) fled, acting"));
        assert!(!output.contains("- (2, 2)"));
    }

    #[test]
    fn test_render_llm_missing_phase() {
        assert!(render_llm(&create_test_battle(), 3).contains("NO SUCH PHASE"));
    }

    #[test]
    fn test_describe_move_variants() {
        let full = TokenAction::movement(5, 2, GridPosition::new(1, 1), GridPosition::new(2, 1));
        assert_eq!(describe_action(&full), "Token 5 moved from (1, 1) to (2, 1)");

        let mut blocked = full.clone();
        blocked.to = None;
        assert_eq!(describe_action(&blocked), "Token 5 held position");
    }

    #[test]
    fn test_describe_unknown_kind() {
        let action = TokenAction::new(TokenActionType::Other(7), 3, 1);
        assert_eq!(describe_action(&action), "Token 3 performed action 7");
    }
}

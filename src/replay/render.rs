//! ASCII renderer for terminal viewing with ANSI colors.

#![allow(clippy::format_push_string)]

use super::text::describe_action;
use crate::battle::{Battle, GridKey, PhaseSnapshot};

/// ANSI color codes for players.
const PLAYER_COLORS: [&str; 8] = [
    "\x1b[31m", // Player 1: Red
    "\x1b[34m", // Player 2: Blue
    "\x1b[32m", // Player 3: Green
    "\x1b[33m", // Player 4: Yellow
    "\x1b[35m", // Player 5: Magenta
    "\x1b[36m", // Player 6: Cyan
    "\x1b[91m", // Player 7: Bright Red
    "\x1b[94m", // Player 8: Bright Blue
];

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const WHITE: &str = "\x1b[37m";
const GRAY: &str = "\x1b[90m";

/// The battle board is at least this many cells on each side.
const BOARD_SIZE: i32 = 10;

/// The drawn board is clipped to this many cells on each side.
const MAX_BOARD_SIZE: i32 = 64;

/// Render one phase of a battle to ASCII with ANSI colors.
///
/// Output format:
/// ```text
/// Battle #4  Phase 3/12  Round 1
/// ┌─────────────────────┐
/// │ . . . . . . . . . . │
/// │ 1 . . . . . . . 2 . │
/// └─────────────────────┘
///
/// Legend: digit=tokens in cell  +=more than 9  *=acting token  .=empty
///
/// Token 1  P1  design 3   (0, 1)
/// Token 2  P2  design 1   (8, 1)  fled
///
/// > Token 1 moved from (0, 0) to (0, 1)
/// ```
///
/// The board grows past 10×10 to fit every cell used during the battle, up
/// to 64 cells on each side. Tokens beyond that still appear in the token
/// list. With `player` set, tokens of other players are dimmed.
#[must_use]
pub fn render_ascii(battle: &Battle, phase: usize, player: Option<u32>) -> String {
    let mut output = String::new();

    render_header(&mut output, battle, phase);

    let Some(snapshot) = battle.phase(phase) else {
        output.push_str("(no such phase)\n");
        return output;
    };

    render_board(&mut output, battle, snapshot, player);

    output.push_str("\nLegend: digit=tokens in cell  +=more than 9  *=acting token  .=empty\n\n");

    render_token_list(&mut output, snapshot, player);

    output.push('\n');
    match battle.action_for_phase(phase) {
        Some(action) => output.push_str(&format!("> {}\n", describe_action(action))),
        None if phase == 0 => output.push_str("> Starting positions\n"),
        None => output.push_str("> No token acted\n"),
    }

    output.push_str("\n[<] Back  [>] Forward  [Home] Start  [q] Quit\n");

    output
}

/// Render the header line.
fn render_header(output: &mut String, battle: &Battle, phase: usize) {
    let last = battle.phase_count().saturating_sub(1);
    output.push_str(&format!("Battle #{}  Phase {phase}/{last}", battle.num()));
    if let Some(action) = battle.action_for_phase(phase) {
        output.push_str(&format!("  Round {}", action.round));
    }
    output.push('\n');
}

/// Cell range shown on the board, stable for the whole battle.
fn board_bounds(battle: &Battle) -> (GridKey, GridKey) {
    let (mut min_x, mut min_y) = (0, 0);
    let (mut max_x, mut max_y) = (BOARD_SIZE - 1, BOARD_SIZE - 1);

    for snapshot in battle.phases() {
        for (key, _) in snapshot.cells() {
            let pos = key.position();
            min_x = min_x.min(pos.x);
            min_y = min_y.min(pos.y);
            max_x = max_x.max(pos.x);
            max_y = max_y.max(pos.y);
        }
    }

    // clip far-flung tokens; they still show in the token list
    let max_x = max_x.min(min_x.saturating_add(MAX_BOARD_SIZE - 1));
    let max_y = max_y.min(min_y.saturating_add(MAX_BOARD_SIZE - 1));

    (GridKey::new(min_x, min_y), GridKey::new(max_x, max_y))
}

/// Render the board grid.
fn render_board(output: &mut String, battle: &Battle, snapshot: &PhaseSnapshot, player: Option<u32>) {
    let (min, max) = board_bounds(battle);
    let (min, max) = (min.position(), max.position());
    let width = usize::try_from(i64::from(max.x) - i64::from(min.x) + 1).unwrap_or(0);

    output.push('┌');
    output.push_str(&"─".repeat(width * 2 + 1));
    output.push_str("┐\n");

    for y in min.y..=max.y {
        output.push_str("│ ");
        for x in min.x..=max.x {
            render_cell(output, snapshot, GridKey::new(x, y), player);
            output.push(' ');
        }
        output.push_str("│\n");
    }

    output.push('└');
    output.push_str(&"─".repeat(width * 2 + 1));
    output.push_str("┘\n");
}

/// Render a single board cell.
fn render_cell(output: &mut String, snapshot: &PhaseSnapshot, key: GridKey, player: Option<u32>) {
    let present: Vec<_> = snapshot
        .tokens_at(key)
        .unwrap_or_default()
        .iter()
        .filter(|t| t.is_present())
        .collect();

    let Some(first) = present.first() else {
        output.push_str(&format!("{GRAY}.{RESET}"));
        return;
    };

    if present.iter().any(|t| t.action.is_some()) {
        let color = get_player_color(first.token.player_num);
        output.push_str(&format!("{color}{BOLD}*{RESET}"));
        return;
    }

    let owner = first.token.player_num;
    let symbol = count_to_char(present.len());
    if player.is_some_and(|p| p != owner) {
        output.push_str(&format!("{DIM}{symbol}{RESET}"));
    } else {
        let color = get_player_color(owner);
        output.push_str(&format!("{color}{symbol}{RESET}"));
    }
}

/// Render one line per token.
fn render_token_list(output: &mut String, snapshot: &PhaseSnapshot, player: Option<u32>) {
    let mut tokens: Vec<_> = snapshot.tokens().collect();
    tokens.sort_by_key(|t| t.num());

    for token in tokens {
        let owner = token.token.player_num;
        let color = if player.is_some_and(|p| p != owner) {
            DIM
        } else {
            get_player_color(owner)
        };
        let status = if token.destroyed {
            "  destroyed"
        } else if token.ran_away {
            "  fled"
        } else if token.action.is_some() {
            "  acting"
        } else {
            ""
        };
        output.push_str(&format!(
            "{color}Token {:<3} P{owner:<2} design {:<3} {}{status}{RESET}\n",
            token.num(),
            token.token.design_num,
            token.position
        ));
    }
}

/// Convert a token count to a display character.
fn count_to_char(count: usize) -> char {
    u32::try_from(count)
        .ok()
        .and_then(|c| char::from_digit(c, 10))
        .unwrap_or('+')
}

/// Get ANSI color for a player.
fn get_player_color(player_num: u32) -> &'static str {
    usize::try_from(player_num)
        .ok()
        .and_then(|p| p.checked_sub(1))
        .and_then(|idx| PLAYER_COLORS.get(idx))
        .copied()
        .unwrap_or(WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BattleRecord, GridPosition, Token, TokenAction, Vector};

    fn create_test_battle() -> Battle {
        Battle::new(BattleRecord {
            num: 4,
            planet_num: None,
            position: Vector::default(),
            tokens: vec![
                Token::new(1, 1, 3, GridPosition::new(0, 0)),
                Token::new(2, 2, 1, GridPosition::new(8, 1)),
                Token::new(3, 2, 1, GridPosition::new(8, 1)),
            ],
            actions_per_round: vec![
                vec![],
                vec![
                    TokenAction::movement(1, 1, GridPosition::new(0, 0), GridPosition::new(0, 1)),
                    TokenAction::ran_away(3, 1),
                ],
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_render_ascii_basic() {
        let battle = create_test_battle();
        let output = render_ascii(&battle, 0, None);

        assert!(output.contains("Battle #4  Phase 0/2"));
        assert!(output.contains("┌"));
        assert!(output.contains("┘"));
        assert!(output.contains("Legend"));
        assert!(output.contains("Starting positions"));
        assert!(output.contains("Token 1"));
        assert!(output.contains("Token 3"));
    }

    #[test]
    fn test_render_ascii_action_phase() {
        let battle = create_test_battle();
        let output = render_ascii(&battle, 1, None);
        assert!(output.contains("Round 1"));
        assert!(output.contains("Token 1 moved from (0, 0) to (0, 1)"));
        assert!(output.contains('*'));

        let output = render_ascii(&battle, 2, Some(1));
        assert!(output.contains("fled"));
    }

    #[test]
    fn test_render_ascii_missing_phase() {
        let battle = create_test_battle();
        assert!(render_ascii(&battle, 10, None).contains("no such phase"));
    }

    #[test]
    fn test_board_bounds_grow_to_fit() {
        let mut record = create_test_battle().into_record();
        record.tokens[1].position = GridPosition::new(12, -1);
        let battle = Battle::new(record).unwrap();
        let (min, max) = board_bounds(&battle);
        assert_eq!(min, GridKey::new(0, -1));
        assert_eq!(max, GridKey::new(12, 9));
    }

    #[test]
    fn test_board_clipped_for_extreme_coordinates() {
        let mut record = create_test_battle().into_record();
        record.tokens[1].position = GridPosition::new(i32::MAX, 0);
        record.tokens[2].position = GridPosition::new(i32::MIN, i32::MAX);
        let battle = Battle::new(record).unwrap();

        let (min, max) = board_bounds(&battle);
        assert_eq!(min, GridKey::new(i32::MIN, 0));
        assert_eq!(max, GridKey::new(i32::MIN + MAX_BOARD_SIZE - 1, MAX_BOARD_SIZE - 1));

        let output = render_ascii(&battle, 0, None);
        let rows = output.lines().filter(|line| line.starts_with('│')).count();
        assert_eq!(rows, 64);
        assert!(output.contains("(2147483647, 0)"));
        assert!(output.contains("(-2147483648, 2147483647)"));
    }

    #[test]
    fn test_count_to_char() {
        assert_eq!(count_to_char(1), '1');
        assert_eq!(count_to_char(9), '9');
        assert_eq!(count_to_char(10), '+');
    }

    #[test]
    fn test_get_player_color() {
        assert_eq!(get_player_color(1), PLAYER_COLORS[0]);
        assert_eq!(get_player_color(0), WHITE);
        assert_eq!(get_player_color(99), WHITE);
    }
}

#![no_main]

use arbitrary::Arbitrary;
use battleview::battle::check_invariants;
use battleview::{Battle, BattleRecord, GridPosition, Token, TokenAction, TokenActionType, Vector};
use libfuzzer_sys::fuzz_target;

/// One logged action.
#[derive(Arbitrary, Debug)]
struct ActionInput {
    /// Raw action type code.
    kind: u8,
    /// Acting token; may name a token outside the battle.
    token_num: u8,
    /// Move destination, if any.
    to: Option<(i8, i8)>,
    /// Fire target.
    target: u8,
}

/// Structured input for expansion fuzzing.
#[derive(Arbitrary, Debug)]
struct BattleInput {
    /// Starting cell and owner per token.
    tokens: Vec<(i8, i8, u8)>,
    /// Action log, grouped by round.
    rounds: Vec<Vec<ActionInput>>,
    /// Raw JSON to feed the record parser.
    json: Vec<u8>,
}

fuzz_target!(|input: BattleInput| {
    // The parser must reject garbage without panicking
    if let Ok(text) = std::str::from_utf8(&input.json) {
        if let Ok(record) = BattleRecord::from_json(text) {
            if let Ok(battle) = Battle::new(record) {
                let _ = check_invariants(&battle);
            }
        }
    }

    // Cap inputs to keep expansion small
    let tokens: Vec<Token> = input
        .tokens
        .iter()
        .take(32)
        .zip(1u32..)
        .map(|(&(x, y, player), num)| {
            Token::new(num, u32::from(player), 1, GridPosition::new(x.into(), y.into()))
        })
        .collect();
    if input.rounds.is_empty() {
        return;
    }

    let actions_per_round: Vec<Vec<TokenAction>> = input
        .rounds
        .iter()
        .take(16)
        .zip(0u32..)
        .map(|(actions, round)| {
            actions
                .iter()
                .take(64)
                .map(|a| {
                    let mut action =
                        TokenAction::new(TokenActionType::from(a.kind), a.token_num.into(), round);
                    action.to = a.to.map(|(x, y)| GridPosition::new(x.into(), y.into()));
                    action.target_num = Some(a.target.into());
                    action
                })
                .collect()
        })
        .collect();

    let expected_phases: usize = 1 + actions_per_round.iter().skip(1).map(Vec::len).sum::<usize>();

    let record = BattleRecord {
        num: 1,
        planet_num: None,
        position: Vector::default(),
        tokens,
        actions_per_round,
    };

    let battle = match Battle::new(record) {
        Ok(battle) => battle,
        Err(_) => return,
    };

    assert_eq!(battle.phase_count(), expected_phases);

    let violations = check_invariants(&battle);
    assert!(
        violations.is_empty(),
        "Invariants violated after expansion: {:?}",
        violations
    );
});

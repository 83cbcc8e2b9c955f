//! Phase history invariants - sanity checks that detect bugs.
//!
//! An expanded battle should never violate these, whatever the record
//! contained. A violation means the expansion itself is broken.

use super::{Battle, PhaseSnapshot, PhaseToken};
use std::fmt;

/// Invariant violation found in one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Phase where the violation was seen.
    pub phase: usize,
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation in phase {}: {}", self.phase, self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check every phase of a battle.
///
/// Returns the violations found, or an empty list if all invariants hold.
#[must_use]
pub fn check_invariants(battle: &Battle) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let token_count = battle.tokens().len();

    let mut previous: Option<Vec<Option<&PhaseToken>>> = None;

    for (phase, snapshot) in battle.phases().iter().enumerate() {
        let mut report = |message: String| violations.push(InvariantViolation { phase, message });

        check_cells(snapshot, &mut report);

        let acting = snapshot.tokens().filter(|t| t.action.is_some()).count();
        if acting > 1 {
            report(format!("{acting} tokens carry an action"));
        }
        if phase == 0 && acting != 0 {
            report("starting configuration carries an action".to_owned());
        }

        let current = index_by_num(snapshot, token_count);
        if snapshot.token_count() != token_count {
            report(format!(
                "snapshot holds {} tokens, battle has {token_count}",
                snapshot.token_count()
            ));
        }

        if let Some(before) = &previous {
            for (slot, (was, now)) in before.iter().zip(&current).enumerate() {
                let num = slot + 1;
                let (Some(was), Some(now)) = (was, now) else {
                    report(format!("token {num} missing"));
                    continue;
                };

                let moved_by_action = now
                    .action
                    .as_ref()
                    .is_some_and(|a| a.kind.is_move());
                if was.position != now.position && !moved_by_action {
                    report(format!(
                        "token {num} moved from {} to {} without a move action",
                        was.position, now.position
                    ));
                }
                if was.ran_away && !now.ran_away {
                    report(format!("token {num} returned after fleeing"));
                }
                if was.destroyed && !now.destroyed {
                    report(format!("token {num} revived after destruction"));
                }
            }
        }

        previous = Some(current);
    }

    violations
}

/// Every token must be filed under the cell it stands in.
fn check_cells(snapshot: &PhaseSnapshot, report: &mut impl FnMut(String)) {
    for (key, tokens) in snapshot.cells() {
        for token in tokens {
            if token.key() != key {
                report(format!(
                    "token {} at {} filed under cell {key}",
                    token.num(),
                    token.position
                ));
            }
        }
    }
}

/// Tokens of a snapshot indexed by `num - 1`.
fn index_by_num(snapshot: &PhaseSnapshot, token_count: usize) -> Vec<Option<&PhaseToken>> {
    let mut slots = vec![None; token_count];
    for token in snapshot.tokens() {
        let slot = usize::try_from(token.num())
            .ok()
            .and_then(|num| num.checked_sub(1))
            .and_then(|index| slots.get_mut(index));
        if let Some(slot) = slot {
            *slot = Some(token);
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BattleRecord, GridPosition, Token, TokenAction, Vector};

    fn battle() -> Battle {
        Battle::new(BattleRecord {
            num: 1,
            planet_num: None,
            position: Vector::default(),
            tokens: vec![
                Token::new(1, 1, 1, GridPosition::new(0, 0)),
                Token::new(2, 2, 1, GridPosition::new(9, 9)),
            ],
            actions_per_round: vec![
                vec![],
                vec![
                    TokenAction::movement(1, 1, GridPosition::new(0, 0), GridPosition::new(1, 0)),
                    TokenAction::ran_away(2, 1),
                    TokenAction::ran_away(7, 1),
                ],
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_expanded_battle_is_clean() {
        assert!(check_invariants(&battle()).is_empty());
    }

    #[test]
    fn test_detects_unexplained_move() {
        let mut battle = battle();
        let mut tokens: Vec<PhaseToken> = battle.phases[2].tokens().cloned().collect();
        for token in &mut tokens {
            if token.num() == 1 {
                token.position = GridPosition::new(5, 5);
            }
        }
        battle.phases[2] = PhaseSnapshot::group(tokens);

        let violations = check_invariants(&battle);
        assert!(!violations.is_empty());
        assert_eq!(violations[0].phase, 2);
        assert!(violations[0].message.contains("without a move action"));
    }

    #[test]
    fn test_detects_revival() {
        let mut battle = battle();
        let mut tokens: Vec<PhaseToken> = battle.phases[3].tokens().cloned().collect();
        for token in &mut tokens {
            token.ran_away = false;
        }
        battle.phases[3] = PhaseSnapshot::group(tokens);

        let violations = check_invariants(&battle);
        assert!(violations.iter().any(|v| v.message.contains("returned after fleeing")));
    }

    #[test]
    fn test_detects_destroyed_token_revived() {
        let mut battle = battle();
        let mut tokens: Vec<PhaseToken> = battle.phases[1].tokens().cloned().collect();
        for token in &mut tokens {
            if token.num() == 2 {
                token.destroyed = true;
            }
        }
        battle.phases[1] = PhaseSnapshot::group(tokens);

        let violations = check_invariants(&battle);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].phase, 2);
        assert!(violations[0].message.contains("token 2 revived after destruction"));
    }

    #[test]
    fn test_violation_display() {
        let violation = InvariantViolation {
            phase: 4,
            message: "2 tokens carry an action".to_owned(),
        };
        assert_eq!(
            violation.to_string(),
            "Invariant violation in phase 4: 2 tokens carry an action"
        );
    }
}

//! Expansion of a round-grouped action log into one snapshot per action.
//!
//! Each phase is a full, independent clone of the previous one with exactly
//! one action applied. Nothing is shared between phases, so a viewer can hold
//! any two of them at once.
//!
//! Round 0 only contributes the starting configuration: replay begins with
//! the actions of round 1.

use super::phase::{PhaseSnapshot, PhaseToken};
use crate::record::{Token, TokenAction};
use tracing::debug;

/// Number of snapshots [`expand_phases`] produces for these rounds.
#[must_use]
pub fn expanded_phase_count(rounds: &[Vec<TokenAction>]) -> usize {
    1 + rounds.iter().skip(1).map(Vec::len).sum::<usize>()
}

/// Replay `rounds` over `tokens`, returning one snapshot per phase.
///
/// Snapshot 0 is the starting configuration. An action naming a token that
/// is not in the battle still produces a snapshot, identical in positions to
/// the previous one and with no acting token.
#[must_use]
pub fn expand_phases(tokens: &[Token], rounds: &[Vec<TokenAction>]) -> Vec<PhaseSnapshot> {
    let mut running: Vec<PhaseToken> = tokens.iter().map(PhaseToken::from_token).collect();

    let mut phases = Vec::with_capacity(expanded_phase_count(rounds));
    phases.push(PhaseSnapshot::group(running.clone()));

    for (round, actions) in rounds.iter().enumerate().skip(1) {
        for action in actions {
            let mut next = running.clone();
            let mut attributed = false;

            for token in &mut next {
                if token.num() == action.token_num {
                    token.apply(action);
                    attributed = true;
                } else {
                    token.action = None;
                }
            }

            if !attributed {
                debug!(
                    round,
                    phase = phases.len(),
                    token_num = action.token_num,
                    "action names a token not in this battle"
                );
            }

            phases.push(PhaseSnapshot::group(next.clone()));
            running = next;
        }
    }

    phases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::GridKey;
    use crate::record::{GridPosition, TokenActionType};

    fn tokens() -> Vec<Token> {
        vec![
            Token::new(1, 1, 1, GridPosition::new(0, 0)),
            Token::new(2, 2, 1, GridPosition::new(1, 1)),
        ]
    }

    #[test]
    fn test_round_zero_only_yields_start() {
        let rounds = vec![vec![TokenAction::ran_away(1, 0)]];
        let phases = expand_phases(&tokens(), &rounds);
        assert_eq!(phases.len(), 1);
        assert!(phases[0].acting_token().is_none());
        assert_eq!(expanded_phase_count(&rounds), 1);
    }

    #[test]
    fn test_action_moves_only_the_actor() {
        let rounds = vec![
            vec![],
            vec![TokenAction::movement(
                1,
                1,
                GridPosition::new(0, 0),
                GridPosition::new(2, 2),
            )],
        ];
        let phases = expand_phases(&tokens(), &rounds);
        assert_eq!(phases.len(), 2);

        let moved = phases[1].find(1).unwrap();
        assert_eq!(moved.position, GridPosition::new(2, 2));
        assert_eq!(moved.action.as_ref().map(|a| a.kind), Some(TokenActionType::Move));

        let idle = phases[1].find(2).unwrap();
        assert_eq!(idle.position, GridPosition::new(1, 1));
        assert!(idle.action.is_none());

        // earlier phase untouched
        assert_eq!(phases[0].find(1).unwrap().position, GridPosition::new(0, 0));
        assert!(phases[1].tokens_at(GridKey::new(0, 0)).is_none());
    }

    #[test]
    fn test_action_cleared_on_following_phase() {
        let rounds = vec![
            vec![],
            vec![
                TokenAction::fire(TokenActionType::BeamFire, 1, 1, 2),
                TokenAction::fire(TokenActionType::TorpedoFire, 2, 1, 1),
            ],
        ];
        let phases = expand_phases(&tokens(), &rounds);
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[1].acting_token().map(PhaseToken::num), Some(1));
        assert_eq!(phases[2].acting_token().map(PhaseToken::num), Some(2));
        assert!(phases[2].find(1).unwrap().action.is_none());
    }

    #[test]
    fn test_unknown_token_yields_unattributed_phase() {
        let rounds = vec![vec![], vec![TokenAction::ran_away(9, 1)]];
        let phases = expand_phases(&tokens(), &rounds);
        assert_eq!(phases.len(), 2);
        assert!(phases[1].acting_token().is_none());
        assert_eq!(phases[1].find(1), phases[0].find(1));
        assert_eq!(phases[1].find(2), phases[0].find(2));
    }
}

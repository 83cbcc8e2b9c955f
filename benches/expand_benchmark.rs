//! Benchmarks for phase expansion and location queries.
//!
//! Expansion clones every token once per action, so a large fleet battle is
//! the case worth watching.

#![allow(missing_docs)]

use std::hint::black_box;

use battleview::{Battle, BattleRecord, GridPosition, Token, TokenAction, TokenActionType, Vector};
use criterion::{Criterion, criterion_group, criterion_main};

/// A battle with `tokens` tokens fighting over `rounds` rounds.
///
/// Every round each token moves one cell toward the centre and then fires.
fn synthetic_record(tokens: u32, rounds: u32) -> BattleRecord {
    let fleet: Vec<Token> = (1..=tokens)
        .map(|num| {
            let side = num % 2;
            let x = if side == 0 { 0 } else { 9 };
            let y = i32::try_from(num % 10).unwrap_or(0);
            Token::new(num, side + 1, 1, GridPosition::new(x, y))
        })
        .collect();

    let mut actions_per_round = vec![Vec::new()];
    let mut positions: Vec<GridPosition> = fleet.iter().map(|t| t.position).collect();
    for round in 1..=rounds {
        let mut actions = Vec::new();
        for (token, pos) in fleet.iter().zip(positions.iter_mut()) {
            let step = if pos.x < 4 { 1 } else if pos.x > 5 { -1 } else { 0 };
            let to = GridPosition::new(pos.x + step, pos.y);
            actions.push(TokenAction::movement(token.num, round, *pos, to));
            *pos = to;

            let target = if token.num == tokens { 1 } else { token.num + 1 };
            actions.push(TokenAction::fire(
                TokenActionType::BeamFire,
                token.num,
                round,
                target,
            ));
        }
        actions_per_round.push(actions);
    }

    BattleRecord {
        num: 1,
        planet_num: Some(1),
        position: Vector::default(),
        tokens: fleet,
        actions_per_round,
    }
}

fn bench_expand_small(c: &mut Criterion) {
    let record = synthetic_record(8, 4);

    c.bench_function("expand_8_tokens_4_rounds", |b| {
        b.iter(|| {
            let battle = Battle::new(black_box(record.clone()));
            black_box(battle)
        });
    });
}

fn bench_expand_fleet(c: &mut Criterion) {
    let record = synthetic_record(48, 16);

    c.bench_function("expand_48_tokens_16_rounds", |b| {
        b.iter(|| {
            let battle = Battle::new(black_box(record.clone()));
            black_box(battle)
        });
    });
}

fn bench_location_queries(c: &mut Criterion) {
    let Ok(battle) = Battle::new(synthetic_record(48, 16)) else {
        return;
    };

    c.bench_function("tokens_at_location_full_board", |b| {
        b.iter(|| {
            let mut seen = 0usize;
            for phase in 0..battle.phase_count() {
                for x in 0..10 {
                    for y in 0..10 {
                        if let Some(tokens) = battle.tokens_at_location(black_box(phase), x, y) {
                            seen += tokens.len();
                        }
                    }
                }
            }
            black_box(seen)
        });
    });
}

criterion_group!(
    benches,
    bench_expand_small,
    bench_expand_fleet,
    bench_location_queries
);
criterion_main!(benches);

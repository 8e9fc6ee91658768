use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use primal_arena::rules::{Card, CardRegistry};
use primal_arena::{GameState, MatchConfig, RoundScheduler, SlotId};

/// A board with every slot filled from the standard creature set.
fn full_board(players: usize, registry: &CardRegistry) -> GameState {
    let mut state = GameState::new(MatchConfig::new(42).with_players(players));
    let creatures: Vec<_> = registry
        .iter()
        .filter_map(|(_, card)| match card {
            Card::Creature(t) => Some(t.clone()),
            Card::Effect(_) => None,
        })
        .collect();
    let slots = state.board.slots().len();
    for (i, template) in creatures.iter().cycle().take(slots).enumerate() {
        state.board.place(SlotId(i as u16), template);
    }
    state
}

fn bench_round(c: &mut Criterion) {
    let registry = CardRegistry::standard();
    let mut group = c.benchmark_group("round");

    for players in [2usize, 4, 8] {
        group.bench_with_input(BenchmarkId::new("players", players), &players, |b, &players| {
            b.iter_batched(
                || full_board(players, &registry),
                |mut state| RoundScheduler::run_round(&mut state),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(round_benches, bench_round);
criterion_main!(round_benches);

//! Performance benchmarks for UNIVERSE GAME

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use universe_game::history::HistoryTracker;
use universe_game::{Config, GameSession, Grid, PatternDetector};

fn benchmark_next_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_generation");

    for density in [0.1, 0.5, 0.9].iter() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = Grid::random(&mut rng, *density);

        group.bench_with_input(BenchmarkId::new("density", density), density, |b, _| {
            b.iter(|| black_box(&grid).next_generation());
        });
    }

    group.finish();
}

fn benchmark_detection(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut grid = Grid::random(&mut rng, 0.4);
    let mut history = HistoryTracker::new();

    // Warm up past the glider threshold
    for _ in 0..5 {
        let next = grid.next_generation();
        history.record(&grid, &next);
        grid = next;
    }

    c.bench_function("pattern_detect", |b| {
        b.iter(|| PatternDetector::detect(black_box(&grid), black_box(&history)));
    });
}

fn benchmark_session_run(c: &mut Criterion) {
    let mut config = Config::default();
    config.simulation.max_turns = 100;

    c.bench_function("session_run_100", |b| {
        b.iter(|| {
            let mut session = GameSession::new_with_seed(config.clone(), 42);
            session.run()
        });
    });
}

fn benchmark_state_snapshot(c: &mut Criterion) {
    let mut session = GameSession::new_with_seed(Config::default(), 42);
    session.run();

    c.bench_function("state_snapshot_json", |b| {
        b.iter(|| serde_json::to_string(&session.state()).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_next_generation,
    benchmark_detection,
    benchmark_session_run,
    benchmark_state_snapshot,
);

criterion_main!(benches);

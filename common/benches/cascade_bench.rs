use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::time::Duration;
use fruit_tracker_common::games::SessionRng;
use fruit_tracker_common::games::match3::{Board, Cascade, Match3Settings, TileIdAllocator};

fn bench_generate_playable() {
    let settings = Match3Settings::default();
    let mut session_rng = SessionRng::from_random();
    let mut ids = TileIdAllocator::new();
    Board::generate_playable(&settings, &mut session_rng, &mut ids);
}

fn bench_generate_playable_large() {
    let settings = Match3Settings {
        board_size: 10,
        tile_kinds: 8,
        ..Match3Settings::default()
    };
    let mut session_rng = SessionRng::from_random();
    let mut ids = TileIdAllocator::new();
    Board::generate_playable(&settings, &mut session_rng, &mut ids);
}

fn bench_twenty_moves() {
    let settings = Match3Settings::default();
    let mut session_rng = SessionRng::from_random();
    let mut ids = TileIdAllocator::new();
    let mut board = Board::generate_playable(&settings, &mut session_rng, &mut ids);

    for _ in 0..20 {
        let Some((a, b)) = board.find_move() else {
            break;
        };
        board.swap_kinds(a, b);
        for _step in Cascade::new(&mut board, &settings, &mut session_rng, &mut ids) {}
    }
}

fn cascade_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("match3");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(50)
        .measurement_time(Duration::from_secs(10));

    group.bench_function("generate_playable", |b| {
        b.iter(bench_generate_playable)
    });

    group.bench_function("generate_playable_10x10", |b| {
        b.iter(bench_generate_playable_large)
    });

    group.bench_function("twenty_moves", |b| {
        b.iter(bench_twenty_moves)
    });

    group.finish();
}

criterion_group!(benches, cascade_bench);
criterion_main!(benches);

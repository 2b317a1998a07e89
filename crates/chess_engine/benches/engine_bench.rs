//! Engine Benchmarks
//!
//! Performance benchmarks for move generation, evaluation and search using
//! Criterion.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minichess_engine::{evaluate, find_best_move, legal_moves, new_game, Board, Color, Difficulty, SearchParams};
use minichess_engine::move_gen::pseudo_legal_count;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const MIDGAME: &str = "nqk1/p1pb/1p2/P1PP/NQKB w - -";

fn bench_legal_moves_starting(c: &mut Criterion) {
    let board = new_game();

    c.bench_function("legal_moves_starting_position", |b| {
        b.iter(|| black_box(legal_moves(&board)))
    });
}

fn bench_mobility_both_colors(c: &mut Criterion) {
    let board = new_game();

    c.bench_function("mobility_both_colors", |b| {
        b.iter(|| {
            let white = pseudo_legal_count(&board, Color::White);
            let black = pseudo_legal_count(&board, Color::Black);
            black_box((white, black))
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let start = new_game();
    let midgame = Board::from_text(MIDGAME).unwrap();

    c.bench_function("evaluate_starting", |b| {
        b.iter(|| black_box(evaluate(&start, Color::White)))
    });
    c.bench_function("evaluate_midgame", |b| {
        b.iter(|| black_box(evaluate(&midgame, Color::White)))
    });
}

fn bench_search(c: &mut Criterion) {
    let board = new_game();
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for difficulty in [Difficulty::Easy, Difficulty::Medium] {
        group.bench_function(difficulty.to_string(), |b| {
            b.iter(|| {
                let params = SearchParams::new(difficulty, Duration::from_secs(10));
                let mut rng = StdRng::seed_from_u64(7);
                black_box(futures_lite::future::block_on(find_best_move(
                    &board, &params, &mut rng,
                )))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_legal_moves_starting,
    bench_mobility_both_colors,
    bench_evaluate,
    bench_search,
);
criterion_main!(benches);

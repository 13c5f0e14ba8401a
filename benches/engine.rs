//! Benchmarks for the shape board engine.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use shapeboard::challenge::{is_complete, ChallengeId};
use shapeboard::grid::project;
use shapeboard::pattern::rotate_clockwise;
use shapeboard::pieces::{build_catalog, PieceId, PlacedPiece, SHAPES};
use shapeboard::{Command, Config, EngineState};

/// Every catalog piece placed in a diagonal band across the board.
fn all_pieces_placed() -> Vec<PlacedPiece> {
    build_catalog(SHAPES)
        .unwrap()
        .into_iter()
        .enumerate()
        .map(|(i, piece)| PlacedPiece {
            piece,
            x: (i as i32 * 3) % 20,
            y: (i as i32 * 5) % 20,
        })
        .collect()
}

/// Benchmark rotating the largest catalog pattern.
fn bench_rotate(c: &mut Criterion) {
    let pattern = build_catalog(SHAPES).unwrap().remove(5).pattern;

    c.bench_function("rotate_clockwise", |b| {
        b.iter(|| rotate_clockwise(black_box(&pattern)))
    });
}

/// Benchmark projecting the full catalog onto the board.
fn bench_project(c: &mut Criterion) {
    let placed = all_pieces_placed();

    c.bench_function("project_full_catalog", |b| {
        b.iter(|| project(20, black_box(&placed)))
    });
}

/// Benchmark the exact-match completion check.
fn bench_is_complete(c: &mut Criterion) {
    let placed = all_pieces_placed();
    let board = project(20, &placed);
    let target = board.clone();

    c.bench_function("is_complete", |b| {
        b.iter(|| is_complete(black_box(&board), black_box(&target)))
    });
}

/// Benchmark a move inside an active challenge, including re-evaluation.
fn bench_move_in_challenge(c: &mut Criterion) {
    let mut engine = EngineState::new(Config::default(), SHAPES).unwrap();
    engine.apply(Command::StartChallenge(ChallengeId(3))).unwrap();
    engine.apply(Command::Place { id: PieceId(3), x: 4, y: 9 }).unwrap();
    engine.apply(Command::Place { id: PieceId(6), x: 7, y: 9 }).unwrap();
    engine.apply(Command::Place { id: PieceId(8), x: 10, y: 9 }).unwrap();

    let mut x = 10;
    c.bench_function("move_in_challenge", |b| {
        b.iter(|| {
            x = if x == 10 { 11 } else { 10 };
            engine.apply(black_box(Command::Move { id: PieceId(8), x, y: 9 }))
        })
    });
}

criterion_group!(
    benches,
    bench_rotate,
    bench_project,
    bench_is_complete,
    bench_move_in_challenge
);
criterion_main!(benches);

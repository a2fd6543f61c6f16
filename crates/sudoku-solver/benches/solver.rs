//! Benchmarks for end-to-end solving.
//!
//! Compares the deterministic sequential profile against parallel profiles
//! on puzzles of increasing difficulty.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::hint;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sudoku_core::{Topology, ValidationPolicy};
use sudoku_solver::{Solver, SolverConfig, parse, search};

const PUZZLES: [(&str, &str); 4] = [
    (
        "easy",
        "003020600900305001001806400008102900700000008006708200002609500800203009005010300",
    ),
    (
        "grid",
        "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......",
    ),
    (
        "inkala",
        "8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..",
    ),
    (
        "hardest",
        "85...24..72......9..4.........1.7..23.5...9...4...........8..7..17..........36.4.",
    ),
];

fn bench_solve(c: &mut Criterion) {
    let profiles = [
        ("sequential", SolverConfig::sequential()),
        ("parallel", SolverConfig::default()),
        (
            "parallel_narrow",
            SolverConfig::default()
                .with_max_in_flight(4)
                .with_parallel_depth(2),
        ),
    ];

    for (profile, config) in profiles {
        let solver = Solver::new(config).unwrap();
        for (name, puzzle) in PUZZLES {
            c.bench_with_input(BenchmarkId::new(profile, name), puzzle, |b, puzzle| {
                b.iter(|| hint::black_box(solver.solve(hint::black_box(puzzle)).unwrap()));
            });
        }
    }
}

fn bench_search(c: &mut Criterion) {
    let topology = Topology::new();

    for (name, puzzle) in PUZZLES {
        let map = parse(puzzle, &topology, ValidationPolicy::Strict).unwrap();
        c.bench_with_input(BenchmarkId::new("search", name), &map, |b, map| {
            b.iter_batched(
                || map.clone(),
                |map| hint::black_box(search(&topology, map)),
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_parse(c: &mut Criterion) {
    let topology = Topology::new();

    for (name, puzzle) in PUZZLES {
        c.bench_with_input(BenchmarkId::new("parse", name), puzzle, |b, puzzle| {
            b.iter(|| {
                hint::black_box(parse(
                    hint::black_box(puzzle),
                    &topology,
                    ValidationPolicy::Strict,
                ))
            });
        });
    }
}

criterion_group!(benches, bench_parse, bench_search, bench_solve);
criterion_main!(benches);

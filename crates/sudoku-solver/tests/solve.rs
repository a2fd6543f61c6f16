//! End-to-end solving scenarios.

use std::{
    thread,
    time::{Duration, Instant},
};

use proptest::prelude::*;
use sudoku_core::{Puzzle, Topology, ValidationPolicy};
use sudoku_solver::{
    CancellationToken, SolveError, Solver, SolverConfig, is_valid_solution, solve,
};

const GRID: &str =
    "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......";
const GRID_SOLUTION: &str =
    "417369825632158947958724316825437169791586432346912758289643571573291684164875293";

/// Puzzles with a unique solution, paired with it.
const KNOWN: [(&str, &str); 7] = [
    (GRID, GRID_SOLUTION),
    (
        "8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..",
        "812753649943682175675491283154237896369845721287169534521974368438526917796318452",
    ),
    (
        "003020600900305001001806400008102900700000008006708200002609500800203009005010300",
        "483921657967345821251876493548132976729564138136798245372689514814253769695417382",
    ),
    (
        "85...24..72......9..4.........1.7..23.5...9...4...........8..7..17..........36.4.",
        "859612437723854169164379528986147352375268914241593786432981675617425893598736241",
    ),
    (
        "52...6.........7.13...........4..8..6......5...........418.........3..2...87.....",
        "527316489896542731314987562172453896689271354453698217941825673765134928238769145",
    ),
    (
        "6.....8.3.4.7.................5.4.7.3..2.....1.6.......2.....5.....8.6......1....",
        "617459823248736915539128467982564371374291586156873294823647159791385642465912738",
    ),
    (
        "48.3............71.2.......7.5....6....2..8.............1.76...3.....4......5....",
        "487312695593684271126597384735849162914265837268731549851476923379128456642953718",
    ),
];

fn profiles() -> Vec<(&'static str, Solver)> {
    vec![
        ("sequential", Solver::new(SolverConfig::sequential()).unwrap()),
        ("global pool", Solver::default()),
        (
            "dedicated pool",
            Solver::new(SolverConfig::default().with_threads(4)).unwrap(),
        ),
        (
            "tight budget",
            Solver::new(
                SolverConfig::default()
                    .with_threads(3)
                    .with_max_in_flight(2)
                    .with_parallel_depth(16),
            )
            .unwrap(),
        ),
    ]
}

#[test]
fn test_concrete_scenario() {
    assert_eq!(solve(GRID).as_deref(), Ok(GRID_SOLUTION));
}

#[test]
fn test_known_puzzles_under_every_profile() {
    let topology = Topology::new();
    for (name, solver) in profiles() {
        for (puzzle, expected) in KNOWN {
            let solution = solver
                .solve(puzzle)
                .unwrap_or_else(|err| panic!("{name}: {puzzle}: {err}"));
            assert_eq!(solution.to_string(), expected, "{name}: {puzzle}");
            assert!(solution.verify(&topology));
            assert!(solution.respects(&puzzle.parse::<Puzzle>().unwrap()));
        }
    }
}

#[test]
fn test_structural_errors() {
    assert_eq!(
        solve(&GRID[..80]),
        Err(SolveError::InvalidSize {
            expected: 81,
            found: 80
        })
    );
    assert_eq!(
        solve(""),
        Err(SolveError::InvalidSize {
            expected: 81,
            found: 0
        })
    );
    assert_eq!(
        solve("4.....8.5.3..........7......2.....6.....8.4......1...."),
        Err(SolveError::InvalidSize {
            expected: 81,
            found: 54
        })
    );
}

#[test]
fn test_semantic_errors() {
    assert_eq!(
        solve("4.....8.5............7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......"),
        Err(SolveError::InsufficientClues { found: 16 })
    );
    assert_eq!(
        solve("4.....8.5.3..........7......2.....6.....8.4.........6....6.3.7.5..2......64......"),
        Err(SolveError::InsufficientDigitVariety { found: 7 })
    );
    assert_eq!(
        solve("..757..3.1......2.7...234......8...4..7..4...49....6.5.42...3.....7..9....18....."),
        Err(SolveError::Unsolvable)
    );
    assert_eq!(
        solve("..757..3.1....a.2.7...234......8x..4..7..4...49....6.5.42...3e....7..9....18....."),
        Err(SolveError::Unsolvable)
    );
}

#[test]
fn test_exhausted_search_is_unsolvable_under_every_profile() {
    // The wrong clue at C1 survives clue folding; only search rules it out.
    let puzzle =
        "4.....8.5.3.......6..7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......";
    for (name, solver) in profiles() {
        let err = solver.solve(puzzle).unwrap_err();
        assert_eq!(err, SolveError::Unsolvable, "{name}");
        assert!(err.is_semantic());
    }
}

#[test]
fn test_solving_a_solution_is_identity() {
    for (_, solution) in KNOWN {
        assert_eq!(solve(solution).as_deref(), Ok(solution));
    }
}

#[test]
fn test_repeated_parallel_solves_stay_valid() {
    let solver = Solver::new(
        SolverConfig::default()
            .with_threads(4)
            .with_max_in_flight(8)
            .with_validation(ValidationPolicy::Lenient),
    )
    .unwrap();
    // Few clues, many solutions: the winner may differ between runs.
    let sparse = format!("{}{}", &GRID[..27], ".".repeat(54));
    for _ in 0..20 {
        let (solution, stats) = solver.solve_with_stats(&sparse, None).unwrap();
        assert!(is_valid_solution(&solution.to_string()));
        assert!(stats.peak_in_flight() <= 8);
    }
}

#[test]
fn test_sequential_solves_are_deterministic() {
    let solver = Solver::new(
        SolverConfig::sequential().with_validation(ValidationPolicy::Lenient),
    )
    .unwrap();
    let blank = ".".repeat(81);
    let first = solver.solve(&blank).unwrap();
    for _ in 0..5 {
        assert_eq!(solver.solve(&blank).unwrap(), first);
    }
}

#[test]
fn test_deadline_is_honoured() {
    let timeout = Duration::from_millis(50);
    let solver = Solver::new(SolverConfig::default().with_timeout(timeout)).unwrap();
    for (puzzle, expected) in KNOWN {
        let started = Instant::now();
        match solver.solve(puzzle) {
            Ok(solution) => assert_eq!(solution.to_string(), expected),
            Err(err) => assert_eq!(err, SolveError::Timeout),
        }
        // Generous slack for loaded CI machines.
        assert!(started.elapsed() < timeout + Duration::from_secs(2));
    }

    let expired = Solver::new(SolverConfig::default().with_timeout(Duration::ZERO)).unwrap();
    let err = expired.solve(GRID).unwrap_err();
    assert_eq!(err, SolveError::Timeout);
    assert!(err.is_resource());
}

#[test]
fn test_cancellation() {
    let solver = Solver::default();
    let token = CancellationToken::new();
    token.cancel();
    assert_eq!(
        solver.solve_with_cancellation(GRID, &token),
        Err(SolveError::Cancelled)
    );

    // Cancelling from another thread never leaves the call hanging.
    let token = CancellationToken::new();
    let result = thread::scope(|s| {
        let handle = s.spawn(|| solver.solve_with_cancellation(GRID, &token));
        token.cancel();
        handle.join().unwrap()
    });
    match result {
        Ok(solution) => assert_eq!(solution.to_string(), GRID_SOLUTION),
        Err(err) => assert_eq!(err, SolveError::Cancelled),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn blanked_solutions_round_trip(
        index in 0..KNOWN.len(),
        blanks in proptest::collection::vec(any::<bool>(), 81),
    ) {
        let (_, solution) = KNOWN[index];
        let puzzle: String = solution
            .chars()
            .zip(&blanks)
            .map(|(ch, &blank)| if blank { '.' } else { ch })
            .collect();

        let solver = Solver::new(
            SolverConfig::default().with_validation(ValidationPolicy::Lenient),
        )
        .unwrap();
        let solved = solver.solve(&puzzle).unwrap();
        prop_assert!(is_valid_solution(&solved.to_string()));
        prop_assert!(solved.respects(&Puzzle::parse(&puzzle, ValidationPolicy::Lenient).unwrap()));
    }

    #[test]
    fn wrong_length_is_rejected(input in "[1-9.]{0,120}") {
        prop_assume!(input.len() != 81);
        prop_assert_eq!(
            solve(&input),
            Err(SolveError::InvalidSize { expected: 81, found: input.len() })
        );
    }
}

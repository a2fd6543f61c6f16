//! Puzzle fixtures shared by unit tests.

use sudoku_core::{CandidateMap, Digit, DigitSet, Puzzle, Square, ValidationPolicy};

/// A 17-clue puzzle that needs search.
pub(crate) const GRID: &str =
    "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......";
pub(crate) const GRID_SOLUTION: &str =
    "417369825632158947958724316825437169791586432346912758289643571573291684164875293";

/// A puzzle solved by propagation alone.
pub(crate) const EASY: &str =
    "003020600900305001001806400008102900700000008006708200002609500800203009005010300";
pub(crate) const EASY_SOLUTION: &str =
    "483921657967345821251876493548132976729564138136798245372689514814253769695417382";

/// Duplicate 7 in row A; fails during clue folding.
pub(crate) const CONTRADICTORY: &str =
    "..757..3.1......2.7...234......8...4..7..4...49....6.5.42...3.....7..9....18.....";

/// `GRID` with a wrong clue at `C1`. Clue folding succeeds, but every
/// search branch fails.
pub(crate) const UNSOLVABLE: &str =
    "4.....8.5.3.......6..7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......";

/// Parses `s` without clue count checks.
#[track_caller]
pub(crate) fn puzzle(s: &str) -> Puzzle {
    Puzzle::parse(s, ValidationPolicy::Lenient).unwrap()
}

/// Builds a map with a single candidate per square from 81 digits.
#[track_caller]
pub(crate) fn solved_map(digits: &str) -> CandidateMap {
    let mut map = CandidateMap::full();
    for (square, ch) in Square::ALL.into_iter().zip(digits.chars()) {
        let digit = Digit::from_char(ch).unwrap();
        map.set_candidates(square, DigitSet::single_digit(digit));
    }
    map
}

/// A consistent-looking map in which every branch fails: `A4`..`A6` all
/// admit only `{1, 2}`.
pub(crate) fn exhausted_map() -> CandidateMap {
    let mut map = solved_map(EASY_SOLUTION);
    for label in ["A4", "A5", "A6"] {
        let square = Square::from_label(label).unwrap();
        map.set_candidates(square, DigitSet::from_iter([Digit::D1, Digit::D2]));
    }
    map
}

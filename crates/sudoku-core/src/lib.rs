//! Core data structures for a constraint-propagation sudoku solver.
//!
//! This crate holds everything about the board that does not involve
//! solving:
//!
//! 1. **Board model**
//!    - [`digit`]: type-safe digits 1-9
//!    - [`digit_set`]: 9-bit candidate sets
//!    - [`square`]: the 81 squares `A1`..`I9`, enumerated row-major
//!    - [`unit`]: rows, columns and boxes
//!
//! 2. **Topology** - [`topology`]: the immutable unit/peer graph, built once
//!    and shared by reference.
//!
//! 3. **Working state** - [`candidate_map`]: per-square candidate sets owned
//!    by one search branch at a time.
//!
//! 4. **Input and output**
//!    - [`puzzle`]: parsing and structural validation of puzzle strings
//!    - [`render`]: flat and grid renderings of candidate maps
//!
//! # Examples
//!
//! ```
//! use sudoku_core::{CandidateMap, Puzzle, Topology, ValidationPolicy};
//!
//! let topology = Topology::new();
//! let puzzle = Puzzle::parse(
//!     "003020600900305001001806400008102900700000008006708200002609500800203009005010300",
//!     ValidationPolicy::Strict,
//! )?;
//!
//! let map = CandidateMap::full();
//! for (square, _digit) in puzzle.clues() {
//!     assert_eq!(topology.peers(square).len(), 20);
//!     assert_eq!(map.candidates(square).len(), 9);
//! }
//! # Ok::<(), sudoku_core::ParseError>(())
//! ```

pub mod candidate_map;
pub mod digit;
pub mod digit_set;
pub mod puzzle;
pub mod render;
pub mod square;
pub mod topology;
pub mod unit;

pub use self::{
    candidate_map::CandidateMap,
    digit::Digit,
    digit_set::DigitSet,
    puzzle::{ParseError, Puzzle, ValidationPolicy},
    square::Square,
    topology::Topology,
    unit::Unit,
};

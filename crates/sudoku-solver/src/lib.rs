//! Constraint-propagation sudoku solver with bounded parallel search.
//!
//! Solving a puzzle goes through three stages:
//!
//! 1. **Parsing** - [`parse`] validates the puzzle string with
//!    [`sudoku_core::Puzzle::parse`] and folds its clues into a
//!    [`CandidateMap`](sudoku_core::CandidateMap) ([`parse_grid`]).
//! 2. **Propagation** - [`Propagator`] removes candidates that conflict with
//!    decided squares and places digits that have only one possible square in
//!    a unit. Easy puzzles are solved at this stage.
//! 3. **Search** - [`SearchEngine`] guesses a digit for the most constrained
//!    square and recurses, exploring the top levels of the search tree in
//!    parallel on a rayon pool within an in-flight budget.
//!
//! [`Solver`] ties the stages together under a [`SolverConfig`], and
//! [`solve`] is a one-call entry point using a shared default solver.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use sudoku_solver::{SolveError, Solver, SolverConfig};
//!
//! let solver = Solver::new(SolverConfig::default().with_timeout(Duration::from_secs(10)))?;
//! let solution = solver.solve(
//!     "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......",
//! )?;
//! println!("{}", solution.to_grid_string());
//!
//! let err = solver.solve("4.....8.5.3....").unwrap_err();
//! assert_eq!(err, SolveError::InvalidSize { expected: 81, found: 15 });
//! assert!(err.is_structural());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Determinism
//!
//! With [`SolverConfig::sequential`] branches are tried in ascending digit
//! order and results are reproducible. Parallel configurations return
//! whichever solution is found first, which only matters for puzzles with
//! more than one solution.

pub use self::{cancel::*, config::*, error::*, propagate::*, search::*, solver::*};

mod cancel;
mod config;
mod error;
mod propagate;
mod search;
mod solver;

#[cfg(test)]
mod testing;

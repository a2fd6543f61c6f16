//! Per-square candidate tracking.
//!
//! [`CandidateMap`] is the working state of one solve attempt. It is a plain
//! value: cloning it gives an independent copy, which is how the search
//! engine hands separate state to each branch.
//!
//! # Examples
//!
//! ```
//! use sudoku_core::{CandidateMap, Digit, Square};
//!
//! let mut map = CandidateMap::full();
//! let e5 = Square::from_label("E5").unwrap();
//!
//! assert_eq!(map.candidates(e5).len(), 9);
//! map.remove_candidate(e5, Digit::D5);
//! assert!(!map.candidates(e5).contains(Digit::D5));
//! assert!(!map.is_solved());
//! ```

use crate::{Digit, DigitSet, Square};

/// Candidate digits for each of the 81 squares.
///
/// Invariant maintained by its users (not by this type): within a branch,
/// candidate sets only ever shrink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMap {
    cells: [DigitSet; 81],
}

impl Default for CandidateMap {
    fn default() -> Self {
        Self::full()
    }
}

impl From<[DigitSet; 81]> for CandidateMap {
    fn from(cells: [DigitSet; 81]) -> Self {
        Self { cells }
    }
}

impl CandidateMap {
    /// Creates a map where every square admits all nine digits.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            cells: [DigitSet::FULL; 81],
        }
    }

    /// Returns the candidates of `square`.
    #[inline]
    #[must_use]
    pub fn candidates(&self, square: Square) -> DigitSet {
        self.cells[square.index()]
    }

    /// Replaces the candidates of `square`.
    ///
    /// This bypasses propagation; it exists for building test fixtures and
    /// for importing states produced elsewhere.
    #[inline]
    pub fn set_candidates(&mut self, square: Square, candidates: DigitSet) {
        self.cells[square.index()] = candidates;
    }

    /// Removes `digit` from the candidates of `square`.
    ///
    /// Returns `true` if the candidate was present.
    #[inline]
    pub fn remove_candidate(&mut self, square: Square, digit: Digit) -> bool {
        self.cells[square.index()].remove(digit)
    }

    /// Returns the decided digit of `square`, if it has a single candidate.
    #[must_use]
    pub fn value(&self, square: Square) -> Option<Digit> {
        self.candidates(square).single()
    }

    /// Returns `true` if every square has exactly one candidate.
    ///
    /// This only looks at candidate counts. Maps produced by the propagator
    /// are consistent whenever they are solved; maps built by hand through
    /// [`set_candidates`](Self::set_candidates) may not be.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|cell| cell.len() == 1)
    }

    /// Returns the number of squares with more than one candidate.
    #[must_use]
    pub fn unsolved_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.len() > 1).count()
    }

    /// Returns every square paired with its candidates, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, DigitSet)> + '_ {
        Square::ALL.into_iter().zip(self.cells.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_map() {
        let map = CandidateMap::full();
        assert_eq!(map, CandidateMap::default());
        for (_, candidates) in map.iter() {
            assert_eq!(candidates, DigitSet::FULL);
        }
        assert_eq!(map.unsolved_count(), 81);
        assert!(!map.is_solved());
    }

    #[test]
    fn test_clones_are_independent() {
        let mut map = CandidateMap::full();
        let snapshot = map.clone();
        let a1 = Square::new(0, 0);

        assert!(map.remove_candidate(a1, Digit::D1));
        assert!(!map.remove_candidate(a1, Digit::D1));
        assert_eq!(map.candidates(a1).len(), 8);
        assert_eq!(snapshot.candidates(a1).len(), 9);
    }

    #[test]
    fn test_solved_requires_all_singletons() {
        let mut map = CandidateMap::from([DigitSet::single_digit(Digit::D1); 81]);
        assert!(map.is_solved());
        assert_eq!(map.value(Square::new(3, 3)), Some(Digit::D1));

        map.set_candidates(Square::new(8, 8), DigitSet::from_iter([Digit::D1, Digit::D2]));
        assert!(!map.is_solved());
        assert_eq!(map.unsolved_count(), 1);
        assert_eq!(map.value(Square::new(8, 8)), None);

        map.set_candidates(Square::new(8, 8), DigitSet::EMPTY);
        assert!(!map.is_solved());
        assert_eq!(map.unsolved_count(), 0);
    }
}

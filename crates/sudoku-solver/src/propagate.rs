//! Constraint propagation.
//!
//! [`Propagator`] implements the two mutually recursive rules that tighten a
//! [`CandidateMap`]:
//!
//! 1. When a square is left with a single candidate, that digit is removed
//!    from all of its peers.
//! 2. When a unit is left with a single square that admits a digit, the digit
//!    is assigned there.
//!
//! Both operations mutate the map in place. Once one of them returns an
//! error the map is inconsistent and must be dropped.
//!
//! # Examples
//!
//! ```
//! use sudoku_core::{CandidateMap, Digit, Square, Topology};
//! use sudoku_solver::Propagator;
//!
//! let topology = Topology::new();
//! let propagator = Propagator::new(&topology);
//! let mut map = CandidateMap::full();
//!
//! let a1 = Square::from_label("A1").unwrap();
//! propagator.assign(&mut map, a1, Digit::D4)?;
//!
//! assert_eq!(map.value(a1), Some(Digit::D4));
//! for &peer in topology.peers(a1) {
//!     assert!(!map.candidates(peer).contains(Digit::D4));
//! }
//! # Ok::<(), sudoku_solver::PropagationError>(())
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use sudoku_core::{CandidateMap, Digit, DigitSet, Square, Topology, Unit};

/// A state in which no digit assignment can satisfy every unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Contradiction {
    /// A square lost its last candidate.
    #[display("no candidates left for {square}")]
    EmptySquare {
        /// The emptied square.
        square: Square,
    },
    /// No square in a unit admits a digit any more.
    #[display("no place left for {digit} in {unit}")]
    NoPlaceForDigit {
        /// The unit missing a place.
        unit: Unit,
        /// The digit that cannot be placed.
        digit: Digit,
    },
}

/// Why propagation stopped before reaching a fixed point.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum PropagationError {
    /// The map admits no solution.
    #[display("{_0}")]
    Contradiction(#[from] Contradiction),
    /// The attached halt flag was raised.
    #[display("propagation halted")]
    Halted,
}

/// Applies eliminate/assign propagation to candidate maps.
///
/// A propagator borrows the [`Topology`] and, optionally, a halt flag. When
/// the flag is raised every pending elimination stops with
/// [`PropagationError::Halted`], which lets a search branch unwind promptly
/// after a sibling has found a solution.
#[derive(Debug, Clone, Copy)]
pub struct Propagator<'a> {
    topology: &'a Topology,
    halt: Option<&'a AtomicBool>,
}

impl<'a> Propagator<'a> {
    /// Creates a propagator without a halt flag.
    #[must_use]
    pub fn new(topology: &'a Topology) -> Self {
        Self {
            topology,
            halt: None,
        }
    }

    /// Attaches a halt flag, checked before every candidate removal.
    #[must_use]
    pub fn with_halt(self, halt: &'a AtomicBool) -> Self {
        Self {
            halt: Some(halt),
            ..self
        }
    }

    /// Returns the topology used for unit and peer lookups.
    #[must_use]
    pub fn topology(&self) -> &'a Topology {
        self.topology
    }

    /// Fixes `square` to `digit` by eliminating all of its other candidates.
    ///
    /// Candidates are eliminated in ascending order. If `digit` is not a
    /// candidate of `square`, the square ends up empty and a contradiction is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`eliminate`](Self::eliminate).
    pub fn assign(
        &self,
        map: &mut CandidateMap,
        square: Square,
        digit: Digit,
    ) -> Result<(), PropagationError> {
        let others = map
            .candidates(square)
            .difference(DigitSet::single_digit(digit));
        for other in others {
            self.eliminate(map, square, other)?;
        }
        Ok(())
    }

    /// Removes `digit` from the candidates of `square` and propagates.
    ///
    /// Does nothing if `digit` is already gone. Otherwise:
    ///
    /// - an emptied square is a contradiction;
    /// - a square reduced to one digit removes that digit from its peers;
    /// - a unit of `square` with no place left for `digit` is a
    ///   contradiction, and a unit with exactly one place gets `digit`
    ///   assigned there.
    ///
    /// # Errors
    ///
    /// Returns [`PropagationError::Contradiction`] if the map has no solution
    /// and [`PropagationError::Halted`] if the halt flag was raised.
    pub fn eliminate(
        &self,
        map: &mut CandidateMap,
        square: Square,
        digit: Digit,
    ) -> Result<(), PropagationError> {
        if !map.candidates(square).contains(digit) {
            return Ok(());
        }
        if self.is_halted() {
            return Err(PropagationError::Halted);
        }

        map.remove_candidate(square, digit);
        let remaining = map.candidates(square);
        if remaining.is_empty() {
            return Err(Contradiction::EmptySquare { square }.into());
        }
        if let Some(last) = remaining.single() {
            for &peer in self.topology.peers(square) {
                self.eliminate(map, peer, last)?;
            }
        }

        for &unit in self.topology.units(square) {
            let (first, second) = {
                let mut places = self
                    .topology
                    .unit_squares(unit)
                    .iter()
                    .copied()
                    .filter(|&place| map.candidates(place).contains(digit));
                (places.next(), places.next())
            };
            match (first, second) {
                (None, _) => return Err(Contradiction::NoPlaceForDigit { unit, digit }.into()),
                (Some(only), None) => self.assign(map, only, digit)?,
                (Some(_), Some(_)) => {}
            }
        }

        Ok(())
    }

    fn is_halted(&self) -> bool {
        self.halt.is_some_and(|halt| halt.load(Ordering::Relaxed))
    }
}

//! Puzzle strings and their structural validation.
//!
//! A puzzle is written as 81 characters in square enumeration order. `1`-`9`
//! are clues, `0` and `.` are blanks, and any other character also counts as
//! a blank.
//!
//! # Examples
//!
//! ```
//! use sudoku_core::{ParseError, Puzzle, ValidationPolicy};
//!
//! let puzzle = Puzzle::parse(
//!     "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......",
//!     ValidationPolicy::Strict,
//! )?;
//! assert_eq!(puzzle.clue_count(), 17);
//!
//! let err = Puzzle::parse("", ValidationPolicy::Strict).unwrap_err();
//! assert_eq!(err, ParseError::InvalidSize { expected: 81, found: 0 });
//! # Ok::<(), ParseError>(())
//! ```

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Digit, DigitSet, Square};

/// How strictly clue counts are checked before solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum ValidationPolicy {
    /// Require at least [`Puzzle::MIN_CLUES`] clues drawn from at least
    /// [`Puzzle::MIN_DISTINCT_DIGITS`] distinct digits. Puzzles below either
    /// bound cannot have a unique solution.
    #[default]
    Strict,
    /// Only check the length; any clue layout is handed to the solver.
    Lenient,
}

/// Reasons a puzzle string is rejected before any solving work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    /// The string does not have one character per square.
    #[display("invalid grid size: expected {expected} squares, found {found}")]
    InvalidSize {
        /// Always [`Puzzle::SIZE`].
        expected: usize,
        /// Number of characters in the input.
        found: usize,
    },
    /// Fewer than [`Puzzle::MIN_CLUES`] clues.
    #[display("not enough clues: expected at least 17, found {found}")]
    InsufficientClues {
        /// Number of clue characters in the input.
        found: usize,
    },
    /// Clues use fewer than [`Puzzle::MIN_DISTINCT_DIGITS`] distinct digits.
    #[display("not enough distinct clue digits: expected at least 8, found {found}")]
    InsufficientDigitVariety {
        /// Number of distinct clue digits in the input.
        found: usize,
    },
}

/// The clue layout of a puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    clues: [Option<Digit>; 81],
}

impl Puzzle {
    /// Number of characters in a puzzle string.
    pub const SIZE: usize = 81;
    /// Fewest clues a puzzle with a unique solution can have.
    pub const MIN_CLUES: usize = 17;
    /// Fewest distinct clue digits a puzzle with a unique solution can have.
    pub const MIN_DISTINCT_DIGITS: usize = 8;

    /// Parses and validates a puzzle string.
    ///
    /// Checks run in order and the first failure is returned: length, then
    /// (under [`ValidationPolicy::Strict`]) clue count, then digit variety.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidSize`] if `input` is not 81 characters
    /// long, and [`ParseError::InsufficientClues`] or
    /// [`ParseError::InsufficientDigitVariety`] if a strict policy rejects the
    /// clue layout.
    pub fn parse(input: &str, policy: ValidationPolicy) -> Result<Self, ParseError> {
        let found = input.chars().count();
        if found != Self::SIZE {
            return Err(ParseError::InvalidSize {
                expected: Self::SIZE,
                found,
            });
        }

        let mut clues = [None; 81];
        for (slot, ch) in clues.iter_mut().zip(input.chars()) {
            *slot = Digit::from_char(ch);
        }
        let puzzle = Self { clues };

        if policy.is_strict() {
            let found = puzzle.clue_count();
            if found < Self::MIN_CLUES {
                return Err(ParseError::InsufficientClues { found });
            }
            let found = puzzle.distinct_digits().len();
            if found < Self::MIN_DISTINCT_DIGITS {
                return Err(ParseError::InsufficientDigitVariety { found });
            }
        }

        Ok(puzzle)
    }

    /// Returns the clue at `square`, or `None` if it is blank.
    #[must_use]
    pub fn clue(&self, square: Square) -> Option<Digit> {
        self.clues[square.index()]
    }

    /// Returns every clue with its square, in enumeration order.
    pub fn clues(&self) -> impl Iterator<Item = (Square, Digit)> + '_ {
        Square::ALL
            .into_iter()
            .zip(self.clues.iter())
            .filter_map(|(square, clue)| clue.map(|digit| (square, digit)))
    }

    /// Returns the number of clues.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.clues.iter().flatten().count()
    }

    /// Returns the set of digits used by the clues.
    #[must_use]
    pub fn distinct_digits(&self) -> DigitSet {
        self.clues.iter().flatten().copied().collect()
    }
}

/// Parses with [`ValidationPolicy::Strict`].
impl FromStr for Puzzle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, ValidationPolicy::Strict)
    }
}

/// Formats the puzzle as 81 characters with `.` for blanks.
impl Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clue in &self.clues {
            match clue {
                Some(digit) => write!(f, "{digit}")?,
                None => f.write_str(".")?,
            }
        }
        Ok(())
    }
}

use sudoku_core::ParseError;

/// Reasons a solve call produced no solution.
///
/// The variants fall into three groups, see [`is_structural`],
/// [`is_semantic`] and [`is_resource`]. Only resource failures are worth
/// retrying with the same puzzle.
///
/// [`is_structural`]: SolveError::is_structural
/// [`is_semantic`]: SolveError::is_semantic
/// [`is_resource`]: SolveError::is_resource
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SolveError {
    /// The puzzle string does not have one character per square.
    #[display("invalid grid size: expected {expected} squares, found {found}")]
    InvalidSize {
        /// Required number of characters.
        expected: usize,
        /// Number of characters supplied.
        found: usize,
    },
    /// The puzzle has too few clues to have a unique solution.
    #[display("not enough clues: expected at least 17, found {found}")]
    InsufficientClues {
        /// Number of clues supplied.
        found: usize,
    },
    /// The clues use too few distinct digits to have a unique solution.
    #[display("not enough distinct clue digits: expected at least 8, found {found}")]
    InsufficientDigitVariety {
        /// Number of distinct clue digits supplied.
        found: usize,
    },
    /// The clues contradict each other, or the search space holds no solution.
    #[display("the sudoku contains errors and cannot be solved")]
    Unsolvable,
    /// The configured deadline passed before a solution was found.
    #[display("no solution found before the deadline")]
    Timeout,
    /// The caller cancelled the solve.
    #[display("solving was cancelled")]
    Cancelled,
}

impl SolveError {
    /// Returns `true` for malformed input, detected before any solving work.
    #[must_use]
    pub fn is_structural(self) -> bool {
        self.is_invalid_size()
    }

    /// Returns `true` for well-formed puzzles that cannot be solved.
    #[must_use]
    pub fn is_semantic(self) -> bool {
        matches!(
            self,
            Self::InsufficientClues { .. } | Self::InsufficientDigitVariety { .. } | Self::Unsolvable
        )
    }

    /// Returns `true` if the solve ran out of time or was cancelled.
    #[must_use]
    pub fn is_resource(self) -> bool {
        matches!(self, Self::Timeout | Self::Cancelled)
    }
}

impl From<ParseError> for SolveError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::InvalidSize { expected, found } => Self::InvalidSize { expected, found },
            ParseError::InsufficientClues { found } => Self::InsufficientClues { found },
            ParseError::InsufficientDigitVariety { found } => {
                Self::InsufficientDigitVariety { found }
            }
        }
    }
}

/// Errors returned when constructing a [`Solver`](crate::Solver).
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum BuildError {
    /// The dedicated search thread pool could not be started.
    #[display("failed to build search thread pool: {_0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// A configuration value is out of range.
    #[display("invalid solver configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: &'static str,
    },
}

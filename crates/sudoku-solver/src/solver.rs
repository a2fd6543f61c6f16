use std::{
    fmt::{self, Display},
    sync::OnceLock,
    time::Instant,
};

use rayon::{ThreadPool, ThreadPoolBuilder};
use sudoku_core::{
    CandidateMap, Digit, DigitSet, Puzzle, Square, Topology, ValidationPolicy, render,
};

use crate::{
    BuildError, CancellationToken, Propagator, SearchEngine, SearchOutcome, SearchStats,
    SolveError, SolverConfig,
};

static DEFAULT_SOLVER: OnceLock<Solver> = OnceLock::new();

/// Folds the clues of `puzzle` into a fresh candidate map.
///
/// Starts from a map where every square admits every digit and assigns each
/// clue in square order.
///
/// # Errors
///
/// Returns [`SolveError::Unsolvable`] if the clues contradict each other.
pub fn parse_grid(puzzle: &Puzzle, topology: &Topology) -> Result<CandidateMap, SolveError> {
    let propagator = Propagator::new(topology);
    let mut map = CandidateMap::full();
    for (square, digit) in puzzle.clues() {
        if let Err(err) = propagator.assign(&mut map, square, digit) {
            log::debug!("clue {digit} at {square} is inconsistent: {err}");
            return Err(SolveError::Unsolvable);
        }
    }
    Ok(map)
}

/// Parses, validates and folds a puzzle string into a candidate map.
///
/// # Errors
///
/// Returns the validation errors of [`Puzzle::parse`] converted to
/// [`SolveError`], or [`SolveError::Unsolvable`] if the clues contradict each
/// other.
///
/// # Examples
///
/// ```
/// use sudoku_core::{Topology, ValidationPolicy};
/// use sudoku_solver::{SolveError, parse};
///
/// let topology = Topology::new();
/// let map = parse(
///     "003020600900305001001806400008102900700000008006708200002609500800203009005010300",
///     &topology,
///     ValidationPolicy::Strict,
/// )?;
/// assert!(map.is_solved());
///
/// assert_eq!(
///     parse("123", &topology, ValidationPolicy::Strict),
///     Err(SolveError::InvalidSize { expected: 81, found: 3 }),
/// );
/// # Ok::<(), SolveError>(())
/// ```
pub fn parse(
    puzzle: &str,
    topology: &Topology,
    policy: ValidationPolicy,
) -> Result<CandidateMap, SolveError> {
    let puzzle = Puzzle::parse(puzzle, policy)?;
    parse_grid(&puzzle, topology)
}

/// Solves `puzzle` with the default solver and returns the 81-digit solution.
///
/// The default solver is built on first use and runs on rayon's global
/// thread pool. For puzzles with several solutions the returned one may vary
/// between calls.
///
/// # Errors
///
/// See [`Solver::solve`].
///
/// # Examples
///
/// ```
/// let solution = sudoku_solver::solve(
///     "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......",
/// )?;
/// assert_eq!(
///     solution,
///     "417369825632158947958724316825437169791586432346912758289643571573291684164875293",
/// );
/// # Ok::<(), sudoku_solver::SolveError>(())
/// ```
pub fn solve(puzzle: &str) -> Result<String, SolveError> {
    DEFAULT_SOLVER
        .get_or_init(Solver::default)
        .solve(puzzle)
        .map(|solution| solution.to_string())
}

/// Returns `true` if `grid` is 81 digits forming a complete valid sudoku.
///
/// # Examples
///
/// ```
/// use sudoku_solver::is_valid_solution;
///
/// assert!(is_valid_solution(
///     "483921657967345821251876493548132976729564138136798245372689514814253769695417382",
/// ));
/// assert!(!is_valid_solution(
///     "383921657967345821251876493548132976729564138136798245372689514814253769695417382",
/// ));
/// assert!(!is_valid_solution("12345"));
/// ```
#[must_use]
pub fn is_valid_solution(grid: &str) -> bool {
    let mut digits = [Digit::D1; 81];
    if grid.chars().count() != Square::COUNT {
        return false;
    }
    for (slot, ch) in digits.iter_mut().zip(grid.chars()) {
        let Some(digit) = Digit::from_char(ch) else {
            return false;
        };
        *slot = digit;
    }
    Solution { digits }.verify(Topology::shared())
}

/// A completed grid returned by a [`Solver`].
///
/// Displays as 81 digits in square order; use
/// [`to_grid_string`](Self::to_grid_string) for a 9×9 layout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(into = "String")
)]
pub struct Solution {
    digits: [Digit; 81],
}

impl Solution {
    fn from_map(map: &CandidateMap) -> Option<Self> {
        let mut digits = [Digit::D1; 81];
        for (slot, (_, candidates)) in digits.iter_mut().zip(map.iter()) {
            *slot = candidates.single()?;
        }
        Some(Self { digits })
    }

    /// Returns the digit at `square`.
    #[must_use]
    pub fn digit(&self, square: Square) -> Digit {
        self.digits[square.index()]
    }

    /// Returns all 81 digits in square order.
    #[must_use]
    pub fn digits(&self) -> &[Digit; 81] {
        &self.digits
    }

    /// Returns the solution as a candidate map with one candidate per square.
    #[must_use]
    pub fn to_map(&self) -> CandidateMap {
        CandidateMap::from(self.digits.map(DigitSet::single_digit))
    }

    /// Renders the solution as a 9×9 grid with box separators.
    #[must_use]
    pub fn to_grid_string(&self) -> String {
        render::render_grid(&self.to_map())
    }

    /// Returns `true` if every unit holds each digit exactly once.
    #[must_use]
    pub fn verify(&self, topology: &Topology) -> bool {
        topology.all_units().all(|(_, squares)| {
            let seen: DigitSet = squares.iter().map(|&square| self.digit(square)).collect();
            seen == DigitSet::FULL
        })
    }

    /// Returns `true` if every clue of `puzzle` appears in this solution.
    #[must_use]
    pub fn respects(&self, puzzle: &Puzzle) -> bool {
        puzzle
            .clues()
            .all(|(square, digit)| self.digit(square) == digit)
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.digits {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl From<Solution> for String {
    fn from(solution: Solution) -> Self {
        solution.to_string()
    }
}

/// A configured sudoku solver.
///
/// A solver owns its thread pool (if [`SolverConfig::threads`] asks for a
/// dedicated one) and can be shared between threads; each solve call uses
/// independent state.
///
/// # Examples
///
/// ```
/// use sudoku_solver::{Solver, SolverConfig};
///
/// let solver = Solver::new(SolverConfig::sequential())?;
/// let solution = solver.solve(
///     "52...6.........7.13...........4..8..6......5...........418.........3..2...87.....",
/// )?;
/// assert_eq!(
///     solution.to_string(),
///     "527316489896542731314987562172453896689271354453698217941825673765134928238769145",
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    pool: Option<ThreadPool>,
    topology: &'static Topology,
}

impl Default for Solver {
    /// Creates a solver with [`SolverConfig::default`] on rayon's global pool.
    fn default() -> Self {
        Self {
            config: SolverConfig::default(),
            pool: None,
            topology: Topology::shared(),
        }
    }
}

impl Solver {
    /// Creates a solver, starting a dedicated thread pool if requested.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidConfig`] if `threads` or `max_in_flight`
    /// is zero, and [`BuildError::ThreadPool`] if the pool cannot be started.
    pub fn new(config: SolverConfig) -> Result<Self, BuildError> {
        if config.threads == Some(0) {
            return Err(BuildError::InvalidConfig {
                reason: "threads must be at least 1",
            });
        }
        if config.max_in_flight == 0 {
            return Err(BuildError::InvalidConfig {
                reason: "max_in_flight must be at least 1",
            });
        }

        let pool = match config.threads {
            Some(threads) if threads > 1 => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("sudoku-search-{i}"))
                    .build()?,
            ),
            _ => None,
        };

        Ok(Self {
            config,
            pool,
            topology: Topology::shared(),
        })
    }

    /// Returns the configuration this solver was built with.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `puzzle`.
    ///
    /// # Errors
    ///
    /// - [`SolveError::InvalidSize`] if `puzzle` is not 81 characters long.
    /// - [`SolveError::InsufficientClues`] or
    ///   [`SolveError::InsufficientDigitVariety`] if strict validation rejects
    ///   the clues.
    /// - [`SolveError::Unsolvable`] if the puzzle has no solution.
    /// - [`SolveError::Timeout`] if the configured deadline passes first.
    pub fn solve(&self, puzzle: &str) -> Result<Solution, SolveError> {
        self.solve_with_stats(puzzle, None)
            .map(|(solution, _)| solution)
    }

    /// Solves `puzzle`, stopping early once `token` is cancelled.
    ///
    /// # Errors
    ///
    /// As [`solve`](Self::solve), plus [`SolveError::Cancelled`].
    pub fn solve_with_cancellation(
        &self,
        puzzle: &str,
        token: &CancellationToken,
    ) -> Result<Solution, SolveError> {
        self.solve_with_stats(puzzle, Some(token))
            .map(|(solution, _)| solution)
    }

    /// Solves `puzzle` and returns search statistics alongside the solution.
    ///
    /// # Errors
    ///
    /// As [`solve_with_cancellation`](Self::solve_with_cancellation).
    pub fn solve_with_stats(
        &self,
        puzzle: &str,
        token: Option<&CancellationToken>,
    ) -> Result<(Solution, SearchStats), SolveError> {
        let started = Instant::now();
        let parsed = Puzzle::parse(puzzle, self.config.validation)?;
        log::debug!(
            "solving puzzle with {} clues (parallel depth {}, max in flight {})",
            parsed.clue_count(),
            self.config.effective_parallel_depth(),
            self.config.max_in_flight
        );
        let map = parse_grid(&parsed, self.topology)?;

        let mut engine = SearchEngine::new(
            self.topology,
            self.config.max_in_flight,
            self.config.effective_parallel_depth(),
        );
        if let Some(deadline) = self
            .config
            .timeout
            .and_then(|timeout| started.checked_add(timeout))
        {
            engine = engine.with_deadline(deadline);
        }
        if let Some(token) = token {
            engine = engine.with_cancellation(token.clone());
        }

        let outcome = match &self.pool {
            Some(pool) => pool.install(|| engine.run(map)),
            None => engine.run(map),
        };
        let stats = engine.stats();
        log::debug!(
            "search finished in {:.4} secs: {} nodes, {} dead ends, peak {} in flight",
            started.elapsed().as_secs_f64(),
            stats.nodes(),
            stats.dead_ends(),
            stats.peak_in_flight()
        );

        match outcome {
            SearchOutcome::Solved(map) => Solution::from_map(&map)
                .map(|solution| (solution, stats))
                .ok_or(SolveError::Unsolvable),
            SearchOutcome::Exhausted => Err(SolveError::Unsolvable),
            SearchOutcome::TimedOut => Err(SolveError::Timeout),
            SearchOutcome::Cancelled => Err(SolveError::Cancelled),
        }
    }
}

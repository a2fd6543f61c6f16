use std::time::Duration;

use sudoku_core::ValidationPolicy;

/// Tuning knobs for a [`Solver`](crate::Solver).
///
/// The defaults run the search on rayon's global thread pool with at most
/// [`DEFAULT_MAX_IN_FLIGHT`](Self::DEFAULT_MAX_IN_FLIGHT) branches in flight,
/// fanning out only in the top
/// [`DEFAULT_PARALLEL_DEPTH`](Self::DEFAULT_PARALLEL_DEPTH) levels of the
/// search tree, with no deadline and strict clue validation.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use sudoku_solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_threads(4)
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.threads, Some(4));
/// assert_eq!(config.max_in_flight, SolverConfig::DEFAULT_MAX_IN_FLIGHT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Size of a dedicated search thread pool.
    ///
    /// `None` uses rayon's global pool. `Some(1)` disables parallel fan-out
    /// altogether.
    pub threads: Option<usize>,
    /// Maximum number of branches allowed in flight across all parallel
    /// fan-outs of one solve.
    pub max_in_flight: usize,
    /// Search depth below which nodes may fan out in parallel.
    ///
    /// `0` makes the search sequential.
    pub parallel_depth: usize,
    /// Per-call deadline, measured from the start of the solve.
    ///
    /// The deadline is checked as each search node starts, so a solve may
    /// overrun it by the time one node's propagation takes.
    pub timeout: Option<Duration>,
    /// Clue validation applied before solving.
    pub validation: ValidationPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            threads: None,
            max_in_flight: Self::DEFAULT_MAX_IN_FLIGHT,
            parallel_depth: Self::DEFAULT_PARALLEL_DEPTH,
            timeout: None,
            validation: ValidationPolicy::Strict,
        }
    }
}

impl SolverConfig {
    /// Default for [`max_in_flight`](Self::max_in_flight).
    pub const DEFAULT_MAX_IN_FLIGHT: usize = 64;
    /// Default for [`parallel_depth`](Self::parallel_depth).
    pub const DEFAULT_PARALLEL_DEPTH: usize = 4;

    /// Returns a deterministic single-threaded profile.
    ///
    /// Branches are tried in ascending digit order, so repeated solves of the
    /// same puzzle return the same solution.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            threads: Some(1),
            parallel_depth: 0,
            ..Self::default()
        }
    }

    /// Sets [`threads`](Self::threads).
    #[must_use]
    pub fn with_threads(self, threads: usize) -> Self {
        Self {
            threads: Some(threads),
            ..self
        }
    }

    /// Sets [`max_in_flight`](Self::max_in_flight).
    #[must_use]
    pub fn with_max_in_flight(self, max_in_flight: usize) -> Self {
        Self {
            max_in_flight,
            ..self
        }
    }

    /// Sets [`parallel_depth`](Self::parallel_depth).
    #[must_use]
    pub fn with_parallel_depth(self, parallel_depth: usize) -> Self {
        Self {
            parallel_depth,
            ..self
        }
    }

    /// Sets [`timeout`](Self::timeout).
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Sets [`validation`](Self::validation).
    #[must_use]
    pub fn with_validation(self, validation: ValidationPolicy) -> Self {
        Self { validation, ..self }
    }

    /// Returns `true` if branches are always explored one at a time.
    #[must_use]
    pub fn is_sequential(&self) -> bool {
        self.threads == Some(1) || self.parallel_depth == 0
    }

    /// Parallel depth actually used by the search.
    pub(crate) fn effective_parallel_depth(&self) -> usize {
        if self.is_sequential() {
            0
        } else {
            self.parallel_depth
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SolverConfig::default();
        assert_eq!(config.threads, None);
        assert_eq!(config.max_in_flight, 64);
        assert_eq!(config.parallel_depth, 4);
        assert_eq!(config.timeout, None);
        assert!(config.validation.is_strict());
        assert!(!config.is_sequential());
    }

    #[test]
    fn test_sequential_profile() {
        let config = SolverConfig::sequential();
        assert!(config.is_sequential());
        assert_eq!(config.effective_parallel_depth(), 0);

        let single_thread = SolverConfig::default().with_threads(1);
        assert!(single_thread.is_sequential());
        assert_eq!(single_thread.effective_parallel_depth(), 0);
        assert_eq!(
            SolverConfig::default()
                .with_threads(8)
                .effective_parallel_depth(),
            4
        );
    }

    #[test]
    fn test_builders() {
        let config = SolverConfig::default()
            .with_max_in_flight(2)
            .with_parallel_depth(7)
            .with_validation(ValidationPolicy::Lenient)
            .with_timeout(Duration::from_millis(5));
        assert_eq!(config.max_in_flight, 2);
        assert_eq!(config.parallel_depth, 7);
        assert!(config.validation.is_lenient());
        assert_eq!(config.timeout, Some(Duration::from_millis(5)));
    }
}

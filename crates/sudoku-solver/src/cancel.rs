use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A handle for cancelling an in-progress solve from another thread.
///
/// Clones share the same flag. Once cancelled, a token stays cancelled; use a
/// fresh token for the next solve.
///
/// # Examples
///
/// ```
/// use sudoku_solver::{CancellationToken, SolveError, Solver};
///
/// let token = CancellationToken::new();
/// token.cancel();
///
/// let solver = Solver::default();
/// let result = solver.solve_with_cancellation(
///     "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......",
///     &token,
/// );
/// assert_eq!(result, Err(SolveError::Cancelled));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every solve observing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

//! Depth-first search over candidate maps.
//!
//! When propagation alone does not solve a puzzle, [`SearchEngine`] picks the
//! unsolved square with the fewest candidates, tries each of its digits on an
//! independent copy of the map, and recurses. The first branch to reach a
//! solved map wins.
//!
//! # Parallelism
//!
//! Nodes in the top `parallel_depth` levels may explore their branches in
//! parallel on the current rayon pool. A node only does so if it can reserve
//! one in-flight slot per branch from a shared budget; otherwise it falls
//! back to trying its branches one after another. Parallel fan-out reports
//! whichever solution completes first, so the solution returned for a puzzle
//! with several solutions may differ between runs. With `parallel_depth == 0`
//! the search is deterministic.
//!
//! # Stopping
//!
//! A shared halt flag is raised when a solution is found, when the deadline
//! passes, or when the cancellation token fires. The flag is polled at every
//! node, before every sequential sibling, and on every propagation step, so
//! all branches unwind promptly. [`SearchEngine::run`] returns only after
//! every branch has returned.

use std::{
    sync::{
        OnceLock,
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

use rayon::prelude::*;
use sudoku_core::{CandidateMap, Digit, Square, Topology};

use crate::{CancellationToken, PropagationError, Propagator};

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    nodes: u64,
    dead_ends: u64,
    parallel_fanouts: u64,
    sequential_fallbacks: u64,
    peak_in_flight: usize,
    elapsed: Duration,
}

impl SearchStats {
    /// Returns the number of search nodes visited, including the root.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Returns the number of branch assignments that led to a contradiction.
    #[must_use]
    pub fn dead_ends(&self) -> u64 {
        self.dead_ends
    }

    /// Returns the number of nodes that explored their branches in parallel.
    #[must_use]
    pub fn parallel_fanouts(&self) -> u64 {
        self.parallel_fanouts
    }

    /// Returns the number of nodes that were allowed to fan out by depth but
    /// ran sequentially because the in-flight budget was exhausted.
    #[must_use]
    pub fn sequential_fallbacks(&self) -> u64 {
        self.sequential_fallbacks
    }

    /// Returns the highest number of branches in flight at once.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight
    }

    /// Returns the wall-clock time spent searching.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// How a search run ended.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SearchOutcome {
    /// A solved map was found.
    Solved(CandidateMap),
    /// Every branch ended in a contradiction.
    Exhausted,
    /// The deadline passed first.
    TimedOut,
    /// The cancellation token fired first.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Found,
    TimedOut,
    Cancelled,
}

#[derive(Debug, Default)]
struct Counters {
    nodes: AtomicU64,
    dead_ends: AtomicU64,
    parallel_fanouts: AtomicU64,
    sequential_fallbacks: AtomicU64,
    peak_in_flight: AtomicUsize,
}

/// A backtracking search over one candidate map.
///
/// An engine is single-use: create one per solve. It is [`Sync`], and
/// parallel branches share it by reference.
///
/// # Examples
///
/// ```
/// use sudoku_core::{CandidateMap, Topology};
/// use sudoku_solver::{SearchEngine, SearchOutcome};
///
/// let topology = Topology::new();
/// let engine = SearchEngine::new(&topology, 8, 2);
///
/// let outcome = engine.run(CandidateMap::full());
/// let SearchOutcome::Solved(map) = outcome else {
///     panic!("an empty board has solutions");
/// };
/// assert!(map.is_solved());
/// assert!(engine.stats().peak_in_flight() <= 8);
/// ```
#[derive(Debug)]
pub struct SearchEngine<'a> {
    topology: &'a Topology,
    max_in_flight: usize,
    parallel_depth: usize,
    deadline: Option<Instant>,
    cancellation: Option<CancellationToken>,
    halt: AtomicBool,
    stop: OnceLock<StopReason>,
    in_flight: AtomicUsize,
    counters: Counters,
    elapsed: OnceLock<Duration>,
}

impl<'a> SearchEngine<'a> {
    /// Creates an engine with the given in-flight budget and parallel depth.
    #[must_use]
    pub fn new(topology: &'a Topology, max_in_flight: usize, parallel_depth: usize) -> Self {
        Self {
            topology,
            max_in_flight,
            parallel_depth,
            deadline: None,
            cancellation: None,
            halt: AtomicBool::new(false),
            stop: OnceLock::new(),
            in_flight: AtomicUsize::new(0),
            counters: Counters::default(),
            elapsed: OnceLock::new(),
        }
    }

    /// Creates a deterministic engine that never fans out.
    #[must_use]
    pub fn sequential(topology: &'a Topology) -> Self {
        Self::new(topology, 1, 0)
    }

    /// Stops the search once `deadline` has passed.
    #[must_use]
    pub fn with_deadline(self, deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    /// Stops the search once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(self, token: CancellationToken) -> Self {
        Self {
            cancellation: Some(token),
            ..self
        }
    }

    /// Searches for a solution of `map`.
    ///
    /// `map` must be the result of propagation (for example
    /// [`parse_grid`](crate::parse_grid)); hand-built maps with empty squares
    /// are treated as dead ends.
    ///
    /// Parallel branches run on the rayon pool the caller is executing in.
    pub fn run(&self, map: CandidateMap) -> SearchOutcome {
        let started = Instant::now();
        let result = self.search_node(map, 0);
        let _ = self.elapsed.set(started.elapsed());

        match (result, self.stop.get()) {
            (Some(map), _) => SearchOutcome::Solved(map),
            (None, Some(StopReason::TimedOut)) => SearchOutcome::TimedOut,
            (None, Some(StopReason::Cancelled)) => SearchOutcome::Cancelled,
            (None, Some(StopReason::Found) | None) => SearchOutcome::Exhausted,
        }
    }

    /// Returns a snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            nodes: self.counters.nodes.load(Ordering::Relaxed),
            dead_ends: self.counters.dead_ends.load(Ordering::Relaxed),
            parallel_fanouts: self.counters.parallel_fanouts.load(Ordering::Relaxed),
            sequential_fallbacks: self.counters.sequential_fallbacks.load(Ordering::Relaxed),
            peak_in_flight: self.counters.peak_in_flight.load(Ordering::Relaxed),
            elapsed: self.elapsed.get().copied().unwrap_or_default(),
        }
    }

    /// Returns the number of branches currently holding an in-flight slot.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    fn search_node(&self, map: CandidateMap, depth: usize) -> Option<CandidateMap> {
        self.counters.nodes.fetch_add(1, Ordering::Relaxed);

        if map.is_solved() {
            self.stop_with(StopReason::Found);
            return Some(map);
        }
        if self.should_stop() {
            return None;
        }

        let square = select_square(&map)?;
        let digits = map.candidates(square);

        if depth < self.parallel_depth {
            if let Some(_permit) = self.try_reserve(digits.len()) {
                self.counters.parallel_fanouts.fetch_add(1, Ordering::Relaxed);
                log::trace!(
                    "fanning out {} branches at {square} (depth {depth}, {} in flight)",
                    digits.len(),
                    self.in_flight()
                );
                return digits
                    .iter()
                    .collect::<Vec<_>>()
                    .into_par_iter()
                    .find_map_any(|digit| self.branch(&map, square, digit, depth + 1));
            }
            self.counters
                .sequential_fallbacks
                .fetch_add(1, Ordering::Relaxed);
            log::trace!("in-flight budget exhausted at {square} (depth {depth})");
        }

        for digit in digits {
            if self.halt.load(Ordering::Relaxed) {
                return None;
            }
            if let Some(solution) = self.branch(&map, square, digit, depth + 1) {
                return Some(solution);
            }
        }
        None
    }

    fn branch(
        &self,
        map: &CandidateMap,
        square: Square,
        digit: Digit,
        depth: usize,
    ) -> Option<CandidateMap> {
        let mut child = map.clone();
        let propagator = Propagator::new(self.topology).with_halt(&self.halt);
        match propagator.assign(&mut child, square, digit) {
            Ok(()) => self.search_node(child, depth),
            Err(PropagationError::Contradiction(_)) => {
                self.counters.dead_ends.fetch_add(1, Ordering::Relaxed);
                None
            }
            Err(PropagationError::Halted) => None,
        }
    }

    fn should_stop(&self) -> bool {
        if self.halt.load(Ordering::Relaxed) {
            return true;
        }
        if self
            .cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
        {
            if self.stop_with(StopReason::Cancelled) {
                log::debug!("search cancelled");
            }
            return true;
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            if self.stop_with(StopReason::TimedOut) {
                log::warn!(
                    "search deadline expired after {} nodes",
                    self.counters.nodes.load(Ordering::Relaxed)
                );
            }
            return true;
        }
        false
    }

    /// Records why the search stopped and raises the halt flag.
    ///
    /// Returns `true` if this call decided the reason.
    fn stop_with(&self, reason: StopReason) -> bool {
        let first = self.stop.set(reason).is_ok();
        self.halt.store(true, Ordering::Relaxed);
        first
    }

    fn try_reserve(&self, count: usize) -> Option<BranchPermit<'_>> {
        let mut current = self.in_flight.load(Ordering::Acquire);
        loop {
            let next = current
                .checked_add(count)
                .filter(|&next| next <= self.max_in_flight)?;
            match self.in_flight.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    self.counters
                        .peak_in_flight
                        .fetch_max(next, Ordering::Relaxed);
                    return Some(BranchPermit {
                        in_flight: &self.in_flight,
                        count,
                    });
                }
                Err(actual) => current = actual,
            }
        }
    }
}

/// In-flight slots held by one parallel fan-out, returned on drop.
#[derive(Debug)]
struct BranchPermit<'a> {
    in_flight: &'a AtomicUsize,
    count: usize,
}

impl Drop for BranchPermit<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(self.count, Ordering::AcqRel);
    }
}

/// Returns the unsolved square with the fewest candidates.
///
/// Ties go to the square that comes first in enumeration order. Returns
/// `None` if no square has more than one candidate.
#[must_use]
pub fn select_square(map: &CandidateMap) -> Option<Square> {
    map.iter()
        .filter(|(_, candidates)| candidates.len() > 1)
        .min_by_key(|(_, candidates)| candidates.len())
        .map(|(square, _)| square)
}

/// Searches `map` sequentially and returns the first solution found.
///
/// Returns `None` if every branch ends in a contradiction.
///
/// # Examples
///
/// ```
/// use sudoku_core::{Topology, ValidationPolicy};
/// use sudoku_solver::{parse, search};
///
/// let topology = Topology::new();
/// let map = parse(
///     "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......",
///     &topology,
///     ValidationPolicy::Strict,
/// )?;
/// let solution = search(&topology, map).unwrap();
/// assert_eq!(
///     sudoku_core::render::render(&solution),
///     "417369825632158947958724316825437169791586432346912758289643571573291684164875293",
/// );
/// # Ok::<(), sudoku_solver::SolveError>(())
/// ```
#[must_use]
pub fn search(topology: &Topology, map: CandidateMap) -> Option<CandidateMap> {
    match SearchEngine::sequential(topology).run(map) {
        SearchOutcome::Solved(map) => Some(map),
        SearchOutcome::Exhausted | SearchOutcome::TimedOut | SearchOutcome::Cancelled => None,
    }
}

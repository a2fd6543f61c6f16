//! Command-line sudoku solver.
//!
//! Solves puzzles given as arguments or read from files, one puzzle per line.
//!
//! # Usage
//!
//! ```sh
//! sudoku "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......"
//! ```
//!
//! Solve every puzzle in a file and print timing statistics:
//!
//! ```sh
//! sudoku --file top95.txt --stats
//! ```
//!
//! Print the solutions as 9×9 grids using a dedicated pool of four threads:
//!
//! ```sh
//! sudoku --grid --threads 4 --file easy50.txt
//! ```
//!
//! Set `RUST_LOG=debug` to see per-puzzle search logs.

use std::{
    fmt,
    fs, io,
    path::PathBuf,
    process,
    time::{Duration, Instant},
};

use clap::Parser;
use derive_more::{Display, Error};
use sudoku_core::ValidationPolicy;
use sudoku_solver::{SearchStats, Solver, SolverConfig};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzles to solve: 81 characters, `1`-`9` for clues, `0` or `.` for blanks.
    #[arg(value_name = "PUZZLE")]
    puzzles: Vec<String>,

    /// File with one puzzle per line. Repeatable.
    #[arg(short, long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Size of a dedicated search thread pool (default: rayon's global pool).
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Maximum number of search branches in flight at once.
    #[arg(long, value_name = "N", default_value_t = SolverConfig::DEFAULT_MAX_IN_FLIGHT)]
    max_in_flight: usize,

    /// Search depth below which branches are explored in parallel.
    #[arg(long, value_name = "N", default_value_t = SolverConfig::DEFAULT_PARALLEL_DEPTH)]
    parallel_depth: usize,

    /// Per-puzzle deadline in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Accept puzzles with fewer than 17 clues or 8 distinct clue digits.
    #[arg(long)]
    lenient: bool,

    /// Print solutions as 9×9 grids.
    #[arg(long)]
    grid: bool,

    /// Print search statistics for each puzzle.
    #[arg(long)]
    stats: bool,
}

impl Args {
    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            threads: self.threads,
            max_in_flight: self.max_in_flight,
            parallel_depth: self.parallel_depth,
            timeout: self.timeout_ms.map(Duration::from_millis),
            validation: if self.lenient {
                ValidationPolicy::Lenient
            } else {
                ValidationPolicy::Strict
            },
        }
    }

    fn collect_puzzles(&self) -> Result<Vec<String>, InputError> {
        let mut puzzles = self.puzzles.clone();
        for path in &self.files {
            let contents = fs::read_to_string(path).map_err(|source| InputError::ReadFile {
                path: path.clone(),
                source,
            })?;
            puzzles.extend(puzzle_lines(&contents));
        }
        if puzzles.is_empty() {
            return Err(InputError::NoPuzzles);
        }
        Ok(puzzles)
    }
}

/// Errors gathering puzzles from the command line.
#[derive(Debug, Display, Error)]
enum InputError {
    #[display("failed to read {}: {source}", path.display())]
    ReadFile { path: PathBuf, source: io::Error },
    #[display("no puzzles given, pass a PUZZLE or --file PATH")]
    NoPuzzles,
}

/// Returns the non-empty lines of `contents` with surrounding whitespace removed.
fn puzzle_lines(contents: &str) -> impl Iterator<Item = String> + '_ {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
}

/// Timing totals over a batch of puzzles.
#[derive(Debug, Default)]
struct Summary {
    solved: usize,
    total: usize,
    elapsed: Duration,
    max: Duration,
}

impl Summary {
    fn record(&mut self, solved: bool, elapsed: Duration) {
        self.total += 1;
        if solved {
            self.solved += 1;
        }
        self.elapsed += elapsed;
        self.max = self.max.max(elapsed);
    }

    fn all_solved(&self) -> bool {
        self.solved == self.total
    }
}

impl fmt::Display for Summary {
    #[expect(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.elapsed.as_secs_f64();
        let count = self.total as f64;
        let avg = if self.total == 0 {
            0.0
        } else {
            total_secs / count
        };
        let hz = if total_secs > 0.0 {
            count / total_secs
        } else {
            0.0
        };
        write!(
            f,
            "Solved {} of {} puzzles (avg {avg:.4} secs ({hz:.2} Hz), max {:.4} secs).",
            self.solved,
            self.total,
            self.max.as_secs_f64()
        )
    }
}

fn print_stats(stats: &SearchStats) {
    println!("  nodes: {}", stats.nodes());
    println!("  dead ends: {}", stats.dead_ends());
    println!("  parallel fan-outs: {}", stats.parallel_fanouts());
    println!("  sequential fallbacks: {}", stats.sequential_fallbacks());
    println!("  peak in flight: {}", stats.peak_in_flight());
    println!("  search time: {:.4} secs", stats.elapsed().as_secs_f64());
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();

    let puzzles = match args.collect_puzzles() {
        Ok(puzzles) => puzzles,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    let solver = match Solver::new(args.solver_config()) {
        Ok(solver) => solver,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    log::info!("solving {} puzzle(s)", puzzles.len());

    let mut summary = Summary::default();
    for puzzle in &puzzles {
        let started = Instant::now();
        let result = solver.solve_with_stats(puzzle, None);
        summary.record(result.is_ok(), started.elapsed());

        match result {
            Ok((solution, stats)) => {
                if args.grid {
                    println!("{}", solution.to_grid_string());
                } else {
                    println!("{solution}");
                }
                if args.stats {
                    print_stats(&stats);
                }
            }
            Err(err) => eprintln!("{puzzle}: {err}"),
        }
    }

    if puzzles.len() > 1 {
        println!("{summary}");
    }
    if !summary.all_solved() {
        process::exit(1);
    }
}

//! The fixed constraint graph of a 9×9 board.
//!
//! A [`Topology`] is built once and then only read. Components that need
//! units or peers take it by reference; nothing in this crate depends on
//! initialization order of global tables.
//!
//! # Examples
//!
//! ```
//! use sudoku_core::{Square, Topology};
//!
//! let topology = Topology::new();
//! let c2 = Square::from_label("C2").unwrap();
//!
//! assert_eq!(topology.units(c2).len(), 3);
//! assert_eq!(topology.peers(c2).len(), 20);
//! assert!(!topology.peers(c2).contains(&c2));
//! ```

use std::sync::OnceLock;

use crate::{Square, Unit};

/// Number of peers of every square.
pub const PEER_COUNT: usize = 20;

static SHARED: OnceLock<Topology> = OnceLock::new();

/// Squares, units and peers of the board.
///
/// Invariant: every square lies in exactly 3 units and has exactly
/// [`PEER_COUNT`] peers. Peers are listed in square enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    squares: [Square; 81],
    unit_squares: [[Square; 9]; 27],
    units: [[Unit; 3]; 81],
    peers: [[Square; PEER_COUNT]; 81],
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    /// Builds the topology.
    ///
    /// The squares are the cross of rows and columns, the units are the 9
    /// rows, 9 columns and 9 boxes, and each square's peers are the union of
    /// its three units without the square itself.
    #[must_use]
    pub fn new() -> Self {
        let squares = Square::ALL;

        let mut unit_squares = [[squares[0]; 9]; 27];
        for unit in Unit::ALL {
            unit_squares[unit.index()] = unit.squares();
        }

        let mut units = [[Unit::ALL[0]; 3]; 81];
        for square in squares {
            let mut found = 0;
            for unit in Unit::ALL {
                if unit_squares[unit.index()].contains(&square) {
                    units[square.index()][found] = unit;
                    found += 1;
                }
            }
            debug_assert_eq!(found, 3);
        }

        let mut peers = [[squares[0]; PEER_COUNT]; 81];
        for square in squares {
            let mut is_peer = [false; 81];
            for unit in units[square.index()] {
                for other in unit_squares[unit.index()] {
                    is_peer[other.index()] = true;
                }
            }
            is_peer[square.index()] = false;

            let list = &mut peers[square.index()];
            let mut n = 0;
            for other in squares.iter().filter(|other| is_peer[other.index()]) {
                list[n] = *other;
                n += 1;
            }
            debug_assert_eq!(n, PEER_COUNT);
        }

        Self {
            squares,
            unit_squares,
            units,
            peers,
        }
    }

    /// Returns a process-wide instance, built on first use.
    ///
    /// Equivalent to [`Topology::new`]; useful for callers that do not want
    /// to own a topology.
    #[must_use]
    pub fn shared() -> &'static Self {
        SHARED.get_or_init(Self::new)
    }

    /// Returns all squares in row-major order.
    #[must_use]
    pub fn squares(&self) -> &[Square; 81] {
        &self.squares
    }

    /// Returns the row, column and box containing `square`.
    #[must_use]
    pub fn units(&self, square: Square) -> &[Unit; 3] {
        &self.units[square.index()]
    }

    /// Returns the squares of `unit`.
    #[must_use]
    pub fn unit_squares(&self, unit: Unit) -> &[Square; 9] {
        &self.unit_squares[unit.index()]
    }

    /// Returns every unit with its squares, rows first, then columns, then boxes.
    pub fn all_units(&self) -> impl Iterator<Item = (Unit, &[Square; 9])> + '_ {
        Unit::ALL
            .into_iter()
            .map(|unit| (unit, &self.unit_squares[unit.index()]))
    }

    /// Returns the 20 squares sharing a unit with `square`.
    #[must_use]
    pub fn peers(&self, square: Square) -> &[Square; PEER_COUNT] {
        &self.peers[square.index()]
    }
}

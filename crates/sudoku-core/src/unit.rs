use std::fmt::{self, Display};

use crate::{
    Square,
    square::{COLUMN_LABELS, ROW_LABELS},
};

/// A sudoku unit: a row, a column, or a 3×3 box.
///
/// Every unit holds nine squares that must end up with nine distinct digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// A row identified by its zero-based index (`A` is 0).
    Row {
        /// Row index (0-8).
        row: u8,
    },
    /// A column identified by its zero-based index (`1` is 0).
    Column {
        /// Column index (0-8).
        col: u8,
    },
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box {
        /// Box index (0-8).
        index: u8,
    },
}

impl Unit {
    /// Number of units on the board.
    pub const COUNT: usize = 27;

    /// All units in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { row: 0 }; 27];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Row { row: i as u8 };
            all[i + 9] = Self::Column { col: i as u8 };
            all[i + 18] = Self::Box { index: i as u8 };
            i += 1;
        }
        all
    };

    /// Returns the three units containing `square`, in row, column, box order.
    #[must_use]
    pub const fn containing(square: Square) -> [Self; 3] {
        [
            Self::Row { row: square.row() },
            Self::Column { col: square.col() },
            Self::Box {
                index: square.box_index(),
            },
        ]
    }

    /// Returns the position of this unit in [`Unit::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Row { row } => row as usize,
            Self::Column { col } => 9 + col as usize,
            Self::Box { index } => 18 + index as usize,
        }
    }

    /// Converts an offset within the unit (0-8) into a square.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in the range 0-8.
    #[must_use]
    pub const fn square_at(self, i: u8) -> Square {
        assert!(i < 9);
        match self {
            Self::Row { row } => Square::new(row, i),
            Self::Column { col } => Square::new(i, col),
            Self::Box { index } => Square::from_box(index, i),
        }
    }

    /// Returns the nine squares of this unit in enumeration order.
    #[must_use]
    pub fn squares(self) -> [Square; 9] {
        let mut squares = [Square::ALL[0]; 9];
        for (i, slot) in (0..).zip(&mut squares) {
            *slot = self.square_at(i);
        }
        squares
    }

    /// Returns `true` if `square` lies in this unit.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        match self {
            Self::Row { row } => square.row() == row,
            Self::Column { col } => square.col() == col,
            Self::Box { index } => square.box_index() == index,
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Row { row } => write!(f, "row {}", ROW_LABELS[usize::from(row)]),
            Self::Column { col } => write!(f, "column {}", COLUMN_LABELS[usize::from(col)]),
            Self::Box { index } => write!(f, "box {}", index + 1),
        }
    }
}

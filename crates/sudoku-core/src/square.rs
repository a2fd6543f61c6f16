//! Board coordinates.

use std::fmt::{self, Display};

/// Row labels, top to bottom.
pub const ROW_LABELS: [char; 9] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];
/// Column labels, left to right.
pub const COLUMN_LABELS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// A square of the 9×9 board, labelled `A1` (top left) to `I9` (bottom right).
///
/// Squares are enumerated in row-major order: `A1, A2, …, A9, B1, …, I9`.
/// [`Square::index`] is the position in that enumeration, which is also the
/// position of the square's character in a puzzle string.
///
/// # Examples
///
/// ```
/// use sudoku_core::Square;
///
/// let square = Square::new(2, 4);
/// assert_eq!(square.to_string(), "C5");
/// assert_eq!(square.index(), 22);
/// assert_eq!(square.box_index(), 1);
/// assert_eq!(Square::from_label("C5"), Some(square));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    index: u8,
}

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 81;

    /// All squares in row-major order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { index: 0 }; 81];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 81 {
            all[i] = Self { index: i as u8 };
            i += 1;
        }
        all
    };

    /// Creates a square from a zero-based row and column.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in the range 0-8.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9);
        Self {
            index: row * 9 + col,
        }
    }

    /// Creates a square from its row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 81 or greater.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_index(index: usize) -> Self {
        assert!(index < Self::COUNT);
        Self {
            index: index as u8,
        }
    }

    /// Creates a square from the first square of box `box_index` and an offset
    /// `i` within the box, both numbered left to right, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if either argument is not in the range 0-8.
    #[must_use]
    pub const fn from_box(box_index: u8, i: u8) -> Self {
        assert!(box_index < 9 && i < 9);
        Self::new((box_index / 3) * 3 + i / 3, (box_index % 3) * 3 + i % 3)
    }

    /// Parses a label such as `"E5"`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        let (Some(row), Some(col), None) = (chars.next(), chars.next(), chars.next()) else {
            return None;
        };
        let row = ROW_LABELS.iter().position(|&c| c == row)?;
        let col = COLUMN_LABELS.iter().position(|&c| c == col)?;
        Some(Self::from_index(row * 9 + col))
    }

    /// Returns the row-major index (0-80).
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the zero-based row.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.index / 9
    }

    /// Returns the zero-based column.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.index % 9
    }

    /// Returns the index of the 3×3 box containing this square.
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.row() / 3) * 3 + self.col() / 3
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            ROW_LABELS[usize::from(self.row())],
            COLUMN_LABELS[usize::from(self.col())]
        )
    }
}

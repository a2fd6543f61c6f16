//! Text output for candidate maps.

use crate::{CandidateMap, Digit, Square};

const BOX_SEPARATOR: &str = "------+-------+------";

/// Flattens a solved map into its 81-digit string.
///
/// Squares are emitted in enumeration order, so the result lines up with the
/// puzzle string it was solved from.
///
/// # Panics
///
/// Panics if any square does not have exactly one candidate.
///
/// # Examples
///
/// ```
/// use sudoku_core::{CandidateMap, Digit, DigitSet, render};
///
/// let map = CandidateMap::from([DigitSet::single_digit(Digit::D3); 81]);
/// assert_eq!(render::render(&map), "3".repeat(81));
/// ```
#[must_use]
pub fn render(map: &CandidateMap) -> String {
    map.iter()
        .map(|(square, candidates)| {
            let Some(digit) = candidates.single() else {
                panic!("cannot render unsolved square {square} with candidates {candidates:?}");
            };
            digit.to_char()
        })
        .collect()
}

/// Lays out a map as a 9×9 grid with box separators.
///
/// Squares without a single candidate are shown as `.`.
///
/// ```text
/// 4 1 7 | 3 6 9 | 8 2 5
/// 6 3 2 | 1 5 8 | 9 4 7
/// 9 5 8 | 7 2 4 | 3 1 6
/// ------+-------+------
/// ...
/// ```
#[must_use]
pub fn render_grid(map: &CandidateMap) -> String {
    let mut out = String::with_capacity(11 * 22);
    for row in 0..9 {
        if row == 3 || row == 6 {
            out.push_str(BOX_SEPARATOR);
            out.push('\n');
        }
        for col in 0..9 {
            if col > 0 {
                out.push(' ');
            }
            if col == 3 || col == 6 {
                out.push_str("| ");
            }
            let ch = map.value(Square::new(row, col)).map_or('.', Digit::to_char);
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

//! Candidate digits (1-9) for a single square.
//!
//! [`DigitSet`] packs the nine digits into the low bits of a `u16`; bit 0 is
//! digit 1 and bit 8 is digit 9. Iteration always runs in ascending digit
//! order, which the propagator and the search engine both depend on.
//!
//! # Examples
//!
//! ```
//! use sudoku_core::{Digit, DigitSet};
//!
//! let mut candidates = DigitSet::FULL;
//! candidates.remove(Digit::D5);
//! candidates.remove(Digit::D7);
//!
//! assert_eq!(candidates.len(), 7);
//! assert!(!candidates.contains(Digit::D5));
//! assert_eq!(candidates.to_string(), "1234689");
//! ```

use std::{
    fmt::{self, Display},
    iter::FusedIterator,
    ops::{BitAnd, BitOr},
};

use crate::Digit;

const MASK: u16 = 0x1ff;

/// A set of digits 1-9 stored as a 9-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet {
    bits: u16,
}

impl DigitSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };
    /// The set containing all nine digits.
    pub const FULL: Self = Self { bits: MASK };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set containing exactly one digit.
    #[must_use]
    pub const fn single_digit(digit: Digit) -> Self {
        Self { bits: digit.bit() }
    }

    /// Creates a set from a raw 9-bit mask, or `None` if bits above the ninth are set.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Option<Self> {
        if bits & !MASK == 0 {
            Some(Self { bits })
        } else {
            None
        }
    }

    /// Returns the raw 9-bit mask.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set has no digits.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if `digit` is in the set.
    #[must_use]
    pub const fn contains(self, digit: Digit) -> bool {
        self.bits & digit.bit() != 0
    }

    /// Inserts a digit. Returns `true` if the set changed.
    pub fn insert(&mut self, digit: Digit) -> bool {
        let before = self.bits;
        self.bits |= digit.bit();
        before != self.bits
    }

    /// Removes a digit. Returns `true` if the set changed.
    pub fn remove(&mut self, digit: Digit) -> bool {
        let before = self.bits;
        self.bits &= !digit.bit();
        before != self.bits
    }

    /// Returns the only digit of a singleton set.
    ///
    /// Returns `None` for empty sets and for sets with two or more digits.
    #[must_use]
    pub fn single(self) -> Option<Digit> {
        if self.len() == 1 { self.first() } else { None }
    }

    /// Returns the smallest digit in the set.
    #[must_use]
    pub fn first(self) -> Option<Digit> {
        if self.is_empty() {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let value = self.bits.trailing_zeros() as u8 + 1;
        Digit::try_from_value(value)
    }

    /// Returns the digits of `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Returns an iterator over the digits in ascending order.
    #[must_use]
    pub const fn iter(self) -> Iter {
        Iter { bits: self.bits }
    }
}

impl fmt::Debug for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Digit::value)).finish()
    }
}

/// Formats the digits concatenated in ascending order, e.g. `"1479"`.
impl Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in *self {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl BitOr for DigitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitAnd for DigitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl FromIterator<Digit> for DigitSet {
    fn from_iter<T: IntoIterator<Item = Digit>>(iter: T) -> Self {
        let mut set = Self::new();
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl IntoIterator for DigitSet {
    type Item = Digit;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Ascending iterator over a [`DigitSet`].
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u16,
}

impl Iterator for Iter {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let value = self.bits.trailing_zeros() as u8 + 1;
        self.bits &= self.bits - 1;
        Digit::try_from_value(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl FusedIterator for Iter {}
impl ExactSizeIterator for Iter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Digit::*;

    #[test]
    fn test_constants() {
        assert_eq!(DigitSet::EMPTY.len(), 0);
        assert_eq!(DigitSet::FULL.len(), 9);
        for digit in Digit::ALL {
            assert!(DigitSet::FULL.contains(digit));
            assert!(!DigitSet::EMPTY.contains(digit));
        }
    }

    #[test]
    fn test_insert_remove_report_changes() {
        let mut set = DigitSet::new();
        assert!(set.insert(D3));
        assert!(!set.insert(D3));
        assert!(set.remove(D3));
        assert!(!set.remove(D3));
        assert!(set.is_empty());
    }

    #[test]
    fn test_iteration_order() {
        let set = DigitSet::from_iter([D9, D1, D5, D3]);
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected, vec![D1, D3, D5, D9]);
        assert_eq!(set.iter().len(), 4);
    }

    #[test]
    fn test_single() {
        assert_eq!(DigitSet::single_digit(D4).single(), Some(D4));
        assert_eq!(DigitSet::EMPTY.single(), None);
        assert_eq!(DigitSet::from_iter([D1, D2]).single(), None);
        assert_eq!(DigitSet::from_iter([D8, D2]).first(), Some(D2));
    }

    #[test]
    fn test_set_operations() {
        let a = DigitSet::from_iter([D1, D2, D3]);
        let b = DigitSet::from_iter([D2, D3, D4]);

        assert_eq!((a | b).len(), 4);
        assert_eq!(a & b, DigitSet::from_iter([D2, D3]));
        assert_eq!(a.difference(b), DigitSet::single_digit(D1));
    }

    #[test]
    fn test_from_bits() {
        assert_eq!(DigitSet::from_bits(0x1ff), Some(DigitSet::FULL));
        assert_eq!(DigitSet::from_bits(0x200), None);
        assert_eq!(DigitSet::from_bits(0b101).map(DigitSet::len), Some(2));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(DigitSet::FULL.to_string(), "123456789");
        assert_eq!(DigitSet::EMPTY.to_string(), "");
        assert_eq!(format!("{:?}", DigitSet::from_iter([D2, D7])), "{2, 7}");
    }
}

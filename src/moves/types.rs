use crate::square::Square;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A set of board squares packed into a `u64`, one bit per square index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline(always)]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    #[inline(always)]
    pub fn contains(self, sq: Square) -> bool {
        (self.0 >> sq.index()) & 1 != 0
    }

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate members in ascending index order, popping one bit at a time.
    pub fn iter(self) -> impl Iterator<Item = Square> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let sq = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(Square::from_index(sq))
        })
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, sq) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{sq}")?;
        }
        write!(f, "}}")
    }
}

/// Pseudo-legal destinations for one piece: plain moves, captures, and
/// pawn double-steps (kept apart because only they arm en passant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveSet {
    pub moves: SquareSet,
    pub captures: SquareSet,
    pub en_passant_moves: SquareSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_contains_iter() {
        let mut set = SquareSet::EMPTY;
        set.insert(Square::from_index(0));
        set.insert(Square::from_index(63));
        set.insert(Square::from_index(19));
        assert!(set.contains(Square::from_index(19)));
        assert!(!set.contains(Square::from_index(20)));
        assert_eq!(set.len(), 3);
        let squares: Vec<u8> = set.iter().map(Square::index).collect();
        assert_eq!(squares, vec![0, 19, 63]);
    }
}

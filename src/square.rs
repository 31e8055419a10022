use std::fmt;

/// A board square in one player's perspective, indexed 0–63.
///
/// Row 0 is the far (opponent's) side, row 7 the near side, so the
/// perspective owner's pawns advance toward row 0. Row is `index / 8`,
/// column is `index % 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    #[inline(always)]
    pub fn from_index(idx: u8) -> Self {
        debug_assert!(idx < 64, "square index out of range: {idx}");
        Square(idx)
    }

    /// Checked construction from a wire integer; anything outside 0–63
    /// (including the -1 sentinel) maps to `None`.
    pub fn try_from_index(idx: i32) -> Option<Self> {
        (0..64).contains(&idx).then(|| Square(idx as u8))
    }

    #[inline(always)]
    pub fn index(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn row(self) -> u8 {
        self.0 / 8
    }

    #[inline(always)]
    pub fn col(self) -> u8 {
        self.0 % 8
    }

    /// Displace by `dr` rows and `dc` columns; `None` when the result
    /// leaves the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let r = self.row() as i8 + dr;
        let c = self.col() as i8 + dc;
        if !(0..8).contains(&r) || !(0..8).contains(&c) {
            return None;
        }
        Some(Square((r * 8 + c) as u8))
    }

    /// The same physical square seen from the other player's perspective
    /// (point reflection, `63 - index`).
    #[inline(always)]
    pub fn mirror(self) -> Square {
        Square(63 - self.0)
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

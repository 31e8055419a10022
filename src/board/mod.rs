use crate::square::Square;
use once_cell::sync::Lazy;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// The side a player was assigned when the match started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Piece type, without ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Wire letter; knights are `H` on the wire.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'H',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'H' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Contents of one square, with ownership expressed relative to the
/// perspective the board is rendered in. The same physical position reads
/// `Own` for the player whose board it is and `Enemy` on the converted
/// board, which lets one rule set serve both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Piece {
    #[default]
    Empty,
    Own(PieceKind),
    Enemy(PieceKind),
}

impl Piece {
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    #[inline(always)]
    pub fn is_own(self) -> bool {
        matches!(self, Piece::Own(_))
    }

    #[inline(always)]
    pub fn is_enemy(self) -> bool {
        matches!(self, Piece::Enemy(_))
    }

    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Piece::Empty => None,
            Piece::Own(k) | Piece::Enemy(k) => Some(k),
        }
    }

    /// Swap ownership; empty squares are unaffected.
    pub fn flipped(self) -> Piece {
        match self {
            Piece::Empty => Piece::Empty,
            Piece::Own(k) => Piece::Enemy(k),
            Piece::Enemy(k) => Piece::Own(k),
        }
    }

    /// Two-character wire code: kind letter + owner digit (`X0` = empty,
    /// `P1` = own pawn, `P2` = enemy pawn, ...).
    pub fn code(self) -> &'static str {
        match self {
            Piece::Empty => "X0",
            Piece::Own(PieceKind::Pawn) => "P1",
            Piece::Own(PieceKind::Rook) => "R1",
            Piece::Own(PieceKind::Knight) => "H1",
            Piece::Own(PieceKind::Bishop) => "B1",
            Piece::Own(PieceKind::Queen) => "Q1",
            Piece::Own(PieceKind::King) => "K1",
            Piece::Enemy(PieceKind::Pawn) => "P2",
            Piece::Enemy(PieceKind::Rook) => "R2",
            Piece::Enemy(PieceKind::Knight) => "H2",
            Piece::Enemy(PieceKind::Bishop) => "B2",
            Piece::Enemy(PieceKind::Queen) => "Q2",
            Piece::Enemy(PieceKind::King) => "K2",
        }
    }

    pub fn from_code(code: &str) -> Option<Piece> {
        let mut chars = code.chars();
        let letter = chars.next()?;
        let digit = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match (letter, digit) {
            ('X', '0') => Some(Piece::Empty),
            (_, '1') => PieceKind::from_letter(letter).map(Piece::Own),
            (_, '2') => PieceKind::from_letter(letter).map(Piece::Enemy),
            _ => None,
        }
    }
}

/// Back-rank layout of the start position in White's perspective. Black's
/// own view comes out of the reflection with king and queen swapped.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

static START: Lazy<Board> = Lazy::new(|| {
    let mut b = Board::empty();
    for (col, &kind) in BACK_RANK.iter().enumerate() {
        b.0[col] = Piece::Enemy(kind);
        b.0[56 + col] = Piece::Own(kind);
    }
    for col in 0..8 {
        b.0[8 + col] = Piece::Enemy(PieceKind::Pawn);
        b.0[48 + col] = Piece::Own(PieceKind::Pawn);
    }
    b
});

/// A full position from one specific player's point of view: 64 squares,
/// row 7 nearest the perspective owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board([Piece; 64]);

impl Board {
    pub fn empty() -> Board {
        Board([Piece::Empty; 64])
    }

    /// The standard starting position, perspective owner at the bottom.
    pub fn initial() -> Board {
        START.clone()
    }

    /// The same position from the other player's point of view: every
    /// square moves to its mirror index and swaps ownership. Involutive.
    pub fn to_opponent_view(&self) -> Board {
        let mut out = Board::empty();
        for sq in Square::all() {
            out[sq.mirror()] = self[sq].flipped();
        }
        out
    }

    /// Squares in index order.
    pub fn squares(&self) -> impl Iterator<Item = Piece> + '_ {
        self.0.iter().copied()
    }

    /// Where the Enemy king sits on this board, if present.
    pub fn enemy_king_square(&self) -> Option<Square> {
        Square::all().find(|&sq| self[sq] == Piece::Enemy(PieceKind::King))
    }
}

impl Index<Square> for Board {
    type Output = Piece;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Piece {
        &self.0[sq.index() as usize]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, sq: Square) -> &mut Piece {
        &mut self.0[sq.index() as usize]
    }
}

impl FromStr for Board {
    type Err = String;

    /// Parse 64 whitespace-separated square codes, index order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::empty();
        let mut count = 0usize;
        for (i, code) in s.split_whitespace().enumerate() {
            if i >= 64 {
                return Err("more than 64 squares".to_string());
            }
            board.0[i] =
                Piece::from_code(code).ok_or_else(|| format!("bad square code `{code}` at {i}"))?;
            count += 1;
        }
        if count != 64 {
            return Err(format!("expected 64 squares, got {count}"));
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.0[row * 8 + col].code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_layout() {
        let b = Board::initial();
        assert_eq!(b[Square::from_index(60)], Piece::Own(PieceKind::King));
        assert_eq!(b[Square::from_index(59)], Piece::Own(PieceKind::Queen));
        assert_eq!(b[Square::from_index(4)], Piece::Enemy(PieceKind::King));
        assert_eq!(b[Square::from_index(52)], Piece::Own(PieceKind::Pawn));
        assert_eq!(b[Square::from_index(30)], Piece::Empty);
    }

    #[test]
    fn codes_round_trip() {
        for piece in [
            Piece::Empty,
            Piece::Own(PieceKind::Knight),
            Piece::Enemy(PieceKind::Queen),
        ] {
            assert_eq!(Piece::from_code(piece.code()), Some(piece));
        }
        assert_eq!(Piece::from_code("P0"), None);
        assert_eq!(Piece::from_code("X1"), None);
        assert_eq!(Piece::from_code("Z1"), None);
        assert_eq!(Piece::from_code("P12"), None);
    }

    #[test]
    fn display_parses_back() {
        let b = Board::initial();
        let reparsed: Board = b.to_string().parse().expect("display output parses");
        assert_eq!(reparsed, b);
    }
}

//! Check detection over a perspective board.
//!
//! Both uses run the same scan: union every Own piece's capture set and ask
//! whether the Enemy king square is in it. Run against the mover's board it
//! yields the round's check flag; run against the opponent-view board it
//! detects the mover walking into check (the king under attack there is the
//! mover's own).

use crate::board::Board;
use crate::moves::movegen::piece_moves;
use crate::moves::types::SquareSet;
use crate::square::Square;

/// Union of capture destinations over every Own piece on `board`.
pub fn capture_map(board: &Board) -> SquareSet {
    let mut captures = SquareSet::EMPTY;
    for sq in Square::all() {
        captures |= piece_moves(board, sq).captures;
    }
    captures
}

/// True when the Enemy king on `board` can be taken by an Own capture.
/// A board without an Enemy king is trivially safe.
pub fn enemy_king_attacked(board: &Board) -> bool {
    match board.enemy_king_square() {
        Some(king) => capture_map(board).contains(king),
        None => false,
    }
}

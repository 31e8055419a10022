//! Pseudo-legal move generation against a perspective board.
//!
//! Everything here is relative: the generator only ever moves `Own` pieces
//! toward row 0 and captures `Enemy` pieces, so the same code arbitrates
//! both colors. Legality against check is the caller's problem.

use crate::board::{Board, Piece, PieceKind};
use crate::moves::types::MoveSet;
use crate::square::Square;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (-1, -2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_RAYS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Pawn home rank in perspective coordinates; a pawn still on it may
/// double-step, which is what arms en passant for the opponent.
const PAWN_HOME_ROW: u8 = 6;

fn pawn_moves(board: &Board, from: Square, out: &mut MoveSet) {
    for dc in [-1, 1] {
        if let Some(to) = from.offset(-1, dc) {
            if board[to].is_enemy() {
                out.captures.insert(to);
            }
        }
    }
    if let Some(to) = from.offset(-1, 0) {
        if board[to].is_empty() {
            out.moves.insert(to);
            if from.row() == PAWN_HOME_ROW {
                if let Some(two) = from.offset(-2, 0) {
                    if board[two].is_empty() {
                        out.en_passant_moves.insert(two);
                    }
                }
            }
        }
    }
}

fn slide(board: &Board, from: Square, rays: &[(i8, i8); 4], out: &mut MoveSet) {
    for &(dr, dc) in rays {
        for dist in 1..8i8 {
            let Some(to) = from.offset(dr * dist, dc * dist) else {
                break;
            };
            match board[to] {
                Piece::Empty => out.moves.insert(to),
                Piece::Enemy(_) => {
                    out.captures.insert(to);
                    break;
                }
                Piece::Own(_) => break,
            }
        }
    }
}

fn leap(board: &Board, from: Square, offsets: &[(i8, i8); 8], out: &mut MoveSet) {
    for &(dr, dc) in offsets {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        match board[to] {
            Piece::Empty => out.moves.insert(to),
            Piece::Enemy(_) => out.captures.insert(to),
            Piece::Own(_) => {}
        }
    }
}

/// All pseudo-legal destinations for the piece on `from`. A square that
/// does not hold an Own piece generates nothing.
pub fn piece_moves(board: &Board, from: Square) -> MoveSet {
    let mut out = MoveSet::default();
    let Piece::Own(kind) = board[from] else {
        return out;
    };
    match kind {
        PieceKind::Pawn => pawn_moves(board, from, &mut out),
        PieceKind::Rook => slide(board, from, &ORTHOGONAL_RAYS, &mut out),
        PieceKind::Knight => leap(board, from, &KNIGHT_OFFSETS, &mut out),
        PieceKind::Bishop => slide(board, from, &DIAGONAL_RAYS, &mut out),
        PieceKind::Queen => {
            slide(board, from, &ORTHOGONAL_RAYS, &mut out);
            slide(board, from, &DIAGONAL_RAYS, &mut out);
        }
        PieceKind::King => leap(board, from, &KING_OFFSETS, &mut out),
    }
    out
}

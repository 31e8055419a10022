//! Move reconstruction from board snapshots.
//!
//! A client never submits a move, only the full board that resulted from
//! one. The classifier diffs it against the previous round's board (both in
//! the mover's perspective) and decides which move that difference claims:
//! two changed squares for an ordinary move or capture, three for an
//! en-passant capture, four for a castle. Anything else is rejected.

use crate::board::{Board, Color, Piece, PieceKind};
use crate::error::ArbiterError;
use crate::moves::movegen::piece_moves;
use crate::square::Square;
use arrayvec::ArrayVec;

/// The move a submitted board turned out to claim, once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifiedMove {
    /// Ordinary move or capture landing on `dest`. A pawn double-step also
    /// arms `en_passant`: the skipped square, handed to the opponent in
    /// their coordinates.
    Piece {
        dest: Square,
        en_passant: Option<Square>,
    },
    /// En-passant capture landing on `dest`.
    EnPassantCapture { dest: Square },
    /// Castle; `dest` is the king's landing square.
    Castle { dest: Square },
}

impl ClassifiedMove {
    /// Destination square recorded as the round's `prev_piece`.
    pub fn dest(self) -> Square {
        match self {
            ClassifiedMove::Piece { dest, .. }
            | ClassifiedMove::EnPassantCapture { dest }
            | ClassifiedMove::Castle { dest } => dest,
        }
    }

    /// En-passant target armed for the next round, if any.
    pub fn en_passant(self) -> Option<Square> {
        match self {
            ClassifiedMove::Piece { en_passant, .. } => en_passant,
            _ => None,
        }
    }
}

/// Before/after expectation over the four squares a castle touches, plus
/// where the king ends up. The index layouts are asymmetric between White
/// and Black because the perspective reflection swaps left and right; they
/// are kept exactly as the arbitration rules define them.
struct CastlePattern {
    squares: [(u8, Piece, Piece); 4],
    king_dest: u8,
}

const OWN_KING: Piece = Piece::Own(PieceKind::King);
const OWN_ROOK: Piece = Piece::Own(PieceKind::Rook);
const NONE: Piece = Piece::Empty;

const WHITE_LEFT_CASTLE: CastlePattern = CastlePattern {
    squares: [
        (56, OWN_ROOK, NONE),
        (58, NONE, OWN_KING),
        (59, NONE, OWN_ROOK),
        (60, OWN_KING, NONE),
    ],
    king_dest: 58,
};

const BLACK_LEFT_CASTLE: CastlePattern = CastlePattern {
    squares: [
        (56, OWN_ROOK, NONE),
        (57, NONE, OWN_KING),
        (58, NONE, OWN_ROOK),
        (59, OWN_KING, NONE),
    ],
    king_dest: 57,
};

const WHITE_RIGHT_CASTLE: CastlePattern = CastlePattern {
    squares: [
        (60, OWN_KING, NONE),
        (61, NONE, OWN_ROOK),
        (62, NONE, OWN_KING),
        (63, OWN_ROOK, NONE),
    ],
    king_dest: 62,
};

const BLACK_RIGHT_CASTLE: CastlePattern = CastlePattern {
    squares: [
        (59, OWN_KING, NONE),
        (60, NONE, OWN_ROOK),
        (61, NONE, OWN_KING),
        (63, OWN_ROOK, NONE),
    ],
    king_dest: 61,
};

/// Reconstruct and validate the move implied by the difference between the
/// previous round's board and the submitted one. `prior_en_passant` and the
/// castle flags come from the previous round and gate the 3- and 4-square
/// cases.
pub fn classify_round(
    prev_board: &Board,
    board: &Board,
    color: Color,
    prior_en_passant: Option<Square>,
    castle_left: bool,
    castle_right: bool,
) -> Result<ClassifiedMove, ArbiterError> {
    let mut diff: ArrayVec<Square, 64> = ArrayVec::new();
    for sq in Square::all() {
        if prev_board[sq] != board[sq] {
            diff.push(sq);
        }
    }

    match diff.len() {
        2 => classify_plain(prev_board, &diff),
        3 => classify_en_passant_capture(prev_board, board, &diff, prior_en_passant),
        4 => classify_castle(prev_board, board, color, &diff, castle_left, castle_right),
        _ => Err(ArbiterError::IllegalMove),
    }
}

fn classify_plain(prev: &Board, diff: &[Square]) -> Result<ClassifiedMove, ArbiterError> {
    // Exactly one of the two squares must have held an Own piece before.
    let (from, dest) = match (prev[diff[0]].is_own(), prev[diff[1]].is_own()) {
        (true, false) => (diff[0], diff[1]),
        (false, true) => (diff[1], diff[0]),
        _ => return Err(ArbiterError::IllegalPiece),
    };

    let generated = piece_moves(prev, from);
    match prev[dest] {
        Piece::Empty => {
            if generated.moves.contains(dest) {
                Ok(ClassifiedMove::Piece {
                    dest,
                    en_passant: None,
                })
            } else if generated.en_passant_moves.contains(dest) {
                // 63 - (dest + 8): the skipped square, mirrored into the
                // opponent's coordinates for next round's capture window.
                let target = dest.offset(1, 0).map(Square::mirror);
                Ok(ClassifiedMove::Piece {
                    dest,
                    en_passant: target,
                })
            } else {
                Err(ArbiterError::IllegalMove)
            }
        }
        Piece::Enemy(_) => {
            if generated.captures.contains(dest) {
                Ok(ClassifiedMove::Piece {
                    dest,
                    en_passant: None,
                })
            } else {
                Err(ArbiterError::IllegalCapture)
            }
        }
        Piece::Own(_) => Err(ArbiterError::IllegalPiece),
    }
}

fn classify_en_passant_capture(
    prev: &Board,
    board: &Board,
    diff: &[Square],
    prior_en_passant: Option<Square>,
) -> Result<ClassifiedMove, ArbiterError> {
    // The stored target from the previous round names the destination; the
    // captured pawn sits one row behind it. No target, no capture.
    let Some(dest) = prior_en_passant.filter(|t| diff.contains(t)) else {
        return Err(ArbiterError::IllegalPiece);
    };
    let captured = dest
        .offset(1, 0)
        .filter(|s| diff.contains(s))
        .ok_or(ArbiterError::IllegalPiece)?;
    let from = diff
        .iter()
        .copied()
        .find(|&s| s != dest && s != captured)
        .ok_or(ArbiterError::IllegalPiece)?;

    let own_pawn = Piece::Own(PieceKind::Pawn);
    let pattern_holds = prev[from] == own_pawn
        && prev[dest] == Piece::Empty
        && prev[captured] == Piece::Enemy(PieceKind::Pawn)
        && board[from] == Piece::Empty
        && board[dest] == own_pawn
        && board[captured] == Piece::Empty;
    if !pattern_holds {
        return Err(ArbiterError::IllegalPiece);
    }
    Ok(ClassifiedMove::EnPassantCapture { dest })
}

fn classify_castle(
    prev: &Board,
    board: &Board,
    color: Color,
    diff: &[Square],
    castle_left: bool,
    castle_right: bool,
) -> Result<ClassifiedMove, ArbiterError> {
    if !castle_left && !castle_right {
        return Err(ArbiterError::IllegalCastle("castling rights already lost"));
    }

    let left_rook = Square::from_index(56);
    let right_rook = Square::from_index(63);
    let pattern = if diff.contains(&left_rook) {
        if !castle_left {
            return Err(ArbiterError::IllegalCastle("left castle not available"));
        }
        match color {
            Color::White => &WHITE_LEFT_CASTLE,
            Color::Black => &BLACK_LEFT_CASTLE,
        }
    } else if diff.contains(&right_rook) {
        if !castle_right {
            return Err(ArbiterError::IllegalCastle("right castle not available"));
        }
        match color {
            Color::White => &WHITE_RIGHT_CASTLE,
            Color::Black => &BLACK_RIGHT_CASTLE,
        }
    } else {
        return Err(ArbiterError::IllegalCastle("no rook square in the diff"));
    };

    let matches = pattern.squares.iter().all(|&(idx, before, after)| {
        let sq = Square::from_index(idx);
        prev[sq] == before && board[sq] == after
    });
    if !matches {
        return Err(ArbiterError::IllegalCastle("castle pattern mismatch"));
    }
    Ok(ClassifiedMove::Castle {
        dest: Square::from_index(pattern.king_dest),
    })
}

//! Castling eligibility for the side about to move.
//!
//! Evaluated on the board just played, in the *mover's* coordinates: the
//! next mover's pieces sit on row 0, their king on index 4 (when the mover
//! is White) or 3 (when the mover is Black). The index tables are
//! asymmetric between the two colors and between the two castle sides;
//! they are part of the arbitration rules and are preserved exactly,
//! including the transit squares being probed by fixed king-relative
//! offsets rather than along the castle side.

use crate::board::{Board, Color, Piece, PieceKind};
use crate::game::MovedFlags;
use crate::moves::types::SquareSet;
use crate::square::Square;

/// Eligibility flags carried into the next round for the side now to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleRights {
    pub left: bool,
    pub right: bool,
}

impl CastleRights {
    pub const NONE: CastleRights = CastleRights {
        left: false,
        right: false,
    };

    pub fn any(self) -> bool {
        self.left || self.right
    }
}

/// Home-row layout required for one castle side, in mover coordinates, plus
/// the king-relative transit offsets probed against the mover's captures.
struct HomePattern {
    king: u8,
    rook: u8,
    between: &'static [u8],
    transit: [i8; 2],
}

const LEFT_VS_WHITE_MOVER: HomePattern = HomePattern {
    king: 4,
    rook: 7,
    between: &[5, 6],
    transit: [-1, -2],
};

const LEFT_VS_BLACK_MOVER: HomePattern = HomePattern {
    king: 3,
    rook: 7,
    between: &[4, 5, 6],
    transit: [-1, -2],
};

const RIGHT_VS_WHITE_MOVER: HomePattern = HomePattern {
    king: 4,
    rook: 0,
    between: &[3, 2, 1],
    transit: [1, 2],
};

const RIGHT_VS_BLACK_MOVER: HomePattern = HomePattern {
    king: 3,
    rook: 0,
    between: &[2, 1],
    transit: [1, 2],
};

fn side_allowed(board: &Board, pattern: &HomePattern, mover_captures: SquareSet) -> bool {
    let king = Square::from_index(pattern.king);
    if board[king] != Piece::Enemy(PieceKind::King)
        || board[Square::from_index(pattern.rook)] != Piece::Enemy(PieceKind::Rook)
    {
        return false;
    }
    if pattern
        .between
        .iter()
        .any(|&idx| !board[Square::from_index(idx)].is_empty())
    {
        return false;
    }
    pattern.transit.iter().all(|&delta| {
        match king.offset(0, delta) {
            Some(sq) => !mover_captures.contains(sq),
            None => true,
        }
    })
}

/// Compute castle eligibility for the side about to move. `check` is the
/// round's check flag (is the next mover in check right now), `flags` the
/// has-moved bookkeeping carried on that side's last round, and
/// `mover_captures` the capture map of the board just played.
pub fn next_mover_rights(
    board: &Board,
    mover: Color,
    check: bool,
    flags: &MovedFlags,
    mover_captures: SquareSet,
) -> CastleRights {
    if flags.king || check {
        return CastleRights::NONE;
    }

    let (left_pattern, right_pattern) = match mover {
        Color::White => (&LEFT_VS_WHITE_MOVER, &RIGHT_VS_WHITE_MOVER),
        Color::Black => (&LEFT_VS_BLACK_MOVER, &RIGHT_VS_BLACK_MOVER),
    };

    CastleRights {
        left: !flags.left_rook && side_allowed(board, left_pattern, mover_captures),
        right: !flags.right_rook && side_allowed(board, right_pattern, mover_captures),
    }
}

//! Terminal-state detection: does the side about to move have any reply?
//!
//! For every piece of the next mover, every pseudo-legal move and capture
//! (including the en-passant capture just armed this round) is played out
//! on a scratch copy of the mover-perspective board, the king-safety test
//! rerun, and the scratch board restored before the next candidate. One
//! surviving reply, or a live castle option, is enough. No reply at all
//! means checkmate when the side is in check and stalemate otherwise.

use crate::board::{Board, Piece, PieceKind};
use crate::moves::movegen::piece_moves;
use crate::rules::castle::CastleRights;
use crate::rules::check::enemy_king_attacked;
use crate::square::Square;

/// True when the side about to move has at least one reply that leaves its
/// king unattacked. `board` is the mover-perspective post-move board,
/// `opponent_board` the same position from the next mover's point of view,
/// and `en_passant` the capture target just armed, in the next mover's
/// coordinates.
pub fn opponent_can_move(
    board: &Board,
    opponent_board: &Board,
    en_passant: Option<Square>,
    rights: CastleRights,
) -> bool {
    if rights.any() {
        return true;
    }

    let mut scratch = board.clone();
    for from in Square::all() {
        let generated = piece_moves(opponent_board, from);
        // Double-step squares count as plain moves during the scan; they
        // only differ when it comes to arming en passant.
        let moves = generated.moves | generated.en_passant_moves;
        for to in moves.iter() {
            if survives(&mut scratch, from, to, None) {
                return true;
            }
        }
        for to in generated.captures.iter() {
            if survives(&mut scratch, from, to, None) {
                return true;
            }
        }
        // The armed en-passant capture lands on an empty square, so the
        // generator never lists it; try it for any pawn that can reach it.
        if let Some(target) = en_passant
            && opponent_board[from] == Piece::Own(PieceKind::Pawn)
            && (from.offset(-1, -1) == Some(target) || from.offset(-1, 1) == Some(target))
        {
            let passed_pawn = target.offset(1, 0).map(Square::mirror);
            if survives(&mut scratch, from, target, passed_pawn) {
                return true;
            }
        }
    }
    false
}

/// Play `from -> to` (next-mover coordinates) on the scratch board, report
/// whether the next mover's king stays safe, and restore every touched
/// square before returning. `passed_pawn` is the extra square cleared by an
/// en-passant capture, already in mover coordinates.
fn survives(scratch: &mut Board, from: Square, to: Square, passed_pawn: Option<Square>) -> bool {
    let f = from.mirror();
    let t = to.mirror();
    let prior_from = scratch[f];
    let prior_to = scratch[t];
    let prior_passed = passed_pawn.map(|p| (p, scratch[p]));

    scratch[t] = prior_from;
    scratch[f] = Piece::Empty;
    if let Some((p, _)) = prior_passed {
        scratch[p] = Piece::Empty;
    }

    // The next mover's king reads as the Enemy king on the mover's board.
    let safe = !enemy_king_attacked(scratch);

    scratch[f] = prior_from;
    scratch[t] = prior_to;
    if let Some((p, prior)) = prior_passed {
        scratch[p] = prior;
    }
    safe
}

//! The full arbitration pipeline for one submitted round.
//!
//! Order matters and mirrors the rules: classify the claimed move against
//! the previous board, reject self-check, derive the check flag, evaluate
//! the next mover's castle rights, scan for mobility to settle
//! checkmate/stalemate, then assemble the new ledger entry. Nothing here
//! mutates the game; the caller commits the returned round or drops it.

use crate::board::{Board, Color, Piece, PieceKind};
use crate::error::ArbiterError;
use crate::game::{MovedFlags, Round, Winner};
use crate::moves::classify::classify_round;
use crate::rules::{castle, check, mobility};
use crate::square::Square;
use tracing::{debug, instrument, trace};

const WHITE_KING_HOME: u8 = 60;
const BLACK_KING_HOME: u8 = 59;
const LEFT_ROOK_HOME: u8 = 56;
const RIGHT_ROOK_HOME: u8 = 63;

/// Validate one submitted board against the ledger and produce the round
/// that would extend it. `history` must hold the rounds up to `step - 1`.
#[instrument(skip(history, board))]
pub fn arbitrate(
    history: &[Round],
    color: Color,
    step: u32,
    board: &Board,
) -> Result<Round, ArbiterError> {
    let prior = history
        .last()
        .ok_or_else(|| ArbiterError::InvalidInput("no prior round".to_string()))?;
    let prev_board = prior.board_for(color);
    let opponent_view = board.to_opponent_view();

    let mv = classify_round(
        prev_board,
        board,
        color,
        prior.en_passant,
        prior.castle_left,
        prior.castle_right,
    )?;
    trace!(dest = mv.dest().index(), "move classified");

    // The mover's own king reads as the Enemy king on the opponent's view.
    if check::enemy_king_attacked(&opponent_view) {
        return Err(ArbiterError::SelfCheck);
    }

    let mover_captures = check::capture_map(board);
    let check_flag = board
        .enemy_king_square()
        .is_some_and(|king| mover_captures.contains(king));

    let rights = castle::next_mover_rights(board, color, check_flag, &prior.moved, mover_captures);

    let en_passant = mv.en_passant();
    let can_reply = mobility::opponent_can_move(board, &opponent_view, en_passant, rights);
    let winner = match (can_reply, check_flag) {
        (true, _) => Winner::None,
        (false, true) => Winner::from(color),
        (false, false) => Winner::Tie,
    };
    if winner.is_decided() {
        debug!(winner = winner.as_str(), "terminal position reached");
    }

    let dest = mv.dest();
    let (board_white, board_black, prev_piece_white, prev_piece_black) = match color {
        Color::White => (
            board.clone(),
            opponent_view,
            Some(dest),
            Some(dest.mirror()),
        ),
        Color::Black => (
            opponent_view,
            board.clone(),
            Some(dest.mirror()),
            Some(dest),
        ),
    };

    Ok(Round {
        step,
        board_white,
        board_black,
        prev_piece_white,
        prev_piece_black,
        en_passant,
        check: check_flag,
        winner,
        moved: derive_moved_flags(history, color, board),
        castle_left: rights.left,
        castle_right: rights.right,
    })
}

/// Carry the mover's has-moved flags forward from its previous round and
/// re-derive them by looking at the home squares. The rook flags are only
/// re-derived while the king flag is still clear; an absent rook (moved or
/// captured) counts as moved either way.
fn derive_moved_flags(history: &[Round], color: Color, board: &Board) -> MovedFlags {
    // history holds rounds 0..step-1; the mover's own previous round is
    // the second newest, which only exists from step 2 on.
    if history.len() < 2 {
        return MovedFlags::default();
    }
    let mut moved = history[history.len() - 2].moved;
    if !moved.king {
        let king_home = match color {
            Color::White => WHITE_KING_HOME,
            Color::Black => BLACK_KING_HOME,
        };
        if board[Square::from_index(king_home)] != Piece::Own(PieceKind::King) {
            moved.king = true;
        }
        if board[Square::from_index(LEFT_ROOK_HOME)] != Piece::Own(PieceKind::Rook) {
            moved.left_rook = true;
        }
        if board[Square::from_index(RIGHT_ROOK_HOME)] != Piece::Own(PieceKind::Rook) {
            moved.right_rook = true;
        }
    }
    moved
}

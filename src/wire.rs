//! Wire records for the persistence and transport collaborators.
//!
//! A board travels as 64 two-character square codes, optional squares as
//! integers with -1 standing for "none", and field names in camelCase.

use crate::board::{Board, Color, Piece};
use crate::error::ArbiterError;
use crate::game::{Game, Round};
use crate::square::Square;
use serde::{Deserialize, Serialize};

/// A round as a client submits it: the step number it claims plus the full
/// resulting board in the submitting player's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSubmission {
    pub step: u32,
    pub board: Vec<String>,
}

impl RoundSubmission {
    pub fn from_board(step: u32, board: &Board) -> RoundSubmission {
        RoundSubmission {
            step,
            board: board.squares().map(|p| p.code().to_string()).collect(),
        }
    }

    /// Decode the claimed board, rejecting any malformed payload.
    pub fn parse_board(&self) -> Result<Board, ArbiterError> {
        if self.board.len() != 64 {
            return Err(ArbiterError::InvalidInput(format!(
                "expected 64 squares, got {}",
                self.board.len()
            )));
        }
        let mut board = Board::empty();
        for (i, code) in self.board.iter().enumerate() {
            let piece = Piece::from_code(code).ok_or_else(|| {
                ArbiterError::InvalidInput(format!("bad square code `{code}` at index {i}"))
            })?;
            board[Square::from_index(i as u8)] = piece;
        }
        Ok(board)
    }
}

/// One ledger entry rendered for a specific color: that color's board and
/// prev-piece, shared flags as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub step: u32,
    pub board: Vec<String>,
    pub prev_piece: i32,
    pub en_passant: i32,
    pub check: bool,
    pub winner: String,
    pub castle_left: bool,
    pub castle_right: bool,
}

impl RoundView {
    pub fn render(round: &Round, color: Color) -> RoundView {
        RoundView {
            step: round.step,
            board: round
                .board_for(color)
                .squares()
                .map(|p| p.code().to_string())
                .collect(),
            prev_piece: square_to_wire(round.prev_piece_for(color)),
            en_passant: square_to_wire(round.en_passant),
            check: round.check,
            winner: round.winner.as_str().to_string(),
            castle_left: round.castle_left,
            castle_right: round.castle_right,
        }
    }
}

/// The full game as one player sees it: current step plus their rendering
/// of every round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub step: u32,
    pub history: Vec<RoundView>,
}

impl GameView {
    pub fn render(game: &Game, color: Color) -> GameView {
        GameView {
            step: game.step,
            history: game
                .history
                .iter()
                .map(|round| RoundView::render(round, color))
                .collect(),
        }
    }
}

pub fn square_to_wire(sq: Option<Square>) -> i32 {
    sq.map_or(-1, |s| s.index() as i32)
}

pub fn wire_to_square(value: i32) -> Option<Square> {
    Square::try_from_index(value)
}

//! Shared test driver: keeps one White-perspective "truth" board, applies
//! moves to it in White coordinates, and submits the right perspective
//! rendering for whichever color is on turn.
#![allow(dead_code)]

use quarrel::board::{Board, Color, Piece};
use quarrel::error::ArbiterError;
use quarrel::game::{Game, Round};
use quarrel::square::Square;

pub struct Match {
    pub game: Game,
    pub truth: Board,
}

impl Match {
    pub fn new() -> Match {
        let mut game = Game::new("g1", "room", "alice");
        game.join("bob").expect("join");
        game.assign_colors("alice", "bob").expect("assign colors");
        Match {
            game,
            truth: Board::initial(),
        }
    }

    /// Move a piece on the truth board, White coordinates.
    pub fn apply(&mut self, from: u8, to: u8) {
        let from = Square::from_index(from);
        let to = Square::from_index(to);
        self.truth[to] = self.truth[from];
        self.truth[from] = Piece::Empty;
    }

    pub fn clear(&mut self, at: u8) {
        self.truth[Square::from_index(at)] = Piece::Empty;
    }

    /// Submit the current truth board as the next round for `color`.
    pub fn submit(&mut self, color: Color) -> Result<Round, ArbiterError> {
        let step = self.game.step + 1;
        let board = match color {
            Color::White => self.truth.clone(),
            Color::Black => self.truth.to_opponent_view(),
        };
        self.game.submit_round(color, step, &board).cloned()
    }

    /// Apply one plain move and submit it.
    pub fn play(&mut self, color: Color, from: u8, to: u8) -> Result<Round, ArbiterError> {
        self.apply(from, to);
        self.submit(color)
    }
}

pub mod arbiter;

use crate::board::{Board, Color};
use crate::error::ArbiterError;
use crate::square::Square;

/// Outcome marker carried on every round. Stays `None` while the game is
/// live; a terminal round freezes the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winner {
    #[default]
    None,
    Tie,
    White,
    Black,
}

impl Winner {
    pub fn is_decided(self) -> bool {
        self != Winner::None
    }

    /// Wire spelling: "", "tie", "White" or "Black".
    pub fn as_str(self) -> &'static str {
        match self {
            Winner::None => "",
            Winner::Tie => "tie",
            Winner::White => "White",
            Winner::Black => "Black",
        }
    }
}

impl From<Color> for Winner {
    fn from(color: Color) -> Winner {
        match color {
            Color::White => Winner::White,
            Color::Black => Winner::Black,
        }
    }
}

/// Has-moved bookkeeping for one side's king and rooks, carried on that
/// side's rounds and re-derived after each of its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovedFlags {
    pub king: bool,
    pub left_rook: bool,
    pub right_rook: bool,
}

/// One accepted half-move and everything derived from it. Both perspective
/// renderings are stored so either player's history can be served without
/// recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub step: u32,
    pub board_white: Board,
    pub board_black: Board,
    /// Destination of the piece just moved, in each perspective.
    pub prev_piece_white: Option<Square>,
    pub prev_piece_black: Option<Square>,
    /// Capture target armed for exactly the next round, in the next
    /// mover's coordinates.
    pub en_passant: Option<Square>,
    /// Whether this position puts the side to move in check.
    pub check: bool,
    pub winner: Winner,
    /// Bookkeeping for this round's mover, carried forward.
    pub moved: MovedFlags,
    /// Castle eligibility for the next mover.
    pub castle_left: bool,
    pub castle_right: bool,
}

impl Round {
    /// Step-0 ledger entry: the standard start position, nothing moved yet,
    /// no castle window open for White's first move.
    pub fn initial() -> Round {
        let board_white = Board::initial();
        let board_black = board_white.to_opponent_view();
        Round {
            step: 0,
            board_white,
            board_black,
            prev_piece_white: None,
            prev_piece_black: None,
            en_passant: None,
            check: false,
            winner: Winner::None,
            moved: MovedFlags::default(),
            castle_left: false,
            castle_right: false,
        }
    }

    pub fn board_for(&self, color: Color) -> &Board {
        match color {
            Color::White => &self.board_white,
            Color::Black => &self.board_black,
        }
    }

    pub fn prev_piece_for(&self, color: Color) -> Option<Square> {
        match color {
            Color::White => self.prev_piece_white,
            Color::Black => self.prev_piece_black,
        }
    }
}

/// Which side owns a given step: odd steps are White's, even steps Black's
/// (step 0 is the initial layout, nobody's move).
pub fn turn_for_step(step: u32) -> Color {
    if step % 2 == 1 {
        Color::White
    } else {
        Color::Black
    }
}

/// Where a game currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Colors not yet assigned; no ledger exists.
    AwaitingColors,
    AwaitingMove { step: u32, turn: Color },
    Checkmate { winner: Color },
    Stalemate,
}

/// A game room with its assigned players and the append-only round ledger.
/// `history.len() == step + 1` whenever the ledger exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: String,
    pub room_name: String,
    pub creator: String,
    pub participant: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub started: bool,
    pub step: u32,
    pub history: Vec<Round>,
}

impl Game {
    pub fn new(id: &str, room_name: &str, creator: &str) -> Game {
        Game {
            id: id.to_string(),
            room_name: room_name.to_string(),
            creator: creator.to_string(),
            participant: None,
            white: None,
            black: None,
            started: false,
            step: 0,
            history: Vec::new(),
        }
    }

    /// Seat the second player.
    pub fn join(&mut self, participant: &str) -> Result<(), ArbiterError> {
        if self.participant.is_some() {
            return Err(ArbiterError::InvalidInput(
                "game already has a participant".to_string(),
            ));
        }
        self.participant = Some(participant.to_string());
        self.started = true;
        Ok(())
    }

    /// Record the color assignment chosen upstream and lay out the first
    /// round. The core does not pick colors itself.
    pub fn assign_colors(&mut self, white: &str, black: &str) -> Result<(), ArbiterError> {
        let seated = |user: &str| user == self.creator || self.participant.as_deref() == Some(user);
        if !seated(white) || !seated(black) || white == black {
            return Err(ArbiterError::InvalidInput(
                "colors must go to the two seated players".to_string(),
            ));
        }
        self.white = Some(white.to_string());
        self.black = Some(black.to_string());
        self.step = 0;
        self.history = vec![Round::initial()];
        Ok(())
    }

    pub fn color_of(&self, user: &str) -> Option<Color> {
        if self.white.as_deref() == Some(user) {
            Some(Color::White)
        } else if self.black.as_deref() == Some(user) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn last_round(&self) -> Option<&Round> {
        self.history.last()
    }

    pub fn status(&self) -> GameStatus {
        let Some(last) = self.history.last() else {
            return GameStatus::AwaitingColors;
        };
        match last.winner {
            Winner::Tie => GameStatus::Stalemate,
            Winner::White => GameStatus::Checkmate {
                winner: Color::White,
            },
            Winner::Black => GameStatus::Checkmate {
                winner: Color::Black,
            },
            Winner::None => GameStatus::AwaitingMove {
                step: self.step + 1,
                turn: turn_for_step(self.step + 1),
            },
        }
    }

    /// Ledger append: validate turn order, arbitrate the submitted board,
    /// and commit the new round. Any rejection leaves the game untouched.
    pub fn submit_round(
        &mut self,
        color: Color,
        step: u32,
        board: &Board,
    ) -> Result<&Round, ArbiterError> {
        match self.status() {
            GameStatus::AwaitingColors => {
                return Err(ArbiterError::InvalidInput(
                    "game has not started".to_string(),
                ));
            }
            GameStatus::Checkmate { .. } | GameStatus::Stalemate => {
                return Err(ArbiterError::GameFinished);
            }
            GameStatus::AwaitingMove { .. } => {}
        }
        if step != self.step + 1 || turn_for_step(step) != color {
            return Err(ArbiterError::OutOfTurn { step, color });
        }

        let round = arbiter::arbitrate(&self.history, color, step, board)?;
        self.history.push(round);
        self.step = step;
        // push succeeded, so last() exists
        self.history
            .last()
            .ok_or_else(|| ArbiterError::Persistence("history empty after append".to_string()))
    }
}

use crate::board::Color;
use thiserror::Error;

/// Every way a round submission can fail. Rule failures are all-or-nothing:
/// the game state is untouched and only the submitting side hears about it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArbiterError {
    #[error("invalid round payload: {0}")]
    InvalidInput(String),

    #[error("illegal move")]
    IllegalMove,

    #[error("illegal capture")]
    IllegalCapture,

    #[error("illegal piece")]
    IllegalPiece,

    #[error("illegal castle: {0}")]
    IllegalCastle(&'static str),

    #[error("move leaves own king in check")]
    SelfCheck,

    #[error("round {step} is out of turn for {color}")]
    OutOfTurn { step: u32, color: Color },

    #[error("game is already decided")]
    GameFinished,

    #[error("not found: {0}")]
    NotFound(String),

    /// Storage-layer failure, surfaced as-is; retry policy belongs to the
    /// caller, not the core.
    #[error("storage failure: {0}")]
    Persistence(String),
}

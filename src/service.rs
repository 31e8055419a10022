//! Round submission front door, tying store, arbiter and transport together.
//!
//! The service trusts its caller for identity: `user_id` arrives already
//! authenticated, and the game's color assignment decides which side the
//! submission plays for. After a commit it renders both perspective views
//! and hands the opponent's to the injected sink; on any rejection nothing
//! is delivered anywhere.

use crate::board::Color;
use crate::error::ArbiterError;
use crate::game::GameStatus;
use crate::store::GameStore;
use crate::wire::{GameView, RoundSubmission};
use tracing::{debug, instrument};

/// Realtime transport collaborator: receives the opponent's refreshed view
/// after a committed round, keyed by user identity. Injected so the core
/// never reaches into transport-global session state.
pub trait RoundSink {
    fn deliver(&self, user_id: &str, view: &GameView);
}

impl<T: RoundSink> RoundSink for std::sync::Arc<T> {
    fn deliver(&self, user_id: &str, view: &GameView) {
        (**self).deliver(user_id, view);
    }
}

/// Sink for callers that poll instead of push.
pub struct NullSink;

impl RoundSink for NullSink {
    fn deliver(&self, _user_id: &str, _view: &GameView) {}
}

/// What the submitting side gets back from an accepted round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub color: Color,
    pub my_view: GameView,
    pub opponent_view: GameView,
    pub opponent_id: Option<String>,
}

pub struct MatchService<S: GameStore, N: RoundSink> {
    store: S,
    sink: N,
}

impl<S: GameStore, N: RoundSink> MatchService<S, N> {
    pub fn new(store: S, sink: N) -> MatchService<S, N> {
        MatchService { store, sink }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Arbitrate one submitted round for `user_id` on `game_id`. Loads a
    /// snapshot, validates and arbitrates against it, then commits through
    /// the store's compare-and-append so a racing submission cannot
    /// double-advance the ledger.
    #[instrument(skip(self, submission), fields(step = submission.step))]
    pub fn submit_round(
        &self,
        game_id: &str,
        user_id: &str,
        submission: &RoundSubmission,
    ) -> Result<RoundOutcome, ArbiterError> {
        let mut game = self.store.load(game_id)?;
        let color = game.color_of(user_id).ok_or_else(|| {
            ArbiterError::NotFound(format!("user {user_id} is not seated in game {game_id}"))
        })?;
        let board = submission.parse_board()?;

        let expected_step = game.step;
        let round = game
            .submit_round(color, submission.step, &board)?
            .clone();
        self.store.commit_round(game_id, expected_step, round)?;
        debug!(step = submission.step, %color, "round committed");

        let my_view = GameView::render(&game, color);
        let opponent_view = GameView::render(&game, color.opposite());
        let opponent_id = match color {
            Color::White => game.black.clone(),
            Color::Black => game.white.clone(),
        };
        if let Some(opponent) = &opponent_id {
            self.sink.deliver(opponent, &opponent_view);
        }

        Ok(RoundOutcome {
            color,
            my_view,
            opponent_view,
            opponent_id,
        })
    }

    /// The game as `user_id` sees it: their color plus their perspective
    /// rendering of the whole history.
    pub fn game_view(&self, game_id: &str, user_id: &str) -> Result<(Color, GameView), ArbiterError> {
        let game = self.store.load(game_id)?;
        let color = game.color_of(user_id).ok_or_else(|| {
            ArbiterError::NotFound(format!("user {user_id} is not seated in game {game_id}"))
        })?;
        Ok((color, GameView::render(&game, color)))
    }

    pub fn status(&self, game_id: &str) -> Result<GameStatus, ArbiterError> {
        Ok(self.store.load(game_id)?.status())
    }
}

//! Persistence collaborator.
//!
//! The core never talks to storage directly; it loads a snapshot, does its
//! synchronous work, and commits through a compare-and-append keyed on the
//! step it loaded. Two racing submissions for one game cannot both commit:
//! the second one's expected step no longer matches.

use crate::error::ArbiterError;
use crate::game::{Game, Round, turn_for_step};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub trait GameStore: Send + Sync {
    /// Snapshot of the game, including the prior round and carried flags.
    fn load(&self, id: &str) -> Result<Game, ArbiterError>;

    /// Append `round` and advance the step, but only while the persisted
    /// step still equals `expected_step`. A lost race surfaces as
    /// `OutOfTurn`; storage trouble as `Persistence`.
    fn commit_round(&self, id: &str, expected_step: u32, round: Round)
    -> Result<(), ArbiterError>;
}

/// In-memory store with one lock per game, good for tests and the replay
/// CLI. A real deployment would back this trait with a database
/// transaction instead.
#[derive(Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<String, Arc<Mutex<Game>>>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn put(&self, game: Game) -> Result<(), ArbiterError> {
        let mut games = self
            .games
            .lock()
            .map_err(|_| ArbiterError::Persistence("store lock poisoned".to_string()))?;
        games.insert(game.id.clone(), Arc::new(Mutex::new(game)));
        Ok(())
    }

    fn entry(&self, id: &str) -> Result<Arc<Mutex<Game>>, ArbiterError> {
        let games = self
            .games
            .lock()
            .map_err(|_| ArbiterError::Persistence("store lock poisoned".to_string()))?;
        games
            .get(id)
            .cloned()
            .ok_or_else(|| ArbiterError::NotFound(format!("game {id}")))
    }
}

impl GameStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Game, ArbiterError> {
        let entry = self.entry(id)?;
        let game = entry
            .lock()
            .map_err(|_| ArbiterError::Persistence("game lock poisoned".to_string()))?;
        Ok(game.clone())
    }

    fn commit_round(
        &self,
        id: &str,
        expected_step: u32,
        round: Round,
    ) -> Result<(), ArbiterError> {
        if round.step != expected_step + 1 {
            return Err(ArbiterError::InvalidInput(format!(
                "round step {} does not follow step {expected_step}",
                round.step
            )));
        }
        let entry = self.entry(id)?;
        let mut game = entry
            .lock()
            .map_err(|_| ArbiterError::Persistence("game lock poisoned".to_string()))?;
        if game.step != expected_step {
            return Err(ArbiterError::OutOfTurn {
                step: round.step,
                color: turn_for_step(round.step),
            });
        }
        game.step = round.step;
        game.history.push(round);
        Ok(())
    }
}

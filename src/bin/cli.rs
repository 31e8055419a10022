//! Replay a recorded match against the arbitration engine.
//!
//! Usage: quarrel <rounds.json>
//!
//! The file holds a JSON array of round submissions, each `{step, board}`
//! with the board in the submitting player's perspective, alternating
//! White (odd steps) and Black (even steps) from step 1 on. Replay stops
//! at the first rejection.

use quarrel::game::{Game, GameStatus};
use quarrel::logger::init_logging;
use quarrel::service::{MatchService, NullSink};
use quarrel::store::MemoryStore;
use quarrel::wire::RoundSubmission;
use std::process::ExitCode;

const GAME_ID: &str = "replay";
const WHITE_PLAYER: &str = "white-player";
const BLACK_PLAYER: &str = "black-player";

fn main() -> ExitCode {
    init_logging("logs/quarrel.log", "quarrel=debug");

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: quarrel <rounds.json>");
        return ExitCode::from(2);
    };
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("cannot read {path}: {err}");
            return ExitCode::from(2);
        }
    };
    let rounds: Vec<RoundSubmission> = match serde_json::from_str(&data) {
        Ok(rounds) => rounds,
        Err(err) => {
            eprintln!("cannot parse {path}: {err}");
            return ExitCode::from(2);
        }
    };

    let store = MemoryStore::new();
    let mut game = Game::new(GAME_ID, "replay room", WHITE_PLAYER);
    let seated = game
        .join(BLACK_PLAYER)
        .and_then(|()| game.assign_colors(WHITE_PLAYER, BLACK_PLAYER));
    if let Err(err) = seated {
        eprintln!("cannot set up replay game: {err}");
        return ExitCode::FAILURE;
    }
    if let Err(err) = store.put(game) {
        eprintln!("cannot seed store: {err}");
        return ExitCode::FAILURE;
    }

    let service = MatchService::new(store, NullSink);
    for submission in &rounds {
        let user = if submission.step % 2 == 1 {
            WHITE_PLAYER
        } else {
            BLACK_PLAYER
        };
        match service.submit_round(GAME_ID, user, submission) {
            Ok(outcome) => {
                let last = outcome.my_view.history.last();
                let check = last.is_some_and(|r| r.check);
                println!(
                    "step {:>3} {:<5} ok{}",
                    submission.step,
                    outcome.color.to_string(),
                    if check { " (check)" } else { "" }
                );
            }
            Err(err) => {
                println!("step {:>3} rejected: {err}", submission.step);
                return ExitCode::FAILURE;
            }
        }
    }

    match service.status(GAME_ID) {
        Ok(GameStatus::Checkmate { winner }) => println!("checkmate, {winner} wins"),
        Ok(GameStatus::Stalemate) => println!("stalemate, tie"),
        Ok(GameStatus::AwaitingMove { step, turn }) => {
            println!("in play, awaiting step {step} from {turn}")
        }
        Ok(GameStatus::AwaitingColors) => println!("awaiting colors"),
        Err(err) => {
            eprintln!("cannot read final status: {err}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

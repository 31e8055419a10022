use quarrel::board::{Board, Color, Piece};
use quarrel::error::ArbiterError;
use quarrel::game::{Game, GameStatus};
use quarrel::service::{MatchService, NullSink, RoundSink};
use quarrel::square::Square;
use quarrel::store::MemoryStore;
use quarrel::wire::{GameView, RoundSubmission};
use std::sync::{Arc, Mutex};

struct RecordingSink {
    deliveries: Mutex<Vec<(String, GameView)>>,
}

impl RecordingSink {
    fn new() -> RecordingSink {
        RecordingSink {
            deliveries: Mutex::new(Vec::new()),
        }
    }
}

impl RoundSink for RecordingSink {
    fn deliver(&self, user_id: &str, view: &GameView) {
        self.deliveries
            .lock()
            .expect("sink lock")
            .push((user_id.to_string(), view.clone()));
    }
}

fn seeded_store() -> MemoryStore {
    let mut game = Game::new("g1", "room", "alice");
    game.join("bob").expect("join");
    game.assign_colors("alice", "bob").expect("colors");
    let store = MemoryStore::new();
    store.put(game).expect("put");
    store
}

fn after_move(from: u8, to: u8) -> Board {
    let mut board = Board::initial();
    board[Square::from_index(to)] = board[Square::from_index(from)];
    board[Square::from_index(from)] = Piece::Empty;
    board
}

#[test]
fn an_accepted_round_reaches_the_opponent() {
    let sink = Arc::new(RecordingSink::new());
    let service = MatchService::new(seeded_store(), Arc::clone(&sink));

    let submission = RoundSubmission::from_board(1, &after_move(52, 36));
    let outcome = service
        .submit_round("g1", "alice", &submission)
        .expect("e4");

    assert_eq!(outcome.color, Color::White);
    assert_eq!(outcome.opponent_id.as_deref(), Some("bob"));
    assert_eq!(outcome.my_view.step, 1);
    assert_eq!(outcome.my_view.history[1].prev_piece, 36);
    assert_eq!(outcome.opponent_view.history[1].prev_piece, 27);

    let deliveries = sink.deliveries.lock().expect("sink lock");
    assert_eq!(deliveries.len(), 1);
    let (user, view) = &deliveries[0];
    assert_eq!(user, "bob");
    assert_eq!(view, &outcome.opponent_view);
}

#[test]
fn rejections_deliver_nothing() {
    let sink = Arc::new(RecordingSink::new());
    let service = MatchService::new(seeded_store(), Arc::clone(&sink));

    // Black trying to open.
    let view = service
        .game_view("g1", "bob")
        .expect("view")
        .1
        .history[0]
        .board
        .clone();
    let submission = RoundSubmission { step: 1, board: view };
    assert!(service.submit_round("g1", "bob", &submission).is_err());
    assert!(sink.deliveries.lock().expect("sink lock").is_empty());
}

#[test]
fn unseated_users_are_not_found() {
    let service = MatchService::new(seeded_store(), NullSink);
    let submission = RoundSubmission::from_board(1, &after_move(52, 36));
    assert!(matches!(
        service.submit_round("g1", "mallory", &submission),
        Err(ArbiterError::NotFound(_))
    ));
    assert!(matches!(
        service.game_view("g1", "mallory"),
        Err(ArbiterError::NotFound(_))
    ));
}

#[test]
fn missing_games_are_not_found() {
    let service = MatchService::new(MemoryStore::new(), NullSink);
    let submission = RoundSubmission::from_board(1, &after_move(52, 36));
    assert!(matches!(
        service.submit_round("nope", "alice", &submission),
        Err(ArbiterError::NotFound(_))
    ));
    assert!(matches!(
        service.status("nope"),
        Err(ArbiterError::NotFound(_))
    ));
}

#[test]
fn status_tracks_the_persisted_game() {
    let service = MatchService::new(seeded_store(), NullSink);
    assert_eq!(
        service.status("g1").expect("status"),
        GameStatus::AwaitingMove {
            step: 1,
            turn: Color::White
        }
    );

    let submission = RoundSubmission::from_board(1, &after_move(52, 36));
    service.submit_round("g1", "alice", &submission).expect("e4");
    assert_eq!(
        service.status("g1").expect("status"),
        GameStatus::AwaitingMove {
            step: 2,
            turn: Color::Black
        }
    );

    // Each side reads its own perspective from the same store.
    let (color, white_view) = service.game_view("g1", "alice").expect("white view");
    assert_eq!(color, Color::White);
    assert_eq!(white_view.history[1].board[36], "P1");
    let (color, black_view) = service.game_view("g1", "bob").expect("black view");
    assert_eq!(color, Color::Black);
    assert_eq!(black_view.history[1].board[27], "P2");
}

#[test]
fn a_replayed_step_loses_the_commit_race() {
    let service = MatchService::new(seeded_store(), NullSink);
    let submission = RoundSubmission::from_board(1, &after_move(52, 36));
    service.submit_round("g1", "alice", &submission).expect("e4");

    // The same submission again arbitrates against the advanced ledger.
    assert!(matches!(
        service.submit_round("g1", "alice", &submission),
        Err(ArbiterError::OutOfTurn { .. })
    ));
}

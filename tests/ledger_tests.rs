mod common;

use common::Match;
use quarrel::board::{Board, Color};
use quarrel::error::ArbiterError;
use quarrel::game::{Game, GameStatus, turn_for_step};

#[test]
fn odd_steps_belong_to_white() {
    assert_eq!(turn_for_step(1), Color::White);
    assert_eq!(turn_for_step(2), Color::Black);
    assert_eq!(turn_for_step(7), Color::White);
    assert_eq!(turn_for_step(0), Color::Black);
}

#[test]
fn a_game_needs_colors_before_rounds() {
    let mut game = Game::new("g1", "room", "alice");
    game.join("bob").expect("join");

    assert_eq!(game.status(), GameStatus::AwaitingColors);
    let res = game.submit_round(Color::White, 1, &Board::initial());
    assert!(matches!(res, Err(ArbiterError::InvalidInput(_))));
}

#[test]
fn only_seated_players_can_take_colors() {
    let mut game = Game::new("g1", "room", "alice");
    game.join("bob").expect("join");

    assert!(game.assign_colors("alice", "mallory").is_err());
    assert!(game.assign_colors("alice", "alice").is_err());
    assert!(game.assign_colors("alice", "bob").is_ok());

    assert_eq!(game.color_of("alice"), Some(Color::White));
    assert_eq!(game.color_of("bob"), Some(Color::Black));
    assert_eq!(game.color_of("mallory"), None);
}

#[test]
fn a_second_join_is_rejected() {
    let mut game = Game::new("g1", "room", "alice");
    game.join("bob").expect("join");
    assert!(game.join("mallory").is_err());
}

#[test]
fn the_ledger_starts_with_the_initial_layout() {
    let m = Match::new();
    assert_eq!(m.game.step, 0);
    assert_eq!(m.game.history.len(), 1);
    assert_eq!(m.game.history[0].board_white, Board::initial());
    assert_eq!(
        m.game.status(),
        GameStatus::AwaitingMove {
            step: 1,
            turn: Color::White
        }
    );
}

#[test]
fn out_of_turn_submissions_are_rejected() {
    let mut m = Match::new();

    // Black cannot open.
    let board = m.truth.to_opponent_view();
    assert_eq!(
        m.game.submit_round(Color::Black, 1, &board),
        Err(ArbiterError::OutOfTurn {
            step: 1,
            color: Color::Black
        })
    );

    // White cannot skip ahead or replay a step.
    m.apply(52, 44);
    let board = m.truth.clone();
    assert!(matches!(
        m.game.submit_round(Color::White, 3, &board),
        Err(ArbiterError::OutOfTurn { .. })
    ));
    assert!(matches!(
        m.game.submit_round(Color::White, 0, &board),
        Err(ArbiterError::OutOfTurn { .. })
    ));

    m.submit(Color::White).expect("e3");
    assert_eq!(m.game.step, 1);

    // White cannot move twice in a row.
    m.apply(51, 43);
    assert!(matches!(
        m.submit(Color::White),
        Err(ArbiterError::OutOfTurn { .. })
    ));
}

#[test]
fn a_rejected_round_leaves_the_game_untouched() {
    let mut m = Match::new();
    m.play(Color::White, 52, 44).expect("e3");

    let before = m.game.clone();

    // Illegal board from the right player at the right step.
    m.apply(12, 36); // black pawn teleports
    assert!(m.submit(Color::Black).is_err());
    assert_eq!(m.game, before);
}

#[test]
fn accepted_rounds_advance_step_and_history_together() {
    let mut m = Match::new();
    m.play(Color::White, 52, 44).expect("e3");
    m.play(Color::Black, 12, 20).expect("e6");
    m.play(Color::White, 51, 43).expect("d3");

    assert_eq!(m.game.step, 3);
    assert_eq!(m.game.history.len(), 4);
    for (idx, round) in m.game.history.iter().enumerate() {
        assert_eq!(round.step as usize, idx);
    }
    // Both perspectives of every round agree under reflection.
    for round in &m.game.history {
        assert_eq!(round.board_white.to_opponent_view(), round.board_black);
    }
}

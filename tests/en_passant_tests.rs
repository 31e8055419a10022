mod common;

use common::Match;
use quarrel::board::{Board, Color, Piece, PieceKind};
use quarrel::error::ArbiterError;
use quarrel::rules::castle::CastleRights;
use quarrel::rules::mobility::opponent_can_move;
use quarrel::square::Square;

fn sq(idx: u8) -> Square {
    Square::from_index(idx)
}

#[test]
fn a_double_step_arms_the_target_for_one_round() {
    let mut m = Match::new();

    m.play(Color::White, 52, 36).expect("e4");
    m.play(Color::Black, 8, 16).expect("a6");
    m.play(Color::White, 36, 28).expect("e5");
    let r4 = m.play(Color::Black, 11, 27).expect("d5");

    // The skipped square, already in White's coordinates.
    assert_eq!(r4.en_passant, Some(sq(19)));

    m.apply(28, 19);
    m.clear(27);
    let r5 = m.submit(Color::White).expect("exd6 e.p.");

    assert_eq!(r5.prev_piece_white, Some(sq(19)));
    assert_eq!(r5.board_white[sq(19)], Piece::Own(PieceKind::Pawn));
    assert!(r5.board_white[sq(27)].is_empty());
    assert!(r5.board_white[sq(28)].is_empty());
    assert_eq!(r5.en_passant, None);
}

#[test]
fn a_declined_en_passant_window_closes() {
    let mut m = Match::new();

    m.play(Color::White, 52, 36).expect("e4");
    m.play(Color::Black, 8, 16).expect("a6");
    m.play(Color::White, 36, 28).expect("e5");
    let r4 = m.play(Color::Black, 11, 27).expect("d5");
    assert_eq!(r4.en_passant, Some(sq(19)));

    // White does something else; the window closes on that round.
    let r5 = m.play(Color::White, 62, 45).expect("Nf3");
    assert_eq!(r5.en_passant, None);
    m.play(Color::Black, 16, 24).expect("a5");

    // The capture shape is now just an unexplainable 3-square diff.
    m.apply(28, 19);
    m.clear(27);
    assert_eq!(m.submit(Color::White), Err(ArbiterError::IllegalPiece));
}

#[test]
fn an_armed_capture_counts_as_mobility() {
    // White-perspective position after d2-d4: Black's king is sealed in
    // the corner, the e4 pawn is blocked, and only the en-passant capture
    // on d3 remains.
    let mut board = Board::empty();
    board[Square::from_index(0)] = Piece::Enemy(PieceKind::King);
    board[Square::from_index(17)] = Piece::Own(PieceKind::Queen);
    board[Square::from_index(18)] = Piece::Own(PieceKind::King);
    board[Square::from_index(35)] = Piece::Own(PieceKind::Pawn);
    board[Square::from_index(36)] = Piece::Enemy(PieceKind::Pawn);
    board[Square::from_index(44)] = Piece::Own(PieceKind::Pawn);
    let opponent = board.to_opponent_view();

    // d3 in Black's coordinates.
    let target = Some(Square::from_index(20));
    assert!(opponent_can_move(&board, &opponent, target, CastleRights::NONE));
    assert!(!opponent_can_move(&board, &opponent, None, CastleRights::NONE));
}

#[test]
fn black_captures_en_passant_too() {
    let mut m = Match::new();

    m.play(Color::White, 62, 45).expect("Nf3");
    m.play(Color::Black, 11, 27).expect("d5");
    m.play(Color::White, 52, 44).expect("e3");
    m.play(Color::Black, 27, 35).expect("d4");
    let r5 = m.play(Color::White, 50, 34).expect("c4");

    // Target in Black's coordinates: c3 mirrors to index 21.
    assert_eq!(r5.en_passant, Some(sq(21)));

    m.apply(35, 42);
    m.clear(34);
    let r6 = m.submit(Color::Black).expect("...dxc3 e.p.");

    assert_eq!(r6.prev_piece_black, Some(sq(21)));
    assert_eq!(r6.prev_piece_white, Some(sq(42)));
    assert_eq!(r6.board_white[sq(42)], Piece::Enemy(PieceKind::Pawn));
    assert!(r6.board_white[sq(34)].is_empty());
}

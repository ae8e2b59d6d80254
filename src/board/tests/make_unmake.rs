//! Make/unmake move tests.

use super::sq;
use crate::board::{Board, CastlingRights, Color, ColoredPiece, Piece, UndoRecord};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn play(board: &mut Board, moves: &[&str]) -> Vec<UndoRecord> {
    moves
        .iter()
        .map(|m| {
            let mv = board.parse_move(m).expect("legal move");
            board.make_move(mv)
        })
        .collect()
}

#[test]
fn test_every_move_round_trips() {
    for fen in [
        KIWIPETE,
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
    ] {
        let mut board = Board::from_fen(fen);
        let original = board.clone();
        for mv in board.generate_moves() {
            let record = board.make_move(mv);
            assert!(board.position().is_consistent(), "{mv} broke the position");
            assert_eq!(board.hash(), board.compute_hash(), "{mv} broke the hash");
            board.undo_move(record);
            assert_eq!(board, original, "{mv} did not undo cleanly");
        }
    }
}

#[test]
fn test_king_move_drops_both_rights() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let record = board.apply_move(sq("e1"), sq("d1")).unwrap();
    assert!(!board.castling_rights().has(Color::White, true));
    assert!(!board.castling_rights().has(Color::White, false));
    assert!(board.castling_rights().has(Color::Black, true));
    board.undo_move(record);
    assert_eq!(board.castling_rights(), CastlingRights::all());
}

#[test]
fn test_rook_move_and_rook_capture_drop_one_right() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let _ = play(&mut board, &["h1h8"]);
    let rights = board.castling_rights();
    assert!(!rights.has(Color::White, true));
    assert!(rights.has(Color::White, false));
    assert!(!rights.has(Color::Black, true));
    assert!(rights.has(Color::Black, false));
}

#[test]
fn test_castling_queenside_for_black() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    let record = board.apply_move(sq("e8"), sq("c8")).unwrap();
    assert_eq!(
        board.piece_at(sq("d8")),
        Some(ColoredPiece::new(Piece::Rook, Color::Black))
    );
    assert_eq!(board.piece_at(sq("a8")), None);
    assert_eq!(board.to_fen(), "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 1 2");
    board.undo_move(record);
    assert_eq!(board.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
}

#[test]
fn test_capture_promotion_round_trip() {
    let mut board = Board::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1");
    let original = board.clone();
    let record = board
        .apply_move_with_promotion(sq("g2"), sq("h1"), Some(Piece::Rook))
        .unwrap();
    assert_eq!(
        record.captured(),
        Some(ColoredPiece::new(Piece::Knight, Color::White))
    );
    assert_eq!(
        board.piece_at(sq("h1")),
        Some(ColoredPiece::new(Piece::Rook, Color::Black))
    );
    assert_eq!(board.hash(), board.compute_hash());
    board.undo_move(record);
    assert_eq!(board, original);
}

#[test]
fn test_transposition_reaches_same_hash() {
    let mut a = Board::new();
    let mut b = Board::new();
    let _ = play(&mut a, &["g1f3", "g8f6", "b1c3", "b8c6"]);
    let _ = play(&mut b, &["b1c3", "b8c6", "g1f3", "g8f6"]);
    assert_eq!(a.hash(), b.hash());
    assert_eq!(a.to_fen(), b.to_fen());
}

#[test]
fn test_hash_sees_side_castling_and_en_passant() {
    let base = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let side = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    let rights = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1");
    assert_ne!(base.hash(), side.hash());
    assert_ne!(base.hash(), rights.hash());

    let mut pushed = Board::new();
    let _ = play(&mut pushed, &["e2e4"]);
    let no_ep = Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    assert_ne!(pushed.hash(), no_ep.hash());
}

#[test]
fn test_undo_in_reverse_order_restores_start() {
    let mut board = Board::new();
    let records = play(&mut board, &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5"]);
    for record in records.into_iter().rev() {
        board.undo_move(record);
    }
    assert_eq!(board, Board::new());
}

#[test]
fn test_fifty_move_draw_follows_halfmove_clock() {
    let mut board = Board::from_fen("7k/8/8/8/8/8/Q7/7K w - - 99 80");
    assert!(!board.is_fifty_move_draw());

    let records = play(&mut board, &["h1g1"]);
    assert_eq!(board.halfmove_clock(), 100);
    assert!(board.is_fifty_move_draw());

    board.undo_move(records.into_iter().next().expect("one move"));
    assert!(!board.is_fifty_move_draw());

    // A pawn move or capture resets the clock
    let mut pawn = Board::from_fen("7k/8/8/8/8/8/P7/7K w - - 99 80");
    let _ = play(&mut pawn, &["a2a3"]);
    assert!(!pawn.is_fifty_move_draw());
}

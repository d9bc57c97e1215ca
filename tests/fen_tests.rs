//! FEN adapter: parsing, validation, rendering, and mirroring.

use std::str::FromStr;

use ninebase::board::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color, fen, square};
use ninebase::error::{BoardError, FenError};

#[test]
fn parses_a_full_position() {
    let b = Board::from_str("8/2b5/8/8/3P4/pPP5/P7/2k1K3 w - - 0 1").unwrap();
    assert_eq!(b.side_to_move, Color::White);
    assert_eq!(b.num_pieces, 9);
    assert_eq!(b.wk, square(0, 4) as u8);
    assert_eq!(b.bk, square(0, 2) as u8);
    assert_eq!(b.count(Color::White, ninebase::Piece::Pawn), 4);
    assert_eq!(b.count(Color::Black, ninebase::Piece::Pawn), 1);
    assert_eq!(b.count(Color::Black, ninebase::Piece::Bishop), 1);
    assert_eq!(b.strength, [4, 4]);
}

#[test]
fn round_trips_through_render() {
    for s in [
        "8/2b5/8/8/3P4/pPP5/P7/2k1K3 w - - 0 1",
        "4k3/8/8/8/4Pp2/8/8/6K1 b - e3 0 1",
        "r3k3/8/8/8/8/8/8/4K2R w Kq - 4 30",
    ] {
        let b = Board::from_str(s).unwrap();
        assert_eq!(fen::render(&b), s);
    }
}

#[test]
fn clocks_default_when_omitted() {
    let b = Board::from_str("7k/8/8/8/8/8/8/Q3K3 w - -").unwrap();
    assert_eq!(b.halfmove_clock, 0);
    assert_eq!(b.fullmove_number, 1);
}

#[test]
fn rejects_malformed_fields() {
    assert!(matches!(
        Board::from_str("8/8/8/8/8/8/8 w - -"),
        Err(FenError::Placement(_))
    ));
    assert!(matches!(
        Board::from_str("7k/8/8/8/8/8/8/Q3K3 x - -"),
        Err(FenError::SideToMove(_))
    ));
    assert!(matches!(
        Board::from_str("7k/8/8/8/8/8/8/Q3K3 w - e9"),
        Err(FenError::EnPassant(_))
    ));
}

#[test]
fn rejects_illegal_boards() {
    assert!(matches!(
        Board::from_str("8/8/8/8/8/8/8/KQ6 w - -"),
        Err(FenError::Board(BoardError::KingCount(Color::Black, 0)))
    ));
    assert!(matches!(
        Board::from_str("7k/8/8/8/8/8/8/KK6 w - -"),
        Err(FenError::Board(BoardError::KingCount(Color::White, 2)))
    ));
    assert!(matches!(
        Board::from_str("8/8/8/8/8/8/8/Kk6 w - -"),
        Err(FenError::Board(BoardError::KingsAdjacent))
    ));
    assert!(matches!(
        Board::from_str("P6k/8/8/8/8/8/8/K7 w - -"),
        Err(FenError::Board(BoardError::PawnOnEdgeRank))
    ));
}

#[test]
fn mirror_is_an_involution() {
    let b = Board::from_str("4k3/8/8/8/4Pp2/8/8/6K1 b - e3 0 1").unwrap();
    let m = b.mirrored();
    assert_eq!(m.side_to_move, Color::White);
    assert_eq!(m.count(Color::Black, ninebase::Piece::Pawn), 1);
    assert_eq!(m.mirrored(), b);
}

#[test]
fn mirror_swaps_castling_sides() {
    let b = Board::from_str("r3k3/8/8/8/8/8/8/4K2R w Kq - 0 1").unwrap();
    assert_eq!(b.castling, CASTLE_WK | CASTLE_BQ);
    let m = b.mirrored();
    assert_eq!(m.castling, CASTLE_BK | CASTLE_WQ);
}

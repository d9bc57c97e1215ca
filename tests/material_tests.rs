//! Material-info builder: placement order, the en-passant rewrite, pawn
//! shape recognition, variant enumeration, and invariance of the canonical
//! coordinate under board symmetries.

use std::str::FromStr;

use ninebase::board::{Board, NSQUARES, square};
use ninebase::index::registry::{BishopParity, PawnFileType};
use ninebase::material::MbInfo;
use ninebase::symmetry::{NSYMMETRIES, SYMMETRY};

fn board(fen: &str) -> Board {
    Board::from_str(fen).unwrap()
}

#[test]
fn placements_follow_ending_order() {
    // White Qd4 Pe2, black Na7 pb7.
    let b = board("4k3/np6/8/8/3Q4/8/4P3/4K3 w - - 0 1");
    let info = MbInfo::from_board(&b).unwrap();
    // Kings first, then white pawn, black pawn, white queen, black knight,
    // all transformed by one common king canonicalization.
    assert_eq!(info.position.len(), 6);
    let sym = SYMMETRY.kk.transform(square(0, 4), square(7, 4));
    let map = SYMMETRY.transforms.map(sym as usize);
    assert_eq!(info.position[2], map[square(1, 4)] as usize);
    assert_eq!(info.position[3], map[square(6, 1)] as usize);
    assert_eq!(info.position[4], map[square(3, 3)] as usize);
    assert_eq!(info.position[5], map[square(6, 0)] as usize);
}

#[test]
fn en_passant_pawn_moves_to_virtual_rank() {
    // White just played e2-e4; black pawn f4 may capture en passant.
    let b = board("4k3/8/8/8/4Pp2/8/8/6K1 b - e3 0 1");
    assert_eq!(b.en_passant, Some(square(2, 4) as u8));
    let info = MbInfo::from_board(&b).unwrap();
    // The white pawn encodes on its zeroth rank, same file.
    let sym = SYMMETRY.kk.transform(square(0, 6), square(7, 4));
    let map = SYMMETRY.transforms.map(sym as usize);
    assert_eq!(info.position[2], map[square(0, 4)] as usize);
}

#[test]
fn non_capturable_ep_square_is_dropped() {
    // No black pawn beside e4, so the e3 marker is noise.
    let b = board("4k3/8/8/8/4P3/8/8/6K1 b - e3 0 1");
    assert_eq!(b.en_passant, None);
    let info = MbInfo::from_board(&b).unwrap();
    let sym = SYMMETRY.kk.transform(square(0, 6), square(7, 4));
    let map = SYMMETRY.transforms.map(sym as usize);
    assert_eq!(info.position[2], map[square(3, 4)] as usize);
}

#[test]
fn blocked_pair_recognized_with_both_variants() {
    // White Pe3 blocked by black pe4.
    let b = board("4k3/8/8/8/4p3/4P3/8/4K3 w - - 0 1");
    let info = MbInfo::from_board(&b).unwrap();
    assert_eq!(info.pawn_file_type, PawnFileType::Bp11);
    let kinds: Vec<_> = info.pawn_variants.iter().map(|v| v.kind).collect();
    assert_eq!(kinds, vec![PawnFileType::Op11, PawnFileType::Bp11]);
    assert!(info.pawn_variants.iter().all(|v| v.index.is_some()));
}

#[test]
fn opposing_pair_recognized() {
    let b = board("4k3/8/4p3/8/8/4P3/8/4K3 w - - 0 1");
    let info = MbInfo::from_board(&b).unwrap();
    assert_eq!(info.pawn_file_type, PawnFileType::Op11);
    let kinds: Vec<_> = info.pawn_variants.iter().map(|v| v.kind).collect();
    assert_eq!(kinds, vec![PawnFileType::Op11]);
}

#[test]
fn unrelated_pawns_stay_free() {
    let b = board("4k3/8/7p/8/8/4P3/8/4K3 w - - 0 1");
    let info = MbInfo::from_board(&b).unwrap();
    assert_eq!(info.pawn_file_type, PawnFileType::Free);
    assert!(info.pawn_variants.is_empty());
}

#[test]
fn doubled_pairs_prefer_the_specialized_table() {
    // b- and f-file pawns both opposed.
    let b = board("4k3/8/1p3p2/8/1P3P2/8/8/4K3 w - - 0 1");
    let info = MbInfo::from_board(&b).unwrap();
    assert_eq!(info.pawn_file_type, PawnFileType::Dp22);
    let kinds: Vec<_> = info.pawn_variants.iter().map(|v| v.kind).collect();
    assert_eq!(kinds, vec![PawnFileType::Op22, PawnFileType::Dp22]);
}

#[test]
fn pawnless_mixed_bishops_add_parity_variants() {
    // KBBNNvKQR with bishops on opposite square colors.
    let b = board("3qrk2/8/8/8/8/2BB4/2NN4/K7 w - - 0 1");
    let info = MbInfo::from_board(&b).unwrap();
    assert_eq!(info.parity_variants.len(), 2);
    assert_eq!(
        info.parity_variants[1].bishop_parity,
        [BishopParity::Odd, BishopParity::None]
    );
    assert!(info.parity_variants.iter().all(|v| v.index.is_some()));
}

#[test]
fn ten_pieces_are_refused() {
    let b = board("4k3/pppp4/8/8/8/8/PPPP4/4K3 w - - 0 1");
    assert!(matches!(
        MbInfo::from_board(&b),
        Err(ninebase::ProbeError::TooManyPieces)
    ));
}

#[test]
fn canonical_coordinate_is_symmetry_invariant() {
    // A pawnless position probed through all eight transforms lands on the
    // same (kk_index, zone index) coordinate.
    let b = board("7k/8/8/3R4/8/2Q5/8/K7 w - - 0 1");
    let base = MbInfo::from_board(&b).unwrap();

    for sym in 1..NSYMMETRIES {
        let map = SYMMETRY.transforms.map(sym);
        let mut squares = [0i8; NSQUARES];
        for sq in 0..NSQUARES {
            squares[map[sq] as usize] = b.squares[sq];
        }
        let tb = Board::new(squares, b.side_to_move, None, 0, 0, 1).unwrap();
        let info = MbInfo::from_board(&tb).unwrap();
        assert_eq!(info.kk_index, base.kk_index, "transform {sym}");
        assert_eq!(
            info.parity_variants[0].index, base.parity_variants[0].index,
            "transform {sym}"
        );
    }
}

#[test]
fn mirrored_boards_share_an_ending_shape() {
    let b = board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    let m = b.mirrored();
    let info = MbInfo::from_board(&b).unwrap();
    let info_m = MbInfo::from_board(&m).unwrap();
    // Colors swapped: the white-pawn ending becomes a black-pawn ending.
    assert_eq!(info.piece_count[0][0], 1);
    assert_eq!(info_m.piece_count[1][0], 1);
    assert_eq!(info.position.len(), info_m.position.len());
}

//! Ending classifier: decimal tag composition, pawn-shape gating, and the
//! bishop-parity sub-type keys.

use ninebase::board::{Color, Piece};
use ninebase::ending::{PieceCounts, ending_index};
use ninebase::index::registry::{BishopParity, PawnFileType};

fn counts(white: &[(Piece, u8)], black: &[(Piece, u8)]) -> PieceCounts {
    let mut c = [[0u8; 6]; 2];
    c[0][Piece::King as usize] = 1;
    c[1][Piece::King as usize] = 1;
    for &(p, n) in white {
        c[0][p as usize] = n;
    }
    for &(p, n) in black {
        c[1][p as usize] = n;
    }
    c
}

const NONE2: [BishopParity; 2] = [BishopParity::None; 2];

#[test]
fn tag_concatenates_group_counts() {
    // K+2P+1N vs K+1P: pawn digits then the knight.
    let c = counts(&[(Piece::Pawn, 2), (Piece::Knight, 1)], &[(Piece::Pawn, 1)]);
    let (row, _) = ending_index(&c, NONE2, PawnFileType::Free).unwrap();
    assert_eq!(row.etype, 211);

    let c = counts(&[(Piece::Queen, 1)], &[(Piece::Rook, 1)]);
    let (row, _) = ending_index(&c, NONE2, PawnFileType::Free).unwrap();
    assert_eq!(row.etype, 11);

    let c = counts(&[(Piece::Queen, 1), (Piece::Rook, 1)], &[(Piece::Queen, 1)]);
    let (row, _) = ending_index(&c, NONE2, PawnFileType::Free).unwrap();
    assert_eq!(row.etype, 111);
}

#[test]
fn piece_order_is_pawns_then_descending_value() {
    let c = counts(
        &[(Piece::Pawn, 1), (Piece::Queen, 1)],
        &[(Piece::Pawn, 1), (Piece::Knight, 1)],
    );
    let (row, ptypes) = ending_index(&c, NONE2, PawnFileType::Free).unwrap();
    assert_eq!(row.etype, 1111);
    let expected = [
        (Color::White, Piece::King),
        (Color::Black, Piece::King),
        (Color::White, Piece::Pawn),
        (Color::Black, Piece::Pawn),
        (Color::White, Piece::Queen),
        (Color::Black, Piece::Knight),
    ];
    assert_eq!(ptypes.as_slice(), &expected);
}

#[test]
fn pawn_shapes_gate_on_exact_pawn_counts() {
    let c = counts(&[(Piece::Pawn, 1)], &[(Piece::Pawn, 1)]);
    assert!(ending_index(&c, NONE2, PawnFileType::Op11).is_some());
    assert!(ending_index(&c, NONE2, PawnFileType::Bp11).is_some());
    assert!(ending_index(&c, NONE2, PawnFileType::Op21).is_none());

    let c = counts(&[(Piece::Pawn, 2)], &[(Piece::Pawn, 1)]);
    let (row, _) = ending_index(&c, NONE2, PawnFileType::Op21).unwrap();
    assert_eq!(row.etype, 21);
    assert_eq!(row.op_type, PawnFileType::Op21);
}

#[test]
fn large_pawn_splits_reuse_the_free_layout() {
    let c = counts(&[(Piece::Pawn, 4)], &[(Piece::Pawn, 1)]);
    let (op41, _) = ending_index(&c, NONE2, PawnFileType::Op41).unwrap();
    let (free, _) = ending_index(&c, NONE2, PawnFileType::Free).unwrap();
    assert_eq!(op41.etype, 41);
    assert_eq!(op41.op_type, PawnFileType::Free);
    assert!(std::ptr::eq(op41, free));
}

#[test]
fn bishop_parity_sub_types() {
    // KBB vs K with mixed-color bishops: sub-type 1100.
    let c = counts(&[(Piece::Bishop, 2)], &[]);
    let (row, _) =
        ending_index(&c, [BishopParity::Odd, BishopParity::None], PawnFileType::Free).unwrap();
    assert_eq!((row.etype, row.sub_type), (2, 1100));

    // Same-color bishops would need sub-type 1000, which has no table here.
    assert!(
        ending_index(&c, [BishopParity::Even, BishopParity::None], PawnFileType::Free).is_none()
    );

    // KBBNN vs KQR: the bishops are the first doubled group.
    let c = counts(
        &[(Piece::Bishop, 2), (Piece::Knight, 2)],
        &[(Piece::Queen, 1), (Piece::Rook, 1)],
    );
    let (row, _) =
        ending_index(&c, [BishopParity::Odd, BishopParity::None], PawnFileType::Free).unwrap();
    assert_eq!((row.etype, row.sub_type), (2211, 1100));
    let (row, _) =
        ending_index(&c, [BishopParity::Even, BishopParity::None], PawnFileType::Free).unwrap();
    assert_eq!((row.etype, row.sub_type), (2211, 1000));
}

#[test]
fn unknown_material_is_unmapped() {
    // Five queens a side never occurs in the registry.
    let c = counts(&[(Piece::Queen, 5)], &[(Piece::Queen, 5)]);
    assert!(ending_index(&c, NONE2, PawnFileType::Free).is_none());
}

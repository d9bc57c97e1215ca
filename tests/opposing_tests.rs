//! Opposing- and blocked-pawn enumeration invariants: closed-form totals,
//! membership semantics, and the en-passant virtual-row encodings.

use ninebase::board::square;
use ninebase::index::TABLES;
use ninebase::index::opposing::{
    N1_2_OPPOSING, N1_3_OPPOSING, N2_1_OPPOSING, N2_2_OPPOSING, N2_OPPOSING, N3_1_OPPOSING,
    N4_OPPOSING,
};

#[test]
fn enumeration_totals_match_formulas() {
    let o = &TABLES.opposing;
    assert_eq!(N2_OPPOSING, 120);
    assert_eq!(o.op2_rev.len(), N2_OPPOSING);
    assert_eq!(o.op21_rev.len(), N2_1_OPPOSING);
    assert_eq!(o.op12_rev.len(), N1_2_OPPOSING);
    assert_eq!(o.op22_rev.len(), N2_2_OPPOSING);
    assert_eq!(o.op31_rev.len(), N3_1_OPPOSING);
    assert_eq!(o.op13_rev.len(), N1_3_OPPOSING);
    assert_eq!(o.dp22_rev.len(), N4_OPPOSING);
    assert_eq!(N2_1_OPPOSING, N1_2_OPPOSING);
    assert_eq!(N3_1_OPPOSING, N1_3_OPPOSING);
}

#[test]
fn simple_opposition_membership() {
    let o = &TABLES.opposing;
    // White e2, black e7: opposing.
    assert!(o.op2_index(square(1, 4), square(6, 4)) >= 0);
    // Same squares reversed, or different files: not a member.
    assert_eq!(o.op2_index(square(6, 4), square(1, 4)), -1);
    assert_eq!(o.op2_index(square(1, 4), square(6, 5)), -1);
    // Pawns may not sit on the edge ranks.
    assert_eq!(o.op2_index(square(0, 4), square(6, 4)), -1);
    assert_eq!(o.op2_index(square(1, 4), square(7, 4)), -1);
}

#[test]
fn op2_ordinals_round_trip() {
    let o = &TABLES.opposing;
    for (i, &[w, b]) in o.op2_rev.iter().enumerate() {
        assert_eq!(o.op2_index(w as usize, b as usize), i as i32);
    }
}

#[test]
fn op21_requires_an_opposing_file() {
    let o = &TABLES.opposing;
    // White b2+e2 against black e6: the e-file pair qualifies.
    assert!(o.op21_index(square(1, 1), square(1, 4), square(5, 4)) >= 0);
    // Black pawn on its own file: no opposition.
    assert_eq!(o.op21_index(square(1, 1), square(1, 4), square(5, 6)), -1);
    // White pawn order must not matter.
    assert_eq!(
        o.op21_index(square(1, 1), square(1, 4), square(5, 4)),
        o.op21_index(square(1, 4), square(1, 1), square(5, 4))
    );
}

#[test]
fn op12_requires_an_opposing_file() {
    let o = &TABLES.opposing;
    assert!(o.op12_index(square(1, 4), square(5, 4), square(4, 0)) >= 0);
    assert_eq!(o.op12_index(square(1, 4), square(5, 5), square(4, 0)), -1);
    assert_eq!(
        o.op12_index(square(1, 4), square(5, 4), square(4, 0)),
        o.op12_index(square(1, 4), square(4, 0), square(5, 4))
    );
}

#[test]
fn virtual_rows_encode_en_passant() {
    let o = &TABLES.opposing;
    // White pawn written on rank 1 means "on rank 4, just double-pushed".
    // It needs a black pawn beside its physical square to be capturable:
    // white e4 (encoded e1) with black d4, plus an opposing pair on the
    // d-file via white d2... d2 is the ep-origin file neighbor; use white
    // d3 instead so the skipped square e3 stays clear.
    let we_virtual = square(0, 4);
    let wd = square(2, 3);
    let bd = square(3, 3);
    assert!(o.op21_index(wd, we_virtual, bd) >= 0);
    // Without the adjacent black pawn the e.p. encoding is invalid; black
    // on h5 opposes nothing and cannot capture.
    assert_eq!(o.op21_index(wd, we_virtual, square(4, 7)), -1);
}

#[test]
fn dp22_shapes() {
    let o = &TABLES.opposing;
    // Two disjoint opposing pairs on separated files.
    let (w1, b1) = (square(1, 1), square(5, 1));
    let (w2, b2) = (square(2, 5), square(4, 5));
    assert!(o.dp22_index(w1, w2, b1, b2) >= 0);
    // Crossed matching resolves through the second column pairing.
    assert!(o.dp22_index(w1, w2, b2, b1) >= 0);
    assert_eq!(
        o.dp22_index(w1, w2, b1, b2),
        o.dp22_index(w1, w2, b2, b1)
    );
    // All four pawns stacked on one file still form two pairs.
    let w2_same = square(2, 1);
    let b2_same = square(6, 1);
    assert!(o.dp22_index(w1, w2_same, b1, b2_same) >= 0, "one-column stack");
    // A black pawn on an unmatched file breaks the doubled shape.
    assert_eq!(o.dp22_index(w1, w2, b1, square(4, 6)), -1);
}

#[test]
fn dp22_is_a_subset_of_op22() {
    let o = &TABLES.opposing;
    for &[w1, w2, b1, b2] in o.dp22_rev.iter().step_by(13) {
        assert!(
            o.op22_index(w1 as usize, w2 as usize, b1 as usize, b2 as usize) >= 0,
            "doubled pairs must also enumerate as plain opposing 2v2"
        );
    }
}

#[test]
fn op31_and_op13_membership() {
    let o = &TABLES.opposing;
    // Three white pawns, one opposing black pawn.
    assert!(
        o.op31_index(square(1, 0), square(1, 4), square(2, 6), square(5, 4)) >= 0
    );
    assert_eq!(
        o.op31_index(square(1, 0), square(1, 4), square(2, 6), square(5, 7)),
        -1
    );
    assert!(
        o.op13_index(square(1, 4), square(3, 4), square(5, 0), square(6, 6)) >= 0
    );
    assert_eq!(
        o.op13_index(square(1, 3), square(3, 4), square(5, 0), square(6, 6)),
        -1
    );
}

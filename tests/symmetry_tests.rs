//! Symmetry-engine invariants: transform algebra, canonical king-pair
//! counts, and canonicalization idempotence.

use ninebase::board::{NSQUARES, col, row};
use ninebase::symmetry::{
    IDENTITY, N_KINGS, N_KINGS_NOPAWNS, NSYMMETRIES, SYMMETRY, flip_nopawns, kk_canonical,
    kk_canonical_nopawns,
};

#[test]
fn every_transform_inverts() {
    let tr = &SYMMETRY.transforms;
    for sym in 0..NSYMMETRIES {
        let inv = tr.inverse(sym);
        for sq in 0..NSQUARES {
            assert_eq!(tr.apply(inv, tr.apply(sym, sq)), sq);
            assert_eq!(tr.apply(sym, tr.apply(inv, sq)), sq);
        }
    }
}

#[test]
fn canonical_pair_counts() {
    assert_eq!(N_KINGS, 1806);
    assert_eq!(N_KINGS_NOPAWNS, 462);
    assert_eq!(SYMMETRY.kk.len(), N_KINGS);
    assert_eq!(SYMMETRY.kk_nopawns.len(), N_KINGS_NOPAWNS);
}

#[test]
fn adjacent_kings_are_illegal() {
    let tr = &SYMMETRY.transforms;
    for wk in 0..NSQUARES {
        for bk in 0..NSQUARES {
            let adjacent = row(wk).abs_diff(row(bk)) <= 1 && col(wk).abs_diff(col(bk)) <= 1;
            assert_eq!(kk_canonical(tr, wk, bk).is_none(), adjacent);
            assert_eq!(kk_canonical_nopawns(tr, wk, bk).is_none(), adjacent);
        }
    }
}

#[test]
fn canonicalization_is_idempotent_with_pawns() {
    let tr = &SYMMETRY.transforms;
    let kk = &SYMMETRY.kk;
    for wk in 0..NSQUARES {
        for bk in 0..NSQUARES {
            let Some((wk_t, bk_t, sym)) = kk_canonical(tr, wk, bk) else {
                continue;
            };
            assert_eq!(kk.transform(wk, bk) as usize, sym);
            // The canonical pair canonicalizes to itself.
            let (wk_2, bk_2, sym_2) = kk_canonical(tr, wk_t, bk_t).unwrap();
            assert_eq!(sym_2, IDENTITY);
            assert_eq!((wk_2, bk_2), (wk_t, bk_t));
            // Both pairs share the ordinal of the canonical representative.
            assert!(kk.index(wk_t, bk_t) >= 0);
            if sym == IDENTITY {
                assert_eq!(kk.index(wk, bk), kk.index(wk_t, bk_t));
            }
        }
    }
}

#[test]
fn canonicalization_is_idempotent_without_pawns() {
    let tr = &SYMMETRY.transforms;
    let kk = &SYMMETRY.kk_nopawns;
    for wk in 0..NSQUARES {
        for bk in 0..NSQUARES {
            let Some((wk_t, bk_t, sym)) = kk_canonical_nopawns(tr, wk, bk) else {
                continue;
            };
            assert_eq!(kk.transform(wk, bk) as usize, sym);
            let (_, _, sym_2) = kk_canonical_nopawns(tr, wk_t, bk_t).unwrap();
            assert_eq!(sym_2, IDENTITY);
            assert!(kk.index(wk_t, bk_t) >= 0);
        }
    }
}

#[test]
fn pair_list_round_trips() {
    for (table, n) in [(&SYMMETRY.kk, N_KINGS), (&SYMMETRY.kk_nopawns, N_KINGS_NOPAWNS)] {
        for i in 0..n {
            let (wk, bk) = table.pair(i);
            assert_eq!(table.index(wk, bk), i as i32);
            assert_eq!(table.transform(wk, bk) as usize, IDENTITY);
        }
    }
}

#[test]
fn white_king_confined_to_queenside_with_pawns() {
    for i in 0..N_KINGS {
        let (wk, _) = SYMMETRY.kk.pair(i);
        assert!(col(wk) < 4);
    }
}

#[test]
fn white_king_confined_to_triangle_without_pawns() {
    for i in 0..N_KINGS_NOPAWNS {
        let (wk, bk) = SYMMETRY.kk_nopawns.pair(i);
        assert!(row(wk) < 4 && col(wk) < 4 && row(wk) <= col(wk));
        if row(wk) == col(wk) {
            assert!(row(bk) <= col(bk), "diagonal tie-breaker violated");
        }
    }
}

#[test]
fn residual_flip_only_on_the_long_diagonal() {
    let tr = &SYMMETRY.transforms;
    // Both kings on a1-h8: flip applies.
    assert!(flip_nopawns(tr, 0, 27).is_some());
    // King off the diagonal: no residual symmetry.
    assert!(flip_nopawns(tr, 0, 28).is_none());
}

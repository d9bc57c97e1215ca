//! Combinatorial table invariants: exact counts, rounding offsets, and
//! encode/decode round trips.

use ninebase::board::{NSQUARES, col, row};
use ninebase::index::TABLES;
use ninebase::index::tuples::{
    N2, N2_EVEN_PARITY, N2_ODD_PARITY, N2_OFFSET, N3, N3_EVEN_PARITY, N3_ODD_PARITY, N3_OFFSET, N4,
    N4_OFFSET, N5, N6, N6_OFFSET, N7, N7_OFFSET,
};

#[test]
fn compile_time_counts() {
    assert_eq!(N2, 2016);
    assert_eq!(N3, 41664);
    assert_eq!(N4, 635_376);
    assert_eq!(N5, 7_624_512);
    assert_eq!(N6, 74_974_368);
    assert_eq!(N7, 621_216_192);
}

#[test]
fn offsets_round_to_board_multiples() {
    assert_eq!(N2_OFFSET, 2048);
    assert_eq!(N3_OFFSET, 41664);
    assert_eq!(N4_OFFSET, 635_392);
    assert_eq!(N6_OFFSET % (NSQUARES * NSQUARES) as u64, 0);
    assert_eq!(N7_OFFSET % (NSQUARES * NSQUARES) as u64, 0);
    assert!(N6_OFFSET >= N6 as u64 && N6_OFFSET - (N6 as u64) < 4096);
    assert!(N7_OFFSET >= N7 as u64 && N7_OFFSET - (N7 as u64) < 4096);
}

#[test]
fn pair_index_matches_lexicographic_rank() {
    let t = &TABLES.tuples;
    // Pairs enumerate (0,1), (0,2) ... (0,63), (1,2) ...
    assert_eq!(t.n2_index(1, 0), 0);
    assert_eq!(t.n2_index(63, 0), 62);
    assert_eq!(t.n2_index(2, 1), 63);
    assert_eq!(t.n2_index(63, 62), (N2 - 1) as i32);
    // Symmetric in its arguments, and undefined on the diagonal.
    assert_eq!(t.n2_index(17, 40), t.n2_index(40, 17));
    assert_eq!(t.n2_index(9, 9), -1);
}

#[test]
fn pair_tables_round_trip() {
    let t = &TABLES.tuples;
    for i in 0..N2 {
        let [a, b] = t.n2_rev[i];
        assert_eq!(t.n2_index(a as usize, b as usize), i as i32);
    }
    let mut seen = 0;
    for a in 0..NSQUARES {
        for b in a + 1..NSQUARES {
            let i = t.n2_index(a, b);
            assert!(i >= 0);
            let [x, y] = t.n2_rev[i as usize];
            assert_eq!((x as usize, y as usize), (a, b));
            seen += 1;
        }
    }
    assert_eq!(seen, N2);
}

#[test]
fn triple_and_quad_tables_round_trip() {
    let t = &TABLES.tuples;
    for i in (0..N3).step_by(7) {
        let [a, b, c] = t.n3_rev[i];
        assert_eq!(t.n3_index(a as usize, b as usize, c as usize), i as i32);
        // Permutation equivalence.
        assert_eq!(t.n3_index(c as usize, a as usize, b as usize), i as i32);
    }
    for i in (0..N4).step_by(101) {
        let [a, b, c, d] = t.n4_rev[i];
        assert_eq!(
            t.n4_index(a as usize, b as usize, c as usize, d as usize),
            i as i32
        );
        assert_eq!(
            t.n4_index(d as usize, c as usize, b as usize, a as usize),
            i as i32
        );
    }
}

#[test]
fn parity_tables_split_by_square_color() {
    let t = &TABLES.tuples;
    assert_eq!(t.n2_even_rev.len(), N2_EVEN_PARITY);
    assert_eq!(t.n2_odd_rev.len(), N2_ODD_PARITY);
    assert_eq!(t.n3_even_rev.len(), N3_EVEN_PARITY);
    assert_eq!(t.n3_odd_rev.len(), N3_ODD_PARITY);

    let shade = |sq: usize| (row(sq) & 1) ^ (col(sq) & 1);
    for i in (0..N2_EVEN_PARITY).step_by(3) {
        let [a, b] = t.n2_even_rev[i];
        assert_eq!(shade(a as usize), shade(b as usize));
        assert_eq!(t.n2_even_index(a as usize, b as usize), i as i32);
    }
    for i in (0..N2_ODD_PARITY).step_by(3) {
        let [a, b] = t.n2_odd_rev[i];
        assert_ne!(shade(a as usize), shade(b as usize));
        assert_eq!(t.n2_odd_index(a as usize, b as usize), i as i32);
    }
    for i in (0..N3_ODD_PARITY).step_by(97) {
        let [a, b, c] = t.n3_odd_rev[i];
        let shades = [shade(a as usize), shade(b as usize), shade(c as usize)];
        assert!(shades.iter().any(|&s| s != shades[0]));
        assert_eq!(t.n3_odd_index(a as usize, b as usize, c as usize), i as i32);
    }
}

#[test]
fn quint_ranks_round_trip() {
    let t = &TABLES.tuples;
    // Rank zero is the five smallest square complements.
    assert_eq!(t.n5_rank([4, 3, 2, 1, 0]), 0);
    assert_eq!(t.n5_unrank(0).unwrap(), [4, 3, 2, 1, 0]);

    for rank in (0..N5 as u64).step_by(999_983) {
        let tuple = t.n5_unrank(rank).unwrap();
        assert!(tuple.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(t.n5_rank(tuple), rank);
    }
    assert!(t.n5_unrank(N5 as u64).is_none());
}

#[test]
fn sext_and_sept_ranks_round_trip() {
    let t = &TABLES.tuples;
    for rank in (0..N6 as u64).step_by(9_999_991) {
        let tuple = t.n6_unrank(rank).unwrap();
        assert_eq!(t.n6_rank(tuple), rank);
    }
    for rank in (0..N7 as u64).step_by(99_999_989) {
        let tuple = t.n7_unrank(rank).unwrap();
        assert_eq!(t.n7_rank(tuple), rank);
    }
    // Sorting the input must not matter.
    assert_eq!(t.n6_rank([5, 20, 1, 63, 40, 11]), t.n6_rank([63, 40, 20, 11, 5, 1]));
}

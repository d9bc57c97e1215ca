//! The eight board symmetries and the canonical king-pair reduction.
//!
//! With pawns on the board only the vertical reflection survives, and the
//! white king is confined to the queenside files; without pawns the full
//! dihedral group applies and the white king lives in the a1-d4 triangle
//! with a diagonal tie-breaker on the black king.

use once_cell::sync::Lazy;

use crate::board::{NCOLS, NROWS, NSQUARES, col, row, square};

pub const IDENTITY: usize = 0;
pub const REFLECT_V: usize = 1;
pub const REFLECT_H: usize = 2;
pub const REFLECT_VH: usize = 3;
pub const REFLECT_D: usize = 4;
pub const REFLECT_DV: usize = 5;
pub const REFLECT_DH: usize = 6;
pub const REFLECT_DVH: usize = 7;
pub const NSYMMETRIES: usize = 8;

/// Canonical king pairs on 8x8: 1806 with pawns, 462 without.
pub const N_KINGS: usize = 4
    + (NROWS + NCOLS - 2) * (NSQUARES - 6)
    + (NROWS - 2) * ((NCOLS + 1) / 2 - 1) * (NSQUARES - 9);
pub const N_KINGS_NOPAWNS: usize = NCOLS * (NCOLS + 1) / 2 - 3
    + (NCOLS / 2 - 1) * (NSQUARES - 6)
    + (NCOLS / 2 - 1) * (NCOLS * (NCOLS + 1) / 2 - 6)
    + (NCOLS / 2 - 2) * (NCOLS / 2 - 1) / 2 * (NSQUARES - 9);

const _: () = assert!(N_KINGS == 1806);
const _: () = assert!(N_KINGS_NOPAWNS == 462);
const _: () = assert!(NROWS == 8 && NCOLS == 8, "indexing core requires an 8x8 board");

/// All eight square bijections, indexed by the `REFLECT_*` constants.
pub struct Transforms {
    maps: [[u8; NSQUARES]; NSYMMETRIES],
}

impl Transforms {
    #[inline]
    pub fn apply(&self, sym: usize, sq: usize) -> usize {
        self.maps[sym][sq] as usize
    }

    #[inline]
    pub fn map(&self, sym: usize) -> &[u8; NSQUARES] {
        &self.maps[sym]
    }

    /// Index of the inverse transform. The two diagonal rotations are each
    /// other's inverses; every reflection is an involution.
    #[inline]
    pub fn inverse(&self, sym: usize) -> usize {
        const INVERSE: [usize; NSYMMETRIES] = [
            IDENTITY, REFLECT_V, REFLECT_H, REFLECT_VH, REFLECT_D, REFLECT_DH, REFLECT_DV,
            REFLECT_DVH,
        ];
        INVERSE[sym]
    }
}

fn build_transforms() -> Transforms {
    let mut maps = [[0u8; NSQUARES]; NSYMMETRIES];
    for r in 0..NROWS {
        for c in 0..NCOLS {
            let sq = square(r, c);
            maps[IDENTITY][sq] = sq as u8;
            maps[REFLECT_V][sq] = square(r, NCOLS - 1 - c) as u8;
            maps[REFLECT_H][sq] = square(NROWS - 1 - r, c) as u8;
            maps[REFLECT_VH][sq] = square(NROWS - 1 - r, NCOLS - 1 - c) as u8;
            maps[REFLECT_D][sq] = square(c, r) as u8;
            maps[REFLECT_DV][sq] = square(NCOLS - 1 - c, r) as u8;
            maps[REFLECT_DH][sq] = square(c, NROWS - 1 - r) as u8;
            maps[REFLECT_DVH][sq] = square(NCOLS - 1 - c, NROWS - 1 - r) as u8;
        }
    }
    Transforms { maps }
}

/// Dense canonical king-pair maps for one symmetry family.
///
/// `index[wk * 64 + bk]` is the canonical ordinal when the pair is already
/// canonical, `-1` otherwise; `transform` is the symmetry that canonicalizes
/// the pair (`-1` for illegal, i.e. adjacent kings); `pairs[i]` recovers the
/// canonical `(wk, bk)` for ordinal `i`.
pub struct KkTable {
    index: Vec<i32>,
    transform: Vec<i8>,
    pairs: Vec<(u8, u8)>,
}

impl KkTable {
    #[inline]
    pub fn index(&self, wk: usize, bk: usize) -> i32 {
        self.index[wk * NSQUARES + bk]
    }

    #[inline]
    pub fn transform(&self, wk: usize, bk: usize) -> i8 {
        self.transform[wk * NSQUARES + bk]
    }

    #[inline]
    pub fn pair(&self, kk_index: usize) -> (usize, usize) {
        let (wk, bk) = self.pairs[kk_index];
        (wk as usize, bk as usize)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn kings_adjacent(wk: usize, bk: usize) -> bool {
    row(wk).abs_diff(row(bk)) <= 1 && col(wk).abs_diff(col(bk)) <= 1
}

/// Canonicalize a king pair under the pawn symmetries (identity and
/// reflect-V). Returns the transformed pair and the symmetry used, or `None`
/// for adjacent kings.
pub fn kk_canonical(tr: &Transforms, wk: usize, bk: usize) -> Option<(usize, usize, usize)> {
    if kings_adjacent(wk, bk) {
        return None;
    }
    for sym in [IDENTITY, REFLECT_V] {
        let wk_t = tr.apply(sym, wk);
        let bk_t = tr.apply(sym, bk);
        // Even column count: no on-axis squares, only the half-board test.
        if col(wk_t) < (NCOLS + 1) / 2 {
            return Some((wk_t, bk_t, sym));
        }
    }
    None
}

/// Canonicalize a king pair under the full dihedral group (pawnless case).
pub fn kk_canonical_nopawns(tr: &Transforms, wk: usize, bk: usize) -> Option<(usize, usize, usize)> {
    if kings_adjacent(wk, bk) {
        return None;
    }
    for sym in 0..NSYMMETRIES {
        let wk_t = tr.apply(sym, wk);
        let bk_t = tr.apply(sym, bk);
        let (wr, wc) = (row(wk_t), col(wk_t));
        if wr < (NROWS + 1) / 2 && wc < (NCOLS + 1) / 2 && wr <= wc {
            // On the a1-h8 diagonal the black king breaks the tie.
            let found = if wr == wc {
                row(bk_t) <= col(bk_t)
            } else {
                true
            };
            if found {
                return Some((wk_t, bk_t, sym));
            }
        }
    }
    None
}

fn build_kk_table(pawns: bool, tr: &Transforms, expected: usize) -> KkTable {
    let mut index = vec![-1i32; NSQUARES * NSQUARES];
    let mut transform = vec![-1i8; NSQUARES * NSQUARES];
    let mut pairs = Vec::with_capacity(expected);

    for wk in 0..NSQUARES {
        for bk in 0..NSQUARES {
            let canon = if pawns {
                kk_canonical(tr, wk, bk)
            } else {
                kk_canonical_nopawns(tr, wk, bk)
            };
            let Some((wk_t, bk_t, sym)) = canon else {
                continue;
            };
            transform[wk * NSQUARES + bk] = sym as i8;
            if sym == IDENTITY {
                index[wk * NSQUARES + bk] = pairs.len() as i32;
                pairs.push((wk_t as u8, bk_t as u8));
            }
        }
    }

    assert_eq!(pairs.len(), expected);
    KkTable {
        index,
        transform,
        pairs,
    }
}

/// Residual symmetry left after canonicalization, pawnless case: when both
/// kings sit on the a1-h8 diagonal the diagonal reflection still fixes them,
/// and the remaining pieces must be tried both ways.
pub fn flip_nopawns(tr: &Transforms, wk: usize, bk: usize) -> Option<&[u8; NSQUARES]> {
    let d = tr.map(REFLECT_D);
    if d[wk] as usize == wk && d[bk] as usize == bk {
        Some(d)
    } else {
        None
    }
}

/// Residual symmetry with pawns on the board. An even number of files leaves
/// no on-axis squares, so there is never one.
pub fn flip_pawns(_tr: &Transforms, _wk: usize, _bk: usize) -> Option<&'static [u8; NSQUARES]> {
    None
}

/// Shared symmetry state: the transform maps and both canonical king tables.
pub struct Symmetry {
    pub transforms: Transforms,
    pub kk: KkTable,
    pub kk_nopawns: KkTable,
}

pub static SYMMETRY: Lazy<Symmetry> = Lazy::new(|| {
    let transforms = build_transforms();
    let kk = build_kk_table(true, &transforms, N_KINGS);
    let kk_nopawns = build_kk_table(false, &transforms, N_KINGS_NOPAWNS);
    tracing::debug!(
        pawned = kk.len(),
        pawnless = kk_nopawns.len(),
        "king-pair tables built"
    );
    Symmetry {
        transforms,
        kk,
        kk_nopawns,
    }
});

/// Square color census: the bottom-right corner (h1) counts as "white".
#[inline]
pub fn is_white_square(sq: usize) -> bool {
    (row(sq) & 1) ^ ((NCOLS - 1 - col(sq)) & 1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_round_trips_every_square() {
        let tr = build_transforms();
        for sym in 0..NSYMMETRIES {
            let inv = tr.inverse(sym);
            for sq in 0..NSQUARES {
                assert_eq!(tr.apply(inv, tr.apply(sym, sq)), sq);
            }
        }
    }

    #[test]
    fn h1_is_white() {
        assert!(is_white_square(square(0, 7)));
        assert!(!is_white_square(square(0, 0)));
    }
}

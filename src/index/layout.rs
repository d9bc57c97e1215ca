//! Composable index chunks.
//!
//! Every index-table row is a mixed-radix number built from a handful of
//! recurring pieces: a bare square, an unordered tuple, a parity-restricted
//! tuple, a blocked or opposing pawn shape. A row's layout lists its chunks
//! most-significant first, each naming the canonical-placement slots it
//! consumes; the same layout drives the encoder, the decoder, and the zone
//! size, so the two directions cannot drift apart.

use crate::board::{NCOLS, NROWS, NSQUARES, row};

use super::Tables;
use super::opposing::{
    N1_2_OPPOSING, N1_3_OPPOSING, N2_1_OPPOSING, N2_2_OPPOSING, N2_OPPOSING, N3_1_OPPOSING,
    N4_OPPOSING,
};
use super::tuples::{
    N2, N2_EVEN_PARITY, N2_EVEN_PARITY_OFFSET, N2_ODD_PARITY, N2_ODD_PARITY_OFFSET, N2_OFFSET, N3,
    N3_EVEN_PARITY, N3_EVEN_PARITY_OFFSET, N3_ODD_PARITY, N3_ODD_PARITY_OFFSET, N3_OFFSET, N4,
    N4_OFFSET, N5, N5_OFFSET, N6, N6_OFFSET, N7, N7_OFFSET, ZIndex,
};

/// One radix position in a composite zone index. Slot numbers refer to the
/// canonical placement array (`0` = white king, `1` = black king, pieces from
/// `2`). Tuple slots are listed in the conventional highest-first order of
/// the placement groups they cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk {
    One(u8),
    Pair(u8, u8),
    PairEven(u8, u8),
    PairOdd(u8, u8),
    Triple(u8, u8, u8),
    TripleEven(u8, u8, u8),
    TripleOdd(u8, u8, u8),
    Quad(u8, u8, u8, u8),
    Quint([u8; 5]),
    Sext([u8; 6]),
    Sept([u8; 7]),
    /// Blocked single pawn pair: only the white pawn is encoded, the black
    /// pawn sits one row above it by definition.
    BlockedPawn { w: u8, b: u8 },
    OpPair { w: u8, b: u8 },
    Op21 { w1: u8, w2: u8, b: u8 },
    Op12 { w: u8, b1: u8, b2: u8 },
    Op22 { w1: u8, w2: u8, b1: u8, b2: u8 },
    Op31 { w1: u8, w2: u8, w3: u8, b: u8 },
    Op13 { w: u8, b1: u8, b2: u8, b3: u8 },
    Dp22 { w1: u8, w2: u8, b1: u8, b2: u8 },
}

impl Chunk {
    /// Radix contributed when this chunk sits below a more significant one.
    /// The tuple radices carry the on-disk rounding; the pawn shapes never
    /// appear below another chunk, so their radix equals their count.
    pub fn base(self) -> ZIndex {
        match self {
            Chunk::One(_) | Chunk::BlockedPawn { .. } => NSQUARES as ZIndex,
            Chunk::Pair(..) => N2_OFFSET,
            Chunk::PairEven(..) => N2_EVEN_PARITY_OFFSET,
            Chunk::PairOdd(..) => N2_ODD_PARITY_OFFSET,
            Chunk::Triple(..) => N3_OFFSET,
            Chunk::TripleEven(..) => N3_EVEN_PARITY_OFFSET,
            Chunk::TripleOdd(..) => N3_ODD_PARITY_OFFSET,
            Chunk::Quad(..) => N4_OFFSET,
            Chunk::Quint(_) => N5_OFFSET,
            Chunk::Sext(_) => N6_OFFSET,
            Chunk::Sept(_) => N7_OFFSET,
            Chunk::OpPair { .. } => N2_OPPOSING as ZIndex,
            Chunk::Op21 { .. } => N2_1_OPPOSING as ZIndex,
            Chunk::Op12 { .. } => N1_2_OPPOSING as ZIndex,
            Chunk::Op22 { .. } => N2_2_OPPOSING as ZIndex,
            Chunk::Op31 { .. } => N3_1_OPPOSING as ZIndex,
            Chunk::Op13 { .. } => N1_3_OPPOSING as ZIndex,
            Chunk::Dp22 { .. } => N4_OPPOSING as ZIndex,
        }
    }

    /// Number of valid chunk values; strictly below `base()` wherever the
    /// rounding leaves dead space.
    pub fn count(self) -> ZIndex {
        match self {
            Chunk::One(_) | Chunk::BlockedPawn { .. } => NSQUARES as ZIndex,
            Chunk::Pair(..) => N2 as ZIndex,
            Chunk::PairEven(..) => N2_EVEN_PARITY as ZIndex,
            Chunk::PairOdd(..) => N2_ODD_PARITY as ZIndex,
            Chunk::Triple(..) => N3 as ZIndex,
            Chunk::TripleEven(..) => N3_EVEN_PARITY as ZIndex,
            Chunk::TripleOdd(..) => N3_ODD_PARITY as ZIndex,
            Chunk::Quad(..) => N4 as ZIndex,
            Chunk::Quint(_) => N5 as ZIndex,
            Chunk::Sext(_) => N6 as ZIndex,
            Chunk::Sept(_) => N7 as ZIndex,
            other => other.base(),
        }
    }

    fn encode(self, t: &Tables, pos: &[usize]) -> Option<ZIndex> {
        let z = |v: i32| if v < 0 { None } else { Some(v as ZIndex) };
        match self {
            Chunk::One(a) => Some(pos[a as usize] as ZIndex),
            Chunk::BlockedPawn { w, .. } => Some(pos[w as usize] as ZIndex),
            Chunk::Pair(a, b) => z(t.tuples.n2_index(pos[a as usize], pos[b as usize])),
            Chunk::PairEven(a, b) => z(t.tuples.n2_even_index(pos[a as usize], pos[b as usize])),
            Chunk::PairOdd(a, b) => z(t.tuples.n2_odd_index(pos[a as usize], pos[b as usize])),
            Chunk::Triple(a, b, c) => z(t.tuples.n3_index(
                pos[a as usize],
                pos[b as usize],
                pos[c as usize],
            )),
            Chunk::TripleEven(a, b, c) => z(t.tuples.n3_even_index(
                pos[a as usize],
                pos[b as usize],
                pos[c as usize],
            )),
            Chunk::TripleOdd(a, b, c) => z(t.tuples.n3_odd_index(
                pos[a as usize],
                pos[b as usize],
                pos[c as usize],
            )),
            Chunk::Quad(a, b, c, d) => z(t.tuples.n4_index(
                pos[a as usize],
                pos[b as usize],
                pos[c as usize],
                pos[d as usize],
            )),
            // The 5..7-tuples are complement-encoded so the largest rank
            // lands on the smallest squares, an artifact the files preserve.
            Chunk::Quint(s) => {
                let sq = s.map(|i| NSQUARES - 1 - pos[i as usize]);
                Some((N5 as ZIndex - 1) - t.tuples.n5_rank(sq))
            }
            Chunk::Sext(s) => {
                let sq = s.map(|i| NSQUARES - 1 - pos[i as usize]);
                Some((N6 as ZIndex - 1) - t.tuples.n6_rank(sq))
            }
            Chunk::Sept(s) => {
                let sq = s.map(|i| NSQUARES - 1 - pos[i as usize]);
                Some((N7 as ZIndex - 1) - t.tuples.n7_rank(sq))
            }
            Chunk::OpPair { w, b } => z(t.opposing.op2_index(pos[w as usize], pos[b as usize])),
            Chunk::Op21 { w1, w2, b } => z(t.opposing.op21_index(
                pos[w1 as usize],
                pos[w2 as usize],
                pos[b as usize],
            )),
            Chunk::Op12 { w, b1, b2 } => z(t.opposing.op12_index(
                pos[w as usize],
                pos[b1 as usize],
                pos[b2 as usize],
            )),
            Chunk::Op22 { w1, w2, b1, b2 } => z(t.opposing.op22_index(
                pos[w1 as usize],
                pos[w2 as usize],
                pos[b1 as usize],
                pos[b2 as usize],
            )),
            Chunk::Op31 { w1, w2, w3, b } => z(t.opposing.op31_index(
                pos[w1 as usize],
                pos[w2 as usize],
                pos[w3 as usize],
                pos[b as usize],
            )),
            Chunk::Op13 { w, b1, b2, b3 } => z(t.opposing.op13_index(
                pos[w as usize],
                pos[b1 as usize],
                pos[b2 as usize],
                pos[b3 as usize],
            )),
            Chunk::Dp22 { w1, w2, b1, b2 } => z(t.opposing.dp22_index(
                pos[w1 as usize],
                pos[w2 as usize],
                pos[b1 as usize],
                pos[b2 as usize],
            )),
        }
    }

    fn decode(self, t: &Tables, value: ZIndex, pos: &mut [usize]) -> bool {
        if value >= self.count() {
            return false;
        }
        let v = value as usize;
        match self {
            Chunk::One(a) => pos[a as usize] = v,
            Chunk::BlockedPawn { w, b } => {
                // The black pawn of a blocked pair is implied.
                if row(v) == 0 || row(v) >= NROWS - 2 {
                    return false;
                }
                pos[w as usize] = v;
                pos[b as usize] = v + NCOLS;
            }
            Chunk::Pair(a, b) => assign2(pos, [a, b], t.tuples.n2_rev[v]),
            Chunk::PairEven(a, b) => assign2(pos, [a, b], t.tuples.n2_even_rev[v]),
            Chunk::PairOdd(a, b) => assign2(pos, [a, b], t.tuples.n2_odd_rev[v]),
            Chunk::Triple(a, b, c) => assign3(pos, [a, b, c], t.tuples.n3_rev[v]),
            Chunk::TripleEven(a, b, c) => assign3(pos, [a, b, c], t.tuples.n3_even_rev[v]),
            Chunk::TripleOdd(a, b, c) => assign3(pos, [a, b, c], t.tuples.n3_odd_rev[v]),
            Chunk::Quad(a, b, c, d) => {
                let sq = t.tuples.n4_rev[v];
                for (slot, s) in [a, b, c, d].into_iter().zip(sq) {
                    pos[slot as usize] = s as usize;
                }
            }
            Chunk::Quint(slots) => {
                let Some(desc) = t.tuples.n5_unrank(N5 as ZIndex - 1 - value) else {
                    return false;
                };
                for (slot, s) in slots.into_iter().zip(desc) {
                    pos[slot as usize] = NSQUARES - 1 - s;
                }
            }
            Chunk::Sext(slots) => {
                let Some(desc) = t.tuples.n6_unrank(N6 as ZIndex - 1 - value) else {
                    return false;
                };
                for (slot, s) in slots.into_iter().zip(desc) {
                    pos[slot as usize] = NSQUARES - 1 - s;
                }
            }
            Chunk::Sept(slots) => {
                let Some(desc) = t.tuples.n7_unrank(N7 as ZIndex - 1 - value) else {
                    return false;
                };
                for (slot, s) in slots.into_iter().zip(desc) {
                    pos[slot as usize] = NSQUARES - 1 - s;
                }
            }
            Chunk::OpPair { w, b } => {
                let [ws, bs] = t.opposing.op2_rev[v];
                pos[w as usize] = ws as usize;
                pos[b as usize] = bs as usize;
            }
            Chunk::Op21 { w1, w2, b } => {
                let [a, c, d] = t.opposing.op21_rev[v];
                pos[w1 as usize] = a as usize;
                pos[w2 as usize] = c as usize;
                pos[b as usize] = d as usize;
            }
            Chunk::Op12 { w, b1, b2 } => {
                let [a, c, d] = t.opposing.op12_rev[v];
                pos[w as usize] = a as usize;
                pos[b1 as usize] = c as usize;
                pos[b2 as usize] = d as usize;
            }
            Chunk::Op22 { w1, w2, b1, b2 } => {
                let sq = t.opposing.op22_rev[v];
                for (slot, s) in [w1, w2, b1, b2].into_iter().zip(sq) {
                    pos[slot as usize] = s as usize;
                }
            }
            Chunk::Op31 { w1, w2, w3, b } => {
                let sq = t.opposing.op31_rev[v];
                for (slot, s) in [w1, w2, w3, b].into_iter().zip(sq) {
                    pos[slot as usize] = s as usize;
                }
            }
            Chunk::Op13 { w, b1, b2, b3 } => {
                let sq = t.opposing.op13_rev[v];
                for (slot, s) in [w, b1, b2, b3].into_iter().zip(sq) {
                    pos[slot as usize] = s as usize;
                }
            }
            Chunk::Dp22 { w1, w2, b1, b2 } => {
                let sq = t.opposing.dp22_rev[v];
                for (slot, s) in [w1, w2, b1, b2].into_iter().zip(sq) {
                    pos[slot as usize] = s as usize;
                }
            }
        }
        true
    }
}

fn assign2(pos: &mut [usize], slots: [u8; 2], sq: [u8; 2]) {
    // The pair tables are symmetric; hand the larger square to the first
    // (higher) slot, matching the call convention of the encoders.
    pos[slots[0] as usize] = sq[1] as usize;
    pos[slots[1] as usize] = sq[0] as usize;
}

fn assign3(pos: &mut [usize], slots: [u8; 3], sq: [u8; 3]) {
    pos[slots[0] as usize] = sq[2] as usize;
    pos[slots[1] as usize] = sq[1] as usize;
    pos[slots[2] as usize] = sq[0] as usize;
}

/// Compose a layout's chunks, most significant first. `None` when a chunk
/// cannot index the placements (the legacy ALL_ONES sentinel).
pub fn encode(t: &Tables, layout: &[Chunk], pos: &[usize]) -> Option<ZIndex> {
    let mut acc: Option<ZIndex> = None;
    for &chunk in layout {
        let v = chunk.encode(t, pos)?;
        acc = Some(match acc {
            None => v,
            Some(a) => a * chunk.base() + v,
        });
    }
    acc
}

/// Invert [`encode`]. False when `zindex` falls into rounding dead space or
/// past the most significant chunk's range.
pub fn decode(t: &Tables, layout: &[Chunk], mut zindex: ZIndex, pos: &mut [usize]) -> bool {
    for (i, &chunk) in layout.iter().enumerate().rev() {
        if i == 0 {
            return chunk.decode(t, zindex, pos);
        }
        let v = zindex % chunk.base();
        zindex /= chunk.base();
        if !chunk.decode(t, v, pos) {
            return false;
        }
    }
    false
}

/// Total span of a layout, the product of all chunk radices. Used by the
/// monolithic legacy tables to glue `kk_index` and zone index together.
pub fn zone_size(layout: &[Chunk]) -> ZIndex {
    layout.iter().map(|c| c.base()).product()
}

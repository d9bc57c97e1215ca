//! The index-table registry: one row per (ending tag, pawn-file shape,
//! bishop-parity sub-type), each binding a chunk layout that yields the
//! encode/decode pair. Rows are searched linearly and the first match wins,
//! so the order below is part of the contract.

use super::layout::Chunk::{
    self, One, Pair, PairEven, PairOdd, Quad, Quint, Sept, Sext, Triple, TripleEven, TripleOdd,
};
use super::layout::{self, zone_size};
use super::tuples::ZIndex;
use super::Tables;

/// File-shape classification of the pawns of an ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PawnFileType {
    Free,
    /// Single blocked pair: black pawn directly above the white pawn.
    Bp11,
    Op11,
    Op21,
    Op12,
    Op22,
    /// Two disjoint opposing pairs.
    Dp22,
    Op31,
    Op13,
    Op41,
    Op14,
    Op32,
    Op23,
    Op33,
    Op42,
    Op24,
}

/// Square color a side's bishops are confined to, if any. "Even" is the
/// color of the bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BishopParity {
    #[default]
    None,
    Even,
    Odd,
}

pub struct IndexRow {
    pub etype: u32,
    pub op_type: PawnFileType,
    pub sub_type: u16,
    pub layout: &'static [Chunk],
}

impl IndexRow {
    #[inline]
    pub fn encode(&self, t: &Tables, pos: &[usize]) -> Option<ZIndex> {
        layout::encode(t, self.layout, pos)
    }

    #[inline]
    pub fn decode(&self, t: &Tables, zindex: ZIndex, pos: &mut [usize]) -> bool {
        layout::decode(t, self.layout, zindex, pos)
    }

    /// Span of one king-pair zone under this row.
    pub fn zone_size(&self) -> ZIndex {
        zone_size(self.layout)
    }
}

/// First row matching the triple, scanned in declaration order.
pub fn find(etype: u32, op_type: PawnFileType, sub_type: u16) -> Option<&'static IndexRow> {
    INDEX_TABLE
        .iter()
        .find(|r| r.etype == etype && r.op_type == op_type && r.sub_type == sub_type)
}

const fn r(etype: u32, op_type: PawnFileType, sub_type: u16, layout: &'static [Chunk]) -> IndexRow {
    IndexRow {
        etype,
        op_type,
        sub_type,
        layout,
    }
}

use PawnFileType::*;

const BP: Chunk = Chunk::BlockedPawn { w: 2, b: 3 };
const OP1: Chunk = Chunk::OpPair { w: 2, b: 3 };
const OP2_1: Chunk = Chunk::Op21 { w1: 2, w2: 3, b: 4 };
const OP1_2: Chunk = Chunk::Op12 { w: 2, b1: 3, b2: 4 };
const OP2_2: Chunk = Chunk::Op22 { w1: 2, w2: 3, b1: 4, b2: 5 };
const DP2_2: Chunk = Chunk::Dp22 { w1: 2, w2: 3, b1: 4, b2: 5 };
const OP3_1: Chunk = Chunk::Op31 { w1: 2, w2: 3, w3: 4, b: 5 };
const OP1_3: Chunk = Chunk::Op13 { w: 2, b1: 3, b2: 4, b3: 5 };

pub static INDEX_TABLE: &[IndexRow] = &[
    // Eight-piece endings.
    r(111111, Free, 0, &[One(2), One(3), One(4), One(5), One(6), One(7)]),
    r(111111, Bp11, 0, &[BP, One(4), One(5), One(6), One(7)]),
    r(111111, Op11, 0, &[OP1, One(4), One(5), One(6), One(7)]),
    r(21111, Free, 0, &[Pair(3, 2), One(4), One(5), One(6), One(7)]),
    r(21111, Op21, 0, &[OP2_1, One(5), One(6), One(7)]),
    r(12111, Free, 0, &[Pair(4, 3), One(2), One(5), One(6), One(7)]),
    r(12111, Op12, 0, &[OP1_2, One(5), One(6), One(7)]),
    r(11211, Free, 0, &[Pair(5, 4), One(2), One(3), One(6), One(7)]),
    r(11211, Bp11, 0, &[BP, Pair(5, 4), One(6), One(7)]),
    r(11211, Op11, 0, &[OP1, Pair(5, 4), One(6), One(7)]),
    r(11121, Free, 0, &[Pair(6, 5), One(2), One(3), One(4), One(7)]),
    r(11121, Bp11, 0, &[BP, Pair(6, 5), One(4), One(7)]),
    r(11121, Op11, 0, &[OP1, Pair(6, 5), One(4), One(7)]),
    r(11112, Free, 0, &[Pair(7, 6), One(2), One(3), One(4), One(5)]),
    r(11112, Bp11, 0, &[BP, Pair(7, 6), One(4), One(5)]),
    r(11112, Op11, 0, &[OP1, Pair(7, 6), One(4), One(5)]),
    r(2211, Free, 0, &[Pair(3, 2), Pair(5, 4), One(6), One(7)]),
    r(2211, Dp22, 0, &[DP2_2, One(6), One(7)]),
    r(2211, Op22, 0, &[OP2_2, One(6), One(7)]),
    r(2211, Free, 1100, &[Pair(5, 4), PairOdd(3, 2), One(6), One(7)]),
    r(2211, Free, 1000, &[Pair(5, 4), PairEven(3, 2), One(6), One(7)]),
    r(2121, Free, 0, &[Pair(3, 2), Pair(6, 5), One(4), One(7)]),
    r(2121, Op21, 0, &[OP2_1, Pair(6, 5), One(7)]),
    r(1221, Free, 0, &[Pair(4, 3), Pair(6, 5), One(2), One(7)]),
    r(1221, Op12, 0, &[OP1_2, Pair(6, 5), One(7)]),
    r(2112, Free, 0, &[Pair(3, 2), Pair(7, 6), One(4), One(5)]),
    r(2112, Op21, 0, &[OP2_1, Pair(7, 6), One(5)]),
    r(1212, Free, 0, &[Pair(4, 3), Pair(7, 6), One(2), One(5)]),
    r(1212, Op12, 0, &[OP1_2, Pair(7, 6), One(5)]),
    r(1122, Free, 0, &[Pair(5, 4), Pair(7, 6), One(2), One(3)]),
    r(1122, Bp11, 0, &[BP, Pair(5, 4), Pair(7, 6)]),
    r(1122, Op11, 0, &[OP1, Pair(5, 4), Pair(7, 6)]),
    r(222, Free, 0, &[Pair(3, 2), Pair(5, 4), Pair(7, 6)]),
    r(222, Dp22, 0, &[DP2_2, Pair(7, 6)]),
    r(222, Op22, 0, &[OP2_2, Pair(7, 6)]),
    r(3111, Free, 0, &[Triple(4, 3, 2), One(5), One(6), One(7)]),
    r(3111, Op31, 0, &[OP3_1, One(6), One(7)]),
    r(1311, Free, 0, &[Triple(5, 4, 3), One(2), One(6), One(7)]),
    r(1311, Op13, 0, &[OP1_3, One(6), One(7)]),
    r(1131, Free, 0, &[Triple(6, 5, 4), One(2), One(3), One(7)]),
    r(1131, Bp11, 0, &[BP, Triple(6, 5, 4), One(7)]),
    r(1131, Op11, 0, &[OP1, Triple(6, 5, 4), One(7)]),
    r(1113, Free, 0, &[Triple(7, 6, 5), One(2), One(3), One(4)]),
    r(1113, Bp11, 0, &[BP, Triple(7, 6, 5), One(4)]),
    r(1113, Op11, 0, &[OP1, Triple(7, 6, 5), One(4)]),
    r(123, Free, 0, &[Triple(7, 6, 5), Pair(4, 3), One(2)]),
    r(123, Op12, 0, &[OP1_2, Triple(7, 6, 5)]),
    r(213, Free, 0, &[Triple(7, 6, 5), Pair(3, 2), One(4)]),
    r(213, Op21, 0, &[OP2_1, Triple(7, 6, 5)]),
    r(132, Free, 0, &[Triple(5, 4, 3), Pair(7, 6), One(2)]),
    r(132, Op13, 0, &[OP1_3, Pair(7, 6)]),
    r(231, Free, 0, &[Triple(6, 5, 4), Pair(3, 2), One(7)]),
    r(312, Free, 0, &[Triple(4, 3, 2), Pair(7, 6), One(5)]),
    r(312, Op31, 0, &[OP3_1, Pair(7, 6)]),
    r(321, Free, 0, &[Triple(4, 3, 2), Pair(6, 5), One(7)]),
    r(33, Free, 0, &[Triple(4, 3, 2), Triple(7, 6, 5)]),
    r(411, Free, 0, &[Quad(5, 4, 3, 2), One(6), One(7)]),
    r(141, Free, 0, &[Quad(6, 5, 4, 3), One(2), One(7)]),
    r(114, Free, 0, &[Quad(7, 6, 5, 4), One(2), One(3)]),
    r(114, Bp11, 0, &[BP, Quad(7, 6, 5, 4)]),
    r(114, Op11, 0, &[OP1, Quad(7, 6, 5, 4)]),
    r(42, Free, 0, &[Quad(5, 4, 3, 2), Pair(7, 6)]),
    r(24, Free, 0, &[Quad(7, 6, 5, 4), Pair(3, 2)]),
    // Nine-piece endings.
    r(1111111, Free, 0, &[One(2), One(3), One(4), One(5), One(6), One(7), One(8)]),
    r(211111, Free, 0, &[Pair(3, 2), One(4), One(5), One(6), One(7), One(8)]),
    r(121111, Free, 0, &[Pair(4, 3), One(2), One(5), One(6), One(7), One(8)]),
    r(112111, Free, 0, &[Pair(5, 4), One(2), One(3), One(6), One(7), One(8)]),
    r(111211, Free, 0, &[Pair(6, 5), One(2), One(3), One(4), One(7), One(8)]),
    r(111121, Free, 0, &[Pair(7, 6), One(2), One(3), One(4), One(5), One(8)]),
    r(111112, Free, 0, &[Pair(8, 7), One(2), One(3), One(4), One(5), One(6)]),
    r(22111, Free, 0, &[Pair(3, 2), Pair(5, 4), One(6), One(7), One(8)]),
    r(22111, Dp22, 0, &[DP2_2, One(6), One(7), One(8)]),
    r(21211, Free, 0, &[Pair(3, 2), Pair(6, 5), One(4), One(7), One(8)]),
    r(21121, Free, 0, &[Pair(3, 2), Pair(7, 6), One(4), One(5), One(8)]),
    r(21112, Free, 0, &[Pair(3, 2), Pair(8, 7), One(4), One(5), One(6)]),
    r(12211, Free, 0, &[Pair(4, 3), Pair(6, 5), One(2), One(7), One(8)]),
    r(12121, Free, 0, &[Pair(4, 3), Pair(7, 6), One(2), One(5), One(8)]),
    r(12112, Free, 0, &[Pair(4, 3), Pair(8, 7), One(2), One(5), One(6)]),
    r(11221, Free, 0, &[Pair(5, 4), Pair(7, 6), One(2), One(3), One(8)]),
    r(11212, Free, 0, &[Pair(5, 4), Pair(8, 7), One(2), One(3), One(6)]),
    r(11122, Free, 0, &[Pair(6, 5), Pair(8, 7), One(2), One(3), One(4)]),
    r(2221, Free, 0, &[Pair(3, 2), Pair(5, 4), Pair(7, 6), One(8)]),
    r(2221, Dp22, 0, &[DP2_2, Pair(7, 6), One(8)]),
    r(2221, Free, 1131, &[Pair(5, 4), PairOdd(3, 2), PairOdd(7, 6), One(8)]),
    r(2221, Free, 1130, &[Pair(5, 4), PairOdd(3, 2), PairEven(7, 6), One(8)]),
    r(2221, Free, 1030, &[Pair(5, 4), PairEven(3, 2), PairEven(7, 6), One(8)]),
    r(2212, Free, 0, &[Pair(3, 2), Pair(5, 4), Pair(8, 7), One(6)]),
    r(2212, Dp22, 0, &[DP2_2, Pair(8, 7), One(6)]),
    r(2122, Free, 0, &[Pair(3, 2), Pair(6, 5), Pair(8, 7), One(4)]),
    r(1222, Free, 0, &[Pair(4, 3), Pair(6, 5), Pair(8, 7), One(2)]),
    r(31111, Free, 0, &[Triple(4, 3, 2), One(5), One(6), One(7), One(8)]),
    r(13111, Free, 0, &[Triple(5, 4, 3), One(2), One(6), One(7), One(8)]),
    r(11311, Free, 0, &[Triple(6, 5, 4), One(2), One(3), One(7), One(8)]),
    r(11131, Free, 0, &[Triple(7, 6, 5), One(2), One(3), One(4), One(8)]),
    r(11113, Free, 0, &[Triple(8, 7, 6), One(2), One(3), One(4), One(5)]),
    r(3211, Free, 0, &[Triple(4, 3, 2), Pair(6, 5), One(7), One(8)]),
    r(3121, Free, 0, &[Triple(4, 3, 2), Pair(7, 6), One(5), One(8)]),
    r(3121, Free, 1100, &[TripleOdd(4, 3, 2), Pair(7, 6), One(5), One(8)]),
    r(3121, Free, 1111, &[TripleOdd(4, 3, 2), PairOdd(7, 6), One(5), One(8)]),
    r(3121, Free, 1110, &[TripleOdd(4, 3, 2), PairEven(7, 6), One(5), One(8)]),
    r(3112, Free, 0, &[Triple(4, 3, 2), Pair(8, 7), One(5), One(6)]),
    r(2311, Free, 0, &[Triple(6, 5, 4), Pair(3, 2), One(7), One(8)]),
    r(2131, Free, 0, &[Triple(7, 6, 5), Pair(3, 2), One(4), One(8)]),
    r(2113, Free, 0, &[Triple(8, 7, 6), Pair(3, 2), One(4), One(5)]),
    r(1321, Free, 0, &[Triple(5, 4, 3), Pair(7, 6), One(2), One(8)]),
    r(1312, Free, 0, &[Triple(5, 4, 3), Pair(8, 7), One(2), One(6)]),
    r(1312, Free, 10, &[Triple(5, 4, 3), PairEven(8, 7), One(2), One(6)]),
    r(1312, Free, 11, &[Triple(5, 4, 3), PairOdd(8, 7), One(2), One(6)]),
    r(1231, Free, 0, &[Triple(7, 6, 5), Pair(4, 3), One(2), One(8)]),
    r(1213, Free, 0, &[Triple(8, 7, 6), Pair(4, 3), One(2), One(5)]),
    r(1132, Free, 0, &[Triple(6, 5, 4), Pair(8, 7), One(2), One(3)]),
    r(1123, Free, 0, &[Triple(8, 7, 6), Pair(5, 4), One(2), One(3)]),
    r(322, Free, 0, &[Triple(4, 3, 2), Pair(6, 5), Pair(8, 7)]),
    r(322, Free, 10, &[Triple(4, 3, 2), Pair(8, 7), PairEven(6, 5)]),
    r(322, Free, 11, &[Triple(4, 3, 2), Pair(8, 7), PairOdd(6, 5)]),
    r(232, Free, 0, &[Triple(6, 5, 4), Pair(3, 2), Pair(8, 7)]),
    r(223, Free, 0, &[Triple(8, 7, 6), Pair(3, 2), Pair(5, 4)]),
    r(223, Dp22, 0, &[DP2_2, Triple(8, 7, 6)]),
    r(223, Free, 1100, &[Triple(8, 7, 6), Pair(5, 4), PairOdd(3, 2)]),
    r(223, Free, 1000, &[Triple(8, 7, 6), Pair(5, 4), PairEven(3, 2)]),
    r(331, Free, 0, &[Triple(4, 3, 2), Triple(7, 6, 5), One(8)]),
    r(331, Free, 20, &[Triple(4, 3, 2), TripleEven(7, 6, 5), One(8)]),
    r(331, Free, 21, &[Triple(4, 3, 2), TripleOdd(7, 6, 5), One(8)]),
    r(313, Free, 0, &[Triple(4, 3, 2), Triple(8, 7, 6), One(5)]),
    r(133, Free, 0, &[Triple(5, 4, 3), Triple(8, 7, 6), One(2)]),
    r(4111, Free, 0, &[Quad(5, 4, 3, 2), One(6), One(7), One(8)]),
    r(1411, Free, 0, &[Quad(6, 5, 4, 3), One(2), One(7), One(8)]),
    r(1141, Free, 0, &[Quad(7, 6, 5, 4), One(2), One(3), One(8)]),
    r(1114, Free, 0, &[Quad(8, 7, 6, 5), One(2), One(3), One(4)]),
    r(421, Free, 0, &[Quad(5, 4, 3, 2), Pair(7, 6), One(8)]),
    r(421, Free, 10, &[Quad(5, 4, 3, 2), PairEven(7, 6), One(8)]),
    r(421, Free, 11, &[Quad(5, 4, 3, 2), PairOdd(7, 6), One(8)]),
    r(412, Free, 0, &[Quad(5, 4, 3, 2), Pair(8, 7), One(6)]),
    r(241, Free, 0, &[Quad(7, 6, 5, 4), Pair(3, 2), One(8)]),
    r(214, Free, 0, &[Quad(8, 7, 6, 5), Pair(3, 2), One(4)]),
    r(142, Free, 0, &[Quad(6, 5, 4, 3), Pair(8, 7), One(2)]),
    r(124, Free, 0, &[Quad(8, 7, 6, 5), Pair(4, 3), One(2)]),
    r(43, Free, 0, &[Quad(5, 4, 3, 2), Triple(8, 7, 6)]),
    r(34, Free, 0, &[Quad(8, 7, 6, 5), Triple(4, 3, 2)]),
    r(511, Free, 0, &[Quint([2, 3, 4, 5, 6]), One(7), One(8)]),
    r(151, Free, 0, &[Quint([3, 4, 5, 6, 7]), One(2), One(8)]),
    r(115, Free, 0, &[Quint([4, 5, 6, 7, 8]), One(2), One(3)]),
    r(52, Free, 0, &[Quint([2, 3, 4, 5, 6]), Pair(8, 7)]),
    r(25, Free, 0, &[Quint([4, 5, 6, 7, 8]), Pair(3, 2)]),
    r(61, Free, 0, &[Sext([2, 3, 4, 5, 6, 7]), One(8)]),
    r(16, Free, 0, &[Sext([3, 4, 5, 6, 7, 8]), One(2)]),
    // Three- to seven-piece endings.
    r(1, Free, 0, &[One(2)]),
    r(11, Free, 0, &[One(2), One(3)]),
    r(11, Bp11, 0, &[BP]),
    r(11, Op11, 0, &[OP1]),
    r(111, Free, 0, &[One(2), One(3), One(4)]),
    r(111, Bp11, 0, &[BP, One(4)]),
    r(111, Op11, 0, &[OP1, One(4)]),
    r(1111, Free, 0, &[One(2), One(3), One(4), One(5)]),
    r(1111, Bp11, 0, &[BP, One(4), One(5)]),
    r(1111, Op11, 0, &[OP1, One(4), One(5)]),
    r(11111, Free, 0, &[One(2), One(3), One(4), One(5), One(6)]),
    r(11111, Bp11, 0, &[BP, One(4), One(5), One(6)]),
    r(11111, Op11, 0, &[OP1, One(4), One(5), One(6)]),
    r(2, Free, 0, &[Pair(3, 2)]),
    r(2, Free, 1100, &[PairOdd(3, 2)]),
    r(21, Free, 0, &[Pair(3, 2), One(4)]),
    r(21, Op21, 0, &[OP2_1]),
    r(12, Free, 0, &[Pair(4, 3), One(2)]),
    r(12, Op12, 0, &[OP1_2]),
    r(211, Free, 0, &[Pair(3, 2), One(4), One(5)]),
    r(211, Op21, 0, &[OP2_1, One(5)]),
    r(121, Free, 0, &[Pair(4, 3), One(2), One(5)]),
    r(121, Op12, 0, &[OP1_2, One(5)]),
    r(112, Free, 0, &[Pair(5, 4), One(2), One(3)]),
    r(112, Bp11, 0, &[BP, Pair(5, 4)]),
    r(112, Op11, 0, &[OP1, Pair(5, 4)]),
    r(2111, Free, 0, &[Pair(3, 2), One(4), One(5), One(6)]),
    r(2111, Op21, 0, &[OP2_1, One(5), One(6)]),
    r(1211, Free, 0, &[Pair(4, 3), One(2), One(5), One(6)]),
    r(1211, Op12, 0, &[OP1_2, One(5), One(6)]),
    r(1121, Free, 0, &[Pair(5, 4), One(2), One(3), One(6)]),
    r(1121, Bp11, 0, &[BP, Pair(5, 4), One(6)]),
    r(1121, Op11, 0, &[OP1, Pair(5, 4), One(6)]),
    r(1112, Free, 0, &[Pair(6, 5), One(2), One(3), One(4)]),
    r(1112, Bp11, 0, &[BP, Pair(6, 5), One(4)]),
    r(1112, Op11, 0, &[OP1, Pair(6, 5), One(4)]),
    r(22, Free, 0, &[Pair(3, 2), Pair(5, 4)]),
    r(22, Dp22, 0, &[DP2_2]),
    r(22, Op22, 0, &[OP2_2]),
    r(221, Free, 0, &[Pair(3, 2), Pair(5, 4), One(6)]),
    r(221, Dp22, 0, &[DP2_2, One(6)]),
    r(221, Op22, 0, &[OP2_2, One(6)]),
    r(212, Free, 0, &[Pair(3, 2), Pair(6, 5), One(4)]),
    r(212, Op21, 0, &[OP2_1, Pair(6, 5)]),
    r(122, Free, 0, &[Pair(4, 3), Pair(6, 5), One(2)]),
    r(122, Op12, 0, &[OP1_2, Pair(6, 5)]),
    r(3, Free, 0, &[Triple(4, 3, 2)]),
    r(3, Free, 1100, &[TripleOdd(4, 3, 2)]),
    r(31, Free, 0, &[Triple(4, 3, 2), One(5)]),
    r(31, Op31, 0, &[OP3_1]),
    r(13, Free, 0, &[Triple(5, 4, 3), One(2)]),
    r(13, Op13, 0, &[OP1_3]),
    r(311, Free, 0, &[Triple(4, 3, 2), One(5), One(6)]),
    r(311, Op31, 0, &[OP3_1, One(6)]),
    r(131, Free, 0, &[Triple(5, 4, 3), One(2), One(6)]),
    r(131, Op13, 0, &[OP1_3, One(6)]),
    r(113, Free, 0, &[Triple(6, 5, 4), One(2), One(3)]),
    r(113, Bp11, 0, &[BP, Triple(6, 5, 4)]),
    r(113, Op11, 0, &[OP1, Triple(6, 5, 4)]),
    r(32, Free, 0, &[Triple(4, 3, 2), Pair(6, 5)]),
    r(23, Free, 0, &[Triple(6, 5, 4), Pair(3, 2)]),
    r(4, Free, 0, &[Quad(5, 4, 3, 2)]),
    r(41, Free, 0, &[Quad(5, 4, 3, 2), One(6)]),
    r(14, Free, 0, &[Quad(6, 5, 4, 3), One(2)]),
    r(5, Free, 0, &[Quint([2, 3, 4, 5, 6])]),
    r(51, Free, 0, &[Quint([2, 3, 4, 5, 6]), One(7)]),
    r(15, Free, 0, &[Quint([3, 4, 5, 6, 7]), One(2)]),
    r(6, Free, 0, &[Sext([2, 3, 4, 5, 6, 7])]),
    r(7, Free, 0, &[Sept([2, 3, 4, 5, 6, 7, 8])]),
];

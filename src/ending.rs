//! Material classification: a count matrix plus pawn-file and bishop-parity
//! constraints select a row of the index registry.
//!
//! The ending tag is a decimal concatenation of group sizes. Pawns lead:
//! per-color pawn counts for the free layout, the pawn-shape prefix (11, 21,
//! 22, ...) otherwise; the queen-to-knight counts of both colors follow.
//! K+2P+1N vs K+1P therefore classifies as 211.

use arrayvec::ArrayVec;

use crate::board::{Color, MATERIAL_ORDER, MAX_PIECES, Piece};
use crate::index::registry::{self, BishopParity, IndexRow, PawnFileType};

pub type PieceCounts = [[u8; 6]; 2];
/// Piece order of the canonical placement array, kings first.
pub type PieceList = ArrayVec<(Color, Piece), MAX_PIECES>;

/// Pawn counts each non-free shape demands, plus its tag prefix.
fn pawn_shape(pft: PawnFileType) -> Option<(u8, u8, u32)> {
    Some(match pft {
        PawnFileType::Bp11 | PawnFileType::Op11 => (1, 1, 11),
        PawnFileType::Op21 => (2, 1, 21),
        PawnFileType::Op12 => (1, 2, 12),
        PawnFileType::Op22 | PawnFileType::Dp22 => (2, 2, 22),
        PawnFileType::Op31 => (3, 1, 31),
        PawnFileType::Op13 => (1, 3, 13),
        PawnFileType::Op41 => (4, 1, 41),
        PawnFileType::Op14 => (1, 4, 14),
        PawnFileType::Op32 => (3, 2, 32),
        PawnFileType::Op23 => (2, 3, 23),
        PawnFileType::Op33 => (3, 3, 33),
        PawnFileType::Op42 => (4, 2, 42),
        PawnFileType::Op24 => (2, 4, 24),
        PawnFileType::Free => return None,
    })
}

/// The seven-piece "larger" pawn splits keep their dedicated tag but reuse
/// the free-pawn enumeration.
fn effective(pft: PawnFileType) -> PawnFileType {
    match pft {
        PawnFileType::Op41
        | PawnFileType::Op14
        | PawnFileType::Op32
        | PawnFileType::Op23
        | PawnFileType::Op33
        | PawnFileType::Op42
        | PawnFileType::Op24 => PawnFileType::Free,
        other => other,
    }
}

/// Resolve a material configuration to its registry row and the piece order
/// of the canonical placement array. `None` when the material, parity or
/// pawn-shape combination has no table.
pub fn ending_index(
    counts: &PieceCounts,
    bishop_parity: [BishopParity; 2],
    pft: PawnFileType,
) -> Option<(&'static IndexRow, PieceList)> {
    let total: usize = counts.iter().flatten().map(|&c| c as usize).sum();
    if total > MAX_PIECES {
        return None;
    }

    let mut ptypes = PieceList::new();
    ptypes.push((Color::White, Piece::King));
    ptypes.push((Color::Black, Piece::King));

    let wp = counts[Color::White as usize][Piece::Pawn as usize];
    let bp = counts[Color::Black as usize][Piece::Pawn as usize];

    if let Some((expect_w, expect_b, prefix)) = pawn_shape(pft) {
        if wp != expect_w || bp != expect_b {
            return None;
        }
        for _ in 0..wp {
            ptypes.push((Color::White, Piece::Pawn));
        }
        for _ in 0..bp {
            ptypes.push((Color::Black, Piece::Pawn));
        }

        let mut etype = prefix;
        for color in [Color::White, Color::Black] {
            for piece in MATERIAL_ORDER {
                let n = counts[color as usize][piece as usize];
                if n > 0 {
                    etype = 10 * etype + n as u32;
                }
            }
        }
        for color in [Color::White, Color::Black] {
            for piece in MATERIAL_ORDER {
                for _ in 0..counts[color as usize][piece as usize] {
                    ptypes.push((color, piece));
                }
            }
        }

        let row = registry::find(etype, effective(pft), 0)?;
        return Some((row, ptypes));
    }

    // Free pawns: per-color pawn counts lead the tag.
    let mut etype = 0u32;
    for n in [wp, bp] {
        if n > 0 {
            etype = 10 * etype + n as u32;
        }
    }
    for color in [Color::White, Color::Black] {
        for piece in MATERIAL_ORDER {
            let n = counts[color as usize][piece as usize];
            if n > 0 {
                etype = 10 * etype + n as u32;
            }
        }
    }
    for (color, n) in [(Color::White, wp), (Color::Black, bp)] {
        for _ in 0..n {
            ptypes.push((color, Piece::Pawn));
        }
    }
    for color in [Color::White, Color::Black] {
        for piece in MATERIAL_ORDER {
            for _ in 0..counts[color as usize][piece as usize] {
                ptypes.push((color, piece));
            }
        }
    }

    let sub_white = match bishop_parity[Color::White as usize] {
        BishopParity::None => 0,
        parity => sub_type_white(counts, parity)?,
    };
    let sub_black = match bishop_parity[Color::Black as usize] {
        BishopParity::None => 0,
        parity => sub_type_black(counts, parity)?,
    };
    let sub_type = 100 * sub_white + sub_black;

    let row = registry::find(etype, PawnFileType::Free, sub_type)?;
    Some((row, ptypes))
}

/// Ordinal of the white bishop group among the equally-sized groups of the
/// ending, composed with the parity digit. Only doubled and tripled bishop
/// groups have parity-split tables.
fn sub_type_white(counts: &PieceCounts, parity: BishopParity) -> Option<u16> {
    let w = Color::White as usize;
    let b = Color::Black as usize;
    let size = counts[w][Piece::Bishop as usize];
    if size != 2 && size != 3 {
        return None;
    }
    let mut group = 1u16;
    if counts[w][Piece::Pawn as usize] == size {
        group += 1;
    }
    if counts[b][Piece::Pawn as usize] == size {
        group += 1;
    }
    for piece in [Piece::Queen, Piece::Rook] {
        if counts[w][piece as usize] == size {
            group += 1;
        }
    }
    Some(10 * group + (parity == BishopParity::Odd) as u16)
}

fn sub_type_black(counts: &PieceCounts, parity: BishopParity) -> Option<u16> {
    let w = Color::White as usize;
    let b = Color::Black as usize;
    let size = counts[b][Piece::Bishop as usize];
    if size != 2 && size != 3 {
        return None;
    }
    let mut group = 1u16;
    for piece in [
        Piece::Queen,
        Piece::Rook,
        Piece::Bishop,
        Piece::Knight,
        Piece::Pawn,
    ] {
        if counts[w][piece as usize] == size {
            group += 1;
        }
    }
    if counts[b][Piece::Pawn as usize] == size {
        group += 1;
    }
    for piece in [Piece::Queen, Piece::Rook] {
        if counts[b][piece as usize] == size {
            group += 1;
        }
    }
    Some(10 * group + (parity == BishopParity::Odd) as u16)
}

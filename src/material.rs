//! Per-probe material info: canonical placements, the king-pair ordinal, and
//! every index variant the file layer may look up (base layout, pawn-file
//! specializations, bishop-parity restrictions).

use arrayvec::ArrayVec;

use crate::board::{Board, Color, MATERIAL_ORDER, MAX_PIECES, NCOLS, NROWS, Piece, col, row, square};
use crate::ending::{self, PieceCounts, PieceList};
use crate::error::ProbeError;
use crate::index::registry::{BishopParity, IndexRow, PawnFileType};
use crate::index::{TABLES, ZIndex};
use crate::symmetry::{self, IDENTITY, SYMMETRY, is_white_square};

/// One probeable index under a bishop-parity constraint set.
pub struct ParityVariant {
    pub row: &'static IndexRow,
    pub bishop_parity: [BishopParity; 2],
    pub index: Option<ZIndex>,
}

/// One probeable index under a pawn-file specialization. `kind` names the
/// on-disk directory flavor; the row may be shared with the free layout for
/// the larger pawn splits.
pub struct PawnVariant {
    pub kind: PawnFileType,
    pub row: &'static IndexRow,
    pub index: Option<ZIndex>,
}

/// Everything the file layer needs to locate a position, derived fresh for
/// each probe.
pub struct MbInfo {
    pub piece_count: PieceCounts,
    pub piece_types: PieceList,
    /// Canonical placements `[wk, bk, pieces...]` in ending order, with the
    /// en-passant virtual-row rewrite applied and the king-pair
    /// canonicalization transform already folded in.
    pub position: ArrayVec<usize, MAX_PIECES>,
    pub parity: u32,
    pub pawn_file_type: PawnFileType,
    pub kk_index: u32,
    pub parity_variants: ArrayVec<ParityVariant, 4>,
    pub pawn_variants: ArrayVec<PawnVariant, 2>,
}

impl MbInfo {
    pub fn from_board(board: &Board) -> Result<MbInfo, ProbeError> {
        if board.num_pieces as usize > MAX_PIECES {
            return Err(ProbeError::TooManyPieces);
        }

        let piece_count: PieceCounts = board.piece_count;
        let (mut position, parity, pawn_file_type) = canonical_placements(board);
        let pawns_present = board.pawns_present();

        let base = ending::ending_index(
            &piece_count,
            [BishopParity::None; 2],
            PawnFileType::Free,
        );

        let mut parity_variants: ArrayVec<ParityVariant, 4> = ArrayVec::new();
        let mut pawn_variants: ArrayVec<PawnVariant, 2> = ArrayVec::new();
        let mut piece_types = PieceList::new();

        if let Some((row, ptypes)) = base {
            piece_types = ptypes;
            parity_variants.push(ParityVariant {
                row,
                bishop_parity: [BishopParity::None; 2],
                index: None,
            });

            // Blocked/opposing-pawn specializations probeable for this shape.
            // A blocked pair is also an opposing pair, and a doubled pair is
            // also a plain 2v2 opposing shape, so those positions carry two
            // candidate indices in preference order.
            let mut push = |kind: PawnFileType, position: &mut ArrayVec<usize, MAX_PIECES>| {
                if let Some((row, _)) =
                    ending::ending_index(&piece_count, [BishopParity::None; 2], kind)
                {
                    let (_, index) = get_mb_index(position, true, row);
                    let _ = pawn_variants.try_push(PawnVariant { kind, row, index });
                }
            };
            match pawn_file_type {
                PawnFileType::Op11 => push(PawnFileType::Op11, &mut position),
                PawnFileType::Bp11 => {
                    push(PawnFileType::Op11, &mut position);
                    push(PawnFileType::Bp11, &mut position);
                }
                PawnFileType::Op22 => push(PawnFileType::Op22, &mut position),
                PawnFileType::Dp22 => {
                    push(PawnFileType::Op22, &mut position);
                    push(PawnFileType::Dp22, &mut position);
                }
                PawnFileType::Free => {}
                other => push(other, &mut position),
            }
        }

        // Bishop-parity restricted variants exist only for pawnless endings.
        let mut bishop_parity = [BishopParity::None; 2];
        if !pawns_present {
            bishop_parity[0] = parity_class(parity / 100);
            bishop_parity[1] = parity_class(parity % 100);
        }

        if bishop_parity[0] != BishopParity::None || bishop_parity[1] != BishopParity::None {
            if let Some((row, _)) =
                ending::ending_index(&piece_count, bishop_parity, PawnFileType::Free)
            {
                parity_variants.push(ParityVariant {
                    row,
                    bishop_parity,
                    index: None,
                });
            }
            // Both sides constrained: the half-constrained tables apply too.
            if bishop_parity[0] != BishopParity::None && bishop_parity[1] != BishopParity::None {
                for half in [
                    [bishop_parity[0], BishopParity::None],
                    [BishopParity::None, bishop_parity[1]],
                ] {
                    if let Some((row, _)) =
                        ending::ending_index(&piece_count, half, PawnFileType::Free)
                    {
                        parity_variants.push(ParityVariant {
                            row,
                            bishop_parity: half,
                            index: None,
                        });
                    }
                }
            }
        }

        if parity_variants.is_empty() {
            return Err(ProbeError::EtypeNotMapped);
        }

        let mut kk_index = 0u32;
        for (i, variant) in parity_variants.iter_mut().enumerate() {
            let (kk, index) = get_mb_index(&mut position, pawns_present, variant.row);
            variant.index = index;
            if i == 0 {
                kk_index = kk as u32;
            } else {
                debug_assert_eq!(kk as u32, kk_index);
            }
        }

        Ok(MbInfo {
            piece_count,
            piece_types,
            position,
            parity,
            pawn_file_type,
            kk_index,
            parity_variants,
            pawn_variants,
        })
    }
}

/// Bishop census digit pair (`10 * on_white + on_black`) to a parity class.
/// All bishops on one square color constrain the table; a split never does.
fn parity_class(two_digits: u32) -> BishopParity {
    match two_digits {
        20 | 2 | 30 | 3 => BishopParity::Even,
        11 | 21 | 12 => BishopParity::Odd,
        _ => BishopParity::None,
    }
}

/// Lay the pieces out in ending order and classify the pawn shape.
///
/// Returns the placement array (kings, pawns white-then-black with the
/// virtual-row rewrite, then queens down to knights per color), the bishop
/// square-color census, and the pawn-file type.
fn canonical_placements(board: &Board) -> (ArrayVec<usize, MAX_PIECES>, u32, PawnFileType) {
    let t = &*TABLES;
    let mut pos: ArrayVec<usize, MAX_PIECES> = ArrayVec::new();
    pos.push(board.wk as usize);
    pos.push(board.bk as usize);

    for color in [Color::White, Color::Black] {
        for &sq in &board.piece_locations[color as usize][Piece::Pawn as usize] {
            let sq = sq as usize;
            let mut placed = sq;
            if let Some(ep) = board.en_passant {
                let ep = ep as usize;
                // A pawn whose skipped square matches the recorded e.p.
                // square is re-encoded on its color's zeroth rank.
                if color == Color::White && row(sq) > 0 && square(row(sq) - 1, col(sq)) == ep {
                    placed = square(0, col(sq));
                }
                if color == Color::Black && row(sq) < NROWS - 1 && square(row(sq) + 1, col(sq)) == ep
                {
                    placed = square(NROWS - 1, col(sq));
                }
            }
            pos.push(placed);
        }
    }

    let wp = board.count(Color::White, Piece::Pawn) as usize;
    let bp = board.count(Color::Black, Piece::Pawn) as usize;
    let pawn_file_type = classify_pawn_files(&pos, wp, bp, t);

    let mut bishops_on_white = [0u32; 2];
    for color in [Color::White, Color::Black] {
        for piece in MATERIAL_ORDER {
            for &sq in &board.piece_locations[color as usize][piece as usize] {
                if piece == Piece::Bishop && is_white_square(sq as usize) {
                    bishops_on_white[color as usize] += 1;
                }
                pos.push(sq as usize);
            }
        }
    }
    let mut bw = bishops_on_white;
    let mut bb = [
        board.count(Color::White, Piece::Bishop) as u32 - bw[0],
        board.count(Color::Black, Piece::Bishop) as u32 - bw[1],
    ];
    // Even board: "white" and "black" squares are interchangeable, so pick
    // the lexicographically smaller census as canonical.
    if bb[0] > bw[0] || (bb[0] == bw[0] && bb[1] > bw[1]) {
        std::mem::swap(&mut bw[0], &mut bb[0]);
        std::mem::swap(&mut bw[1], &mut bb[1]);
    }
    let parity = 1000 * bw[0] + 100 * bb[0] + 10 * bw[1] + bb[1];

    debug_assert_eq!(pos.len(), board.num_pieces as usize);
    (pos, parity, pawn_file_type)
}

fn classify_pawn_files(
    pos: &[usize],
    wp: usize,
    bp: usize,
    t: &crate::index::Tables,
) -> PawnFileType {
    // White pawns occupy slots 2..2+wp, black pawns follow.
    match (wp, bp) {
        (1, 1) => {
            if col(pos[2]) == col(pos[3]) {
                if pos[3] == pos[2] + NCOLS {
                    return PawnFileType::Bp11;
                } else if pos[3] > pos[2] {
                    return PawnFileType::Op11;
                }
            }
            PawnFileType::Free
        }
        (2, 1) => {
            if t.opposing.op21_index(pos[2], pos[3], pos[4]) != -1 {
                PawnFileType::Op21
            } else {
                PawnFileType::Free
            }
        }
        (1, 2) => {
            if t.opposing.op12_index(pos[2], pos[3], pos[4]) != -1 {
                PawnFileType::Op12
            } else {
                PawnFileType::Free
            }
        }
        (2, 2) => {
            if t.opposing.dp22_index(pos[2], pos[3], pos[4], pos[5]) != -1 {
                PawnFileType::Dp22
            } else if t.opposing.op22_index(pos[2], pos[3], pos[4], pos[5]) != -1 {
                PawnFileType::Op22
            } else {
                PawnFileType::Free
            }
        }
        (3, 1) => {
            if t.opposing.op31_index(pos[2], pos[3], pos[4], pos[5]) != -1 {
                PawnFileType::Op31
            } else {
                PawnFileType::Free
            }
        }
        (1, 3) => {
            if t.opposing.op13_index(pos[2], pos[3], pos[4], pos[5]) != -1 {
                PawnFileType::Op13
            } else {
                PawnFileType::Free
            }
        }
        // The larger splits only check for some opposing white/black file
        // pair; their tables reuse the free enumeration.
        (4, 1) => any_opposing(pos, 2..6, 6..7, PawnFileType::Op41),
        (1, 4) => any_opposing(pos, 2..3, 3..7, PawnFileType::Op14),
        (3, 2) => any_opposing(pos, 2..5, 5..7, PawnFileType::Op32),
        (2, 3) => any_opposing(pos, 2..4, 4..7, PawnFileType::Op23),
        (3, 3) => any_opposing(pos, 2..5, 5..8, PawnFileType::Op33),
        (4, 2) => any_opposing(pos, 2..6, 6..8, PawnFileType::Op42),
        (2, 4) => any_opposing(pos, 2..4, 4..8, PawnFileType::Op24),
        _ => PawnFileType::Free,
    }
}

fn any_opposing(
    pos: &[usize],
    white: std::ops::Range<usize>,
    black: std::ops::Range<usize>,
    hit: PawnFileType,
) -> PawnFileType {
    for b in black {
        for w in white.clone() {
            if col(pos[b]) == col(pos[w]) && pos[w] < pos[b] {
                return hit;
            }
        }
    }
    PawnFileType::Free
}

/// Canonicalize the placements through the king-pair transform, encode them
/// under `row`, and resolve the residual on-axis symmetry by keeping the
/// smaller index. Returns the king-pair ordinal and the zone index (`None`
/// when this row cannot index the position).
pub fn get_mb_index(
    pos: &mut ArrayVec<usize, MAX_PIECES>,
    pawns_present: bool,
    row: &IndexRow,
) -> (i32, Option<ZIndex>) {
    let sym = &*SYMMETRY;
    let t = &*TABLES;
    let kk_table = if pawns_present {
        &sym.kk
    } else {
        &sym.kk_nopawns
    };

    let transform = kk_table.transform(pos[0], pos[1]);
    if transform < 0 {
        // Adjacent kings never reach this point from a validated board.
        return (-1, None);
    }
    if transform as usize != IDENTITY {
        let map = sym.transforms.map(transform as usize);
        for p in pos.iter_mut() {
            *p = map[*p] as usize;
        }
    }

    let mut offset = row.encode(t, pos);

    let residual = if pawns_present {
        symmetry::flip_pawns(&sym.transforms, pos[0], pos[1])
    } else {
        symmetry::flip_nopawns(&sym.transforms, pos[0], pos[1])
    };
    if let Some(map) = residual {
        let mut flipped = pos.clone();
        for p in flipped.iter_mut() {
            *p = map[*p] as usize;
        }
        let offset_t = row.encode(t, &flipped);
        if zless(offset_t, offset) {
            offset = offset_t;
            *pos = flipped;
        }
    }

    (kk_table.index(pos[0], pos[1]), offset)
}

/// Compare zone indices with the missing value largest, as the legacy
/// ALL_ONES sentinel ordered.
fn zless(a: Option<ZIndex>, b: Option<ZIndex>) -> bool {
    a.unwrap_or(ZIndex::MAX) < b.unwrap_or(ZIndex::MAX)
}

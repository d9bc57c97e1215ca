//! Enumerations of pawn configurations containing at least one opposing pair
//! (a white pawn strictly south of a black pawn on the same file), plus the
//! doubled-pair (DP) shapes. Pawns on the edge ranks encode special states
//! rather than literal squares: a white pawn written on rank 1 means "just
//! double-pushed and en-passant capturable" (it physically stands on rank 4),
//! a pawn written on the promotion rank means "just promoted"; mirrored for
//! black. The loop nesting below fixes the on-disk ordinal order and must not
//! be rearranged.

use crate::board::{NCOLS, NROWS, NSQUARES, col, row, square};

// Closed-form counts, asserted against the enumerations at build time.
pub const N2_OPPOSING: usize = NCOLS * (NROWS - 2) * (NROWS - 3) / 2;

pub const N2_1_OPPOSING: usize = NCOLS * (NCOLS - 1) * (NROWS - 1) * (NROWS - 2) * (NROWS - 3) / 2
    + 2 * (NCOLS - 1) * (NROWS - 5 + 2)
    + NCOLS * (NROWS - 3) * (NROWS - 2) * (2 * NROWS - 5) / 6;
pub const N1_2_OPPOSING: usize = N2_1_OPPOSING;

pub const N4_ONE_COLUMN: usize = NCOLS * (NROWS - 2) * (NROWS - 3) * (NROWS - 4) * (NROWS - 5) / 12;
pub const N4_NON_ADJACENT: usize = (NCOLS - 1) * (NCOLS - 2) / 2
    * ((NROWS - 2) * (NROWS - 3) / 2)
    * ((NROWS - 2) * (NROWS - 3) / 2);
pub const N4_ADJACENT: usize =
    2 * (NCOLS - 1) * (NROWS - 1) * (NROWS - 2) * (NROWS - 3) * (NROWS - 4) / 24;
pub const N4_OPPOSING: usize = N4_ONE_COLUMN + N4_NON_ADJACENT + N4_ADJACENT;

const N4_OPPOSING_NO_EP: usize = NCOLS * (NCOLS - 1) / 2
    * ((NROWS - 2) * (NROWS - 3) / 2)
    * ((NROWS - 2) * (NROWS - 3) / 2)
    + NCOLS * (NROWS - 2) * (NROWS - 3) * (NROWS - 4) * (NROWS - 5) / 12;
const N4_OPPOSING_EP: usize = 2 * (NCOLS - 1) * 4 * (NROWS - 5);

const N2_2_OPPOSING_3: usize = (NROWS - 2) * (NROWS - 3) / 2
    * NCOLS
    * ((NROWS - 1) * (NROWS - 1) - 1)
    * (NCOLS - 1)
    * (NCOLS - 2);
const N2_2_OPPOSING_2A: usize =
    (NROWS - 2) * (NROWS - 3) / 2 * (NROWS * (NROWS - 1) / 2 - 1) * NCOLS * (NCOLS - 1);
const N2_2_OPPOSING_2B: usize = (((NROWS - 2) * (NROWS - 3) * (NROWS - 4) / 6
    + (NROWS - 1) * (NROWS - 2) * (NROWS - 3) / 6)
    * (NROWS - 1)
    - (NROWS - 2) * (NROWS - 3) / 2)
    * NCOLS
    * (NCOLS - 1);
const N2_2_OPPOSING_1: usize = (2 * (NROWS - 1) * (NROWS - 2) * (NROWS - 3) * (NROWS - 4) / 24
    + NROWS * (NROWS - 1) * (NROWS - 2) * (NROWS - 3) / 24
    - (NROWS - 2) * (NROWS - 3) / 2)
    * NCOLS;
const N2_2_OPPOSING_NO_EP: usize = N2_2_OPPOSING_3
    + N2_2_OPPOSING_2A
    + 2 * N2_2_OPPOSING_2B
    + N2_2_OPPOSING_1
    + N4_OPPOSING_NO_EP;

const N2_2_EP: usize = ((NROWS - 2) * (NROWS - 3) / 2 * (NCOLS - 2)
    + 2 * (NROWS - 2) * (NCOLS - 2)
    + (NROWS - 5) * (NROWS - 2) * (NCOLS - 2)
    + (NROWS - 5) * (NROWS - 5)
    + ((NROWS - 3) * (NROWS - 4) / 2 + 1)
    + (NROWS - 5) * (NROWS - 6))
    * 2
    * 2
    * (NCOLS - 1)
    - 2 * 4 * (NCOLS - 2)
    + N4_OPPOSING_EP;
pub const N2_2_OPPOSING: usize = N2_2_OPPOSING_NO_EP + N2_2_EP;

const N31_A: usize = NCOLS * (NROWS - 2) * (NROWS - 3) / 2
    * ((NCOLS - 1) * (NROWS - 1) * ((NCOLS - 1) * (NROWS - 1) - 1) / 2
        - (NCOLS - 1) * (NCOLS - 2) / 2);
const N31_B: usize = NCOLS
    * (NCOLS - 1)
    * (2 * (NROWS - 2) * (NROWS - 3) * (NROWS - 4) / 6 * (NROWS - 1)
        + (NROWS - 2) * (NROWS - 3) / 2 * (NROWS - 2));
const N31_C: usize = NCOLS
    * (2 * (NROWS - 1) * (NROWS - 2) * (NROWS - 3) * (NROWS - 4) / 24
        + (NROWS - 2) * (NROWS - 3) * (NROWS - 4) * (NROWS - 5) / 24);
const N31_EP_W: usize = 2
    * ((NROWS - 5) * (NROWS - 6) / 2 + (NROWS - 5) * ((NCOLS - 1) * (NROWS - 2) - 1))
    + (NCOLS - 2)
        * (2 * (NROWS - 5) * (NROWS - 6) / 2 + (NROWS - 5) * (2 * (NCOLS - 1) * (NROWS - 2) - 3));
const N31_EP_B: usize =
    (NCOLS - 1) * 2 * (1 + 2 * (2 * (NROWS - 5) + (NCOLS - 2) * (NROWS - 2)));
pub const N3_1_OPPOSING: usize = N31_A + N31_B + N31_C + N31_EP_W + N31_EP_B;
pub const N1_3_OPPOSING: usize = N3_1_OPPOSING;

const VIRTUAL_SHIFT: usize = 3 * NCOLS;

/// Lookup tables for every opposing-pawn shape, plus the ordinal-to-squares
/// inverses used by the decode path. Square values are in the encoded
/// (virtual-row) coordinate system.
pub struct OpposingTables {
    pub op2: Vec<i32>,
    pub op21: Vec<i32>,
    pub op12: Vec<i32>,
    pub op22: Vec<i32>,
    pub op31: Vec<i32>,
    pub op13: Vec<i32>,
    pub dp22: Vec<i32>,

    pub op2_rev: Vec<[u8; 2]>,
    pub op21_rev: Vec<[u8; 3]>,
    pub op12_rev: Vec<[u8; 3]>,
    pub op22_rev: Vec<[u8; 4]>,
    pub op31_rev: Vec<[u8; 4]>,
    pub op13_rev: Vec<[u8; 4]>,
    pub dp22_rev: Vec<[u8; 4]>,
}

impl OpposingTables {
    /// Single fully-opposing pair: `w` strictly south of `b` on one file,
    /// both clear of the edge ranks.
    #[inline]
    pub fn op2_index(&self, w: usize, b: usize) -> i32 {
        self.op2[b + NSQUARES * w]
    }

    #[inline]
    pub fn op21_index(&self, w1: usize, w2: usize, b1: usize) -> i32 {
        self.op21[b1 + NSQUARES * (w2 + NSQUARES * w1)]
    }

    #[inline]
    pub fn op12_index(&self, w1: usize, b1: usize, b2: usize) -> i32 {
        self.op12[b2 + NSQUARES * (b1 + NSQUARES * w1)]
    }

    #[inline]
    pub fn op22_index(&self, w1: usize, w2: usize, b1: usize, b2: usize) -> i32 {
        self.op22[b2 + NSQUARES * (b1 + NSQUARES * (w2 + NSQUARES * w1))]
    }

    #[inline]
    pub fn op31_index(&self, w1: usize, w2: usize, w3: usize, b1: usize) -> i32 {
        self.op31[b1 + NSQUARES * (w3 + NSQUARES * (w2 + NSQUARES * w1))]
    }

    #[inline]
    pub fn op13_index(&self, w1: usize, b1: usize, b2: usize, b3: usize) -> i32 {
        self.op13[b3 + NSQUARES * (b2 + NSQUARES * (b1 + NSQUARES * w1))]
    }

    /// Two disjoint opposing pairs. Matches black pawns to white files both
    /// ways; `-1` when the configuration is not a DP shape.
    pub fn dp22_index(&self, w1: usize, w2: usize, b1: usize, b2: usize) -> i32 {
        let (w1c, w2c) = (col(w1), col(w2));
        let (b1c, b2c) = (col(b1), col(b2));
        if w1c == b1c && w2c == b2c {
            self.dp22[row(b2) + NROWS * (row(b1) + NROWS * (w2 + NSQUARES * w1))]
        } else if w1c == b2c && w2c == b1c {
            self.dp22[row(b1) + NROWS * (row(b2) + NROWS * (w2 + NSQUARES * w1))]
        } else {
            -1
        }
    }
}

/// Greedy matching from the table generator: each white pawn claims the
/// lowest unclaimed black pawn above it on its file. True when at least one
/// pair forms.
fn has_opposing_pair(white: &[usize], black: &[usize]) -> bool {
    let mut paired = [false; 4];
    let mut matched = 0;
    for &wpos in white {
        let mut best: Option<usize> = None;
        for (j, &bpos) in black.iter().enumerate() {
            if paired[j] {
                continue;
            }
            if col(wpos) == col(bpos) && bpos > wpos && best.is_none_or(|b| bpos < black[b]) {
                best = Some(j);
            }
        }
        if let Some(j) = best {
            paired[j] = true;
            matched += 1;
        }
    }
    matched >= 1
}

fn build_op2(tab: &mut [i32], rev: &mut Vec<[u8; 2]>) {
    tab.fill(-1);
    let mut index = 0i32;
    for sq1 in NCOLS..NSQUARES - 2 * NCOLS {
        let c = col(sq1);
        for r2 in row(sq1) + 1..NROWS - 1 {
            let sq2 = square(r2, c);
            tab[sq2 + NSQUARES * sq1] = index;
            rev.push([sq1 as u8, sq2 as u8]);
            index += 1;
        }
    }
    assert_eq!(index as usize, N2_OPPOSING);
}

fn build_op21(tab: &mut [i32], rev: &mut Vec<[u8; 3]>) {
    tab.fill(-1);
    let mut board = [0i8; NSQUARES];
    let mut index = 0i32;

    for wp1 in 0..NSQUARES - NCOLS {
        let wp1_physical = if row(wp1) == 0 { wp1 + VIRTUAL_SHIFT } else { wp1 };
        board[wp1_physical] = 1;
        // The second white pawn may stand on the last row (promotion).
        for wp2 in wp1 + 1..NSQUARES {
            // Only one white pawn can be e.p.-capturable, and a promotion
            // rules out e.p. entirely.
            if row(wp2) == 0 || (row(wp2) == NROWS - 1 && row(wp1) == 0) || board[wp2] != 0 {
                continue;
            }
            board[wp2] = 1;
            for bp1 in NCOLS..NSQUARES {
                let mut bp1_physical = bp1;
                if row(bp1) == NROWS - 1 {
                    if row(wp1) == 0 || row(wp2) == NROWS - 1 {
                        continue;
                    }
                    bp1_physical = bp1 - VIRTUAL_SHIFT;
                }
                if board[bp1_physical] != 0 {
                    continue;
                }
                board[bp1_physical] = -1;

                let ok = check_ep_white(&board, wp1, wp1_physical, &[bp1_physical])
                    && check_ep_black(&board, bp1, bp1_physical, &[wp1_physical, wp2]);
                let opposing = ok
                    && ((col(wp1_physical) == col(bp1_physical) && wp1_physical < bp1_physical)
                        || (col(wp2) == col(bp1_physical) && wp2 < bp1_physical));
                if opposing {
                    tab[bp1 + NSQUARES * (wp2 + NSQUARES * wp1)] = index;
                    tab[bp1 + NSQUARES * (wp1 + NSQUARES * wp2)] = index;
                    rev.push([wp1 as u8, wp2 as u8, bp1 as u8]);
                    index += 1;
                }
                board[bp1_physical] = 0;
            }
            board[wp2] = 0;
        }
        board[wp1_physical] = 0;
    }
    assert_eq!(index as usize, N2_1_OPPOSING);
}

fn build_op12(tab: &mut [i32], rev: &mut Vec<[u8; 3]>) {
    tab.fill(-1);
    let mut board = [0i8; NSQUARES];
    let mut index = 0i32;

    for wp1 in 0..NSQUARES - NCOLS {
        let wp1_physical = if row(wp1) == 0 { wp1 + VIRTUAL_SHIFT } else { wp1 };
        board[wp1_physical] = 1;
        // The first black pawn may stand on the first row (promotion).
        for bp1 in 0..NSQUARES - NCOLS {
            if (row(bp1) == 0 && row(wp1) == 0) || board[bp1] != 0 {
                continue;
            }
            board[bp1] = -1;
            for bp2 in bp1 + 1..NSQUARES {
                if row(bp2) == 0 {
                    continue;
                }
                let mut bp2_physical = bp2;
                if row(bp2) == NROWS - 1 {
                    if row(wp1) == 0 {
                        continue;
                    }
                    bp2_physical = bp2 - VIRTUAL_SHIFT;
                }
                if board[bp2_physical] != 0 {
                    continue;
                }
                board[bp2_physical] = -1;

                let ok = check_ep_white(&board, wp1, wp1_physical, &[bp1, bp2_physical])
                    && check_ep_black(&board, bp2, bp2_physical, &[wp1_physical]);
                let opposing = ok
                    && ((col(wp1_physical) == col(bp1) && wp1_physical < bp1)
                        || (col(wp1_physical) == col(bp2_physical)
                            && wp1_physical < bp2_physical));
                if opposing {
                    tab[bp2 + NSQUARES * (bp1 + NSQUARES * wp1)] = index;
                    tab[bp1 + NSQUARES * (bp2 + NSQUARES * wp1)] = index;
                    rev.push([wp1 as u8, bp1 as u8, bp2 as u8]);
                    index += 1;
                }
                board[bp2_physical] = 0;
            }
            board[bp1] = 0;
        }
        board[wp1_physical] = 0;
    }
    assert_eq!(index as usize, N1_2_OPPOSING);
}

fn build_op22(tab: &mut [i32], rev: &mut Vec<[u8; 4]>) {
    tab.fill(-1);
    let mut board = [0i8; NSQUARES];
    let mut index = 0i32;

    for wp1 in 0..NSQUARES - NCOLS {
        let wp1_physical = if row(wp1) == 0 { wp1 + VIRTUAL_SHIFT } else { wp1 };
        board[wp1_physical] = 1;
        for wp2 in wp1 + 1..NSQUARES {
            if row(wp2) == 0 || (row(wp2) == NROWS - 1 && row(wp1) == 0) || board[wp2] != 0 {
                continue;
            }
            board[wp2] = 1;
            for bp1 in 0..NSQUARES - NCOLS {
                if (row(bp1) == 0 && (row(wp2) == NROWS - 1 || row(wp1) == 0)) || board[bp1] != 0 {
                    continue;
                }
                board[bp1] = -1;
                for bp2 in bp1 + 1..NSQUARES {
                    if row(bp2) == 0 {
                        continue;
                    }
                    let mut bp2_physical = bp2;
                    if row(bp2) == NROWS - 1 {
                        if row(bp1) == 0 || row(wp1) == 0 || row(wp2) == NROWS - 1 {
                            continue;
                        }
                        bp2_physical = bp2 - VIRTUAL_SHIFT;
                    }
                    if board[bp2_physical] != 0 {
                        continue;
                    }
                    board[bp2_physical] = -1;

                    let ok = check_ep_pawns_white(&board, wp1, wp1_physical)
                        && check_ep_pawns_black(&board, bp2, bp2_physical)
                        && has_opposing_pair(&[wp1_physical, wp2], &[bp1, bp2_physical]);
                    if ok {
                        for (ba, bb) in [(bp2, bp1), (bp1, bp2)] {
                            for (wa, wb) in [(wp2, wp1), (wp1, wp2)] {
                                tab[ba + NSQUARES * (bb + NSQUARES * (wa + NSQUARES * wb))] =
                                    index;
                            }
                        }
                        rev.push([wp1 as u8, wp2 as u8, bp1 as u8, bp2 as u8]);
                        index += 1;
                    }
                    board[bp2_physical] = 0;
                }
                board[bp1] = 0;
            }
            board[wp2] = 0;
        }
        board[wp1_physical] = 0;
    }
    assert_eq!(index as usize, N2_2_OPPOSING);
}

fn build_op31(tab: &mut [i32], rev: &mut Vec<[u8; 4]>) {
    tab.fill(-1);
    let mut board = [0i8; NSQUARES];
    let mut index = 0i32;

    for wp1 in 0..NSQUARES - NCOLS {
        let wp1_physical = if row(wp1) == 0 { wp1 + VIRTUAL_SHIFT } else { wp1 };
        board[wp1_physical] = 1;
        for wp2 in wp1 + 1..NSQUARES - NCOLS {
            if row(wp2) == 0 || board[wp2] != 0 {
                continue;
            }
            board[wp2] = 1;
            for wp3 in wp2 + 1..NSQUARES {
                if row(wp3) == 0
                    || (row(wp3) == NROWS - 1 && row(wp1) == 0)
                    || board[wp3] != 0
                {
                    continue;
                }
                board[wp3] = 1;
                for bp1 in 2 * NCOLS..NSQUARES {
                    let mut bp1_physical = bp1;
                    if row(bp1) == NROWS - 1 {
                        if row(wp1) == 0 || row(wp3) == NROWS - 1 {
                            continue;
                        }
                        bp1_physical = bp1 - VIRTUAL_SHIFT;
                    }
                    if board[bp1_physical] != 0 {
                        continue;
                    }
                    board[bp1_physical] = -1;

                    let ok = check_ep_pawns_white(&board, wp1, wp1_physical)
                        && check_ep_pawns_black(&board, bp1, bp1_physical)
                        && has_opposing_pair(&[wp1_physical, wp2, wp3], &[bp1_physical]);
                    if ok {
                        for (a, b, c) in [
                            (wp3, wp2, wp1),
                            (wp2, wp3, wp1),
                            (wp3, wp1, wp2),
                            (wp1, wp3, wp2),
                            (wp2, wp1, wp3),
                            (wp1, wp2, wp3),
                        ] {
                            tab[bp1 + NSQUARES * (a + NSQUARES * (b + NSQUARES * c))] = index;
                        }
                        rev.push([wp1 as u8, wp2 as u8, wp3 as u8, bp1 as u8]);
                        index += 1;
                    }
                    board[bp1_physical] = 0;
                }
                board[wp3] = 0;
            }
            board[wp2] = 0;
        }
        board[wp1_physical] = 0;
    }
    assert_eq!(index as usize, N3_1_OPPOSING);
}

fn build_op13(tab: &mut [i32], rev: &mut Vec<[u8; 4]>) {
    tab.fill(-1);
    let mut board = [0i8; NSQUARES];
    let mut index = 0i32;

    for bp1 in 0..NSQUARES - NCOLS {
        board[bp1] = -1;
        for bp2 in bp1 + 1..NSQUARES - NCOLS {
            if row(bp2) == 0 || board[bp2] != 0 {
                continue;
            }
            board[bp2] = -1;
            for bp3 in bp2 + 1..NSQUARES {
                if row(bp3) == 0 {
                    continue;
                }
                let mut bp3_physical = bp3;
                if row(bp3) == NROWS - 1 {
                    if row(bp1) == 0 {
                        continue;
                    }
                    bp3_physical = bp3 - VIRTUAL_SHIFT;
                }
                if board[bp3_physical] != 0 {
                    continue;
                }
                board[bp3_physical] = -1;
                for wp1 in 0..NSQUARES - NCOLS {
                    let wp1_physical = if row(wp1) == 0 {
                        if row(bp1) == 0 || row(bp3) == NROWS - 1 {
                            continue;
                        }
                        wp1 + VIRTUAL_SHIFT
                    } else {
                        wp1
                    };
                    if board[wp1_physical] != 0 {
                        continue;
                    }
                    board[wp1_physical] = 1;

                    let ok = check_ep_pawns_white(&board, wp1, wp1_physical)
                        && check_ep_pawns_black(&board, bp3, bp3_physical)
                        && has_opposing_pair(&[wp1_physical], &[bp1, bp2, bp3_physical]);
                    if ok {
                        for (a, b, c) in [
                            (bp3, bp2, bp1),
                            (bp3, bp1, bp2),
                            (bp1, bp3, bp2),
                            (bp1, bp2, bp3),
                            (bp2, bp3, bp1),
                            (bp2, bp1, bp3),
                        ] {
                            tab[a + NSQUARES * (b + NSQUARES * (c + NSQUARES * wp1))] = index;
                        }
                        rev.push([wp1 as u8, bp1 as u8, bp2 as u8, bp3 as u8]);
                        index += 1;
                    }
                    board[wp1_physical] = 0;
                }
                board[bp3_physical] = 0;
            }
            board[bp2] = 0;
        }
        board[bp1] = 0;
    }
    assert_eq!(index as usize, N1_3_OPPOSING);
}

/// E.p. legality for a virtually-encoded white pawn: the skipped and origin
/// squares are empty and some black pawn stands beside the pushed pawn.
/// `black` lists candidate capturers (used by the 2+1 and 1+2 shapes, which
/// track specific pawns); `check_ep_pawns_white` scans the board instead.
fn check_ep_white(board: &[i8; NSQUARES], wp: usize, wp_physical: usize, black: &[usize]) -> bool {
    if wp == wp_physical {
        return true;
    }
    let ep_square = wp_physical - NCOLS;
    if board[ep_square] != 0 || board[ep_square - NCOLS] != 0 {
        return false;
    }
    black.iter().any(|&b| {
        (col(wp_physical) > 0 && b == wp_physical - 1)
            || (col(wp_physical) < NCOLS - 1 && b == wp_physical + 1)
    })
}

fn check_ep_black(board: &[i8; NSQUARES], bp: usize, bp_physical: usize, white: &[usize]) -> bool {
    if bp == bp_physical {
        return true;
    }
    let ep_square = bp_physical + NCOLS;
    if board[ep_square] != 0 || board[ep_square + NCOLS] != 0 {
        return false;
    }
    white.iter().any(|&w| {
        (col(bp_physical) > 0 && w == bp_physical - 1)
            || (col(bp_physical) < NCOLS - 1 && w == bp_physical + 1)
    })
}

fn check_ep_pawns_white(board: &[i8; NSQUARES], wp: usize, wp_physical: usize) -> bool {
    if wp == wp_physical {
        return true;
    }
    let ep_square = wp_physical - NCOLS;
    if board[ep_square] != 0 || board[ep_square - NCOLS] != 0 {
        return false;
    }
    (col(wp_physical) > 0 && board[wp_physical - 1] == -1)
        || (col(wp_physical) < NCOLS - 1 && board[wp_physical + 1] == -1)
}

fn check_ep_pawns_black(board: &[i8; NSQUARES], bp: usize, bp_physical: usize) -> bool {
    if bp == bp_physical {
        return true;
    }
    let ep_square = bp_physical + NCOLS;
    if board[ep_square] != 0 || board[ep_square + NCOLS] != 0 {
        return false;
    }
    (col(bp_physical) > 0 && board[bp_physical - 1] == 1)
        || (col(bp_physical) < NCOLS - 1 && board[bp_physical + 1] == 1)
}

#[derive(PartialEq, Eq)]
enum Dp22Shape {
    OneColumn,
    Adjacent,
    NonAdjacent,
    None,
}

/// Classify a doubled-pair candidate: both white pawns opposed by black
/// pawns, either stacked on one file, on adjacent files with the interleave
/// constraint, or on separated files.
fn dp22_shape(w1: usize, w2: usize, b1: usize, b2: usize) -> Dp22Shape {
    if w1 == w2 || w1 == b1 || w1 == b2 || w2 == b1 || w2 == b2 || b1 == b2 {
        return Dp22Shape::None;
    }
    let (mut w1r, mut w2r) = (row(w1), row(w2));
    if !(1..=NROWS - 3).contains(&w1r) || !(1..=NROWS - 3).contains(&w2r) {
        return Dp22Shape::None;
    }
    let (mut b1r, mut b2r) = (row(b1), row(b2));
    if !(2..=NROWS - 2).contains(&b1r) || !(2..=NROWS - 2).contains(&b2r) {
        return Dp22Shape::None;
    }
    let (mut w1c, mut w2c) = (col(w1), col(w2));
    let (mut b1c, mut b2c) = (col(b1), col(b2));

    if w2r < w1r {
        std::mem::swap(&mut w1r, &mut w2r);
        std::mem::swap(&mut w1c, &mut w2c);
    }
    if w1c == b2c && w2c == b1c {
        std::mem::swap(&mut b1c, &mut b2c);
        std::mem::swap(&mut b1r, &mut b2r);
    }

    if w1c == w2c {
        if w1c == b1c && b1c == b2c && w1r < b1r.min(b2r) && w2r < b1r.max(b2r) {
            return Dp22Shape::OneColumn;
        }
        return Dp22Shape::None;
    }

    if !(w1c == b1c && b1r > w1r && w2c == b2c && b2r > w2r) {
        return Dp22Shape::None;
    }

    if w1c == w2c + 1 || w1c + 1 == w2c {
        if w2r >= b1r {
            return Dp22Shape::Adjacent;
        }
        return Dp22Shape::None;
    }

    Dp22Shape::NonAdjacent
}

fn build_dp22(tab: &mut [i32], rev: &mut Vec<[u8; 4]>) {
    tab.fill(-1);
    let (mut index, mut one_column, mut adjacent, mut non_adjacent) = (0i32, 0, 0, 0);

    for w1 in 0..NSQUARES {
        for w2 in w1 + 1..NSQUARES {
            for b1 in 0..NSQUARES {
                for b2 in b1 + 1..NSQUARES {
                    let shape = dp22_shape(w1, w2, b1, b2);
                    match shape {
                        Dp22Shape::None => continue,
                        Dp22Shape::OneColumn => one_column += 1,
                        Dp22Shape::Adjacent => adjacent += 1,
                        Dp22Shape::NonAdjacent => non_adjacent += 1,
                    }
                    // Key black rows to the white pawn their file matches.
                    let (lo, hi) = if col(w1) == col(b1) {
                        (row(b1), row(b2))
                    } else {
                        (row(b2), row(b1))
                    };
                    tab[hi + NROWS * (lo + NROWS * (w2 + NSQUARES * w1))] = index;
                    tab[lo + NROWS * (hi + NROWS * (w1 + NSQUARES * w2))] = index;
                    if col(w1) == col(w2) {
                        tab[hi + NROWS * (lo + NROWS * (w1 + NSQUARES * w2))] = index;
                        tab[lo + NROWS * (hi + NROWS * (w2 + NSQUARES * w1))] = index;
                    }
                    rev.push([w1 as u8, w2 as u8, b1 as u8, b2 as u8]);
                    index += 1;
                }
            }
        }
    }

    assert_eq!(one_column, N4_ONE_COLUMN);
    assert_eq!(adjacent, N4_ADJACENT);
    assert_eq!(non_adjacent, N4_NON_ADJACENT);
    assert_eq!(index as usize, N4_OPPOSING);
}

pub fn build() -> OpposingTables {
    let mut op2 = vec![0i32; NSQUARES * NSQUARES];
    let mut op21 = vec![0i32; NSQUARES * NSQUARES * NSQUARES];
    let mut op12 = vec![0i32; NSQUARES * NSQUARES * NSQUARES];
    let mut op22 = vec![0i32; NSQUARES * NSQUARES * NSQUARES * NSQUARES];
    let mut op31 = vec![0i32; NSQUARES * NSQUARES * NSQUARES * NSQUARES];
    let mut op13 = vec![0i32; NSQUARES * NSQUARES * NSQUARES * NSQUARES];
    let mut dp22 = vec![0i32; NROWS * NROWS * NSQUARES * NSQUARES];

    let mut op2_rev = Vec::with_capacity(N2_OPPOSING);
    let mut op21_rev = Vec::with_capacity(N2_1_OPPOSING);
    let mut op12_rev = Vec::with_capacity(N1_2_OPPOSING);
    let mut op22_rev = Vec::with_capacity(N2_2_OPPOSING);
    let mut op31_rev = Vec::with_capacity(N3_1_OPPOSING);
    let mut op13_rev = Vec::with_capacity(N1_3_OPPOSING);
    let mut dp22_rev = Vec::with_capacity(N4_OPPOSING);

    build_op2(&mut op2, &mut op2_rev);
    build_op21(&mut op21, &mut op21_rev);
    build_op12(&mut op12, &mut op12_rev);
    build_op22(&mut op22, &mut op22_rev);
    build_op31(&mut op31, &mut op31_rev);
    build_op13(&mut op13, &mut op13_rev);
    build_dp22(&mut dp22, &mut dp22_rev);

    OpposingTables {
        op2,
        op21,
        op12,
        op22,
        op31,
        op13,
        dp22,
        op2_rev,
        op21_rev,
        op12_rev,
        op22_rev,
        op31_rev,
        op13_rev,
        dp22_rev,
    }
}

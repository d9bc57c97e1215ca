//! Mapping from a table key to its place in the on-disk tree:
//! `root/{ending}_{spec}/{ending}_{side}_{kk}.{mb|hi}` for the partitioned
//! families, `root/{ending}_{side}.yk` (with a `.__` companion) for the
//! legacy fallback.

use std::path::PathBuf;

use crate::board::{Color, MATERIAL_ORDER, Piece};
use crate::ending::PieceCounts;
use crate::index::registry::{BishopParity, PawnFileType};

/// Conventional ending name: white pieces then black, each king first and
/// the rest in descending value, e.g. `kqrkr` or `kppkp`.
pub fn ending_name(counts: &PieceCounts) -> String {
    let mut name = String::new();
    for color in [Color::White, Color::Black] {
        name.push('k');
        for piece in MATERIAL_ORDER {
            let ch = match piece {
                Piece::Queen => 'q',
                Piece::Rook => 'r',
                Piece::Bishop => 'b',
                Piece::Knight => 'n',
                _ => unreachable!(),
            };
            for _ in 0..counts[color as usize][piece as usize] {
                name.push(ch);
            }
        }
        for _ in 0..counts[color as usize][Piece::Pawn as usize] {
            name.push('p');
        }
    }
    name
}

fn pawn_spec(pft: PawnFileType) -> &'static str {
    match pft {
        PawnFileType::Free => "",
        PawnFileType::Bp11 => "bp1",
        PawnFileType::Op11 => "op1",
        PawnFileType::Op21 => "op21",
        PawnFileType::Op12 => "op12",
        PawnFileType::Dp22 => "dp2",
        PawnFileType::Op22 => "op22",
        PawnFileType::Op31 => "op31",
        PawnFileType::Op13 => "op13",
        PawnFileType::Op41 => "op41",
        PawnFileType::Op14 => "op14",
        PawnFileType::Op32 => "op32",
        PawnFileType::Op23 => "op23",
        PawnFileType::Op33 => "op33",
        PawnFileType::Op42 => "op42",
        PawnFileType::Op24 => "op24",
    }
}

fn parity_spec(parity: [BishopParity; 2]) -> String {
    let mut parts = Vec::new();
    match parity[0] {
        BishopParity::Even => parts.push("wbe"),
        BishopParity::Odd => parts.push("wbo"),
        BishopParity::None => {}
    }
    match parity[1] {
        BishopParity::Even => parts.push("bbe"),
        BishopParity::Odd => parts.push("bbo"),
        BishopParity::None => {}
    }
    parts.join("_")
}

/// Directory holding one `(ending, parity, pawn-spec)` slice. Parity and
/// pawn specializations never combine: parity splits exist only for
/// pawnless endings.
pub fn dir_name(ending: &str, parity: [BishopParity; 2], pft: PawnFileType) -> String {
    let spec = if parity[0] != BishopParity::None || parity[1] != BishopParity::None {
        parity_spec(parity)
    } else {
        pawn_spec(pft).to_string()
    };
    if spec.is_empty() {
        ending.to_string()
    } else {
        format!("{ending}_{spec}")
    }
}

pub fn side_letter(side: Color) -> char {
    match side {
        Color::White => 'w',
        Color::Black => 'b',
    }
}

pub fn mb_path(
    root: &std::path::Path,
    ending: &str,
    parity: [BishopParity; 2],
    pft: PawnFileType,
    side: Color,
    kk_index: u32,
    extension: &str,
) -> PathBuf {
    root.join(dir_name(ending, parity, pft)).join(format!(
        "{ending}_{}_{kk_index}.{extension}",
        side_letter(side)
    ))
}

pub fn yk_path(root: &std::path::Path, ending: &str, side: Color) -> PathBuf {
    root.join(format!("{ending}_{}.yk", side_letter(side)))
}

/// The `.__` overflow companion of a YK table.
pub fn yk_overflow_path(root: &std::path::Path, ending: &str, side: Color) -> PathBuf {
    root.join(format!("{ending}_{}.__", side_letter(side)))
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn ending_names() {
        assert_eq!(
            ending_name(&counts(&[(Piece::Queen, 1)], &[(Piece::Rook, 1)])),
            "kqkr"
        );
        assert_eq!(
            ending_name(&counts(&[(Piece::Pawn, 2)], &[(Piece::Pawn, 1)])),
            "kppkp"
        );
        assert_eq!(
            ending_name(&counts(
                &[(Piece::Rook, 1), (Piece::Pawn, 1)],
                &[(Piece::Bishop, 2)]
            )),
            "krpkbb"
        );
    }

    #[test]
    fn dir_names() {
        assert_eq!(
            dir_name("kpkp", [BishopParity::None; 2], PawnFileType::Op11),
            "kpkp_op1"
        );
        assert_eq!(
            dir_name("kqkr", [BishopParity::None; 2], PawnFileType::Free),
            "kqkr"
        );
        assert_eq!(
            dir_name(
                "kbbkb",
                [BishopParity::Even, BishopParity::Odd],
                PawnFileType::Free
            ),
            "kbbkb_wbe_bbo"
        );
    }
}

//! Thin FEN adapter. The probing core itself never parses text; this module
//! exists so embedding applications and the CLI can fill a [`Board`] from the
//! common interchange format.

use super::{
    Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color, NCOLS, NROWS, NSQUARES, Piece,
    square,
};
use crate::error::FenError;

/// Parse the six-field FEN grammar. The move counters are optional and
/// default to `0 1`, matching common EPD usage.
pub fn parse(fen: &str) -> Result<Board, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(FenError::FieldCount(fields.len()));
    }

    let mut squares = [0i8; NSQUARES];
    let mut r = NROWS;
    for rank in fields[0].split('/') {
        if r == 0 {
            return Err(FenError::Placement("too many ranks".into()));
        }
        r -= 1;
        let mut c = 0usize;
        for ch in rank.chars() {
            if let Some(skip) = ch.to_digit(10) {
                c += skip as usize;
                continue;
            }
            if c >= NCOLS {
                return Err(FenError::Placement(format!("rank overflow at '{ch}'")));
            }
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let piece = match ch.to_ascii_lowercase() {
                'p' => Piece::Pawn,
                'n' => Piece::Knight,
                'b' => Piece::Bishop,
                'r' => Piece::Rook,
                'q' => Piece::Queen,
                'k' => Piece::King,
                _ => return Err(FenError::Placement(format!("unknown piece '{ch}'"))),
            };
            squares[square(r, c)] = piece.code(color);
            c += 1;
        }
        if c != NCOLS {
            return Err(FenError::Placement(format!("rank {} has {c} files", r + 1)));
        }
    }
    if r != 0 {
        return Err(FenError::Placement("too few ranks".into()));
    }

    let side = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::SideToMove(other.into())),
    };

    let mut castling = 0u8;
    if fields[2] != "-" {
        for ch in fields[2].chars() {
            castling |= match ch {
                'K' => CASTLE_WK,
                'Q' => CASTLE_WQ,
                'k' => CASTLE_BK,
                'q' => CASTLE_BQ,
                _ => return Err(FenError::Castling(fields[2].into())),
            };
        }
    }

    let en_passant = match fields[3] {
        "-" => None,
        sq => Some(parse_square(sq).ok_or_else(|| FenError::EnPassant(sq.into()))?),
    };

    let halfmove = match fields.get(4) {
        None => 0,
        Some(s) => s.parse().map_err(|_| FenError::Clock((*s).into()))?,
    };
    let fullmove = match fields.get(5) {
        None => 1,
        Some(s) => s.parse().map_err(|_| FenError::Clock((*s).into()))?,
    };

    Ok(Board::new(
        squares, side, en_passant, castling, halfmove, fullmove,
    )?)
}

fn parse_square(s: &str) -> Option<u8> {
    let mut chars = s.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Some(square(rank as usize - '1' as usize, file as usize - 'a' as usize) as u8)
}

/// Render a board back to FEN, mainly for diagnostics.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    for r in (0..NROWS).rev() {
        let mut empty = 0;
        for c in 0..NCOLS {
            match Piece::from_code(board.squares[square(r, c)]) {
                None => empty += 1,
                Some((color, piece)) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    let ch = match piece {
                        Piece::Pawn => 'p',
                        Piece::Knight => 'n',
                        Piece::Bishop => 'b',
                        Piece::Rook => 'r',
                        Piece::Queen => 'q',
                        Piece::King => 'k',
                    };
                    out.push(if color == Color::White {
                        ch.to_ascii_uppercase()
                    } else {
                        ch
                    });
                }
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if r > 0 {
            out.push('/');
        }
    }
    out.push(' ');
    out.push(if board.side_to_move == Color::White {
        'w'
    } else {
        'b'
    });
    out.push(' ');
    if board.castling == 0 {
        out.push('-');
    } else {
        for (bit, ch) in [
            (CASTLE_WK, 'K'),
            (CASTLE_WQ, 'Q'),
            (CASTLE_BK, 'k'),
            (CASTLE_BQ, 'q'),
        ] {
            if board.castling & bit != 0 {
                out.push(ch);
            }
        }
    }
    out.push(' ');
    match board.en_passant {
        None => out.push('-'),
        Some(ep) => {
            out.push((b'a' + (ep % 8)) as char);
            out.push((b'1' + (ep / 8)) as char);
        }
    }
    out.push_str(&format!(
        " {} {}",
        board.halfmove_clock, board.fullmove_number
    ));
    out
}

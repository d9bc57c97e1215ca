pub mod fen;

use arrayvec::ArrayVec;
use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, FenError};

/// Board geometry. The indexing core is specialized to the 8x8 board; every
/// compile-time zone constant assumes these values.
pub const NROWS: usize = 8;
pub const NCOLS: usize = 8;
pub const NSQUARES: usize = NROWS * NCOLS;

/// Hard cap the index functions support: two kings plus seven others.
pub const MAX_PIECES: usize = 9;
/// A square list never holds more than this many identical pieces.
pub const MAX_IDENT_PIECES: usize = 10;

#[inline(always)]
pub const fn row(sq: usize) -> usize {
    sq >> 3
}

#[inline(always)]
pub const fn col(sq: usize) -> usize {
    sq & 7
}

#[inline(always)]
pub const fn square(row: usize, col: usize) -> usize {
    (row << 3) | col
}

/// Which side a piece belongs to, or which side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline(always)]
    pub fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Piece types in ascending material order. The classifier and the material
/// builder iterate `Queen, Rook, Bishop, Knight` when laying out non-pawn
/// groups; pawns are always handled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

/// Non-king piece types from strongest to weakest, the order every decimal
/// ending tag and canonical placement list is built in.
pub const MATERIAL_ORDER: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

impl Piece {
    /// Signed square code: positive white, negative black, zero empty.
    #[inline]
    pub fn code(self, color: Color) -> i8 {
        let v = self as i8 + 1;
        match color {
            Color::White => v,
            Color::Black => -v,
        }
    }

    #[inline]
    pub fn from_code(code: i8) -> Option<(Color, Piece)> {
        let color = if code > 0 { Color::White } else { Color::Black };
        let piece = match code.abs() {
            1 => Piece::Pawn,
            2 => Piece::Knight,
            3 => Piece::Bishop,
            4 => Piece::Rook,
            5 => Piece::Queen,
            6 => Piece::King,
            _ => return None,
        };
        Some((color, piece))
    }

    /// Conventional material strength; the king is excluded.
    #[inline]
    pub fn strength(self) -> u32 {
        match self {
            Piece::Pawn => 1,
            Piece::Knight | Piece::Bishop => 3,
            Piece::Rook => 5,
            Piece::Queen => 9,
            Piece::King => 0,
        }
    }
}

/// Castling-rights bits. Positions with any right set are outside the tables.
pub const CASTLE_WK: u8 = 1 << 0;
pub const CASTLE_WQ: u8 = 1 << 1;
pub const CASTLE_BK: u8 = 1 << 2;
pub const CASTLE_BQ: u8 = 1 << 3;

/// A full position plus the derived caches the probe pipeline reads.
///
/// `squares` is the stable boundary with embedding applications: signed codes
/// per square (`+` white, `-` black, `0` empty). Everything else is rebuilt
/// from it by [`Board::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub squares: [i8; NSQUARES],
    pub side_to_move: Color,
    /// Square a pawn just skipped over, when the double push is actually
    /// capturable; `None` otherwise.
    pub en_passant: Option<u8>,
    /// WK|WQ|BK|BQ bitset.
    pub castling: u8,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,

    // Derived caches.
    pub piece_count: [[u8; 6]; 2],
    pub piece_locations: [[ArrayVec<u8, MAX_IDENT_PIECES>; 6]; 2],
    pub wk: u8,
    pub bk: u8,
    pub num_pieces: u8,
    pub strength: [u32; 2],
}

impl Board {
    /// Build and validate a board from raw square codes.
    ///
    /// An en-passant square that does not correspond to an immediately
    /// preceding double push with an enemy pawn alongside is cleared rather
    /// than rejected, since only capturable skips are encoded in the tables.
    pub fn new(
        squares: [i8; NSQUARES],
        side_to_move: Color,
        en_passant: Option<u8>,
        castling: u8,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Result<Board, BoardError> {
        let mut board = Board {
            squares,
            side_to_move,
            en_passant: None,
            castling,
            halfmove_clock,
            fullmove_number,
            piece_count: [[0; 6]; 2],
            piece_locations: Default::default(),
            wk: 0,
            bk: 0,
            num_pieces: 0,
            strength: [0; 2],
        };
        board.rebuild_caches()?;
        board.en_passant = en_passant.filter(|&ep| board.ep_capturable(ep));
        Ok(board)
    }

    fn rebuild_caches(&mut self) -> Result<(), BoardError> {
        self.piece_count = [[0; 6]; 2];
        self.piece_locations = Default::default();
        self.strength = [0; 2];
        self.num_pieces = 0;

        for sq in 0..NSQUARES {
            let code = self.squares[sq];
            if code == 0 {
                continue;
            }
            let Some((color, piece)) = Piece::from_code(code) else {
                continue;
            };
            if piece == Piece::Pawn && (row(sq) == 0 || row(sq) == NROWS - 1) {
                return Err(BoardError::PawnOnEdgeRank);
            }
            self.num_pieces += 1;
            let ci = color as usize;
            if piece == Piece::King {
                match color {
                    Color::White => self.wk = sq as u8,
                    Color::Black => self.bk = sq as u8,
                }
                self.piece_count[ci][Piece::King as usize] += 1;
            } else {
                self.piece_count[ci][piece as usize] += 1;
                self.piece_locations[ci][piece as usize]
                    .try_push(sq as u8)
                    .map_err(|_| BoardError::TooManyIdentical(MAX_IDENT_PIECES))?;
                self.strength[ci] += piece.strength();
            }
        }

        for color in [Color::White, Color::Black] {
            let kings = self.piece_count[color as usize][Piece::King as usize];
            if kings != 1 {
                return Err(BoardError::KingCount(color, kings));
            }
        }
        if self.num_pieces < 2 {
            return Err(BoardError::TooFewPieces);
        }
        let (wk, bk) = (self.wk as usize, self.bk as usize);
        if row(wk).abs_diff(row(bk)) <= 1 && col(wk).abs_diff(col(bk)) <= 1 {
            return Err(BoardError::KingsAdjacent);
        }
        Ok(())
    }

    /// Whether `ep` marks a double push the side to move can actually capture.
    fn ep_capturable(&self, ep: u8) -> bool {
        let ep = ep as usize;
        let (pawn_row, mover) = match self.side_to_move {
            // White captures a black pawn that just landed one row below ep.
            Color::White => (row(ep).wrapping_sub(1), Color::White),
            Color::Black => (row(ep) + 1, Color::Black),
        };
        if pawn_row >= NROWS {
            return false;
        }
        let pushed = square(pawn_row, col(ep));
        let pushed_code = Piece::Pawn.code(mover.flip());
        if self.squares[pushed] != pushed_code {
            return false;
        }
        let capturer = Piece::Pawn.code(mover);
        (col(pushed) > 0 && self.squares[pushed - 1] == capturer)
            || (col(pushed) < NCOLS - 1 && self.squares[pushed + 1] == capturer)
    }

    #[inline]
    pub fn count(&self, color: Color, piece: Piece) -> u8 {
        self.piece_count[color as usize][piece as usize]
    }

    /// Total men on one side, king included.
    pub fn side_pieces(&self, color: Color) -> u8 {
        self.piece_count[color as usize].iter().sum()
    }

    pub fn pawns_present(&self) -> bool {
        self.count(Color::White, Piece::Pawn) > 0 || self.count(Color::Black, Piece::Pawn) > 0
    }

    /// Swap colors and reflect ranks, producing the equivalent position from
    /// the other side's point of view. Side to move, en passant and castling
    /// rights follow along.
    pub fn mirrored(&self) -> Board {
        let mut squares = [0i8; NSQUARES];
        for sq in 0..NSQUARES {
            squares[sq ^ 56] = -self.squares[sq];
        }
        let castling = ((self.castling & (CASTLE_WK | CASTLE_WQ)) << 2)
            | ((self.castling & (CASTLE_BK | CASTLE_BQ)) >> 2);
        Board::new(
            squares,
            self.side_to_move.flip(),
            self.en_passant.map(|ep| ep ^ 56),
            castling,
            self.halfmove_clock,
            self.fullmove_number,
        )
        .expect("mirror of a valid board is valid")
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fen::parse(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in (0..NROWS).rev() {
            for c in 0..NCOLS {
                let ch = match Piece::from_code(self.squares[square(r, c)]) {
                    None => '.',
                    Some((color, piece)) => {
                        let ch = match piece {
                            Piece::Pawn => 'p',
                            Piece::Knight => 'n',
                            Piece::Bishop => 'b',
                            Piece::Rook => 'r',
                            Piece::Queen => 'q',
                            Piece::King => 'k',
                        };
                        if color == Color::White {
                            ch.to_ascii_uppercase()
                        } else {
                            ch
                        }
                    }
                };
                write!(f, "{ch}")?;
                if c < NCOLS - 1 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "{:?} to move", self.side_to_move)
    }
}

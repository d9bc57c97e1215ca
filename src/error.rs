use std::io;

use thiserror::Error;

/// Errors surfaced by the file layer and the material-info builder.
///
/// The probe engine folds all of these into [`crate::Score::Unknown`] except
/// `HighDtzMissing`, which is a semantically meaningful score of its own
/// (the main table says "win in 254 or more" but the companion file holding
/// the exact distance is absent).
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("more than {max} pieces on the board", max = crate::board::MAX_PIECES)]
    TooManyPieces,
    #[error("no index table entry matches this material")]
    EtypeNotMapped,
    #[error("no MB file found for any candidate variant")]
    MbFileMissing,
    #[error("YK fallback file also missing")]
    YkFileMissing,
    #[error("table header truncated or unreadable: {0}")]
    HeaderReadError(#[source] io::Error),
    #[error("block offset array truncated or inconsistent")]
    OffsetReadError,
    #[error("compressed zone could not be read: {0}")]
    ZoneReadError(#[source] io::Error),
    #[error("decoded block does not cover the requested index")]
    BufReadError,
    #[error("header block size fails sanity check")]
    BadZoneSize,
    #[error("header block count fails sanity check")]
    BadZoneNumber,
    #[error("score is 254 but the high-DTZ companion file is absent")]
    HighDtzMissing,
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Failures of the `decompress(method, src, dst)` contract.
///
/// Corruption and truncation are reported distinctly: a truncated result
/// means the source decoded cleanly but produced fewer bytes than the block
/// header promised.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("compressed data is corrupt")]
    Corrupt,
    #[error("decompressed {got} bytes, expected {expected}")]
    Truncated { got: usize, expected: usize },
    #[error("archive method {0} is not supported")]
    Unsupported(u8),
}

/// Rejections raised while constructing a [`crate::Board`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("side {0:?} has {1} kings")]
    KingCount(crate::board::Color, u8),
    #[error("kings are adjacent")]
    KingsAdjacent,
    #[error("fewer than two pieces on the board")]
    TooFewPieces,
    #[error("more than {0} identical pieces of one type")]
    TooManyIdentical(usize),
    #[error("pawn on its first or last rank")]
    PawnOnEdgeRank,
}

/// Errors from the FEN adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN has {0} fields, expected at least 4")]
    FieldCount(usize),
    #[error("bad piece placement: {0}")]
    Placement(String),
    #[error("bad side to move: {0}")]
    SideToMove(String),
    #[error("bad castling field: {0}")]
    Castling(String),
    #[error("bad en passant field: {0}")]
    EnPassant(String),
    #[error("bad clock field: {0}")]
    Clock(String),
    #[error(transparent)]
    Board(#[from] BoardError),
}

//! Indexing, canonicalization and probing core for multi-piece (up to nine
//! men) chess endgame tables.
//!
//! The crate maps a legal position onto a `(kk_index, zone index)` coordinate
//! inside a partitioned on-disk table, or resolves it to a game-theoretic
//! score by decoding the appropriate compressed block from one of three file
//! families (MB, high-DTZ overflow, legacy YK). Move generation, search and
//! table generation are out of scope; a thin FEN adapter lives in
//! [`board::fen`] so embedding applications and the CLI can fill a [`Board`].

pub mod board;
pub mod ending;
pub mod error;
pub mod index;
#[cfg(feature = "cli")]
pub mod logger;
pub mod material;
pub mod probe;
pub mod score;
pub mod symmetry;
pub mod table;

pub use board::{Board, Color, Piece};
pub use error::ProbeError;
pub use probe::{Context, add_path, init, probe};
pub use score::Score;

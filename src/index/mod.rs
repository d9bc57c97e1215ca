//! Combinatorial position-index subsystem: tuple rankings, opposing-pawn
//! enumerations, and the registry of per-ending zone layouts.

pub mod layout;
pub mod opposing;
pub mod registry;
pub mod tuples;

use once_cell::sync::Lazy;

pub use layout::Chunk;
pub use registry::{BishopParity, IndexRow, PawnFileType};
pub use tuples::ZIndex;

/// The full immutable table set. Built once on first use and shared by every
/// probing context; after that, access is lock-free.
pub struct Tables {
    pub tuples: tuples::TupleTables,
    pub opposing: opposing::OpposingTables,
}

pub static TABLES: Lazy<Tables> = Lazy::new(|| {
    let t = Tables {
        tuples: tuples::build(),
        opposing: opposing::build(),
    };
    tracing::debug!("combinatorial tables built");
    t
});

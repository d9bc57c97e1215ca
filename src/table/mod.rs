//! File layer: header parsing, block decompression, path composition and
//! the LRU-cached readers for the MB, high-DTZ and YK families.

pub mod cache;
pub mod codec;
pub mod file;
pub mod header;
pub mod locate;

pub use cache::{FileCache, MAX_FILES, MAX_FILES_HIGH_DTZ, MAX_FILES_YK, TableKey};
pub use codec::decompress;
pub use file::{HighDtzFile, MbFile, SCORE_HIGH_DTZ, SCORE_UNRESOLVED, YkFile};
pub use header::{CompressionMethod, Header, YkHeader};

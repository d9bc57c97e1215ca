//! Readers for the three table-file families. All reads are positional
//! (`pread`-style); `read_exact_at` retries interrupted reads, so a signal
//! never surfaces as a short read.

use std::fs::File;
use std::io::ErrorKind;
use std::os::unix::fs::FileExt;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use super::codec::decompress;
use super::header::{HEADER_SIZE, Header, YK_HEADER_SIZE, YkHeader};
use crate::error::ProbeError;
use crate::index::ZIndex;

/// Sentinel byte: score is 254 or more, consult the high-DTZ companion.
pub const SCORE_HIGH_DTZ: u8 = 254;
/// Sentinel byte: the winning side to move does not win (or the losing side
/// to move does not lose); resolution requires the flipped position.
pub const SCORE_UNRESOLVED: u8 = 255;

fn open_readonly(path: &Path) -> Result<Option<File>, ProbeError> {
    match File::open(path) {
        Ok(f) => Ok(Some(f)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ProbeError::HeaderReadError(e)),
    }
}

fn read_offsets(file: &File, at: u64, count: usize) -> Result<Vec<u64>, ProbeError> {
    let mut raw = vec![0u8; count * 8];
    file.read_exact_at(&mut raw, at)
        .map_err(|_| ProbeError::OffsetReadError)?;
    let mut offsets = vec![0u64; count];
    LittleEndian::read_u64_into(&raw, &mut offsets);
    if offsets.windows(2).any(|w| w[1] < w[0]) {
        return Err(ProbeError::OffsetReadError);
    }
    Ok(offsets)
}

/// Fetch and decode the block holding `index`, returning the byte for it.
/// The scratch buffers grow monotonically and are reused across calls.
fn fetch_byte(
    file: &File,
    offsets: &[u64],
    block_size: u32,
    method: super::header::CompressionMethod,
    n_elements: Option<u64>,
    index: u64,
    cbuf: &mut Vec<u8>,
    bbuf: &mut Vec<u8>,
) -> Result<u8, ProbeError> {
    let bs = block_size as u64;
    let block = (index / bs) as usize;
    if block + 1 >= offsets.len() {
        return Err(ProbeError::BadZoneNumber);
    }
    let within = (index % bs) as usize;

    let payload = fetch_block(
        file,
        offsets,
        block,
        block_size,
        method,
        match n_elements {
            // The final block of a bounded file decodes short.
            Some(n) => (n - block as u64 * bs).min(bs) as usize,
            None => within + 1,
        },
        cbuf,
        bbuf,
    )?;
    payload.get(within).copied().ok_or(ProbeError::BufReadError)
}

fn fetch_block<'b>(
    file: &File,
    offsets: &[u64],
    block: usize,
    block_size: u32,
    method: super::header::CompressionMethod,
    expected: usize,
    cbuf: &mut Vec<u8>,
    bbuf: &'b mut Vec<u8>,
) -> Result<&'b [u8], ProbeError> {
    let start = offsets[block];
    let len = (offsets[block + 1] - start) as usize;
    if len > cbuf.len() {
        cbuf.resize(len, 0);
    }
    file.read_exact_at(&mut cbuf[..len], start)
        .map_err(ProbeError::ZoneReadError)?;

    if bbuf.len() < block_size as usize {
        bbuf.resize(block_size as usize, 0);
    }
    let produced = decompress(method, &cbuf[..len], bbuf, expected)?;
    Ok(&bbuf[..produced])
}

/// One open `.mb` file: byte-per-position blocks for a single
/// `(ending, spec, side, kk_index)` slice.
pub struct MbFile {
    file: File,
    pub header: Header,
    offsets: Vec<u64>,
}

impl MbFile {
    pub fn open(path: &Path) -> Result<Option<MbFile>, ProbeError> {
        let Some(file) = open_readonly(path)? else {
            return Ok(None);
        };
        let mut raw = [0u8; HEADER_SIZE];
        file.read_exact_at(&mut raw, 0)
            .map_err(ProbeError::HeaderReadError)?;
        let header = Header::parse(&raw)?;
        let offsets = read_offsets(&file, HEADER_SIZE as u64, header.num_blocks as usize + 1)?;
        tracing::debug!(path = %path.display(), blocks = header.num_blocks, "opened mb file");
        Ok(Some(MbFile {
            file,
            header,
            offsets,
        }))
    }

    /// Raw score byte for one zone index.
    pub fn score_byte(
        &self,
        zindex: ZIndex,
        cbuf: &mut Vec<u8>,
        bbuf: &mut Vec<u8>,
    ) -> Result<u8, ProbeError> {
        if zindex >= self.header.n_elements {
            return Err(ProbeError::BadZoneNumber);
        }
        fetch_byte(
            &self.file,
            &self.offsets,
            self.header.block_size,
            self.header.compression_method,
            Some(self.header.n_elements),
            zindex,
            cbuf,
            bbuf,
        )
    }
}

/// One open `.hi` file: sparse sorted map from zone index to exact scores
/// of 254 plies and up.
pub struct HighDtzFile {
    file: File,
    pub header: Header,
    offsets: Vec<u64>,
    starting_index: Vec<u64>,
}

impl HighDtzFile {
    pub fn open(path: &Path) -> Result<Option<HighDtzFile>, ProbeError> {
        let Some(file) = open_readonly(path)? else {
            return Ok(None);
        };
        let mut raw = [0u8; HEADER_SIZE];
        file.read_exact_at(&mut raw, 0)
            .map_err(ProbeError::HeaderReadError)?;
        let header = Header::parse(&raw)?;
        if (header.list_element_size as usize) < 12 {
            return Err(ProbeError::BadZoneSize);
        }
        let n = header.num_blocks as usize + 1;
        let offsets = read_offsets(&file, HEADER_SIZE as u64, n)?;
        let starting_index = read_offsets(&file, (HEADER_SIZE + n * 8) as u64, n)?;
        Ok(Some(HighDtzFile {
            file,
            header,
            offsets,
            starting_index,
        }))
    }

    /// Exact score for `zindex`. Indices outside the recorded range, or
    /// absent from their block, score exactly 254.
    pub fn score(
        &self,
        zindex: ZIndex,
        cbuf: &mut Vec<u8>,
        bbuf: &mut Vec<u8>,
    ) -> Result<i32, ProbeError> {
        let nb = self.header.num_blocks as usize;
        if zindex < self.starting_index[0] || zindex > self.starting_index[nb] {
            return Ok(SCORE_HIGH_DTZ as i32);
        }
        let block = self.starting_index[..nb]
            .partition_point(|&s| s <= zindex)
            .saturating_sub(1);

        let les = self.header.list_element_size as usize;
        let payload = fetch_block(
            &self.file,
            &self.offsets,
            block,
            self.header.block_size,
            self.header.compression_method,
            0,
            cbuf,
            bbuf,
        )?;
        let records = payload.len() / les;
        let key = |i: usize| LittleEndian::read_u64(&payload[i * les..i * les + 8]);

        let (mut lo, mut hi) = (0usize, records);
        while lo < hi {
            let mid = (lo + hi) / 2;
            match key(mid).cmp(&zindex) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => {
                    return Ok(LittleEndian::read_i32(
                        &payload[mid * les + 8..mid * les + 12],
                    ));
                }
            }
        }
        Ok(SCORE_HIGH_DTZ as i32)
    }
}

/// One open legacy `.yk` file: a monolithic table for a whole ending, with
/// `kk_index` folded into one flat index, plus its `.__` overflow companion
/// when the maximum depth calls for one.
pub struct YkFile {
    file: File,
    pub header: YkHeader,
    offsets: Vec<u64>,
    overflow: Option<File>,
}

/// Overflow record layout: depth, king-pair ordinal, zone index.
const HDATA_SIZE: u64 = 16;

impl YkFile {
    pub fn open(path: &Path, overflow_path: &Path) -> Result<Option<YkFile>, ProbeError> {
        let Some(file) = open_readonly(path)? else {
            return Ok(None);
        };
        let mut raw = [0u8; YK_HEADER_SIZE];
        file.read_exact_at(&mut raw, 0)
            .map_err(ProbeError::HeaderReadError)?;
        let header = YkHeader::parse(&raw)?;
        let offsets = read_offsets(
            &file,
            YK_HEADER_SIZE as u64,
            header.num_blocks as usize + 1,
        )?;
        let overflow = if header.max_depth > SCORE_HIGH_DTZ as u32 {
            open_readonly(overflow_path)?
        } else {
            None
        };
        tracing::debug!(path = %path.display(), overflow = overflow.is_some(), "opened yk file");
        Ok(Some(YkFile {
            file,
            header,
            offsets,
            overflow,
        }))
    }

    pub fn score_byte(
        &self,
        flat_index: u64,
        cbuf: &mut Vec<u8>,
        bbuf: &mut Vec<u8>,
    ) -> Result<u8, ProbeError> {
        fetch_byte(
            &self.file,
            &self.offsets,
            self.header.block_size,
            self.header.compression_method,
            None,
            flat_index,
            cbuf,
            bbuf,
        )
    }

    /// Exact depth from the `.__` companion, searched by king-pair ordinal
    /// and zone index. `Err(HighDtzMissing)` when the companion is absent.
    pub fn high_score(&self, kk_index: u32, zindex: ZIndex) -> Result<i32, ProbeError> {
        let Some(overflow) = &self.overflow else {
            return Err(ProbeError::HighDtzMissing);
        };
        let len = overflow
            .metadata()
            .map_err(ProbeError::HeaderReadError)?
            .len();
        let records = (len / HDATA_SIZE).min(self.header.num_high_dtc);

        let read = |i: u64| -> Result<(u32, u32, u64), ProbeError> {
            let mut raw = [0u8; HDATA_SIZE as usize];
            overflow
                .read_exact_at(&mut raw, i * HDATA_SIZE)
                .map_err(ProbeError::ZoneReadError)?;
            Ok((
                LittleEndian::read_u32(&raw[0..4]),
                LittleEndian::read_u32(&raw[4..8]),
                LittleEndian::read_u64(&raw[8..16]),
            ))
        };

        let (mut lo, mut hi) = (0u64, records);
        while lo < hi {
            let mid = (lo + hi) / 2;
            let (dtc, kindex, offset) = read(mid)?;
            match (kindex, offset).cmp(&(kk_index, zindex)) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return Ok(dtc as i32),
            }
        }
        Ok(SCORE_HIGH_DTZ as i32)
    }
}

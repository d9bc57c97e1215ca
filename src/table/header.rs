//! On-disk header layouts. Every field is read through explicit
//! little-endian accessors; nothing is transmuted, so the parsers are
//! byte-order safe on any host.

use byteorder::{ByteOrder, LittleEndian};

use crate::board::{NCOLS, NROWS};
use crate::error::ProbeError;

/// Fixed header size of the MB and high-DTZ families.
pub const HEADER_SIZE: usize = 96;
/// Fixed header size of the legacy YK family.
pub const YK_HEADER_SIZE: usize = 4096;

/// Upper bound accepted for a decompressed block; a header asking for more
/// is treated as corrupt rather than honored.
pub const MAX_BLOCK_SIZE: u32 = 1 << 24;

/// Compression method byte shared by the MB and high-DTZ headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    None,
    Zlib,
    Zstd,
}

impl CompressionMethod {
    pub fn from_mb_byte(b: u8) -> Option<CompressionMethod> {
        match b {
            0 => Some(CompressionMethod::None),
            1 => Some(CompressionMethod::Zlib),
            2 => Some(CompressionMethod::Zstd),
            _ => None,
        }
    }

    /// Legacy archive-id mapping. BZIP (1) and LZMA (2) archives exist in
    /// the wild but are not supported; they surface as `None` here and the
    /// caller reports the file unreadable.
    pub fn from_yk_archive_id(b: u8) -> Option<CompressionMethod> {
        match b {
            0 => Some(CompressionMethod::Zlib),
            3 => Some(CompressionMethod::Zstd),
            4 => Some(CompressionMethod::None),
            _ => None,
        }
    }
}

/// Parsed 96-byte MB / high-DTZ header.
#[derive(Debug, Clone)]
pub struct Header {
    pub basename: [u8; 16],
    pub n_elements: u64,
    pub kk_index: u32,
    pub max_depth: u32,
    pub block_size: u32,
    pub num_blocks: u32,
    pub nrows: u8,
    pub ncols: u8,
    pub side: u8,
    pub metric: u8,
    pub compression_method: CompressionMethod,
    pub index_size: u8,
    pub format_type: u8,
    pub list_element_size: u8,
}

impl Header {
    pub fn parse(raw: &[u8; HEADER_SIZE]) -> Result<Header, ProbeError> {
        let mut basename = [0u8; 16];
        basename.copy_from_slice(&raw[16..32]);
        let header = Header {
            basename,
            n_elements: LittleEndian::read_u64(&raw[32..40]),
            kk_index: LittleEndian::read_u32(&raw[40..44]),
            max_depth: LittleEndian::read_u32(&raw[44..48]),
            block_size: LittleEndian::read_u32(&raw[48..52]),
            num_blocks: LittleEndian::read_u32(&raw[52..56]),
            nrows: raw[56],
            ncols: raw[57],
            side: raw[58],
            metric: raw[59],
            compression_method: CompressionMethod::from_mb_byte(raw[60])
                .ok_or(ProbeError::BadZoneSize)?,
            index_size: raw[61],
            format_type: raw[62],
            list_element_size: raw[63],
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<(), ProbeError> {
        if self.nrows != NROWS as u8 || self.ncols != NCOLS as u8 {
            return Err(ProbeError::BadZoneSize);
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ProbeError::BadZoneSize);
        }
        if self.num_blocks == 0 {
            return Err(ProbeError::BadZoneNumber);
        }
        Ok(())
    }

    /// Ending name recorded in the file, e.g. `kqkr`.
    pub fn basename(&self) -> &str {
        let end = self
            .basename
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.basename.len());
        std::str::from_utf8(&self.basename[..end]).unwrap_or("")
    }
}

/// Parsed 4096-byte YK header. Only the documented fields are interpreted;
/// the rest of the page is reserved.
#[derive(Debug, Clone)]
pub struct YkHeader {
    pub block_size: u32,
    pub num_blocks: u32,
    pub compression_method: CompressionMethod,
    pub max_depth: u32,
    pub num_high_dtc: u64,
}

impl YkHeader {
    pub fn parse(raw: &[u8; YK_HEADER_SIZE]) -> Result<YkHeader, ProbeError> {
        let block_size = LittleEndian::read_u32(&raw[0..4]);
        let num_blocks = LittleEndian::read_u32(&raw[4..8]);
        let archive_id = raw[23];
        let max_depth = LittleEndian::read_u32(&raw[32..36]);
        let lo = LittleEndian::read_u32(&raw[36..40]) as u64;
        let hi = LittleEndian::read_u32(&raw[40..44]) as u64;

        let compression_method = CompressionMethod::from_yk_archive_id(archive_id)
            .ok_or(ProbeError::Codec(crate::error::CodecError::Unsupported(
                archive_id,
            )))?;
        if block_size == 0 || block_size > MAX_BLOCK_SIZE {
            return Err(ProbeError::BadZoneSize);
        }
        if num_blocks == 0 {
            return Err(ProbeError::BadZoneNumber);
        }
        Ok(YkHeader {
            block_size,
            num_blocks,
            compression_method,
            max_depth,
            num_high_dtc: (hi << 32) | lo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_header() -> [u8; HEADER_SIZE] {
        let mut raw = [0u8; HEADER_SIZE];
        raw[16..20].copy_from_slice(b"kqkr");
        LittleEndian::write_u64(&mut raw[32..40], 462 * 64);
        LittleEndian::write_u32(&mut raw[40..44], 17);
        LittleEndian::write_u32(&mut raw[44..48], 31);
        LittleEndian::write_u32(&mut raw[48..52], 4096);
        LittleEndian::write_u32(&mut raw[52..56], 8);
        raw[56] = 8;
        raw[57] = 8;
        raw[58] = 1;
        raw[60] = 2;
        raw[63] = 12;
        raw
    }

    #[test]
    fn parses_documented_fields() {
        let h = Header::parse(&raw_header()).unwrap();
        assert_eq!(h.basename(), "kqkr");
        assert_eq!(h.kk_index, 17);
        assert_eq!(h.block_size, 4096);
        assert_eq!(h.num_blocks, 8);
        assert_eq!(h.side, 1);
        assert_eq!(h.compression_method, CompressionMethod::Zstd);
        assert_eq!(h.list_element_size, 12);
    }

    #[test]
    fn rejects_foreign_geometry() {
        let mut raw = raw_header();
        raw[56] = 10;
        assert!(Header::parse(&raw).is_err());
    }

    #[test]
    fn yk_archive_ids() {
        assert_eq!(
            CompressionMethod::from_yk_archive_id(0),
            Some(CompressionMethod::Zlib)
        );
        assert_eq!(
            CompressionMethod::from_yk_archive_id(3),
            Some(CompressionMethod::Zstd)
        );
        assert_eq!(
            CompressionMethod::from_yk_archive_id(4),
            Some(CompressionMethod::None)
        );
        assert_eq!(CompressionMethod::from_yk_archive_id(1), None);
        assert_eq!(CompressionMethod::from_yk_archive_id(2), None);
    }
}

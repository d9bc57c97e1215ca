//! The single decompression entry point the block readers go through.

use flate2::{Decompress, FlushDecompress, Status};

use super::header::CompressionMethod;
use crate::error::CodecError;

/// Decompress `src` into `dst`, returning the produced byte count.
///
/// `dst` is sized by the caller from the file header; producing fewer bytes
/// than it expects is reported as truncation, not success, and corrupt input
/// is reported separately.
pub fn decompress(
    method: CompressionMethod,
    src: &[u8],
    dst: &mut [u8],
    expected: usize,
) -> Result<usize, CodecError> {
    let written = match method {
        CompressionMethod::None => {
            if src.len() > dst.len() {
                return Err(CodecError::Corrupt);
            }
            dst[..src.len()].copy_from_slice(src);
            src.len()
        }
        CompressionMethod::Zlib => {
            let mut inflater = Decompress::new(true);
            match inflater.decompress(src, dst, FlushDecompress::Finish) {
                Ok(Status::StreamEnd) | Ok(Status::Ok) => inflater.total_out() as usize,
                Ok(Status::BufError) | Err(_) => return Err(CodecError::Corrupt),
            }
        }
        CompressionMethod::Zstd => zstd::bulk::decompress_to_buffer(src, dst)
            .map_err(|_| CodecError::Corrupt)?,
    };
    if written < expected {
        return Err(CodecError::Truncated {
            got: written,
            expected,
        });
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_blocks_round_trip() {
        let src = [7u8, 1, 254, 255];
        let mut dst = [0u8; 8];
        let n = decompress(CompressionMethod::None, &src, &mut dst, 4).unwrap();
        assert_eq!(&dst[..n], &src);
    }

    #[test]
    fn truncation_is_distinct_from_corruption() {
        let src = [7u8, 1];
        let mut dst = [0u8; 8];
        match decompress(CompressionMethod::None, &src, &mut dst, 4) {
            Err(CodecError::Truncated { got: 2, expected: 4 }) => {}
            other => panic!("expected truncation, got {other:?}"),
        }
    }

    #[test]
    fn zlib_round_trips() {
        use flate2::{Compression, write::ZlibEncoder};
        use std::io::Write;

        let payload: Vec<u8> = (0..200u8).collect();
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&payload).unwrap();
        let packed = enc.finish().unwrap();

        let mut dst = vec![0u8; payload.len()];
        let n = decompress(CompressionMethod::Zlib, &packed, &mut dst, payload.len()).unwrap();
        assert_eq!(&dst[..n], &payload[..]);
    }

    #[test]
    fn zstd_round_trips() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let packed = zstd::bulk::compress(&payload, 3).unwrap();

        let mut dst = vec![0u8; payload.len()];
        let n = decompress(CompressionMethod::Zstd, &packed, &mut dst, payload.len()).unwrap();
        assert_eq!(&dst[..n], &payload[..]);
    }
}

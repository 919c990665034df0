//! Byte compression for maze payloads and saved mazes.
//!
//! The generator service compresses the canonical maze layout before
//! sending it, and saved mazes are stored compressed in the same format.
//! [`Compressor`] is the contract; [`Lz4Compressor`] is the codec the
//! services use: an LZ4 block preceded by the uncompressed size as a
//! little-endian `u32`.

use crate::CodecError;

/// A byte-level compression codec.
pub trait Compressor: Send + Sync + 'static {
    /// Compresses `data`. Infallible: any input can be compressed.
    fn compress(&self, data: &[u8]) -> Vec<u8>;

    /// Decompresses `data`, refusing outputs larger than `max_len` bytes.
    ///
    /// # Errors
    /// [`CodecError`] if the input is empty, truncated, corrupt, or would
    /// inflate past `max_len`.
    fn decompress(&self, data: &[u8], max_len: usize) -> Result<Vec<u8>, CodecError>;
}

/// LZ4 block compression with a 4-byte size prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Compressor;

/// Size of the uncompressed-length prefix.
const SIZE_PREFIX: usize = 4;

impl Compressor for Lz4Compressor {
    fn compress(&self, data: &[u8]) -> Vec<u8> {
        lz4_flex::compress_prepend_size(data)
    }

    fn decompress(&self, data: &[u8], max_len: usize) -> Result<Vec<u8>, CodecError> {
        if data.is_empty() {
            return Err(CodecError::Empty);
        }
        let Some((prefix, block)) = data.split_first_chunk::<SIZE_PREFIX>() else {
            return Err(CodecError::Truncated { len: data.len() });
        };

        // Check the announced size before allocating anything for it.
        let size = u32::from_le_bytes(*prefix) as usize;
        if size > max_len {
            return Err(CodecError::TooLarge {
                size,
                max: max_len,
            });
        }

        let out = lz4_flex::block::decompress(block, size)
            .map_err(|e| CodecError::Malformed(e.to_string()))?;
        if out.len() != size {
            return Err(CodecError::Malformed(format!(
                "announced {size} bytes, inflated to {}",
                out.len()
            )));
        }
        Ok(out)
    }
}

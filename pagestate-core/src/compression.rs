/*!
Compression adapters for serialized state.

The default implementation uses gzip, but the codec only depends on the
trait, so other general-purpose lossless algorithms can be plugged in.
*/

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use std::io::{Read, Write};

use crate::{Result, StateError};

/// Compression abstraction for serialized state bytes
///
/// Implementations must be lossless: `decompress(compress(x)) == x` for
/// all inputs.
pub trait CompressionAdapter {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the input data
    fn decompress(&self, compressed_data: &[u8]) -> Result<Vec<u8>>;

    /// Get the name of the compression algorithm
    fn algorithm_name(&self) -> &str;
}

/// Gzip compression adapter backed by flate2
///
/// # Example
/// ```rust
/// use pagestate_core::{CompressionAdapter, GzipCompressor};
///
/// let compressor = GzipCompressor::new();
/// let data = b"state bytes with repeated repeated repeated content";
/// let compressed = compressor.compress(data)?;
/// assert_eq!(compressor.decompress(&compressed)?, data);
/// # Ok::<(), pagestate_core::StateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GzipCompressor {
    compression_level: Compression,
}

impl GzipCompressor {
    /// Create a new gzip compressor with the default compression level (6)
    pub fn new() -> Self {
        Self {
            compression_level: Compression::default(),
        }
    }

    /// Create a new gzip compressor with the specified level (0-9)
    pub fn with_level(level: u32) -> Self {
        Self {
            compression_level: Compression::new(level),
        }
    }

    /// Create a compressor for fast compression (level 1)
    pub fn fast() -> Self {
        Self::with_level(1)
    }

    /// Create a compressor for maximum compression (level 9)
    pub fn max() -> Self {
        Self::with_level(9)
    }
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionAdapter for GzipCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::new(), self.compression_level);

        encoder
            .write_all(data)
            .map_err(|e| StateError::compression(format!("failed to write data for compression: {e}")))?;

        // A mid-stream failure must surface as an error, never as a silent
        // fallback to raw: a partially written buffer is not safely reusable.
        encoder
            .finish()
            .map_err(|e| StateError::compression(format!("failed to finish compression: {e}")))
    }

    fn decompress(&self, compressed_data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = GzDecoder::new(compressed_data);
        let mut decompressed = Vec::new();

        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| StateError::compression(format!("failed to decompress data: {e}")))?;

        Ok(decompressed)
    }

    fn algorithm_name(&self) -> &str {
        "gzip"
    }
}

/// Pass-through adapter that performs no compression
///
/// Because its output length always equals its input length, the size
/// comparison in the codec never favors it, which makes it useful for
/// exercising the raw path in tests.
#[derive(Debug, Clone, Default)]
pub struct NoCompression;

impl NoCompression {
    pub fn new() -> Self {
        Self
    }
}

impl CompressionAdapter for NoCompression {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn decompress(&self, compressed_data: &[u8]) -> Result<Vec<u8>> {
        Ok(compressed_data.to_vec())
    }

    fn algorithm_name(&self) -> &str {
        "none"
    }
}

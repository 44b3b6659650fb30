/*!
The envelope codec: size-aware choice between raw and compressed storage.

This module contains the core decision logic. Compression is not always a
win: small payloads and already-compressed content can inflate under gzip,
and compressing always costs CPU. Measuring the actual output size before
committing is the only data-independent way to guarantee the stored form is
never worse than raw.
*/

use tracing::debug;

use crate::{
    compression::CompressionAdapter, envelope::Envelope, envelope::Slot,
    serializer::StateSerializer, Result, StatePair,
};

/// Encoder/decoder for the two outward storage slots
///
/// Both paths live in one type because the tagging scheme they share is the
/// entire design: the encoder's choice of variant must be unambiguously
/// recoverable by the decoder with no external hint.
///
/// # Example
/// ```rust
/// use pagestate_core::{create_default_codec, StatePair};
/// use serde_json::json;
///
/// let codec = create_default_codec();
/// let pair = StatePair::new(json!({"form": "state"}), None);
///
/// let (primary, secondary) = codec.encode(pair.clone())?;
/// let restored = codec.decode(primary, secondary)?;
/// assert_eq!(restored, pair);
/// # Ok::<(), pagestate_core::StateError>(())
/// ```
pub struct EnvelopeCodec<Sr, C>
where
    Sr: StateSerializer,
    C: CompressionAdapter,
{
    serializer: Sr,
    compressor: C,
}

impl<Sr, C> EnvelopeCodec<Sr, C>
where
    Sr: StateSerializer,
    C: CompressionAdapter,
{
    /// Create a new codec from a serializer and a compression adapter
    pub fn new(serializer: Sr, compressor: C) -> Self {
        Self {
            serializer,
            compressor,
        }
    }

    /// Encode a state pair into the two outward storage slots
    ///
    /// Serializes the full pair, compresses the result, and keeps the
    /// compressed form only when it is strictly smaller than the serialized
    /// form. Equal sizes take the raw path: decompressing on the next cycle
    /// would cost CPU for no space benefit.
    ///
    /// # Errors
    /// * [`StateError::Serialization`](crate::StateError::Serialization) - if the pair cannot be serialized
    /// * [`StateError::Compression`](crate::StateError::Compression) - if compression fails mid-stream
    pub fn encode(&self, pair: StatePair) -> Result<(Slot, Slot)> {
        let serialized = self.serializer.serialize(&pair)?;
        let compressed = self.compressor.compress(&serialized)?;

        let envelope = if serialized.len() > compressed.len() {
            debug!(
                serialized_len = serialized.len(),
                compressed_len = compressed.len(),
                algorithm = self.compressor.algorithm_name(),
                "storing compressed envelope"
            );
            Envelope::Compressed(compressed)
        } else {
            debug!(
                serialized_len = serialized.len(),
                compressed_len = compressed.len(),
                "compression not worthwhile, storing raw envelope"
            );
            Envelope::Raw(pair)
        };

        Ok(envelope.into_slots())
    }

    /// Decode the outward slots handed back by the transport
    ///
    /// Detects the envelope variant from the slot shapes alone and reverses
    /// the encode decision losslessly.
    ///
    /// # Errors
    /// * [`StateError::EnvelopeViolation`](crate::StateError::EnvelopeViolation) - if the slot shapes are neither clean raw nor clean compressed
    /// * [`StateError::Compression`](crate::StateError::Compression) - if the compressed payload cannot be decompressed
    /// * [`StateError::Serialization`](crate::StateError::Serialization) - if the decompressed bytes are structurally invalid
    pub fn decode(&self, primary: Slot, secondary: Slot) -> Result<StatePair> {
        match Envelope::from_slots(primary, secondary)? {
            Envelope::Raw(pair) => Ok(pair),
            Envelope::Compressed(payload) => {
                let serialized = self.compressor.decompress(&payload)?;
                self.serializer.deserialize(&serialized)
            }
        }
    }

    /// Get the serializer this codec uses
    pub fn serializer(&self) -> &Sr {
        &self.serializer
    }

    /// Get the compression adapter this codec uses
    pub fn compressor(&self) -> &C {
        &self.compressor
    }
}

/// Convenience function to create a codec with default components
///
/// Creates a codec with:
/// - JSON serialization
/// - Gzip compression at the default level
pub fn create_default_codec(
) -> EnvelopeCodec<crate::serializer::JsonStateSerializer, crate::compression::GzipCompressor> {
    EnvelopeCodec::new(
        crate::serializer::JsonStateSerializer::new(),
        crate::compression::GzipCompressor::new(),
    )
}

/// Create a codec from a validated configuration
pub fn create_codec_from_config(
    config: &crate::config::CodecConfig,
) -> Result<EnvelopeCodec<crate::serializer::JsonStateSerializer, crate::compression::GzipCompressor>>
{
    config.validate()?;
    Ok(EnvelopeCodec::new(
        crate::serializer::JsonStateSerializer::new(),
        crate::compression::GzipCompressor::with_level(config.compression_level),
    ))
}

/*!
Error types for the page state codec.
*/

use thiserror::Error;

/// Result type used throughout the page state core.
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors that can occur while encoding, decoding, or carrying page state.
///
/// All operations are deterministic and in-memory, so a retry would
/// reproduce the same failure; errors propagate immediately and are never
/// absorbed.
#[derive(Error, Debug)]
pub enum StateError {
    /// The external serializer could not encode or decode a state pair
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Compression or decompression failed mid-stream
    #[error("compression error: {0}")]
    Compression(String),

    /// Decode received outward slots that are neither clean raw nor clean compressed
    #[error("envelope shape violation: {0}")]
    EnvelopeViolation(String),

    /// The transport collaborator failed to store or retrieve the slots
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration validation errors
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StateError {
    /// Create a new compression error
    pub fn compression<S: Into<String>>(msg: S) -> Self {
        Self::Compression(msg.into())
    }

    /// Create a new envelope shape violation
    pub fn envelope<S: Into<String>>(msg: S) -> Self {
        Self::EnvelopeViolation(msg.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

//! Configuration for the envelope codec.

use serde::{Deserialize, Serialize};

use crate::{Result, StateError};

/// Environment variable consulted by [`CodecConfig::from_env`]
pub const COMPRESSION_LEVEL_ENV: &str = "PAGESTATE_COMPRESSION_LEVEL";

/// Tunables for the envelope codec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Gzip compression level (0-9)
    pub compression_level: u32,
}

impl CodecConfig {
    /// Build a configuration from the environment, falling back to defaults
    ///
    /// Reads `PAGESTATE_COMPRESSION_LEVEL` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(COMPRESSION_LEVEL_ENV) {
            config.compression_level = raw.parse().map_err(|_| {
                StateError::config(format!(
                    "{COMPRESSION_LEVEL_ENV} must be an integer between 0 and 9, got {raw:?}"
                ))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.compression_level > 9 {
            return Err(StateError::config(format!(
                "compression level must be between 0 and 9, got {}",
                self.compression_level
            )));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compression_level: 6,
        }
    }
}

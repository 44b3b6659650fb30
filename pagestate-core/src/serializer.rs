/*!
The external codec boundary: turning a state pair into bytes and back.

The codec treats the serializer as a black box. The only contract is a
faithful round trip that preserves which slots are present, so the byte form
alone determines the decoded shape.
*/

use crate::{Result, StatePair};

/// Serialization abstraction for opaque state pairs
///
/// This trait defines the interface the envelope codec uses to convert a
/// state pair to and from bytes without being coupled to any specific
/// format.
pub trait StateSerializer {
    /// Serialize the full pair into a byte sequence
    fn serialize(&self, pair: &StatePair) -> Result<Vec<u8>>;

    /// Reverse [`serialize`](StateSerializer::serialize) exactly
    fn deserialize(&self, bytes: &[u8]) -> Result<StatePair>;

    /// Get the name of the serialization format
    fn format_name(&self) -> &str;
}

/// JSON serializer backed by serde_json
///
/// The default serializer. `secondary: None` survives the round trip as an
/// explicit null, so slot presence is recoverable from the bytes.
#[derive(Debug, Clone, Default)]
pub struct JsonStateSerializer;

impl JsonStateSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl StateSerializer for JsonStateSerializer {
    fn serialize(&self, pair: &StatePair) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(pair)?)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<StatePair> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn format_name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_roundtrip() {
        let serializer = JsonStateSerializer::new();
        let pair = StatePair::new(
            json!({"fields": {"name": "value"}, "nested": [1, 2, {"deep": true}]}),
            Some(json!({"scroll": 120})),
        );

        let bytes = serializer.serialize(&pair).unwrap();
        let restored = serializer.deserialize(&bytes).unwrap();
        assert_eq!(restored, pair);
    }

    #[test]
    fn test_json_roundtrip_absent_secondary() {
        let serializer = JsonStateSerializer::new();
        let pair = StatePair::primary_only(json!("solo"));

        let bytes = serializer.serialize(&pair).unwrap();
        let restored = serializer.deserialize(&bytes).unwrap();
        assert_eq!(restored, pair);
        assert!(restored.secondary.is_none());
    }

    #[test]
    fn test_deserialize_garbage_fails() {
        let serializer = JsonStateSerializer::new();
        let result = serializer.deserialize(b"not json at all {{{");
        assert!(result.is_err());
    }

    #[test]
    fn test_format_name() {
        assert_eq!(JsonStateSerializer::new().format_name(), "json");
    }
}

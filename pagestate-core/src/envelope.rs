/*!
The tagged storage envelope and its projection onto the transport's slots.

The encoder's choice between raw and compressed storage is tagged entirely
through the shape of the two outward slots, reusing the transport's existing
two-slot contract instead of adding an explicit flag to its wire format. The
compressed form always leaves the secondary slot empty, since the payload
already carries both values internally; the decoder recovers the variant
from slot shape alone, with no side channel.
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Result, StateError, StatePair};

/// What a single outward storage slot can hold, as handed to the transport.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Slot {
    /// An ordinary state value stored untouched
    Value(Value),

    /// Marker slot carrying the compressed serialized form of a full pair
    CompressedPayload(Vec<u8>),

    /// Explicitly absent
    Empty,
}

impl Slot {
    /// Number of bytes this slot contributes to the stored form
    pub fn stored_len(&self) -> usize {
        match self {
            Slot::Value(value) => serde_json::to_vec(value).map(|v| v.len()).unwrap_or(0),
            Slot::CompressedPayload(payload) => payload.len(),
            Slot::Empty => 0,
        }
    }
}

/// The storage form chosen at encode time.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Both values stored directly, no compression applied
    Raw(StatePair),

    /// A single opaque buffer holding the compressed serialized pair
    Compressed(Vec<u8>),
}

impl Envelope {
    /// Project the envelope onto the transport's two outward slots.
    pub fn into_slots(self) -> (Slot, Slot) {
        match self {
            Envelope::Raw(pair) => {
                let secondary = match pair.secondary {
                    Some(value) => Slot::Value(value),
                    None => Slot::Empty,
                };
                (Slot::Value(pair.primary), secondary)
            }
            Envelope::Compressed(payload) => (Slot::CompressedPayload(payload), Slot::Empty),
        }
    }

    /// Recover the envelope variant from the outward slots.
    ///
    /// Any combination that is neither clean raw nor clean compressed means
    /// the stored state is untrustworthy; no partial recovery is attempted.
    pub fn from_slots(primary: Slot, secondary: Slot) -> Result<Self> {
        match (primary, secondary) {
            (Slot::Value(primary), Slot::Value(secondary)) => {
                Ok(Envelope::Raw(StatePair::new(primary, Some(secondary))))
            }
            (Slot::Value(primary), Slot::Empty) => {
                Ok(Envelope::Raw(StatePair::primary_only(primary)))
            }
            (Slot::CompressedPayload(payload), Slot::Empty) => Ok(Envelope::Compressed(payload)),
            (Slot::CompressedPayload(_), _) => Err(StateError::envelope(
                "compressed payload marker in primary slot alongside a populated secondary slot",
            )),
            (Slot::Value(_), Slot::CompressedPayload(_)) => Err(StateError::envelope(
                "compressed payload marker in secondary slot",
            )),
            (Slot::Empty, _) => Err(StateError::envelope("primary slot is absent")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_envelope_slot_projection() {
        let pair = StatePair::new(json!({"form": "data"}), Some(json!(42)));
        let (primary, secondary) = Envelope::Raw(pair.clone()).into_slots();

        assert_eq!(primary, Slot::Value(json!({"form": "data"})));
        assert_eq!(secondary, Slot::Value(json!(42)));

        let recovered = Envelope::from_slots(primary, secondary).unwrap();
        assert_eq!(recovered, Envelope::Raw(pair));
    }

    #[test]
    fn test_raw_envelope_absent_secondary() {
        let pair = StatePair::primary_only(json!("just primary"));
        let (primary, secondary) = Envelope::Raw(pair.clone()).into_slots();

        assert_eq!(secondary, Slot::Empty);
        assert_eq!(
            Envelope::from_slots(primary, secondary).unwrap(),
            Envelope::Raw(pair)
        );
    }

    #[test]
    fn test_compressed_envelope_leaves_secondary_empty() {
        let payload = vec![1u8, 2, 3, 4];
        let (primary, secondary) = Envelope::Compressed(payload.clone()).into_slots();

        assert_eq!(primary, Slot::CompressedPayload(payload.clone()));
        assert_eq!(secondary, Slot::Empty);
        assert_eq!(
            Envelope::from_slots(primary, secondary).unwrap(),
            Envelope::Compressed(payload)
        );
    }

    #[test]
    fn test_marker_with_populated_secondary_is_a_violation() {
        let result = Envelope::from_slots(
            Slot::CompressedPayload(vec![1, 2, 3]),
            Slot::Value(json!("conflicting")),
        );
        assert!(matches!(result, Err(StateError::EnvelopeViolation(_))));
    }

    #[test]
    fn test_marker_in_secondary_slot_is_a_violation() {
        let result = Envelope::from_slots(
            Slot::Value(json!("primary")),
            Slot::CompressedPayload(vec![1, 2, 3]),
        );
        assert!(matches!(result, Err(StateError::EnvelopeViolation(_))));
    }

    #[test]
    fn test_absent_primary_is_a_violation() {
        let result = Envelope::from_slots(Slot::Empty, Slot::Value(json!(1)));
        assert!(matches!(result, Err(StateError::EnvelopeViolation(_))));

        let result = Envelope::from_slots(Slot::Empty, Slot::Empty);
        assert!(matches!(result, Err(StateError::EnvelopeViolation(_))));
    }

    #[test]
    fn test_slot_stored_len() {
        assert_eq!(Slot::Empty.stored_len(), 0);
        assert_eq!(Slot::CompressedPayload(vec![0u8; 7]).stored_len(), 7);
        assert_eq!(Slot::Value(json!("ab")).stored_len(), 4); // "ab" with quotes
    }
}

/*!
The state pair persisted on each round trip.
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The two logical slots of page state persisted together.
///
/// `primary` always holds a value; `secondary` may be logically absent,
/// represented as an explicit `None` rather than an invalid state. Both
/// values are opaque to the codec: it never inspects their structure, only
/// hands the pair to the external serializer as a unit.
///
/// A pair is constructed fresh per persistence cycle and has no existence
/// beyond one round trip.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatePair {
    /// The primary state tree, never absent
    pub primary: Value,

    /// The secondary state tree, may be logically absent
    pub secondary: Option<Value>,
}

impl StatePair {
    /// Create a new state pair from both slots
    pub fn new(primary: Value, secondary: Option<Value>) -> Self {
        Self { primary, secondary }
    }

    /// Create a pair whose secondary slot is explicitly absent
    pub fn primary_only(primary: Value) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_form_preserves_slot_presence() {
        let full = StatePair::new(json!({"a": 1}), Some(json!([1, 2, 3])));
        let partial = StatePair::primary_only(json!({"a": 1}));

        let full_bytes = serde_json::to_vec(&full).unwrap();
        let partial_bytes = serde_json::to_vec(&partial).unwrap();

        let full_back: StatePair = serde_json::from_slice(&full_bytes).unwrap();
        let partial_back: StatePair = serde_json::from_slice(&partial_bytes).unwrap();

        assert_eq!(full_back, full);
        assert_eq!(partial_back, partial);
        assert!(partial_back.secondary.is_none());
    }
}

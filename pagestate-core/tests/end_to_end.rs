/*!
End-to-end tests driving a realistic page state through the full
persister stack: codec, compression, and transport.
*/

use pagestate_core::{
    create_default_codec, InMemoryTransport, JsonStateSerializer, PageStatePersister, Slot,
    StatePair, StateSerializer,
};
use serde_json::json;

/// A page state shaped like a real form-heavy page: many controls with
/// repeated names and default values, which compresses well.
fn form_heavy_state() -> StatePair {
    let controls: Vec<serde_json::Value> = (0..60)
        .map(|i| {
            json!({
                "id": format!("ctl00$ContentPlaceHolder1$GridRow{i}$TextBox"),
                "value": "",
                "visible": true,
                "css_class": "form-control input-field default-theme",
            })
        })
        .collect();

    StatePair::new(
        json!({
            "page": "orders/edit",
            "controls": controls,
            "validation": {
                "summary_visible": false,
                "groups": ["billing", "shipping", "billing", "shipping"],
            },
        }),
        Some(json!({
            "grid_sort": {"column": "created_at", "descending": true},
            "expanded_rows": (0..20).collect::<Vec<i64>>(),
        })),
    )
}

/// A tiny state whose serialized form is smaller than any gzip framing.
fn tiny_state() -> StatePair {
    StatePair::new(json!({"q": "a"}), None)
}

#[test]
fn test_full_cycle_with_compressible_state() {
    let persister = PageStatePersister::new(InMemoryTransport::new(), create_default_codec());
    let state = form_heavy_state();

    persister.save(state.clone()).unwrap();
    let restored = persister.load().unwrap();

    assert_eq!(restored, state);
}

#[test]
fn test_full_cycle_with_tiny_state() {
    let persister = PageStatePersister::new(InMemoryTransport::new(), create_default_codec());
    let state = tiny_state();

    persister.save(state.clone()).unwrap();
    assert_eq!(persister.load().unwrap(), state);
}

#[test]
fn test_compressible_state_is_stored_compressed_and_smaller() {
    let codec = create_default_codec();
    let serializer = JsonStateSerializer::new();
    let state = form_heavy_state();

    let serialized_len = serializer.serialize(&state).unwrap().len();
    let (primary, secondary) = codec.encode(state).unwrap();

    match primary {
        Slot::CompressedPayload(payload) => {
            assert!(payload.len() < serialized_len);
            assert_eq!(secondary, Slot::Empty);
        }
        other => panic!("expected compressed payload, got {other:?}"),
    }
}

#[test]
fn test_many_cycles_of_evolving_state() {
    let persister = PageStatePersister::new(InMemoryTransport::new(), create_default_codec());
    let mut state = form_heavy_state();

    for cycle in 0..10 {
        state.primary["cycle"] = json!(cycle);
        if let Some(secondary) = state.secondary.as_mut() {
            secondary["expanded_rows"]
                .as_array_mut()
                .unwrap()
                .push(json!(100 + cycle));
        }

        persister.save(state.clone()).unwrap();
        let restored = persister.load().unwrap();
        assert_eq!(restored, state);
    }
}

#[test]
fn test_decode_tolerates_slots_that_crossed_a_wire() {
    // Slots are plain serde values; a transport may serialize them to JSON
    // and back before decode sees them again.
    let codec = create_default_codec();
    let state = form_heavy_state();

    let (primary, secondary) = codec.encode(state.clone()).unwrap();

    let wire = serde_json::to_vec(&(primary, secondary)).unwrap();
    let (primary, secondary): (Slot, Slot) = serde_json::from_slice(&wire).unwrap();

    assert_eq!(codec.decode(primary, secondary).unwrap(), state);
}

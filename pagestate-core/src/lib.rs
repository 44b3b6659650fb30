/*!
# Page State Core

Size-aware compressed persistence for page state round trips.

This crate persists a page's transient state, an ordered pair of opaque
state trees, across a round trip to a client and back. The core is a
self-describing binary envelope: the serialized pair is compressed, the
smaller of the two forms wins, and the choice is tagged entirely through
the shape of the two outward storage slots so the decoder needs no
external hint to reverse it.

## Architecture

Collaborators are reached through traits rather than inherited from:

- [`StateSerializer`] turns a state pair into bytes and back (black box)
- [`CompressionAdapter`] is a general-purpose lossless byte codec
- [`StateTransport`] carries the outward slots and owns integrity
  protection of whatever it stores

## Usage

```rust
use pagestate_core::{create_default_codec, StatePair};
use serde_json::json;

let codec = create_default_codec();
let pair = StatePair::new(json!({"form": {"field": "value"}}), None);

let (primary, secondary) = codec.encode(pair.clone())?;
let restored = codec.decode(primary, secondary)?;
assert_eq!(restored, pair);
# Ok::<(), pagestate_core::StateError>(())
```
*/

pub mod codec;
pub mod compression;
pub mod config;
pub mod envelope;
pub mod error;
pub mod observability;
pub mod persister;
pub mod serializer;
pub mod state;

pub use codec::{create_codec_from_config, create_default_codec, EnvelopeCodec};
pub use compression::{CompressionAdapter, GzipCompressor, NoCompression};
pub use config::CodecConfig;
pub use envelope::{Envelope, Slot};
pub use error::{Result, StateError};
pub use persister::{InMemoryTransport, PageStatePersister, StateTransport};
pub use serializer::{JsonStateSerializer, StateSerializer};
pub use state::StatePair;

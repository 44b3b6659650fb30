/*!
Composition of the envelope codec with the transport that carries the slots.

The transport is the collaborator that actually moves the two outward slots
to the client and back, and that owns integrity protection of whatever it
stores. The persister composes a codec with a transport explicitly instead
of inheriting storage behavior from it.
*/

use crate::{
    codec::EnvelopeCodec, compression::CompressionAdapter, envelope::Slot,
    serializer::StateSerializer, Result, StateError, StatePair,
};

/// Transport abstraction that carries the outward slots across a round trip
///
/// Implementations are responsible for signing/tamper detection of the
/// stored form; the codec only produces and consumes slot values.
pub trait StateTransport {
    /// Hand the outward slots to the transport for the outbound leg
    fn store(&self, primary: Slot, secondary: Slot) -> Result<()>;

    /// Retrieve the outward slots on the inbound leg
    fn retrieve(&self) -> Result<(Slot, Slot)>;
}

/// Persister for one page's state across round trips
///
/// Each persistence cycle encodes a fresh pair, hands the slots to the
/// transport, and on the next cycle decodes whatever the transport hands
/// back.
pub struct PageStatePersister<T, Sr, C>
where
    T: StateTransport,
    Sr: StateSerializer,
    C: CompressionAdapter,
{
    transport: T,
    codec: EnvelopeCodec<Sr, C>,
}

impl<T, Sr, C> PageStatePersister<T, Sr, C>
where
    T: StateTransport,
    Sr: StateSerializer,
    C: CompressionAdapter,
{
    /// Create a new persister from a transport and a codec
    pub fn new(transport: T, codec: EnvelopeCodec<Sr, C>) -> Self {
        Self { transport, codec }
    }

    /// Encode the pair and hand the resulting slots to the transport
    pub fn save(&self, pair: StatePair) -> Result<()> {
        let (primary, secondary) = self.codec.encode(pair)?;
        self.transport.store(primary, secondary)
    }

    /// Retrieve the slots from the transport and decode them
    pub fn load(&self) -> Result<StatePair> {
        let (primary, secondary) = self.transport.retrieve()?;
        self.codec.decode(primary, secondary)
    }
}

/// In-memory transport holding at most one stored slot pair
///
/// Stands in for a real carrier (hidden form field, cookie, server-side
/// session) in tests and single-process hosts. Retrieval does not consume
/// the stored slots.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    slots: std::sync::Mutex<Option<(Slot, Slot)>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateTransport for InMemoryTransport {
    fn store(&self, primary: Slot, secondary: Slot) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StateError::transport("transport state poisoned"))?;
        *slots = Some((primary, secondary));
        Ok(())
    }

    fn retrieve(&self) -> Result<(Slot, Slot)> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| StateError::transport("transport state poisoned"))?;
        slots
            .clone()
            .ok_or_else(|| StateError::transport("no stored state to retrieve"))
    }
}

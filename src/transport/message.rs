use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use super::AckTrait;

/// Shared handle used to acknowledge exactly one message.
pub type AckHandle = Arc<dyn AckTrait + Send + Sync>;

/// A payload as delivered by the broker, paired with the handle that
/// acknowledges it.
#[derive(Clone)]
pub struct RawMessage {
    pub payload: Bytes,
    pub ack: AckHandle,
}

impl RawMessage {
    pub fn new(payload: impl Into<Bytes>, ack: AckHandle) -> Self {
        Self {
            payload: payload.into(),
            ack,
        }
    }
}

impl fmt::Debug for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawMessage")
            .field("payload", &self.payload)
            .field("ack", &"AckHandle")
            .finish()
    }
}

//! Deliveries pushed by the in-process broker.
//!
//! Each subscriber gets its own `Delivery` for every published payload. The
//! `id` is what the subscriber's ack handle reports back to the broker.

use bytes::Bytes;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Delivery {
    pub id: String,
    pub topic: String,
    pub payload: Bytes,
}

impl Delivery {
    /// Creates a delivery with a fresh UUID v4 identifier.
    pub fn new(topic: &str, payload: Bytes) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            payload,
        }
    }
}

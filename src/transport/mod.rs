//! The `transport` module defines the raw contracts a message broker must
//! provide for the typed layer to run on top of it.
//!
//! Everything here deals in bytes and topics only. Serialization, typed
//! streams and error staging happen in `publisher` and `subscriber`; the
//! broker connection, retries and durability live behind these traits.
//!
//! All traits are object safe, so a backend can be handed around as
//! `Arc<dyn PubCtxTrait + Send + Sync>` and friends.

pub mod message;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::errors::{AckError, BrokerError, SubError, UnSubError};

pub use message::{AckHandle, RawMessage};

/// Acknowledges one received message.
#[async_trait]
pub trait AckTrait {
    async fn ack(&self) -> Result<(), AckError>;
}

/// Cancels a subscription on the broker.
#[async_trait]
pub trait UnSubTrait {
    async fn unsubscribe(&self) -> Result<(), UnSubError>;
}

/// Sink capable of publishing raw byte payloads.
#[async_trait]
pub trait PubCtxTrait {
    /// Publish `payload` to `topic` on the underlying broker.
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), BrokerError>;
}

/// Source producing a stream of raw messages with their ack handles.
///
/// The returned stream ends when the source is done or has been stopped,
/// for instance by an unsubscribe. Failing to start the subscription is
/// reported through the outer `Result`.
#[async_trait]
pub trait SubCtxTrait {
    async fn subscribe(&self) -> Result<BoxStream<'static, RawMessage>, SubError>;
}

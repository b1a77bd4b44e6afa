//! Typed publishing.
//!
//! `Pub<T>` serializes values with the configured `Format` and hands the
//! bytes to a raw `PubCtxTrait` sink under a fixed topic. It performs
//! exactly one sink call per publish and never retries; retry policy belongs
//! to the sink or to the caller.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, trace};

use crate::codec::Format;
use crate::errors::PubError;
use crate::transport::PubCtxTrait;

/// Abstraction for publishing typed items.
#[async_trait]
pub trait PubTrait {
    type Item: Serialize + Send + Sync;

    /// Serialize `obj` and send it through the backing transport.
    async fn publish(&self, obj: &Self::Item) -> Result<(), PubError>;
}

pub struct Pub<T> {
    ctx: Arc<dyn PubCtxTrait + Send + Sync>,
    topic: String,
    format: Format,
    _phantom: PhantomData<fn(&T)>,
}

impl<T> Pub<T>
where
    T: Serialize + Send + Sync,
{
    pub fn new(
        ctx: Arc<dyn PubCtxTrait + Send + Sync>,
        topic: impl Into<String>,
        format: Format,
    ) -> Self {
        Self {
            ctx,
            topic: topic.into(),
            format,
            _phantom: PhantomData,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

#[async_trait]
impl<T> PubTrait for Pub<T>
where
    T: Serialize + Send + Sync,
{
    type Item = T;

    async fn publish(&self, obj: &T) -> Result<(), PubError> {
        let payload = match self.format {
            Format::MessagePack => rmp_serde::to_vec(obj)?,
            Format::Json => serde_json::to_vec(obj)?,
        };
        trace!(topic = %self.topic, format = %self.format, bytes = payload.len(), "publishing");

        self.ctx
            .publish(&self.topic, payload.into())
            .await
            .map_err(|err| {
                debug!(topic = %self.topic, error = %err, "sink rejected payload");
                PubError::Broker(err)
            })
    }
}

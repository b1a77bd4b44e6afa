//! Typed subscriptions.
//!
//! `Sub<T>` wraps a raw `SubCtxTrait` source and turns its byte messages
//! into a stream of `SubMessage<T>`.
//!
//! Each call to `subscribe` spawns one forwarding task that:
//! - takes raw messages strictly in arrival order,
//! - acknowledges each one first when auto-ack is enabled, and skips
//!   decoding if that acknowledgment fails,
//! - decodes the payload with the configured format,
//! - hands exactly one `SubMessage` per raw message to the consumer.
//!
//! Per-message failures travel in-band and never end the stream. The stream
//! ends when the raw source ends. Dropping the returned stream stops the
//! forwarding task, which in turn drops the raw stream.
//!
//! The task and its consumer are joined by a channel with room for a single
//! item, so the task cannot run ahead of the consumer by more than one
//! decoded message.

mod message;
mod options;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::codec::Format;
use crate::errors::{SubError, UnSubError};
use crate::transport::{RawMessage, SubCtxTrait, UnSubTrait};

pub use message::SubMessage;
pub use options::{SubOptTrait, SubOptions};

/// Subscription interface returning a stream of decoded items and ack
/// handles.
#[async_trait]
pub trait SubTrait {
    type Item: DeserializeOwned + Send + 'static;

    async fn subscribe(&self) -> Result<BoxStream<'static, SubMessage<Self::Item>>, SubError>;
}

pub struct Sub<T> {
    ctx: Arc<dyn SubCtxTrait + Send + Sync>,
    unsub: Option<Arc<dyn UnSubTrait + Send + Sync>>,
    options: Arc<dyn SubOptTrait + Send + Sync>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Sub<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Creates a subscriber.
    ///
    /// Pass `None` for `unsub` only when the source has nothing to cancel;
    /// `unsubscribe` then fails with `UnSubError::NoHandler`.
    pub fn new(
        ctx: Arc<dyn SubCtxTrait + Send + Sync>,
        unsub: Option<Arc<dyn UnSubTrait + Send + Sync>>,
        options: Arc<dyn SubOptTrait + Send + Sync>,
    ) -> Self {
        Self {
            ctx,
            unsub,
            options,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T> SubTrait for Sub<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Item = T;

    async fn subscribe(&self) -> Result<BoxStream<'static, SubMessage<T>>, SubError> {
        let raw = self.ctx.subscribe().await?;

        // Options are fixed for the lifetime of this subscription.
        let auto_ack = self.options.get_auto_ack();
        let format = self.options.get_format();

        let (tx, mut rx) = mpsc::channel::<SubMessage<T>>(1);
        tokio::spawn(forward(raw, tx, auto_ack, format));

        Ok(stream::poll_fn(move |cx| rx.poll_recv(cx)).boxed())
    }
}

#[async_trait]
impl<T> UnSubTrait for Sub<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn unsubscribe(&self) -> Result<(), UnSubError> {
        let Some(unsub) = &self.unsub else {
            return Err(UnSubError::NoHandler);
        };
        unsub.unsubscribe().await
    }
}

async fn forward<T>(
    mut raw: BoxStream<'static, RawMessage>,
    tx: mpsc::Sender<SubMessage<T>>,
    auto_ack: bool,
    format: Format,
) where
    T: DeserializeOwned + Send + 'static,
{
    debug!(auto_ack, %format, "subscription forwarder started");
    let mut forwarded = 0usize;

    loop {
        let next = tokio::select! {
            _ = tx.closed() => break,
            next = raw.next() => next,
        };
        let Some(msg) = next else {
            break;
        };

        let item = tokio::select! {
            _ = tx.closed() => break,
            item = process::<T>(msg, auto_ack, format) => item,
        };
        if tx.send(item).await.is_err() {
            break;
        }
        forwarded += 1;
    }

    debug!(forwarded, "subscription forwarder stopped");
}

async fn process<T>(msg: RawMessage, auto_ack: bool, format: Format) -> SubMessage<T>
where
    T: DeserializeOwned,
{
    let RawMessage { payload, ack } = msg;

    if auto_ack {
        if let Err(err) = ack.ack().await {
            warn!(error = %err, "auto-ack failed, message not decoded");
            return SubMessage {
                item: Err(SubError::Ack(err)),
                ack,
            };
        }
    }

    let item = match format {
        Format::MessagePack => rmp_serde::from_slice::<T>(&payload).map_err(SubError::from),
        Format::Json => serde_json::from_slice::<T>(&payload).map_err(SubError::from),
    };
    match &item {
        Ok(_) => trace!(bytes = payload.len(), "message decoded"),
        Err(err) => warn!(error = %err, bytes = payload.len(), "failed to decode message"),
    }

    SubMessage { item, ack }
}

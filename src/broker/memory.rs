//! Loopback transport backed by the in-memory `Broker` engine.
//!
//! `MemoryBroker` implements the raw publish contract. Subscriptions come
//! from `MemoryBroker::subscription`, which implements both the raw
//! subscribe and the unsubscribe contracts for one topic.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::broker::engine::Broker;
use crate::broker::topic::SubscriberId;
use crate::client::Client;
use crate::errors::{AckError, BrokerError, SubError, UnSubError};
use crate::transport::{AckTrait, PubCtxTrait, RawMessage, SubCtxTrait, UnSubTrait};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, BrokerError> {
    mutex
        .lock()
        .map_err(|_| BrokerError::msg("broker state poisoned"))
}

/// Shared handle to an in-process broker.
#[derive(Debug, Clone, Default)]
pub struct MemoryBroker {
    pub(crate) engine: Arc<Mutex<Broker>>,
}

impl MemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a subscription handle for `topic`. Nothing is registered
    /// until `subscribe` is called on it.
    pub fn subscription(&self, topic: impl Into<String>) -> MemorySubscription {
        MemorySubscription {
            engine: self.engine.clone(),
            topic: topic.into(),
            clients: Mutex::new(Vec::new()),
        }
    }

    /// Number of deliveries not yet acknowledged.
    pub fn pending_acks(&self) -> Result<usize, BrokerError> {
        Ok(lock(&self.engine)?.pending_count())
    }

    /// Ids of deliveries still unacknowledged after `age`.
    pub fn stale_deliveries(&self, age: chrono::Duration) -> Result<Vec<String>, BrokerError> {
        Ok(lock(&self.engine)?.pending_older_than(age))
    }
}

#[async_trait]
impl PubCtxTrait for MemoryBroker {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), BrokerError> {
        let delivered = lock(&self.engine)?.publish(topic, payload);
        trace!(topic, delivered, "memory publish");
        Ok(())
    }
}

/// One topic subscription on a `MemoryBroker`.
///
/// Every `subscribe` call registers a separate client with its own stream;
/// `unsubscribe` removes all of them and ends their streams.
#[derive(Debug)]
pub struct MemorySubscription {
    engine: Arc<Mutex<Broker>>,
    topic: String,
    clients: Mutex<Vec<SubscriberId>>,
}

impl MemorySubscription {
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[async_trait]
impl SubCtxTrait for MemorySubscription {
    async fn subscribe(&self) -> Result<BoxStream<'static, RawMessage>, SubError> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let client = Client::new(tx);
        let client_id = client.id.clone();

        {
            let mut engine = lock(&self.engine)?;
            engine.register_client(client);
            engine.subscribe(&self.topic, client_id.clone());
        }
        lock(&self.clients)?.push(client_id.clone());
        debug!(topic = %self.topic, client = %client_id, "memory subscription started");

        let engine = self.engine.clone();
        let messages = stream::poll_fn(move |cx| rx.poll_recv(cx)).map(move |delivery| {
            let ack = MemoryAck {
                engine: engine.clone(),
                delivery_id: delivery.id,
            };
            RawMessage::new(delivery.payload, Arc::new(ack))
        });
        Ok(messages.boxed())
    }
}

#[async_trait]
impl UnSubTrait for MemorySubscription {
    async fn unsubscribe(&self) -> Result<(), UnSubError> {
        let clients = std::mem::take(&mut *lock(&self.clients)?);
        if clients.is_empty() {
            return Err(BrokerError::msg(format!(
                "no active subscription for topic {}",
                self.topic
            ))
            .into());
        }

        let mut engine = lock(&self.engine)?;
        for client_id in &clients {
            engine.cleanup_client(client_id);
        }
        debug!(topic = %self.topic, clients = clients.len(), "memory subscription cancelled");
        Ok(())
    }
}

struct MemoryAck {
    engine: Arc<Mutex<Broker>>,
    delivery_id: String,
}

#[async_trait]
impl AckTrait for MemoryAck {
    async fn ack(&self) -> Result<(), AckError> {
        lock(&self.engine)?.handle_ack(&self.delivery_id)?;
        Ok(())
    }
}

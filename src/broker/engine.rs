//! Broker engine
//!
//! In-memory routing state for the loopback transport:
//! - topics and their subscriber sets
//! - registered clients and their delivery channels
//! - deliveries waiting for an acknowledgment
//!
//! The engine is synchronous and meant to sit behind a lock (see
//! `MemoryBroker`). Nothing here awaits, so the lock is never held across a
//! suspension point. Unacknowledged deliveries are tracked but never
//! redelivered.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::broker::message::Delivery;
use crate::broker::topic::{SubscriberId, Topic};
use crate::client::Client;
use crate::errors::BrokerError;

#[derive(Debug, Clone)]
pub struct PendingMessage {
    pub topic: String,
    pub subscriber: SubscriberId,
    /// Milliseconds since the UNIX epoch at which the delivery was sent.
    pub sent_at: i64,
}

#[derive(Debug, Default)]
pub struct Broker {
    pub(crate) topics: HashMap<String, Topic>,
    pub(crate) clients: HashMap<SubscriberId, Client>,
    pub(crate) pending_acks: HashMap<String, PendingMessage>,
}

impl Broker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_client(&mut self, client: Client) {
        self.clients.insert(client.id.clone(), client);
    }

    /// Removes a client without touching its subscriptions.
    pub fn remove_client(&mut self, client_id: &SubscriberId) -> Option<Client> {
        self.clients.remove(client_id)
    }

    /// Subscribes a client to a topic, creating the topic if needed.
    pub fn subscribe(&mut self, topic: &str, subscriber: SubscriberId) {
        let topic = self
            .topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic));
        topic.subscribe(subscriber);
    }

    /// Unsubscribes a client from a topic. Topics left without subscribers
    /// are dropped.
    pub fn unsubscribe(&mut self, topic: &str, subscriber: &SubscriberId) {
        if let Some(t) = self.topics.get_mut(topic) {
            t.unsubscribe(subscriber);
            if t.is_empty() {
                self.topics.remove(topic);
            }
        }
    }

    /// Hands `payload` to every client subscribed to `topic` and returns how
    /// many deliveries were made.
    ///
    /// Each delivery gets its own id and stays pending until acknowledged.
    /// Subscribers whose channel is closed are cleaned up.
    pub fn publish(&mut self, topic: &str, payload: Bytes) -> usize {
        let Some(t) = self.topics.get(topic) else {
            debug!(topic, "no subscribers, payload dropped");
            return 0;
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        for sub_id in &t.subscribers {
            let Some(client) = self.clients.get(sub_id) else {
                warn!(subscriber = %sub_id, "no client registered for subscriber");
                continue;
            };

            let delivery = Delivery::new(topic, payload.clone());
            let delivery_id = delivery.id.clone();
            if let Err(e) = client.sender.send(delivery) {
                warn!(subscriber = %sub_id, error = %e, "failed to deliver");
                closed.push(sub_id.clone());
                continue;
            }

            self.pending_acks.insert(
                delivery_id,
                PendingMessage {
                    topic: topic.to_string(),
                    subscriber: sub_id.clone(),
                    sent_at: chrono::Utc::now().timestamp_millis(),
                },
            );
            delivered += 1;
        }

        for sub_id in &closed {
            self.cleanup_client(sub_id);
        }

        debug!(topic, delivered, "published");
        delivered
    }

    /// Marks a delivery as processed.
    pub fn handle_ack(&mut self, delivery_id: &str) -> Result<(), BrokerError> {
        match self.pending_acks.remove(delivery_id) {
            Some(pending) => {
                debug!(delivery_id, topic = %pending.topic, "ack received");
                Ok(())
            }
            None => {
                warn!(delivery_id, "ack for unknown delivery");
                Err(BrokerError::msg(format!("unknown delivery id: {delivery_id}")))
            }
        }
    }

    /// Removes a client, unsubscribes it from every topic and forgets its
    /// unacknowledged deliveries. Dropping the client closes its delivery
    /// channel.
    pub fn cleanup_client(&mut self, client_id: &SubscriberId) {
        self.remove_client(client_id);
        self.pending_acks.retain(|_, p| &p.subscriber != client_id);

        for topic in self.topics.values_mut() {
            topic.unsubscribe(client_id);
        }
        self.topics.retain(|_, topic| !topic.is_empty());

        debug!(client = %client_id, "cleaned up client");
    }

    pub fn pending_count(&self) -> usize {
        self.pending_acks.len()
    }

    /// Ids of deliveries that have waited at least `age` for an ack.
    pub fn pending_older_than(&self, age: chrono::Duration) -> Vec<String> {
        let cutoff = chrono::Utc::now().timestamp_millis() - age.num_milliseconds();
        self.pending_acks
            .iter()
            .filter(|(_, p)| p.sent_at <= cutoff)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

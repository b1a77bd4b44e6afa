use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::broker::message::Delivery;

/// A consumer registered with the in-process broker.
///
/// Dropping the client drops `sender`, which ends the consumer's delivery
/// stream.
#[derive(Debug)]
pub struct Client {
    /// Unique identifier for the client (UUID v4).
    pub id: String,

    /// Channel the broker pushes deliveries into.
    pub sender: UnboundedSender<Delivery>,
}

impl Client {
    pub fn new(sender: UnboundedSender<Delivery>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
        }
    }
}

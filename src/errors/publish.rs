use thiserror::Error;

use super::broker::BrokerError;

/// Error returned while publishing a typed value.
#[derive(Error, Debug)]
pub enum PubError {
    /// The raw sink rejected the encoded payload.
    #[error("Publish error: {0}")]
    Broker(#[from] BrokerError),
    #[error("Publish error: JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Publish error: MessagePack encode error: {0}")]
    MessagePackEncode(#[from] rmp_serde::encode::Error),
}

impl PubError {
    /// `true` when the value could not be serialized, as opposed to a
    /// transport failure.
    pub fn is_encode(&self) -> bool {
        matches!(self, PubError::Json(_) | PubError::MessagePackEncode(_))
    }
}

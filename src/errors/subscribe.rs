use thiserror::Error;

use super::ack::AckError;
use super::broker::BrokerError;

/// Error returned when starting a subscription, or carried in-band by a
/// received message that could not be acknowledged or decoded.
#[derive(Error, Debug)]
pub enum SubError {
    #[error("Subscribe error: {0}")]
    Broker(#[from] BrokerError),
    #[error("Subscribe error: {0}")]
    Ack(#[from] AckError),
    #[error("Subscribe error: JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Subscribe error: MessagePack decode error: {0}")]
    MessagePackDecode(#[from] rmp_serde::decode::Error),
}

impl SubError {
    pub fn is_decode(&self) -> bool {
        matches!(self, SubError::Json(_) | SubError::MessagePackDecode(_))
    }
}

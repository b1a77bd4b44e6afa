use thiserror::Error;

use super::broker::BrokerError;

/// Error returned by an acknowledgment handle.
#[derive(Error, Debug)]
pub enum AckError {
    #[error("Acknowledgment error: {0}")]
    Broker(#[from] BrokerError),
}

use thiserror::Error;

use super::broker::BrokerError;

/// Error returned when cancelling a subscription.
#[derive(Error, Debug)]
pub enum UnSubError {
    #[error("Unsubscribe error: {0}")]
    Broker(#[from] BrokerError),
    /// No unsubscribe handler was configured for the subscriber.
    #[error("Unsubscribe error: no unsubscribe handler found")]
    NoHandler,
}

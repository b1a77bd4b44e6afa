use std::error::Error as StdError;

use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure reported by the underlying transport.
///
/// The transport's own error is kept as-is; `Display` and `source` are
/// forwarded to it.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct BrokerError(#[from] BoxError);

impl BrokerError {
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }

    /// Builds a broker error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self(message.into())
    }

    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

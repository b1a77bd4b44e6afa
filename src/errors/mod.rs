//! Error taxonomy for the typed messaging layer.
//!
//! Each fallible stage gets its own error type so callers can match on
//! *where* a failure happened:
//!
//! - `BrokerError`: the raw transport failed. Wraps whatever the transport
//!   returned.
//! - `PubError`: encoding or transmitting a published value failed.
//! - `SubError`: starting a subscription, acknowledging or decoding a
//!   received message failed.
//! - `AckError`: an acknowledgment handle failed.
//! - `UnSubError`: cancelling a subscription failed, including the case
//!   where no unsubscribe handler was configured.
//! - `FormatError`: a format name could not be resolved.
//!
//! Wrapped causes stay reachable through `std::error::Error::source`.

mod ack;
mod broker;
mod format;
mod publish;
mod subscribe;
mod unsubscribe;

pub use self::ack::AckError;
pub use self::broker::BrokerError;
pub use self::format::FormatError;
pub use self::publish::PubError;
pub use self::subscribe::SubError;
pub use self::unsubscribe::UnSubError;

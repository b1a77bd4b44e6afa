//! The `client` module defines how the in-process broker sees a subscriber.
//!
//! A `Client` is one registered consumer: a unique identifier and the sending
//! half of the channel the broker pushes deliveries into.

pub mod pubsub_client;
pub use pubsub_client::Client;

#[cfg(test)]
mod tests;

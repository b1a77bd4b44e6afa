//! In-process loopback broker.
//!
//! A reference transport that keeps everything in memory. It implements the
//! raw contracts from `transport`, which makes it handy for tests, demos and
//! single-process setups. It offers no durability and never redelivers.
//!
//! - `engine`: topic, client and pending-ack bookkeeping.
//! - `memory`: async handles implementing the transport traits.

pub mod engine;
pub mod memory;
pub mod message;
pub mod topic;

pub use engine::Broker;
pub use memory::{MemoryBroker, MemorySubscription};

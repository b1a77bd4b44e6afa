//! # PopSub Typed
//!
//! `popsub_typed` lets application code publish and consume strongly-typed
//! messages without hand-rolling serialization or channel plumbing. The wire
//! transport is pluggable: any broker that implements the raw contracts in
//! `transport` can carry the messages.
//!
//! ## Core Modules
//!
//! - `codec`: the `Format` selector (JSON or MessagePack).
//! - `errors`: per-stage error types that keep the original cause.
//! - `transport`: raw byte-level publish, subscribe, ack and unsubscribe
//!   contracts.
//! - `publisher`: `Pub<T>`, which encodes values and forwards them to a raw sink.
//! - `subscriber`: `Sub<T>`, which turns a raw message stream into a typed,
//!   ack-aware stream.
//! - `noop`: no-op ack and unsubscribe handlers.
//! - `broker` / `client`: an in-process loopback transport.
//! - `config`: settings loaded from files and the environment.
//! - `utils`: logging setup.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use futures::StreamExt;
//! use popsub_typed::{Format, MemoryBroker, Pub, PubTrait, Sub, SubOptions, SubTrait};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct UserCreated {
//!     id: u64,
//!     name: String,
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let broker = MemoryBroker::new();
//! let subscription = Arc::new(broker.subscription("users"));
//! let subscriber: Sub<UserCreated> = Sub::new(
//!     subscription.clone(),
//!     Some(subscription),
//!     Arc::new(SubOptions::new(Format::Json)),
//! );
//! let mut messages = subscriber.subscribe().await?;
//!
//! let publisher: Pub<UserCreated> = Pub::new(Arc::new(broker.clone()), "users", Format::Json);
//! publisher.publish(&UserCreated { id: 42, name: "Jane".into() }).await?;
//!
//! while let Some(msg) = messages.next().await {
//!     match msg.item {
//!         Ok(user) => println!("received {}", user.name),
//!         Err(err) => eprintln!("skipping message: {err}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod broker;
pub mod client;
pub mod codec;
pub mod config;
pub mod errors;
pub mod noop;
pub mod publisher;
pub mod subscriber;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;

pub use broker::{MemoryBroker, MemorySubscription};
pub use codec::Format;
pub use noop::{AckNoop, UnSubNoop};
pub use publisher::{Pub, PubTrait};
pub use subscriber::{Sub, SubMessage, SubOptTrait, SubOptions, SubTrait};
pub use transport::{AckHandle, AckTrait, PubCtxTrait, RawMessage, SubCtxTrait, UnSubTrait};

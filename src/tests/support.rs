//! Hand-written doubles for the raw transport contracts.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};

use crate::codec::Format;
use crate::errors::{AckError, BrokerError, SubError, UnSubError};
use crate::noop::AckNoop;
use crate::subscriber::SubOptTrait;
use crate::transport::{AckHandle, AckTrait, PubCtxTrait, RawMessage, SubCtxTrait, UnSubTrait};

/// Raw sink that records every payload it accepts.
#[derive(Default)]
pub struct RecordingSink {
    published: Mutex<Vec<(String, Bytes)>>,
    attempts: AtomicUsize,
    fail_with: Option<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<(String, Bytes)> {
        self.published.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PubCtxTrait for RecordingSink {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), BrokerError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(BrokerError::msg(message.clone()));
        }
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        Ok(())
    }
}

/// Ack handle that counts calls and optionally fails.
#[derive(Default)]
pub struct MockAck {
    calls: AtomicUsize,
    fail_with: Option<String>,
}

impl MockAck {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_with: Some(message.to_string()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AckTrait for MockAck {
    async fn ack(&self) -> Result<(), AckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(BrokerError::msg(message.clone()).into()),
            None => Ok(()),
        }
    }
}

/// Ack handle whose future never completes. Records when a call starts and
/// when the pending future is dropped.
#[derive(Default)]
pub struct HangingAck {
    started: AtomicBool,
    cancelled: Arc<AtomicBool>,
}

impl HangingAck {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AckTrait for HangingAck {
    async fn ack(&self) -> Result<(), AckError> {
        self.started.store(true, Ordering::SeqCst);
        let _guard = DropFlag(self.cancelled.clone());
        futures::future::pending::<Result<(), AckError>>().await
    }
}

/// Raw source replaying a fixed list of messages, then ending.
pub struct ScriptedSource {
    messages: Vec<RawMessage>,
    start_error: Option<String>,
}

impl ScriptedSource {
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self {
            messages,
            start_error: None,
        }
    }

    pub fn from_payloads(payloads: Vec<Vec<u8>>) -> Self {
        Self::new(
            payloads
                .into_iter()
                .map(|payload| RawMessage::new(payload, Arc::new(AckNoop)))
                .collect(),
        )
    }

    pub fn failing(message: &str) -> Self {
        Self {
            messages: Vec::new(),
            start_error: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl SubCtxTrait for ScriptedSource {
    async fn subscribe(&self) -> Result<BoxStream<'static, RawMessage>, SubError> {
        if let Some(message) = &self.start_error {
            return Err(BrokerError::msg(message.clone()).into());
        }
        Ok(stream::iter(self.messages.clone()).boxed())
    }
}

/// Raw source that yields its messages and then stays open forever.
///
/// `dropped()` reports whether the stream handed out has been dropped.
pub struct EndlessSource {
    messages: Vec<RawMessage>,
    dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl EndlessSource {
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self {
            messages,
            dropped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubCtxTrait for EndlessSource {
    async fn subscribe(&self) -> Result<BoxStream<'static, RawMessage>, SubError> {
        let guard = DropFlag(self.dropped.clone());
        let messages = stream::iter(self.messages.clone()).chain(stream::pending());
        Ok(messages
            .map(move |msg| {
                let _ = &guard;
                msg
            })
            .boxed())
    }
}

/// Unsubscribe handler that counts calls and optionally fails.
#[derive(Default)]
pub struct MockUnSub {
    calls: AtomicUsize,
    fail_with: Option<String>,
}

impl MockUnSub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_with: Some(message.to_string()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UnSubTrait for MockUnSub {
    async fn unsubscribe(&self) -> Result<(), UnSubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(BrokerError::msg(message.clone()).into()),
            None => Ok(()),
        }
    }
}

/// Options double counting how often each setting is read.
pub struct CountingOptions {
    auto_ack: bool,
    format: Format,
    pub reads: AtomicUsize,
}

impl CountingOptions {
    pub fn new(auto_ack: bool, format: Format) -> Self {
        Self {
            auto_ack,
            format,
            reads: AtomicUsize::new(0),
        }
    }
}

impl SubOptTrait for CountingOptions {
    fn get_auto_ack(&self) -> bool {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.auto_ack
    }

    fn get_format(&self) -> Format {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.format
    }
}

pub fn ack_handle(ack: &Arc<MockAck>) -> AckHandle {
    ack.clone()
}

pub fn encode<T: serde::Serialize>(value: &T, format: Format) -> Vec<u8> {
    match format {
        Format::MessagePack => rmp_serde::to_vec(value).unwrap(),
        Format::Json => serde_json::to_vec(value).unwrap(),
    }
}

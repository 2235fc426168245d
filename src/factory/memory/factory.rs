// src/factory/memory/factory.rs

//! In-memory factory implementation.
//!
//! This file contains the concrete implementation of the domain-level
//! `ScenarioFactory` trait using in-process data structures only.
//!
//! The factory simulates a message broker entirely within the process:
//! queue scenarios get competing-consumer delivery, topic scenarios get
//! fan-out delivery. All scenarios served by one factory instance share a
//! single exchange, exactly as capabilities created against a real broker
//! would share a connection.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use crate::macros::{log_debug, log_info, log_warn};
use crate::{
    // ---
    Error,
    FactoryConfig,
    FactoryPtr,
    Message,
    Receiver,
    ReceiverPtr,
    Result,
    ScenarioFactory,
    ScenarioName,
    Sender,
    SenderPtr,
};

/// Per-queue delivery state.
///
/// `buffer` holds messages published while no consumer is registered and
/// never grows past the configured channel capacity, so it can always be
/// drained into a fresh consumer channel without blocking.
#[derive(Default)]
struct QueueState {
    // ---
    buffer: VecDeque<Message>,
    consumers: Vec<mpsc::Sender<Message>>,
    next: usize,
}

/// Shared delivery state for one in-memory factory instance.
///
/// All senders and receivers created by the factory hold an `Arc` to the
/// same exchange; releasing the factory tears the exchange down for every
/// capability at once.
struct MemoryExchange {
    // ---
    factory_id: String,
    capacity: usize,
    closed: AtomicBool,
    queues: RwLock<HashMap<ScenarioName, QueueState>>,
    topics: RwLock<HashMap<ScenarioName, Vec<mpsc::Sender<Message>>>>,
}

impl MemoryExchange {
    // ---
    fn ensure_open(&self) -> Result<()> {
        // ---
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::Closed(format!(
                "factory '{}' has been released",
                self.factory_id
            )));
        }
        Ok(())
    }

    /// Deliver a queue message to exactly one consumer.
    ///
    /// Consumers registered for the scenario take turns (round-robin).
    /// With no consumer registered the message is buffered, up to the
    /// configured capacity.
    async fn publish_queue(&self, name: &ScenarioName, msg: Message) -> Result<()> {
        // ---
        self.ensure_open()?;

        let mut queues = self.queues.write().await;
        let state = queues.entry(name.clone()).or_default();

        state.consumers.retain(|tx| !tx.is_closed());

        if state.consumers.is_empty() {
            if state.buffer.len() >= self.capacity {
                return Err(Error::Factory(format!(
                    "queue '{name}' on factory '{}' is full",
                    self.factory_id
                )));
            }
            state.buffer.push_back(msg);
            return Ok(());
        }

        let idx = state.next % state.consumers.len();
        state.next = state.next.wrapping_add(1);

        // A failure here means the consumer dropped its receiver after the
        // retain above; treat it like any other dropped consumer.
        if state.consumers[idx].send(msg).await.is_err() {
            log_warn!("{}: dropping message for queue '{name}'", self.factory_id);
        }

        Ok(())
    }

    /// Register a queue consumer and hand it anything already buffered.
    async fn register_queue_consumer(&self, name: &ScenarioName) -> Result<mpsc::Receiver<Message>> {
        // ---
        self.ensure_open()?;

        let (tx, rx) = mpsc::channel(self.capacity);

        let mut queues = self.queues.write().await;
        let state = queues.entry(name.clone()).or_default();

        // The buffer never exceeds `capacity`, so draining it into the
        // fresh channel cannot block while the map lock is held.
        while let Some(msg) = state.buffer.pop_front() {
            let _ = tx.send(msg).await;
        }

        state.consumers.push(tx);
        Ok(rx)
    }

    /// Deliver a topic message to every current subscriber.
    ///
    /// A publish with no subscribers is dropped; pub/sub carries no
    /// history.
    async fn publish_topic(&self, name: &ScenarioName, msg: Message) -> Result<()> {
        // ---
        self.ensure_open()?;

        let mut topics = self.topics.write().await;
        let subscribers = match topics.get_mut(name) {
            Some(subs) => subs,
            None => return Ok(()),
        };

        subscribers.retain(|tx| !tx.is_closed());

        for tx in subscribers.iter() {
            // Ignore send failures; a closed channel indicates a dropped
            // receiver.
            let _ = tx.send(msg.clone()).await;
        }

        Ok(())
    }

    async fn register_topic_subscriber(
        &self,
        name: &ScenarioName,
    ) -> Result<mpsc::Receiver<Message>> {
        // ---
        self.ensure_open()?;

        let (tx, rx) = mpsc::channel(self.capacity);

        let mut topics = self.topics.write().await;
        topics.entry(name.clone()).or_default().push(tx);

        Ok(rx)
    }

    /// Tear down the exchange.
    ///
    /// Dropping the channel senders ends every receiver's stream once it
    /// drains what was already delivered. Repeated close is a no-op.
    async fn close(&self) {
        // ---
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        self.queues.write().await.clear();
        self.topics.write().await.clear();
    }
}

/// Which delivery discipline a sender feeds.
#[derive(Clone, Copy, Debug)]
enum ChannelKind {
    Queue,
    Topic,
}

struct MemorySender {
    // ---
    scenario: ScenarioName,
    kind: ChannelKind,
    exchange: Arc<MemoryExchange>,
}

#[async_trait::async_trait]
impl Sender for MemorySender {
    // ---
    fn scenario(&self) -> &ScenarioName {
        &self.scenario
    }

    async fn send(&self, msg: Message) -> Result<()> {
        // ---
        match self.kind {
            ChannelKind::Queue => self.exchange.publish_queue(&self.scenario, msg).await,
            ChannelKind::Topic => self.exchange.publish_topic(&self.scenario, msg).await,
        }
    }

    /// Senders hold no per-instance resources in the memory factory.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

struct MemoryReceiver {
    // ---
    scenario: ScenarioName,
    inbox: mpsc::Receiver<Message>,
}

#[async_trait::async_trait]
impl Receiver for MemoryReceiver {
    // ---
    fn scenario(&self) -> &ScenarioName {
        &self.scenario
    }

    /// Receive the next message.
    ///
    /// Returns `Ok(None)` once the exchange side of the channel is gone
    /// (factory released or consumer unregistered) and the channel is
    /// drained.
    async fn recv(&mut self) -> Result<Option<Message>> {
        Ok(self.inbox.recv().await)
    }

    async fn close(&mut self) -> Result<()> {
        // ---
        self.inbox.close();
        Ok(())
    }
}

/// In-memory scenario factory.
///
/// Supports exactly the scenario names listed in its [`FactoryConfig`];
/// any scenario may be used for queue operations, topic operations, or
/// both.
struct MemoryScenarioFactory {
    // ---
    config: FactoryConfig,
    exchange: Arc<MemoryExchange>,
}

impl MemoryScenarioFactory {
    // ---
    fn ensure_supported(&self, name: &ScenarioName) -> Result<()> {
        // ---
        if self.config.scenarios.contains(name) {
            Ok(())
        } else {
            Err(Error::Factory(format!(
                "scenario '{name}' is not configured for factory '{}'",
                self.config.factory_id
            )))
        }
    }
}

#[async_trait::async_trait]
impl ScenarioFactory for MemoryScenarioFactory {
    // ---

    /// Pure lookup against the configured name set.
    fn supports_scenario(&self, name: &ScenarioName) -> bool {
        self.config.scenarios.contains(name)
    }

    async fn create_queue_producer(&self, name: &ScenarioName) -> Result<SenderPtr> {
        // ---
        self.ensure_supported(name)?;
        self.exchange.ensure_open()?;

        Ok(Arc::new(MemorySender {
            scenario: name.clone(),
            kind: ChannelKind::Queue,
            exchange: self.exchange.clone(),
        }))
    }

    async fn create_queue_consumer(&self, name: &ScenarioName) -> Result<ReceiverPtr> {
        // ---
        self.ensure_supported(name)?;

        let inbox = self.exchange.register_queue_consumer(name).await?;

        Ok(Box::new(MemoryReceiver {
            scenario: name.clone(),
            inbox,
        }))
    }

    async fn create_topic_publisher(&self, name: &ScenarioName) -> Result<SenderPtr> {
        // ---
        self.ensure_supported(name)?;
        self.exchange.ensure_open()?;

        Ok(Arc::new(MemorySender {
            scenario: name.clone(),
            kind: ChannelKind::Topic,
            exchange: self.exchange.clone(),
        }))
    }

    async fn create_topic_subscriber(&self, name: &ScenarioName) -> Result<ReceiverPtr> {
        // ---
        self.ensure_supported(name)?;

        let inbox = self.exchange.register_topic_subscriber(name).await?;

        Ok(Box::new(MemoryReceiver {
            scenario: name.clone(),
            inbox,
        }))
    }

    async fn close(&self) -> Result<()> {
        // ---
        log_info!("{}: closing memory factory", self.config.factory_id);

        self.exchange.close().await;
        Ok(())
    }
}

/// Create a new in-memory scenario factory.
///
/// This factory is always available and requires no external resources.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] when the config names no
/// scenarios or sets a zero channel capacity.
pub async fn create_memory_factory(config: FactoryConfig) -> Result<FactoryPtr> {
    // ---
    if config.scenarios.is_empty() {
        return Err(Error::InvalidConfiguration(format!(
            "memory factory '{}' serves no scenarios",
            config.factory_id
        )));
    }

    // mpsc::channel requires a non-zero capacity.
    if config.channel_capacity == 0 {
        return Err(Error::InvalidConfiguration(format!(
            "memory factory '{}' requires a channel capacity of at least 1",
            config.factory_id
        )));
    }

    log_debug!(
        "{}: create memory factory ({} scenarios)",
        config.factory_id,
        config.scenarios.len()
    );

    let exchange = Arc::new(MemoryExchange {
        // ---
        factory_id: config.factory_id.clone(),
        capacity: config.channel_capacity,
        closed: AtomicBool::new(false),
        queues: RwLock::new(HashMap::new()),
        topics: RwLock::new(HashMap::new()),
    });

    Ok(Arc::new(MemoryScenarioFactory { config, exchange }))
}

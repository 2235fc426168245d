// src/domain/factory.rs

//! Factory domain abstractions.
//!
//! This module defines the domain-level contract between callers that need
//! messaging capabilities and the factories that can produce them. It
//! intentionally avoids any reference to concrete protocols, brokers, or
//! client libraries.
//!
//! A factory is responsible only for answering which scenario names it is
//! configured for and for producing [`Sender`] / [`Receiver`] capabilities
//! on request. Delivery semantics such as acknowledgement, durability, or
//! ordering are defined by the concrete factory, not here.
//!
//! Concrete implementations of this interface live under `src/factory/`.
use crate::{MessageId, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

/// A scenario name.
///
/// A `ScenarioName` identifies a named messaging configuration (a queue or
/// topic arrangement) that some factory has been configured to serve. It is
/// treated as an opaque key at the domain level.
///
/// Scenario names are immutable, cheap to clone, and safe to share across
/// threads.
///
/// The domain layer makes no assumptions about name syntax or hierarchy;
/// whether `"orders"` and `"orders/eu"` are related is a concern of the
/// configuration that produced them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ScenarioName(pub Arc<str>);

impl ScenarioName {
    /// Borrow the scenario name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T> From<T> for ScenarioName
where
    T: Into<Arc<str>>,
{
    fn from(value: T) -> Self {
        // ---
        ScenarioName(value.into())
    }
}

impl fmt::Display for ScenarioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque message.
///
/// A `Message` is the unit of transfer between producers and consumers.
/// It carries a payload along with minimal metadata. The routing layer
/// never interprets the payload or metadata; interpretation belongs to
/// the application on both ends.
///
/// # Examples
///
/// ```
/// # use mom_scenarios::Message;
/// # use bytes::Bytes;
/// let msg = Message::new(Bytes::from_static(b"order #42"));
/// let tagged = Message::with_content_type(Bytes::from_static(b"{}"), "application/json");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    // ---
    /// Unique identifier for this message.
    pub id: MessageId,

    /// Opaque payload bytes.
    ///
    /// The interpretation of this payload is defined by the application;
    /// factories and the router deliver it verbatim.
    pub payload: Bytes,

    /// Optional content type metadata (e.g., "application/json").
    ///
    /// This field is informational and not enforced anywhere in the
    /// routing layer. Factories may use it for serialization decisions.
    pub content_type: Option<Arc<str>>,
}

impl Message {
    // ---
    /// Create a message with a freshly generated ID and no content type.
    pub fn new(payload: Bytes) -> Self {
        // ---
        Self {
            id: MessageId::generate(),
            payload,
            content_type: None,
        }
    }

    /// Create a message with a freshly generated ID and an explicit
    /// content type.
    pub fn with_content_type(payload: Bytes, content_type: impl Into<Arc<str>>) -> Self {
        // ---
        Self {
            id: MessageId::generate(),
            payload,
            content_type: Some(content_type.into()),
        }
    }
}

/// Sending capability for a single scenario.
///
/// A `Sender` is produced by a factory for a specific scenario name, either
/// as a queue producer or as a topic publisher. The distinction is fixed at
/// creation time; the capability itself exposes only `send`.
///
/// Implementations must be safe for concurrent use; the router hands out
/// shared [`SenderPtr`] clones without further coordination.
#[async_trait::async_trait]
pub trait Sender: Send + Sync {
    // ---
    /// Returns the scenario name this sender was created for.
    fn scenario(&self) -> &ScenarioName;

    /// Send a message.
    ///
    /// Delivery guarantees (at-most-once, buffering, fan-out) are defined
    /// by the factory that produced this sender.
    async fn send(&self, msg: Message) -> Result<()>;

    /// Release any resources held by this sender.
    async fn close(&self) -> Result<()>;
}

impl fmt::Debug for dyn Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("scenario", self.scenario())
            .finish_non_exhaustive()
    }
}

/// Receiving capability for a single scenario.
///
/// A `Receiver` is produced by a factory for a specific scenario name,
/// either as a queue consumer (competing with other consumers) or as a
/// topic subscriber (receiving every published message). The distinction
/// is fixed at creation time.
#[async_trait::async_trait]
pub trait Receiver: Send {
    // ---
    /// Returns the scenario name this receiver was created for.
    fn scenario(&self) -> &ScenarioName;

    /// Receive the next message.
    ///
    /// Returns `Ok(None)` once the source has been closed and all
    /// previously delivered messages have been drained.
    async fn recv(&mut self) -> Result<Option<Message>>;

    /// Stop receiving and release any resources held by this receiver.
    async fn close(&mut self) -> Result<()>;
}

impl fmt::Debug for dyn Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("scenario", self.scenario())
            .finish_non_exhaustive()
    }
}

/// Scenario factory abstraction.
///
/// A `ScenarioFactory` declares which scenario names it is configured for
/// and produces messaging capabilities for them. It defines the minimal
/// contract required by the routing layer without committing to any
/// specific protocol or broker.
///
/// Implementations must ensure that:
/// - `supports_scenario()` is a pure lookup against the factory's own
///   configuration, with no side effects and no I/O.
/// - Creation operations are only required to succeed for supported names;
///   unsupported names must be refused, never silently mapped elsewhere.
/// - `close()` tolerates being called more than once.
///
/// The in-memory factory serves as the reference implementation of these
/// semantics.
///
/// # Notes
///
/// This trait uses `async_trait`; the expanded documentation may show
/// explicit lifetimes and a boxed `Future`. This is an implementation
/// detail — consumers should treat methods as normal `async fn`s.
#[async_trait::async_trait]
pub trait ScenarioFactory: Send + Sync {
    // ---
    /// Returns true when this factory is configured for the given
    /// scenario name.
    fn supports_scenario(&self, name: &ScenarioName) -> bool;

    /// Create a queue producer for the given scenario.
    ///
    /// Each message sent through the returned capability is delivered to
    /// exactly one consumer of the scenario's queue.
    async fn create_queue_producer(&self, name: &ScenarioName) -> Result<SenderPtr>;

    /// Create a queue consumer for the given scenario.
    ///
    /// Consumers of the same scenario compete; each queued message is
    /// delivered to one of them.
    async fn create_queue_consumer(&self, name: &ScenarioName) -> Result<ReceiverPtr>;

    /// Create a topic publisher for the given scenario.
    ///
    /// Each message sent through the returned capability is delivered to
    /// every current subscriber of the scenario's topic.
    async fn create_topic_publisher(&self, name: &ScenarioName) -> Result<SenderPtr>;

    /// Create a topic subscriber for the given scenario.
    async fn create_topic_subscriber(&self, name: &ScenarioName) -> Result<ReceiverPtr>;

    /// Release the factory and any resources it holds.
    async fn close(&self) -> Result<()>;
}

impl fmt::Debug for dyn ScenarioFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioFactory").finish_non_exhaustive()
    }
}

/// Shared sender pointer.
///
/// This is an `Arc<dyn Sender>`, which means:
/// - `.clone()` is cheap (only increments a reference count)
/// - Multiple clones feed the same underlying scenario
/// - Used to erase concrete sender types behind a stable domain interface.
pub type SenderPtr = Arc<dyn Sender>;

/// Boxed receiver pointer.
///
/// Receiving requires exclusive access (`recv` takes `&mut self`), so
/// receivers are boxed rather than shared.
pub type ReceiverPtr = Box<dyn Receiver>;

/// Shared factory pointer.
///
/// This is an `Arc<dyn ScenarioFactory>`, used to erase concrete factory
/// types behind a stable domain interface. Routers hold a sequence of
/// these and are themselves usable as a `FactoryPtr`, so composites nest.
pub type FactoryPtr = Arc<dyn ScenarioFactory>;

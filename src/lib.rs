//! Scenario-based routing of messaging capabilities across factories
//!
//! This library provides a composite factory for message-oriented
//! middleware: given a scenario name, it locates the unique underlying
//! factory configured for that name and delegates creation of queue
//! producers/consumers and topic publishers/subscribers to it. Zero or
//! multiple matching factories is reported as a configuration error,
//! never resolved by silently picking one.
//!

// Import all sub modules once...
mod domain;
mod factory;

mod factory_config;
mod router;
mod router_builder;

mod error;
mod macros;
mod message_id;

// Re-export main types
pub use router::ScenarioRouter;
pub use router_builder::ScenarioRouterBuilder;

pub use factory_config::FactoryConfig;

pub use error::{Error, Result};
pub use message_id::MessageId;

pub use factory::create_memory_factory;

// --- public re-exports
pub use domain::{
    //
    FactoryPtr,
    Message,
    Receiver,
    ReceiverPtr,
    ScenarioFactory,
    ScenarioName,
    Sender,
    SenderPtr,
};

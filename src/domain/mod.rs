//! Domain layer public interface.
//!
//! This module defines domain-level abstractions that are independent of
//! factory implementations, brokers, or infrastructure concerns.
//!
//! All domain consumers must import symbols via this module, not by
//! referencing individual files directly.

mod factory;

// --- Factory domain re-exports ---

pub use factory::{
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

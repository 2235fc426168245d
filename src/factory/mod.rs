//! Factory implementations.
//!
//! This module provides concrete implementations of the domain-level
//! `ScenarioFactory` trait. All factories are exposed only through
//! constructor functions.
//!
//! Domain code must not depend on factory-specific types.

mod memory;

pub use memory::create_memory_factory;

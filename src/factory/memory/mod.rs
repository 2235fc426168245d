// src/factory/memory/mod.rs

//! In-memory factory implementation.
//!
//! This module provides a pure in-process implementation of the
//! domain-level `ScenarioFactory` trait. It is intended primarily for
//! testing, local execution, and as a reference for capability semantics.
//!
//! ## Reference Semantics
//!
//! The in-memory factory defines the **reference behavior** for the
//! factory layer. Other factory implementations are expected to
//! approximate this behavior as closely as their underlying systems allow
//! and to document any unavoidable deviations.
//!
//! In particular, the in-memory factory establishes the following
//! expectations:
//!
//! - `supports_scenario()` answers purely from configuration; it never
//!   touches delivery state.
//! - Queue scenarios use competing consumers: each message reaches exactly
//!   one consumer, round-robin across those registered at delivery time.
//! - Topic scenarios fan out: each message reaches every subscriber
//!   registered at publish time.
//! - Message delivery is deterministic within a single process.
//!
//! ## Non-Goals
//!
//! This factory does not attempt to emulate the failure modes,
//! persistence, or delivery guarantees of any specific broker. It exists
//! to provide a clear, deterministic baseline against which routing
//! behavior can be validated.

mod factory;

pub use factory::create_memory_factory;

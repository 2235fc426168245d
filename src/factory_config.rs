//! Public, implementation-agnostic factory configuration.
//!
//! This type intentionally contains no broker-specific concepts
//! (e.g. connection options). Factory implementations are responsible
//! for interpreting this config into concrete resources.

use crate::ScenarioName;

/// Configuration for creating a factory instance.
///
/// Passed to factory constructor functions (`create_*_factory()`).
///
/// # Example
///
/// ```
/// use mom_scenarios::FactoryConfig;
///
/// let config = FactoryConfig::new("orders-mem", ["orders", "order-audit"])
///     .with_channel_capacity(256);
/// ```
#[derive(Debug, Clone)]
pub struct FactoryConfig {
    // ---
    /// Identifier for the factory instance, used for logging and for
    /// diagnostics attached to factory-level errors.
    pub factory_id: String,

    /// Scenario names this factory serves.
    ///
    /// A factory reports support for exactly these names; creation
    /// operations for any other name are refused.
    pub scenarios: Vec<ScenarioName>,

    /// Per-scenario channel capacity.
    ///
    /// Bounds both the number of messages buffered for a queue with no
    /// consumer and the per-receiver channel depth.
    ///
    /// Default: 64
    pub channel_capacity: usize,
}

impl FactoryConfig {
    /// Create a new `FactoryConfig` serving the given scenario names.
    ///
    /// Channel capacity uses the default (64).
    pub fn new(
        factory_id: impl Into<String>,
        scenarios: impl IntoIterator<Item = impl Into<ScenarioName>>,
    ) -> Self {
        Self {
            factory_id: factory_id.into(),
            scenarios: scenarios.into_iter().map(Into::into).collect(),
            channel_capacity: 64,
        }
    }

    /// Append one scenario name.
    pub fn with_scenario(mut self, name: impl Into<ScenarioName>) -> Self {
        self.scenarios.push(name.into());
        self
    }

    /// Set an explicit per-scenario channel capacity.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }
}

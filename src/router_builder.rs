//! Scenario router builder.
//!
//! Provides a fluent builder API for assembling a [`ScenarioRouter`] from
//! individual factories, with the empty configuration rejected at build
//! time rather than discovered on first use.

use crate::{Error, FactoryPtr, Result, ScenarioRouter};

/// Builder for creating [`ScenarioRouter`] instances.
///
/// Factories are appended in call order; that order is preserved by the
/// router and determines close order.
///
/// # Examples
///
/// ```
/// use mom_scenarios::{create_memory_factory, FactoryConfig, ScenarioRouterBuilder};
///
/// # async fn example() -> mom_scenarios::Result<()> {
/// let orders = create_memory_factory(FactoryConfig::new("orders-mem", ["orders"])).await?;
/// let payments = create_memory_factory(FactoryConfig::new("payments-mem", ["payments"])).await?;
///
/// let router = ScenarioRouterBuilder::new()
///     .factory(orders)
///     .factory(payments)
///     .build()?;
/// # let _ = router;
/// # Ok(())
/// # }
/// ```
pub struct ScenarioRouterBuilder {
    // ---
    factories: Vec<FactoryPtr>,
}

impl ScenarioRouterBuilder {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Append one factory.
    pub fn factory(mut self, factory: FactoryPtr) -> Self {
        self.factories.push(factory);
        self
    }

    /// Append every factory from an iterator, preserving its order.
    pub fn factories(mut self, factories: impl IntoIterator<Item = FactoryPtr>) -> Self {
        self.factories.extend(factories);
        self
    }

    /// Build the router (consumes self).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when no factory was
    /// supplied. A router over nothing can never resolve a scenario, so
    /// the misconfiguration is reported here, before any operation is
    /// attempted.
    pub fn build(self) -> Result<ScenarioRouter> {
        // ---
        if self.factories.is_empty() {
            return Err(Error::InvalidConfiguration(
                "at least one scenario factory is required".into(),
            ));
        }

        Ok(ScenarioRouter::new(self.factories))
    }
}

impl Default for ScenarioRouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

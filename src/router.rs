//! Composite scenario routing.
//!
//! Provides a single type that fans creation calls out across a collection
//! of underlying factories, selecting the one factory configured for a
//! requested scenario name.

use crate::macros::log_warn;
use crate::{
    // ---
    Error,
    FactoryPtr,
    ReceiverPtr,
    Result,
    ScenarioFactory,
    ScenarioName,
    SenderPtr,
};

/// Composite factory that delegates to exactly one of many underlying
/// [`ScenarioFactory`] instances, selected by scenario name.
///
/// The router holds an ordered factory sequence fixed at construction and
/// performs no I/O of its own: every operation is a pure lookup over the
/// sequence followed by a delegated call. Resolution requires the name to
/// be supported by **exactly one** held factory; zero or multiple matches
/// is a configuration problem and fails immediately. There is no fallback
/// selection and no retry.
///
/// The factory sequence is immutable after construction, so concurrent
/// calls are safe with respect to the router's own state. Safety of the
/// delegated calls is a requirement on the underlying factories.
///
/// `ScenarioRouter` implements [`ScenarioFactory`] itself, so routers can
/// be nested inside other routers.
///
/// # Examples
///
/// ```
/// use mom_scenarios::{create_memory_factory, FactoryConfig, ScenarioRouter};
///
/// # async fn example() -> mom_scenarios::Result<()> {
/// let orders = create_memory_factory(FactoryConfig::new("orders-mem", ["orders"])).await?;
/// let payments = create_memory_factory(FactoryConfig::new("payments-mem", ["payments"])).await?;
///
/// let router = ScenarioRouter::new(vec![orders, payments]);
///
/// let producer = router.create_queue_producer(&"orders".into()).await?;
/// # let _ = producer;
/// router.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct ScenarioRouter {
    // ---
    factories: Vec<FactoryPtr>,
}

impl std::fmt::Debug for ScenarioRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioRouter")
            .field("factories", &self.factories.len())
            .finish()
    }
}

impl ScenarioRouter {
    // ---
    /// Create a router over the given factory sequence.
    ///
    /// The sequence order is preserved and determines close order. An
    /// empty sequence is accepted; every resolution against it fails with
    /// zero matches. Use [`ScenarioRouterBuilder`](crate::ScenarioRouterBuilder)
    /// when an empty configuration should be rejected up front.
    pub fn new(factories: Vec<FactoryPtr>) -> Self {
        Self { factories }
    }

    /// The factory sequence this router delegates to, in construction order.
    pub fn factories(&self) -> &[FactoryPtr] {
        &self.factories
    }

    /// Returns true iff **exactly one** held factory supports `name`.
    ///
    /// This is a strict uniqueness check, not "any factory supports": a
    /// name claimed by two or more factories is reported as absent here,
    /// while the creation operations fail loudly for it rather than
    /// silently picking one.
    pub fn has_scenario(&self, name: &ScenarioName) -> bool {
        // ---
        self.factories
            .iter()
            .filter(|f| f.supports_scenario(name))
            .count()
            == 1
    }

    /// Create a queue producer for `name` via its unique supporting factory.
    pub async fn create_queue_producer(&self, name: &ScenarioName) -> Result<SenderPtr> {
        self.resolve(name)?.create_queue_producer(name).await
    }

    /// Create a queue consumer for `name` via its unique supporting factory.
    pub async fn create_queue_consumer(&self, name: &ScenarioName) -> Result<ReceiverPtr> {
        self.resolve(name)?.create_queue_consumer(name).await
    }

    /// Create a topic publisher for `name` via its unique supporting factory.
    pub async fn create_topic_publisher(&self, name: &ScenarioName) -> Result<SenderPtr> {
        self.resolve(name)?.create_topic_publisher(name).await
    }

    /// Create a topic subscriber for `name` via its unique supporting factory.
    pub async fn create_topic_subscriber(&self, name: &ScenarioName) -> Result<ReceiverPtr> {
        self.resolve(name)?.create_topic_subscriber(name).await
    }

    /// Close every held factory, in construction order.
    ///
    /// Best-effort: a failure closing one factory does not prevent
    /// attempting the rest. Sub-failures are logged and the first error is
    /// returned after the full pass. Underlying factories must tolerate
    /// repeated close, so calling this more than once is safe.
    pub async fn close(&self) -> Result<()> {
        // ---
        let mut first_err = None;

        for factory in &self.factories {
            if let Err(err) = factory.close().await {
                log_warn!("scenario router: factory close failed: {err}");
                first_err.get_or_insert(err);
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Locate the unique factory supporting `name`.
    ///
    /// Zero or multiple matches is reported with the observed match count;
    /// the ambiguity is a configuration problem, so no retry and no
    /// tie-breaking is attempted.
    fn resolve(&self, name: &ScenarioName) -> Result<&FactoryPtr> {
        // ---
        let matching: Vec<&FactoryPtr> = self
            .factories
            .iter()
            .filter(|f| f.supports_scenario(name))
            .collect();

        match matching.as_slice() {
            [factory] => Ok(*factory),
            _ => {
                log_warn!(
                    "scenario router: {} factories match scenario '{name}'",
                    matching.len()
                );
                Err(Error::NoUniqueScenario {
                    scenario: name.clone(),
                    matches: matching.len(),
                })
            }
        }
    }
}

#[async_trait::async_trait]
impl ScenarioFactory for ScenarioRouter {
    // ---
    // The composite is itself a factory: `supports_scenario` answers the
    // strict-uniqueness check, so nested routers propagate ambiguity as
    // absence instead of claiming names they cannot resolve.

    fn supports_scenario(&self, name: &ScenarioName) -> bool {
        self.has_scenario(name)
    }

    async fn create_queue_producer(&self, name: &ScenarioName) -> Result<SenderPtr> {
        ScenarioRouter::create_queue_producer(self, name).await
    }

    async fn create_queue_consumer(&self, name: &ScenarioName) -> Result<ReceiverPtr> {
        ScenarioRouter::create_queue_consumer(self, name).await
    }

    async fn create_topic_publisher(&self, name: &ScenarioName) -> Result<SenderPtr> {
        ScenarioRouter::create_topic_publisher(self, name).await
    }

    async fn create_topic_subscriber(&self, name: &ScenarioName) -> Result<ReceiverPtr> {
        ScenarioRouter::create_topic_subscriber(self, name).await
    }

    async fn close(&self) -> Result<()> {
        ScenarioRouter::close(self).await
    }
}

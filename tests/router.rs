// tests/router.rs

//! Routing behavior over fake factories.
//!
//! Resolution is side-effect-free apart from the delegated call, so the
//! fakes expose fixed name sets and record every call they receive.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use mom_scenarios::{
    // ---
    Error,
    FactoryPtr,
    Message,
    Receiver,
    ReceiverPtr,
    Result,
    ScenarioFactory,
    ScenarioName,
    ScenarioRouter,
    ScenarioRouterBuilder,
    Sender,
    SenderPtr,
};

/// Call counters shared between a fake factory and the test body.
#[derive(Default)]
struct Calls {
    // ---
    queue_producers: AtomicUsize,
    queue_consumers: AtomicUsize,
    topic_publishers: AtomicUsize,
    topic_subscribers: AtomicUsize,
    closes: AtomicUsize,
}

struct FakeFactory {
    // ---
    label: &'static str,
    names: Vec<ScenarioName>,
    calls: Arc<Calls>,
    close_log: Arc<Mutex<Vec<&'static str>>>,
    fail_close: bool,
}

impl FakeFactory {
    // ---
    fn create(
        label: &'static str,
        names: &[&str],
        close_log: Arc<Mutex<Vec<&'static str>>>,
    ) -> (FactoryPtr, Arc<Calls>) {
        Self::create_with(label, names, close_log, false)
    }

    fn create_with(
        label: &'static str,
        names: &[&str],
        close_log: Arc<Mutex<Vec<&'static str>>>,
        fail_close: bool,
    ) -> (FactoryPtr, Arc<Calls>) {
        // ---
        let calls = Arc::new(Calls::default());

        let factory = Arc::new(FakeFactory {
            label,
            names: names.iter().map(|n| ScenarioName::from(*n)).collect(),
            calls: calls.clone(),
            close_log,
            fail_close,
        });

        (factory, calls)
    }
}

struct FakeSender {
    scenario: ScenarioName,
}

#[async_trait]
impl Sender for FakeSender {
    // ---
    fn scenario(&self) -> &ScenarioName {
        &self.scenario
    }

    async fn send(&self, _msg: Message) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

struct FakeReceiver {
    scenario: ScenarioName,
}

#[async_trait]
impl Receiver for FakeReceiver {
    // ---
    fn scenario(&self) -> &ScenarioName {
        &self.scenario
    }

    async fn recv(&mut self) -> Result<Option<Message>> {
        Ok(None)
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ScenarioFactory for FakeFactory {
    // ---
    fn supports_scenario(&self, name: &ScenarioName) -> bool {
        self.names.contains(name)
    }

    async fn create_queue_producer(&self, name: &ScenarioName) -> Result<SenderPtr> {
        // ---
        self.calls.queue_producers.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeSender {
            scenario: name.clone(),
        }))
    }

    async fn create_queue_consumer(&self, name: &ScenarioName) -> Result<ReceiverPtr> {
        // ---
        self.calls.queue_consumers.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeReceiver {
            scenario: name.clone(),
        }))
    }

    async fn create_topic_publisher(&self, name: &ScenarioName) -> Result<SenderPtr> {
        // ---
        self.calls.topic_publishers.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeSender {
            scenario: name.clone(),
        }))
    }

    async fn create_topic_subscriber(&self, name: &ScenarioName) -> Result<ReceiverPtr> {
        // ---
        self.calls.topic_subscribers.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeReceiver {
            scenario: name.clone(),
        }))
    }

    async fn close(&self) -> Result<()> {
        // ---
        self.calls.closes.fetch_add(1, Ordering::SeqCst);
        self.close_log.lock().unwrap().push(self.label);

        if self.fail_close {
            Err(Error::Factory(format!("{} refused to close", self.label)))
        } else {
            Ok(())
        }
    }
}

fn close_log() -> Arc<Mutex<Vec<&'static str>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[tokio::test]
async fn unique_match_delegates_every_operation() {
    // ---
    let log = close_log();
    let (a, a_calls) = FakeFactory::create("a", &["orders"], log.clone());
    let (b, b_calls) = FakeFactory::create("b", &["payments"], log);

    let router = ScenarioRouter::new(vec![a, b]);
    let orders = ScenarioName::from("orders");

    let producer = router.create_queue_producer(&orders).await.unwrap();
    assert_eq!(producer.scenario(), &orders);

    let consumer = router.create_queue_consumer(&orders).await.unwrap();
    assert_eq!(consumer.scenario(), &orders);

    let publisher = router.create_topic_publisher(&orders).await.unwrap();
    assert_eq!(publisher.scenario(), &orders);

    let subscriber = router.create_topic_subscriber(&orders).await.unwrap();
    assert_eq!(subscriber.scenario(), &orders);

    // Every call landed on the supporting factory, none on the other.
    assert_eq!(a_calls.queue_producers.load(Ordering::SeqCst), 1);
    assert_eq!(a_calls.queue_consumers.load(Ordering::SeqCst), 1);
    assert_eq!(a_calls.topic_publishers.load(Ordering::SeqCst), 1);
    assert_eq!(a_calls.topic_subscribers.load(Ordering::SeqCst), 1);

    assert_eq!(b_calls.queue_producers.load(Ordering::SeqCst), 0);
    assert_eq!(b_calls.queue_consumers.load(Ordering::SeqCst), 0);
    assert_eq!(b_calls.topic_publishers.load(Ordering::SeqCst), 0);
    assert_eq!(b_calls.topic_subscribers.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn zero_matches_fail_with_count_zero() {
    // ---
    let log = close_log();
    let (a, _) = FakeFactory::create("a", &["orders"], log.clone());
    let (b, _) = FakeFactory::create("b", &["payments"], log);

    let router = ScenarioRouter::new(vec![a, b]);
    let shipping = ScenarioName::from("shipping");

    let err = router.create_queue_producer(&shipping).await.unwrap_err();
    match err {
        Error::NoUniqueScenario { scenario, matches } => {
            assert_eq!(scenario.as_str(), "shipping");
            assert_eq!(matches, 0);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(router.create_queue_consumer(&shipping).await.is_err());
    assert!(router.create_topic_publisher(&shipping).await.is_err());
    assert!(router.create_topic_subscriber(&shipping).await.is_err());
}

#[tokio::test]
async fn multiple_matches_fail_and_hide_the_scenario() {
    // ---
    let log = close_log();
    let (a, a_calls) = FakeFactory::create("a", &["orders"], log.clone());
    let (b, _) = FakeFactory::create("b", &["payments"], log.clone());
    let (c, c_calls) = FakeFactory::create("c", &["orders"], log);

    let router = ScenarioRouter::new(vec![a, b, c]);
    let orders = ScenarioName::from("orders");

    // Resolution fails loudly rather than silently picking a factory.
    let err = router.create_queue_producer(&orders).await.unwrap_err();
    match err {
        Error::NoUniqueScenario { scenario, matches } => {
            assert_eq!(scenario.as_str(), "orders");
            assert_eq!(matches, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Uniqueness-as-existence: a doubly claimed name is reported absent.
    assert!(!router.has_scenario(&orders));

    assert_eq!(a_calls.queue_producers.load(Ordering::SeqCst), 0);
    assert_eq!(c_calls.queue_producers.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn has_scenario_is_true_only_for_unique_names() {
    // ---
    let log = close_log();
    let (a, _) = FakeFactory::create("a", &["orders"], log.clone());
    let (b, _) = FakeFactory::create("b", &["payments"], log);

    let router = ScenarioRouter::new(vec![a, b]);

    assert!(router.has_scenario(&ScenarioName::from("orders")));
    assert!(router.has_scenario(&ScenarioName::from("payments")));
    assert!(!router.has_scenario(&ScenarioName::from("shipping")));
}

#[tokio::test]
async fn empty_router_resolves_nothing() {
    // ---
    let router = ScenarioRouter::new(Vec::new());
    let orders = ScenarioName::from("orders");

    assert!(!router.has_scenario(&orders));

    let err = router.create_queue_producer(&orders).await.unwrap_err();
    match err {
        Error::NoUniqueScenario { matches, .. } => assert_eq!(matches, 0),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn builder_rejects_an_empty_configuration() {
    // ---
    let err = ScenarioRouterBuilder::new().build().unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[tokio::test]
async fn builder_preserves_insertion_order() {
    // ---
    let log = close_log();
    let (a, _) = FakeFactory::create("a", &["orders"], log.clone());
    let (b, _) = FakeFactory::create("b", &["payments"], log.clone());

    let router = ScenarioRouterBuilder::new()
        .factories(vec![a, b])
        .build()
        .unwrap();

    assert_eq!(router.factories().len(), 2);

    router.close().await.unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
}

#[tokio::test]
async fn close_releases_every_factory_in_order_without_prior_operations() {
    // ---
    let log = close_log();
    let (a, a_calls) = FakeFactory::create("a", &["orders"], log.clone());
    let (b, b_calls) = FakeFactory::create("b", &["payments"], log.clone());
    let (c, c_calls) = FakeFactory::create("c", &["shipping"], log.clone());

    let router = ScenarioRouter::new(vec![a, b, c]);

    // No creation operation ran; close still reaches every factory.
    router.close().await.unwrap();

    assert_eq!(a_calls.closes.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.closes.load(Ordering::SeqCst), 1);
    assert_eq!(c_calls.closes.load(Ordering::SeqCst), 1);
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn close_continues_past_a_failing_factory() {
    // ---
    let log = close_log();
    let (a, a_calls) = FakeFactory::create("a", &["orders"], log.clone());
    let (b, b_calls) = FakeFactory::create_with("b", &["payments"], log.clone(), true);
    let (c, c_calls) = FakeFactory::create("c", &["shipping"], log.clone());

    let router = ScenarioRouter::new(vec![a, b, c]);

    let err = router.close().await.unwrap_err();
    assert!(matches!(err, Error::Factory(_)));

    // The failure in the middle did not stop the pass.
    assert_eq!(a_calls.closes.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.closes.load(Ordering::SeqCst), 1);
    assert_eq!(c_calls.closes.load(Ordering::SeqCst), 1);
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn routers_nest_as_factories() {
    // ---
    let log = close_log();
    let (a, a_calls) = FakeFactory::create("a", &["orders"], log.clone());
    let (b, _) = FakeFactory::create("b", &["payments"], log);

    let inner = ScenarioRouter::new(vec![a]);
    let outer = ScenarioRouter::new(vec![Arc::new(inner) as FactoryPtr, b]);

    let orders = ScenarioName::from("orders");
    assert!(outer.has_scenario(&orders));

    let producer = outer.create_queue_producer(&orders).await.unwrap();
    assert_eq!(producer.scenario(), &orders);
    assert_eq!(a_calls.queue_producers.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn nested_ambiguity_propagates_as_absence() {
    // ---
    // The inner router holds two factories claiming "orders"; as a nested
    // factory it must not claim the name, so the outer router resolves
    // "orders" to the plain factory beside it.
    let log = close_log();
    let (a, _) = FakeFactory::create("a", &["orders"], log.clone());
    let (b, _) = FakeFactory::create("b", &["orders"], log.clone());
    let (d, d_calls) = FakeFactory::create("d", &["orders"], log);

    let inner = ScenarioRouter::new(vec![a, b]);
    let outer = ScenarioRouter::new(vec![Arc::new(inner) as FactoryPtr, d]);

    let orders = ScenarioName::from("orders");
    assert!(outer.has_scenario(&orders));

    outer.create_queue_producer(&orders).await.unwrap();
    assert_eq!(d_calls.queue_producers.load(Ordering::SeqCst), 1);
}

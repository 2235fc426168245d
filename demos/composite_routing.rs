use bytes::Bytes;
use mom_scenarios::{
    // ---
    create_memory_factory,
    FactoryConfig,
    Message,
    Result,
    ScenarioName,
    ScenarioRouterBuilder,
};

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    env_logger::init();

    let orders = create_memory_factory(FactoryConfig::new("orders-mem", ["orders"])).await?;
    let billing =
        create_memory_factory(FactoryConfig::new("billing-mem", ["invoices", "receipts"])).await?;

    let router = ScenarioRouterBuilder::new()
        .factory(orders)
        .factory(billing)
        .build()?;

    // Queue: one producer, one consumer, routed to the orders factory.
    let name = ScenarioName::from("orders");

    let mut consumer = router.create_queue_consumer(&name).await?;
    let producer = router.create_queue_producer(&name).await?;

    producer
        .send(Message::new(Bytes::from_static(b"order #1: 2x espresso")))
        .await?;

    if let Some(msg) = consumer.recv().await? {
        println!("consumed from '{}': {:?}", name, msg.payload);
    }

    // Topic: two subscribers, routed to the billing factory, fan-out.
    let invoices = ScenarioName::from("invoices");

    let mut audit = router.create_topic_subscriber(&invoices).await?;
    let mut archive = router.create_topic_subscriber(&invoices).await?;
    let publisher = router.create_topic_publisher(&invoices).await?;

    let invoice = serde_json::json!({ "invoice": 7, "total": 9.5 }).to_string();
    publisher
        .send(Message::with_content_type(
            Bytes::from(invoice),
            "application/json",
        ))
        .await?;

    println!("audit saw:   {:?}", audit.recv().await?.map(|m| m.payload));
    println!("archive saw: {:?}", archive.recv().await?.map(|m| m.payload));

    router.close().await?;
    Ok(())
}

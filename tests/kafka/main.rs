//! Kafka consume/produce E2E tests
//!
//! These tests need a running broker at `kafka:9092` (and, for the Avro test,
//! a schema registry at `http://schema-registry:8081`). They are ignored by
//! default; run them with `cargo test --test kafka -- --ignored`.

mod avro_round_trip;
mod consume_scenarios;
mod produce_then_consume;

use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::ClientConfig;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Kafka broker address for testing
pub const KAFKA_BROKER: &str = "kafka:9092";

/// Schema registry address for testing
pub const SCHEMA_REGISTRY_URL: &str = "http://schema-registry:8081";

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("kafka_consume=debug,kafka_produce=debug,schema_registry_client=debug")
        .try_init()
        .ok();
}

/// Unique suffix so that test runs do not share topics or consumer groups.
pub fn test_id() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
}

pub async fn create_topic(topic: &str, partitions: i32) -> Result<(), Box<dyn std::error::Error>> {
    let admin: AdminClient<DefaultClientContext> = ClientConfig::new()
        .set("bootstrap.servers", KAFKA_BROKER)
        .create()?;
    let new_topic = NewTopic::new(topic, partitions, TopicReplication::Fixed(1));
    let opts = AdminOptions::new().operation_timeout(Some(Duration::from_secs(5)));

    for result in admin.create_topics(&[new_topic], &opts).await? {
        if let Err((name, err)) = result {
            if !err.to_string().contains("already exists") {
                return Err(format!("Failed to create topic {name}: {err}").into());
            }
        }
    }

    // Give Kafka a moment to propagate topic metadata
    tokio::time::sleep(Duration::from_millis(500)).await;
    Ok(())
}

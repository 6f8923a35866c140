use crate::{create_topic, init_tracing, test_id, KAFKA_BROKER, SCHEMA_REGISTRY_URL};
use kafka_tasks::consume::{consume, ConsumeInput};
use kafka_tasks::options::{
    Acks, AutoOffsetReset, ConsumerOptions, ProducerOptions, SchemaRegistryOptions, SocketOptions,
};
use kafka_tasks::produce::{produce, ProduceInput};
use tokio_util::sync::CancellationToken;

const ORDER_SCHEMA: &str = r#"{
    "type": "record",
    "name": "Order",
    "fields": [
        {"name": "id", "type": "long"},
        {"name": "customer", "type": "string"},
        {"name": "status", "type": {"type": "enum", "name": "Status", "symbols": ["NEW", "PAID"]}},
        {"name": "tags", "type": {"type": "array", "items": "string"}},
        {"name": "note", "type": ["null", "string"], "default": null}
    ]
}"#;

#[tokio::test]
#[ignore = "requires a Kafka broker and a schema registry"]
async fn test_avro_produce_then_consume() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let id = test_id();
    let topic = format!("tasks-avro-{id}");
    create_topic(&topic, 1).await?;

    let registry = SchemaRegistryOptions {
        url: SCHEMA_REGISTRY_URL.to_string(),
        record_schema_json: ORDER_SCHEMA.to_string(),
        records: r#"{"id": "42", "customer": "alice", "status": "PAID", "tags": ["a", "b"]}"#
            .to_string(),
        ..Default::default()
    };
    let input = ProduceInput {
        brokers: KAFKA_BROKER.to_string(),
        topic: topic.clone(),
        ..Default::default()
    };
    let produced = produce(
        &input,
        &ProducerOptions {
            acks: Acks::All,
            ..Default::default()
        },
        &SocketOptions::default(),
        None,
        None,
        Some(&registry),
        CancellationToken::new(),
    )
    .await?;
    assert!(produced.success);

    let input = ConsumeInput {
        brokers: KAFKA_BROKER.to_string(),
        topic,
        message_count: 1,
        timeout_ms: 10_000,
        ..Default::default()
    };
    let options = ConsumerOptions {
        auto_offset_reset: AutoOffsetReset::Earliest,
        group_id: format!("tasks-avro-group-{id}"),
        ..Default::default()
    };
    let consumed = consume(
        &input,
        &options,
        &SocketOptions::default(),
        None,
        None,
        Some(&SchemaRegistryOptions {
            url: SCHEMA_REGISTRY_URL.to_string(),
            ..Default::default()
        }),
        CancellationToken::new(),
    )
    .await?;

    assert_eq!(consumed.messages.len(), 1);
    let value: serde_json::Value =
        serde_json::from_str(consumed.messages[0].value.as_deref().unwrap_or("null"))?;
    assert_eq!(
        value,
        serde_json::json!({
            "id": 42,
            "customer": "alice",
            "status": "PAID",
            "tags": ["a", "b"],
            "note": null
        })
    );
    Ok(())
}

use crate::{create_topic, init_tracing, test_id, KAFKA_BROKER};
use kafka_tasks::consume::{consume, ConsumeInput};
use kafka_tasks::options::{
    Acks, AutoOffsetReset, ConsumerOptions, ProducerOptions, SocketOptions,
};
use kafka_tasks::produce::{produce, PersistenceStatus, ProduceInput};
use tokio_util::sync::CancellationToken;

#[tokio::test]
#[ignore = "requires a Kafka broker"]
async fn test_produce_then_consume() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let id = test_id();
    let topic = format!("tasks-basic-{id}");
    create_topic(&topic, 1).await?;

    let producer_options = ProducerOptions {
        acks: Acks::All,
        ..Default::default()
    };
    for i in 0..3 {
        let input = ProduceInput {
            brokers: KAFKA_BROKER.to_string(),
            topic: topic.clone(),
            key: Some(format!("key-{i}")),
            message: Some(format!("message {i}")),
            ..Default::default()
        };
        let result = produce(
            &input,
            &producer_options,
            &SocketOptions::default(),
            None,
            None,
            None,
            CancellationToken::new(),
        )
        .await?;

        assert!(result.success);
        assert_eq!(result.status, PersistenceStatus::Persisted);
        let location = result.topic_partition_offset.expect("delivered location");
        assert_eq!(location.topic, topic);
        assert_eq!(location.offset, i);
    }

    let input = ConsumeInput {
        brokers: KAFKA_BROKER.to_string(),
        topic: topic.clone(),
        message_count: 2,
        timeout_ms: 10_000,
        ..Default::default()
    };
    let options = ConsumerOptions {
        auto_offset_reset: AutoOffsetReset::Earliest,
        group_id: format!("tasks-basic-group-{id}"),
        ..Default::default()
    };
    let result = consume(
        &input,
        &options,
        &SocketOptions::default(),
        None,
        None,
        None,
        CancellationToken::new(),
    )
    .await?;

    assert!(result.success);
    assert_eq!(result.messages.len(), 2);
    assert_eq!(result.messages[0].key.as_deref(), Some("key-0"));
    // Plain produce sends the message as a JSON string literal
    assert_eq!(result.messages[0].value.as_deref(), Some("\"message 0\""));
    assert_eq!(result.messages[1].value.as_deref(), Some("\"message 1\""));
    Ok(())
}

#[tokio::test]
#[ignore = "requires a Kafka broker"]
async fn test_consume_empty_partition_times_out() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let id = test_id();
    let topic = format!("tasks-empty-{id}");
    create_topic(&topic, 1).await?;

    let input = ConsumeInput {
        brokers: KAFKA_BROKER.to_string(),
        topic,
        partition: 0,
        message_count: 5,
        timeout_ms: 2_000,
        ..Default::default()
    };
    let options = ConsumerOptions {
        group_id: format!("tasks-empty-group-{id}"),
        ..Default::default()
    };
    let result = consume(
        &input,
        &options,
        &SocketOptions::default(),
        None,
        None,
        None,
        CancellationToken::new(),
    )
    .await?;

    assert!(result.success);
    assert!(result.messages.is_empty());
    Ok(())
}

#[tokio::test]
#[ignore = "requires a Kafka broker"]
async fn test_produce_without_acks_is_possibly_persisted() -> Result<(), Box<dyn std::error::Error>>
{
    init_tracing();

    let topic = format!("tasks-acks-{}", test_id());
    create_topic(&topic, 2).await?;

    let input = ProduceInput {
        brokers: KAFKA_BROKER.to_string(),
        topic,
        partition: 1,
        message: None,
        ..Default::default()
    };
    let result = produce(
        &input,
        &ProducerOptions::default(),
        &SocketOptions::default(),
        None,
        None,
        None,
        CancellationToken::new(),
    )
    .await?;

    assert_eq!(result.status, PersistenceStatus::PossiblyPersisted);
    let location = result.topic_partition_offset.expect("delivered location");
    assert_eq!(location.partition, 1);
    // No acknowledgement, so no offset
    assert_eq!(location.offset, -1001);
    assert!(!result.timestamp.is_empty());
    Ok(())
}

#[tokio::test]
#[ignore = "requires a Kafka broker"]
async fn test_failed_transactional_produce_is_aborted() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let id = test_id();
    let topic = format!("tasks-tx-{id}");
    create_topic(&topic, 1).await?;

    let options = ProducerOptions {
        acks: Acks::All,
        enable_idempotence: true,
        max_in_flight: 5,
        message_timeout_ms: 10_000,
        transactional_id: format!("tasks-tx-{id}"),
        transaction_timeout_ms: 10_000,
        ..Default::default()
    };

    // The topic has a single partition, so the delivery fails inside the
    // transaction and the transaction must be rolled back.
    let failing = ProduceInput {
        brokers: KAFKA_BROKER.to_string(),
        topic: topic.clone(),
        partition: 7,
        message: Some("lost".to_string()),
        ..Default::default()
    };
    let err = produce(
        &failing,
        &options,
        &SocketOptions::default(),
        None,
        None,
        None,
        CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().starts_with("transport: "), "{err}");

    // Same transactional id: succeeds once the earlier transaction is gone.
    let input = ProduceInput {
        brokers: KAFKA_BROKER.to_string(),
        topic: topic.clone(),
        message: Some("kept".to_string()),
        ..Default::default()
    };
    let result = produce(
        &input,
        &options,
        &SocketOptions::default(),
        None,
        None,
        None,
        CancellationToken::new(),
    )
    .await?;
    assert!(result.success);
    assert_eq!(result.status, PersistenceStatus::Persisted);
    Ok(())
}

use crate::{create_topic, init_tracing, test_id, KAFKA_BROKER};
use kafka_tasks::consume::{consume, ConsumeError, ConsumeInput};
use kafka_tasks::options::{ConsumerOptions, SocketOptions};
use tokio_util::sync::CancellationToken;

#[tokio::test]
#[ignore = "requires a Kafka broker"]
async fn test_consume_missing_topic_names_it() {
    init_tracing();

    let id = test_id();
    let topic = format!("tasks-missing-{id}");
    let input = ConsumeInput {
        brokers: KAFKA_BROKER.to_string(),
        topic: topic.clone(),
        message_count: 1,
        timeout_ms: 15_000,
        ..Default::default()
    };
    let options = ConsumerOptions {
        group_id: format!("tasks-missing-group-{id}"),
        ..Default::default()
    };
    let err = consume(
        &input,
        &options,
        &SocketOptions::default(),
        None,
        None,
        None,
        CancellationToken::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ConsumeError::Transport { .. }), "{err}");
    assert!(err.to_string().contains(&topic), "{err}");
}

#[tokio::test]
#[ignore = "requires a Kafka broker"]
async fn test_unlimited_consume_of_empty_topic_returns_nothing(
) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let id = test_id();
    let topic = format!("tasks-unlimited-{id}");
    create_topic(&topic, 1).await?;

    let input = ConsumeInput {
        brokers: KAFKA_BROKER.to_string(),
        topic,
        message_count: 0,
        timeout_ms: 1_500,
        ..Default::default()
    };
    let options = ConsumerOptions {
        group_id: format!("tasks-unlimited-group-{id}"),
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

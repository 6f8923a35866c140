use crate::error::{ConsumeError, Result};
use crate::message::{ConsumeInput, ConsumeResult, Message};
use crate::session::ConsumerSession;
use kafka_task_options::{
    base_config, log_config, ApplyConfig, ConsumerOptions, SaslOptions, SchemaRegistryOptions,
    SocketOptions, SslOptions, TaskClientContext,
};
use rdkafka::config::ClientConfig;
use rdkafka::consumer::StreamConsumer;
use rdkafka::message::{Message as _, OwnedMessage};
use schema_registry_client::AvroDeserializer;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const TASK: &str = "consume";

/// Builds the consumer configuration from the option groups. Absent groups
/// contribute nothing.
pub fn consumer_config(
    input: &ConsumeInput,
    options: &ConsumerOptions,
    socket: &SocketOptions,
    sasl: Option<&SaslOptions>,
    ssl: Option<&SslOptions>,
) -> ClientConfig {
    let mut config = base_config(&input.brokers, input.security_protocol);
    options.apply(&mut config);
    socket.apply(&mut config);
    if let Some(sasl) = sasl {
        sasl.apply(&mut config);
    }
    if let Some(ssl) = ssl {
        ssl.apply(&mut config);
    }
    config
}

/// Consumes messages from `input.topic`
///
/// Pulls until `input.message_count` messages have arrived (0 means no limit)
/// or a single pull waits longer than `input.timeout_ms`. Running out of
/// messages is not an error. Cancellation is checked before every pull and
/// also interrupts a pull in progress.
///
/// With schema registry options, message values are decoded from
/// schema-registry framed Avro and returned as JSON text.
pub async fn consume(
    input: &ConsumeInput,
    options: &ConsumerOptions,
    socket: &SocketOptions,
    sasl: Option<&SaslOptions>,
    ssl: Option<&SslOptions>,
    schema_registry: Option<&SchemaRegistryOptions>,
    cancel: CancellationToken,
) -> Result<ConsumeResult> {
    options.validate()?;

    let config = consumer_config(input, options, socket, sasl, ssl);
    log_config(TASK, &config);

    let deserializer = schema_registry
        .map(|registry| AvroDeserializer::from_options(registry, sasl))
        .transpose()?;

    let consumer: StreamConsumer<TaskClientContext> = config
        .create_with_context(TaskClientContext::new(TASK))
        .map_err(ConsumeError::Client)?;
    let session =
        ConsumerSession::open(consumer, &input.topic, input.partition).map_err(|source| {
            ConsumeError::Transport {
                topic: input.topic.clone(),
                source,
            }
        })?;

    info!(
        topic = %input.topic,
        message_count = input.message_count,
        timeout_ms = input.timeout_ms,
        "Consuming"
    );

    let timeout = (input.timeout_ms > 0).then(|| Duration::from_millis(input.timeout_ms));
    let mut messages = Vec::new();

    while input.message_count == 0 || messages.len() < input.message_count {
        if cancel.is_cancelled() {
            return Err(ConsumeError::Cancelled);
        }

        let received = tokio::select! {
            _ = cancel.cancelled() => return Err(ConsumeError::Cancelled),
            received = session.recv(timeout) => received,
        };
        let received = received.map_err(|source| ConsumeError::Transport {
            topic: input.topic.clone(),
            source,
        })?;

        let Some(message) = received else {
            debug!(topic = %input.topic, "No message before timeout");
            break;
        };
        messages.push(to_message(&message, deserializer.as_ref(), &input.topic).await?);
    }

    info!(topic = %input.topic, count = messages.len(), "Consume finished");

    Ok(ConsumeResult {
        success: true,
        messages,
    })
}

async fn to_message(
    message: &OwnedMessage,
    deserializer: Option<&AvroDeserializer>,
    topic: &str,
) -> Result<Message> {
    let key = message
        .key()
        .map(|key| String::from_utf8_lossy(key).into_owned());

    let value = match (message.payload(), deserializer) {
        (None, _) => None,
        (Some(payload), None) => Some(String::from_utf8_lossy(payload).into_owned()),
        (Some(payload), Some(deserializer)) => Some(
            deserializer
                .deserialize_to_json(payload)
                .await
                .map_err(|source| ConsumeError::Decode {
                    topic: topic.to_string(),
                    source,
                })?,
        ),
    };

    Ok(Message { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kafka_task_options::{AutoOffsetReset, SaslMechanism, SecurityProtocol};
    use rdkafka::message::{OwnedHeaders, Timestamp};

    fn input() -> ConsumeInput {
        ConsumeInput {
            brokers: "127.0.0.1:1".to_string(),
            topic: "tasks-test".to_string(),
            timeout_ms: 100,
            ..Default::default()
        }
    }

    #[test]
    fn test_consumer_config_without_optional_groups() {
        let config = consumer_config(
            &input(),
            &ConsumerOptions::default(),
            &SocketOptions::default(),
            None,
            None,
        );

        assert_eq!(config.get("bootstrap.servers"), Some("127.0.0.1:1"));
        assert_eq!(config.get("security.protocol"), Some("plaintext"));
        assert_eq!(config.get("group.id"), Some("kafka-tasks"));
        assert_eq!(config.get("socket.timeout.ms"), Some("60000"));
        assert_eq!(config.get("sasl.mechanism"), None);
        assert_eq!(config.get("sasl.kerberos.service.name"), None);
        assert_eq!(config.get("enable.ssl.certificate.verification"), None);
    }

    #[test]
    fn test_consumer_config_with_sasl_and_ssl() {
        let input = ConsumeInput {
            security_protocol: SecurityProtocol::SaslSsl,
            ..input()
        };
        let options = ConsumerOptions {
            auto_offset_reset: AutoOffsetReset::Earliest,
            ..Default::default()
        };
        let sasl = SaslOptions {
            sasl_mechanism: SaslMechanism::Plain,
            sasl_username: "user".to_string(),
            sasl_password: "pass".to_string(),
            ..Default::default()
        };
        let ssl = SslOptions {
            ssl_ca_location: "/etc/ssl/ca.pem".to_string(),
            ..Default::default()
        };
        let config = consumer_config(
            &input,
            &options,
            &SocketOptions::default(),
            Some(&sasl),
            Some(&ssl),
        );

        assert_eq!(config.get("security.protocol"), Some("sasl_ssl"));
        assert_eq!(config.get("auto.offset.reset"), Some("earliest"));
        assert_eq!(config.get("sasl.mechanism"), Some("PLAIN"));
        assert_eq!(config.get("sasl.username"), Some("user"));
        assert_eq!(config.get("ssl.ca.location"), Some("/etc/ssl/ca.pem"));
    }

    #[tokio::test]
    async fn test_poll_interval_checked_before_connecting() {
        let options = ConsumerOptions {
            max_poll_interval_ms: 1000,
            session_timeout_ms: 45000,
            ..Default::default()
        };
        let err = consume(
            &input(),
            &options,
            &SocketOptions::default(),
            None,
            None,
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ConsumeError::Config(_)));
        assert!(err
            .to_string()
            .contains("max_poll_interval_ms must be >= session_timeout_ms"));
    }

    #[tokio::test]
    async fn test_out_of_range_value_reported_by_client() {
        let options = ConsumerOptions {
            fetch_wait_max_ms: -5,
            ..Default::default()
        };
        let err = consume(
            &input(),
            &options,
            &SocketOptions::default(),
            None,
            None,
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ConsumeError::Client(_)));
        assert!(err.to_string().contains("fetch.wait.max.ms"));
    }

    #[tokio::test]
    async fn test_cancelled_before_first_pull() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = consume(
            &input(),
            &ConsumerOptions::default(),
            &SocketOptions::default(),
            None,
            None,
            None,
            cancel,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ConsumeError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pull_without_timeout() {
        let cancel = CancellationToken::new();
        let input = ConsumeInput {
            timeout_ms: 0,
            ..input()
        };

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            trigger.cancel();
        });

        let err = consume(
            &input,
            &ConsumerOptions::default(),
            &SocketOptions::default(),
            None,
            None,
            None,
            cancel,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ConsumeError::Cancelled));
    }

    #[tokio::test]
    async fn test_to_message_lossy_utf8() {
        let message = OwnedMessage::new(
            Some(b"value \xF0\x90\x80".to_vec()),
            Some(b"key-1".to_vec()),
            "tasks-test".to_string(),
            Timestamp::NotAvailable,
            0,
            7,
            None::<OwnedHeaders>,
        );
        let converted = to_message(&message, None, "tasks-test").await.unwrap();
        assert_eq!(converted.key.as_deref(), Some("key-1"));
        assert_eq!(converted.value.as_deref(), Some("value \u{FFFD}"));

        let empty = OwnedMessage::new(
            None,
            None,
            "tasks-test".to_string(),
            Timestamp::NotAvailable,
            0,
            8,
            None::<OwnedHeaders>,
        );
        let converted = to_message(&empty, None, "tasks-test").await.unwrap();
        assert_eq!(converted, Message { key: None, value: None });
    }
}

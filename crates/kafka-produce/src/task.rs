use crate::delivery::{Delivered, DeliveryContext, PersistenceStatus};
use crate::error::{ProduceError, Result};
use crate::payload::{avro_payload, avro_record, json_payload};
use crate::result::ProduceResult;
use kafka_task_options::mapper::resolve;
use kafka_task_options::{
    base_config, log_config, ApplyConfig, ProducerOptions, SaslOptions, SchemaRegistryOptions,
    SecurityProtocol, SocketOptions, SslOptions,
};
use rdkafka::config::ClientConfig;
use rdkafka::producer::{BaseRecord, Producer, ThreadedProducer};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const TASK: &str = "produce";

type TaskProducer = ThreadedProducer<DeliveryContext>;

/// Connection and message for one produce call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProduceInput {
    /// Kafka brokers (comma-separated list)
    pub brokers: String,
    pub topic: String,
    /// Target partition. Negative values leave the choice to the partitioner.
    pub partition: i32,
    pub security_protocol: SecurityProtocol,
    pub key: Option<String>,
    /// Message text. Sent as a JSON string literal (`null` when absent).
    pub message: Option<String>,
}

impl Default for ProduceInput {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            topic: String::new(),
            partition: -1,
            security_protocol: SecurityProtocol::default(),
            key: None,
            message: None,
        }
    }
}

/// Builds the producer configuration from the option groups. Absent groups
/// contribute nothing.
pub fn producer_config(
    input: &ProduceInput,
    options: &ProducerOptions,
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

/// Produces a single message to `input.topic` and waits for its delivery
/// report.
///
/// With schema registry options the payload is an Avro record built from the
/// options' schema and records JSON, framed for the registry. Otherwise the
/// payload is `input.message` as JSON text. With a transactional id the
/// message is sent inside its own transaction.
pub async fn produce(
    input: &ProduceInput,
    options: &ProducerOptions,
    socket: &SocketOptions,
    sasl: Option<&SaslOptions>,
    ssl: Option<&SslOptions>,
    schema_registry: Option<&SchemaRegistryOptions>,
    cancel: CancellationToken,
) -> Result<ProduceResult> {
    let record = match schema_registry {
        Some(registry) => Some((registry, avro_record(registry).await?)),
        None => None,
    };

    let config = producer_config(input, options, socket, sasl, ssl);
    log_config(TASK, &config);

    let producer: Arc<TaskProducer> = Arc::new(
        config
            .create_with_context(DeliveryContext::new(TASK))
            .map_err(ProduceError::Client)?,
    );

    let payload = match &record {
        Some((registry, record)) => avro_payload(&input.topic, record, registry, sasl).await?,
        None => json_payload(input.message.as_deref())?,
    };

    let transactional = !resolve(&options.transactional_id, "").is_empty();
    let transaction_timeout = Duration::from_millis(options.transaction_timeout_ms.max(0) as u64);
    if transactional {
        blocking(&producer, move |p| {
            p.init_transactions(transaction_timeout)?;
            p.begin_transaction()
        })
        .await?;
    }

    let delivered = match deliver(&producer, input, &payload, &cancel).await {
        Ok(delivered) => delivered,
        Err(err) => {
            if transactional {
                abort_transaction(&producer, transaction_timeout).await;
            }
            return Err(err);
        }
    };

    if transactional {
        if let Err(err) =
            blocking(&producer, move |p| p.commit_transaction(transaction_timeout)).await
        {
            abort_transaction(&producer, transaction_timeout).await;
            return Err(err);
        }
        debug!(topic = %input.topic, "Transaction committed");
    }

    let result = ProduceResult::delivered(delivered, PersistenceStatus::delivered(options.acks));
    info!(
        topic = %input.topic,
        status = %result.status,
        timestamp = %result.timestamp,
        "Produce finished"
    );
    Ok(result)
}

/// Sends the message and waits for its delivery report or cancellation.
async fn deliver(
    producer: &TaskProducer,
    input: &ProduceInput,
    payload: &[u8],
    cancel: &CancellationToken,
) -> Result<Delivered> {
    let (reply, delivery) = oneshot::channel();
    // `key("")` fixes the key type; the message may still have no key.
    let mut record = BaseRecord::with_opaque_to(&input.topic, Box::new(reply))
        .payload(payload)
        .key("");
    record.key = input.key.as_deref();
    if input.partition >= 0 {
        record = record.partition(input.partition);
    }

    info!(
        topic = %input.topic,
        partition = input.partition,
        bytes = payload.len(),
        "Producing message"
    );
    producer
        .send(record)
        .map_err(|(error, _)| ProduceError::Transport(error))?;

    tokio::select! {
        _ = cancel.cancelled() => Err(ProduceError::Cancelled),
        outcome = delivery => outcome
            .map_err(|_| ProduceError::DeliveryLost)?
            .map_err(ProduceError::Transport),
    }
}

/// Rolls back an open transaction. A failed abort is logged; the error that
/// led to it is what the caller reports.
async fn abort_transaction(producer: &Arc<TaskProducer>, timeout: Duration) {
    match blocking(producer, move |p| p.abort_transaction(timeout)).await {
        Ok(()) => debug!("Transaction aborted"),
        Err(e) => warn!("Failed to abort transaction: {e}"),
    }
}

/// Runs a blocking producer call off the async workers.
async fn blocking<F>(producer: &Arc<TaskProducer>, call: F) -> Result<()>
where
    F: FnOnce(&TaskProducer) -> rdkafka::error::KafkaResult<()> + Send + 'static,
{
    let producer = Arc::clone(producer);
    tokio::task::spawn_blocking(move || call(&producer))
        .await?
        .map_err(ProduceError::Transport)
}

use kafka_task_options::{Acks, TaskClientContext};
use rdkafka::client::ClientContext;
use rdkafka::config::RDKafkaLogLevel;
use rdkafka::error::KafkaError;
use rdkafka::message::Message as _;
use rdkafka::producer::{DeliveryResult, ProducerContext};
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::debug;

/// How sure we are that a produced message reached the broker's log.
///
/// The status of a delivered message follows the configured acks, not a
/// per-message report: `acks = 0` gives `PossiblyPersisted` (the broker never
/// answers, and the reported offset is librdkafka's invalid offset, -1001),
/// `acks = 1` or `all` gives `Persisted`. A message that fails delivery is
/// returned as a transport error, so `NotPersisted` never appears in a
/// successful result; it is kept so the result's status set stays complete
/// for callers that match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PersistenceStatus {
    NotPersisted,
    PossiblyPersisted,
    Persisted,
}

impl PersistenceStatus {
    /// Status of a successful delivery. Without acknowledgements the broker
    /// never confirms the write.
    pub fn delivered(acks: Acks) -> Self {
        match acks {
            Acks::None => PersistenceStatus::PossiblyPersisted,
            Acks::Leader | Acks::All => PersistenceStatus::Persisted,
        }
    }
}

impl std::fmt::Display for PersistenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PersistenceStatus::NotPersisted => "NotPersisted",
            PersistenceStatus::PossiblyPersisted => "PossiblyPersisted",
            PersistenceStatus::Persisted => "Persisted",
        };
        f.write_str(name)
    }
}

/// Delivery report for one message, taken from the broker's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    /// Message timestamp in milliseconds since the epoch, if the broker or
    /// client assigned one.
    pub timestamp_ms: Option<i64>,
}

pub type DeliveryOutcome = std::result::Result<Delivered, KafkaError>;

/// Producer context that hands each delivery report back to the waiting
/// task through the message's oneshot sender.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryContext {
    client: TaskClientContext,
}

impl DeliveryContext {
    pub fn new(task: &'static str) -> Self {
        Self {
            client: TaskClientContext::new(task),
        }
    }
}

impl ClientContext for DeliveryContext {
    fn log(&self, level: RDKafkaLogLevel, fac: &str, log_message: &str) {
        self.client.log(level, fac, log_message);
    }

    fn error(&self, error: KafkaError, reason: &str) {
        self.client.error(error, reason);
    }
}

impl ProducerContext for DeliveryContext {
    type DeliveryOpaque = Box<oneshot::Sender<DeliveryOutcome>>;

    fn delivery(&self, delivery_result: &DeliveryResult<'_>, reply: Self::DeliveryOpaque) {
        let outcome = match delivery_result {
            Ok(message) => {
                debug!(
                    task = self.client.task(),
                    topic = message.topic(),
                    partition = message.partition(),
                    offset = message.offset(),
                    "Message delivered"
                );
                Ok(Delivered {
                    topic: message.topic().to_string(),
                    partition: message.partition(),
                    offset: message.offset(),
                    timestamp_ms: message.timestamp().to_millis(),
                })
            }
            Err((error, _)) => Err(error.clone()),
        };
        // The receiver is gone when the task was cancelled.
        let _ = reply.send(outcome);
    }
}

use kafka_task_options::SecurityProtocol;
use serde::{Deserialize, Serialize};

/// Connection and loop settings for one consume call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsumeInput {
    /// Kafka brokers (comma-separated list)
    pub brokers: String,
    /// Topic to consume from
    pub topic: String,
    /// Partition to read. `-1` subscribes to the topic and lets the consumer
    /// group assign partitions; any other value reads only that partition.
    pub partition: i32,
    pub security_protocol: SecurityProtocol,
    /// Stop after this many messages. 0 means no limit.
    pub message_count: usize,
    /// Maximum wait for each message, in milliseconds. A wait that ends
    /// without a message finishes the call. 0 waits until cancelled.
    pub timeout_ms: u64,
}

impl Default for ConsumeInput {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            topic: String::new(),
            partition: -1,
            security_protocol: SecurityProtocol::default(),
            message_count: 0,
            timeout_ms: 0,
        }
    }
}

/// A consumed message. The key is decoded as (lossy) UTF-8; the value is the
/// UTF-8 payload, or the record as JSON text when reading Avro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub key: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumeResult {
    pub success: bool,
    pub messages: Vec<Message>,
}

use crate::enums::{Acks, CompressionType, Partitioner};
use crate::mapper::{set_debug, set_resolved, set_value, ApplyConfig};
use rdkafka::config::ClientConfig;
use serde::Deserialize;

/// Producer tuning options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProducerOptions {
    /// Acknowledgements the leader must receive before a request completes.
    /// Also decides how a successful delivery is classified.
    pub acks: Acks,
    pub api_version_request: bool,
    /// Compression codec for message sets.
    pub compression_type: CompressionType,
    /// Comma-separated librdkafka debug contexts, e.g. `broker,topic,msg`.
    pub debug: String,
    /// Exactly-once, in-order delivery per partition.
    pub enable_idempotence: bool,
    /// Delay to wait for messages to accumulate before sending a batch.
    pub linger_ms: i32,
    pub max_in_flight: i32,
    /// Local delivery timeout, including retries. 0 is infinite.
    pub message_timeout_ms: i32,
    pub message_max_bytes: i32,
    pub message_send_max_retries: i32,
    pub partitioner: Partitioner,
    pub queue_buffering_max_kbytes: i32,
    pub queue_buffering_max_messages: i32,
    /// Enables the transactional producer when set.
    pub transactional_id: String,
    pub transaction_timeout_ms: i32,
}

impl Default for ProducerOptions {
    fn default() -> Self {
        Self {
            acks: Acks::default(),
            api_version_request: true,
            compression_type: CompressionType::default(),
            debug: String::new(),
            enable_idempotence: false,
            linger_ms: 5,
            max_in_flight: 1000000,
            message_timeout_ms: 300000,
            message_max_bytes: 1000000,
            message_send_max_retries: i32::MAX,
            partitioner: Partitioner::default(),
            queue_buffering_max_kbytes: 1048576,
            queue_buffering_max_messages: 100000,
            transactional_id: String::new(),
            transaction_timeout_ms: 60000,
        }
    }
}

impl ApplyConfig for ProducerOptions {
    fn apply(&self, config: &mut ClientConfig) {
        config.set("acks", self.acks.as_config_value());
        set_value(config, "api.version.request", self.api_version_request);
        config.set("compression.type", self.compression_type.as_config_value());
        set_debug(config, &self.debug);
        set_value(config, "enable.idempotence", self.enable_idempotence);
        set_value(config, "linger.ms", self.linger_ms);
        set_value(config, "max.in.flight", self.max_in_flight);
        set_value(config, "message.timeout.ms", self.message_timeout_ms);
        set_value(config, "message.max.bytes", self.message_max_bytes);
        set_value(config, "message.send.max.retries", self.message_send_max_retries);
        config.set("partitioner", self.partitioner.as_config_value());
        set_value(
            config,
            "queue.buffering.max.kbytes",
            self.queue_buffering_max_kbytes,
        );
        set_value(
            config,
            "queue.buffering.max.messages",
            self.queue_buffering_max_messages,
        );
        set_resolved(config, "transactional.id", &self.transactional_id, "");
        set_value(config, "transaction.timeout.ms", self.transaction_timeout_ms);
    }
}

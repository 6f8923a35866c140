use crate::enums::{Acks, AutoOffsetReset, BrokerAddressFamily, IsolationLevel};
use crate::error::{ConfigError, Result};
use crate::mapper::{set_debug, set_resolved, set_value, ApplyConfig};
use rdkafka::config::ClientConfig;
use serde::Deserialize;

/// Consumer group used when `group_id` is blank.
pub const DEFAULT_GROUP_ID: &str = "kafka-tasks";

/// Consumer tuning options
///
/// Every field has a default, so a task file only needs to list what it changes.
/// Range checks on individual values are left to librdkafka, which reports them
/// when the client is created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsumerOptions {
    /// Producer acknowledgement mode. librdkafka ignores it for consumers.
    pub acks: Acks,
    /// Request the broker's supported API versions to adjust features.
    pub api_version_request: bool,
    /// How long to keep using `broker.version.fallback` after a failed
    /// ApiVersionRequest.
    pub api_version_fallback_ms: i32,
    pub api_version_request_timeout_ms: i32,
    /// Allow automatic topic creation on the broker when subscribing.
    pub allow_auto_create_topics: bool,
    /// How often consumer offsets are committed.
    pub auto_commit_interval_ms: i32,
    pub auto_offset_reset: AutoOffsetReset,
    pub broker_address_family: BrokerAddressFamily,
    /// Close idle connections after this long. 0 disables.
    pub connections_max_idle_ms: i32,
    /// Verify the CRC32 of consumed messages.
    pub check_crcs: bool,
    /// Comma-separated librdkafka debug contexts, e.g. `consumer,cgrp,topic,fetch`.
    pub debug: String,
    pub enable_auto_commit: bool,
    /// Automatically store the offset of the last message handed to the task.
    pub enable_auto_offset_store: bool,
    /// How long to wait before the next fetch request after a fetch error.
    pub fetch_error_backoff_ms: i32,
    /// Maximum data the broker returns for one fetch request.
    pub fetch_max_bytes: i32,
    pub fetch_min_bytes: i32,
    pub fetch_wait_max_ms: i32,
    /// Consumer group id. Blank uses [`DEFAULT_GROUP_ID`].
    pub group_id: String,
    /// Static group membership id. Blank leaves static membership off.
    pub group_instance_id: String,
    pub heartbeat_interval_ms: i32,
    pub isolation_level: IsolationLevel,
    pub message_max_bytes: i32,
    /// Maximum in-flight requests per broker connection.
    pub max_in_flight: i32,
    /// Maximum time between polls before the consumer leaves the group.
    /// Must not be lower than `session_timeout_ms`.
    pub max_poll_interval_ms: i32,
    pub queued_max_messages_kbytes: i32,
    pub queued_min_messages: i32,
    pub reconnect_backoff_max_ms: i32,
    pub reconnect_backoff_ms: i32,
    /// Group session timeout, detecting failed consumers.
    pub session_timeout_ms: i32,
}

impl Default for ConsumerOptions {
    fn default() -> Self {
        Self {
            acks: Acks::default(),
            api_version_request: true,
            api_version_fallback_ms: 0,
            api_version_request_timeout_ms: 10000,
            allow_auto_create_topics: false,
            auto_commit_interval_ms: 5000,
            auto_offset_reset: AutoOffsetReset::default(),
            broker_address_family: BrokerAddressFamily::default(),
            connections_max_idle_ms: 0,
            check_crcs: false,
            debug: String::new(),
            enable_auto_commit: true,
            enable_auto_offset_store: true,
            fetch_error_backoff_ms: 500,
            fetch_max_bytes: 52428800,
            fetch_min_bytes: 1,
            fetch_wait_max_ms: 500,
            group_id: DEFAULT_GROUP_ID.to_string(),
            group_instance_id: String::new(),
            heartbeat_interval_ms: 3000,
            isolation_level: IsolationLevel::default(),
            message_max_bytes: 1000000,
            max_in_flight: 1000000,
            max_poll_interval_ms: 300000,
            queued_max_messages_kbytes: 65536,
            queued_min_messages: 100000,
            reconnect_backoff_max_ms: 10000,
            reconnect_backoff_ms: 100,
            session_timeout_ms: 45000,
        }
    }
}

impl ConsumerOptions {
    /// Checks the rules librdkafka does not enforce itself.
    pub fn validate(&self) -> Result<()> {
        if self.max_poll_interval_ms < self.session_timeout_ms {
            return Err(ConfigError::Validation(format!(
                "max_poll_interval_ms must be >= session_timeout_ms ({} < {})",
                self.max_poll_interval_ms, self.session_timeout_ms
            )));
        }
        Ok(())
    }
}

impl ApplyConfig for ConsumerOptions {
    fn apply(&self, config: &mut ClientConfig) {
        config.set("acks", self.acks.as_config_value());
        set_value(config, "api.version.request", self.api_version_request);
        set_value(config, "api.version.fallback.ms", self.api_version_fallback_ms);
        set_value(
            config,
            "api.version.request.timeout.ms",
            self.api_version_request_timeout_ms,
        );
        set_value(config, "allow.auto.create.topics", self.allow_auto_create_topics);
        set_value(config, "auto.commit.interval.ms", self.auto_commit_interval_ms);
        config.set("auto.offset.reset", self.auto_offset_reset.as_config_value());
        config.set(
            "broker.address.family",
            self.broker_address_family.as_config_value(),
        );
        set_value(config, "connections.max.idle.ms", self.connections_max_idle_ms);
        set_value(config, "check.crcs", self.check_crcs);
        set_debug(config, &self.debug);
        set_value(config, "enable.auto.commit", self.enable_auto_commit);
        set_value(config, "enable.auto.offset.store", self.enable_auto_offset_store);
        set_value(config, "fetch.error.backoff.ms", self.fetch_error_backoff_ms);
        set_value(config, "fetch.max.bytes", self.fetch_max_bytes);
        set_value(config, "fetch.min.bytes", self.fetch_min_bytes);
        set_value(config, "fetch.wait.max.ms", self.fetch_wait_max_ms);
        set_resolved(config, "group.id", &self.group_id, DEFAULT_GROUP_ID);
        set_resolved(config, "group.instance.id", &self.group_instance_id, "");
        set_value(config, "heartbeat.interval.ms", self.heartbeat_interval_ms);
        config.set("isolation.level", self.isolation_level.as_config_value());
        set_value(config, "message.max.bytes", self.message_max_bytes);
        set_value(config, "max.in.flight", self.max_in_flight);
        set_value(config, "max.poll.interval.ms", self.max_poll_interval_ms);
        set_value(
            config,
            "queued.max.messages.kbytes",
            self.queued_max_messages_kbytes,
        );
        set_value(config, "queued.min.messages", self.queued_min_messages);
        set_value(config, "reconnect.backoff.max.ms", self.reconnect_backoff_max_ms);
        set_value(config, "reconnect.backoff.ms", self.reconnect_backoff_ms);
        set_value(config, "session.timeout.ms", self.session_timeout_ms);
    }
}

use crate::delivery::{Delivered, PersistenceStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicPartitionOffset {
    pub topic: String,
    pub partition: i32,
    /// -1001 when produced with `acks = 0`.
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProduceResult {
    pub success: bool,
    pub status: PersistenceStatus,
    /// Delivery time in UTC (RFC 3339, milliseconds).
    pub timestamp: String,
    pub topic_partition_offset: Option<TopicPartitionOffset>,
}

impl ProduceResult {
    pub fn delivered(delivered: Delivered, status: PersistenceStatus) -> Self {
        Self {
            success: true,
            status,
            timestamp: format_timestamp(delivered.timestamp_ms, Utc::now()),
            topic_partition_offset: Some(TopicPartitionOffset {
                topic: delivered.topic,
                partition: delivered.partition,
                offset: delivered.offset,
            }),
        }
    }
}

/// Renders a message timestamp, falling back to `now` when the message has
/// none or it is out of range.
pub fn format_timestamp(timestamp_ms: Option<i64>, now: DateTime<Utc>) -> String {
    timestamp_ms
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or(now)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

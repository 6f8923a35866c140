use kafka_task_options::TaskClientContext;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::error::KafkaResult;
use rdkafka::message::OwnedMessage;
use rdkafka::{Message as _, Offset, TopicPartitionList};
use std::time::Duration;
use tracing::{debug, warn};

/// A consumer attached to one topic for the length of a consume call.
///
/// Dropping the session detaches the consumer from the topic before the
/// client itself is destroyed, on every exit path.
pub struct ConsumerSession {
    consumer: StreamConsumer<TaskClientContext>,
    topic: String,
    assigned: bool,
}

impl ConsumerSession {
    /// Subscribes to `topic`, or assigns the single `partition` when it is
    /// not negative.
    pub fn open(
        consumer: StreamConsumer<TaskClientContext>,
        topic: &str,
        partition: i32,
    ) -> KafkaResult<Self> {
        let assigned = partition >= 0;
        if assigned {
            let mut assignment = TopicPartitionList::new();
            assignment.add_partition_offset(topic, partition, Offset::Stored)?;
            consumer.assign(&assignment)?;
            debug!(topic, partition, "Assigned partition");
        } else {
            consumer.subscribe(&[topic])?;
            debug!(topic, "Subscribed to topic");
        }
        Ok(Self {
            consumer,
            topic: topic.to_string(),
            assigned,
        })
    }

    /// Waits for the next message. `Ok(None)` means the timeout passed first.
    pub async fn recv(&self, timeout: Option<Duration>) -> KafkaResult<Option<OwnedMessage>> {
        let received = match timeout {
            Some(timeout) => match tokio::time::timeout(timeout, self.consumer.recv()).await {
                Ok(received) => received,
                Err(_) => return Ok(None),
            },
            None => self.consumer.recv().await,
        };
        let message = received?.detach();
        debug!(
            topic = message.topic(),
            partition = message.partition(),
            offset = message.offset(),
            "Received message"
        );
        Ok(Some(message))
    }
}

impl Drop for ConsumerSession {
    fn drop(&mut self) {
        let released = if self.assigned {
            self.consumer.unassign()
        } else {
            self.consumer.unsubscribe();
            Ok(())
        };
        match released {
            Ok(()) => debug!(topic = %self.topic, "Consumer released"),
            Err(e) => warn!(topic = %self.topic, "Failed to release consumer: {e}"),
        }
    }
}

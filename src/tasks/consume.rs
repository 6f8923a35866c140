//! `kafka-tasks consume`

use crate::config::{load_task_file, parse_duration_to_millis, ConsumeTaskFile};
use anyhow::Context;
use clap::Args;
use kafka_consume::ConsumeResult;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Args, Debug, Clone, Default)]
pub struct ConsumeArgs {
    /// Task file (.toml, .yaml or .yml) with the connection and option groups
    #[arg(long, value_name = "PATH", env = "KAFKA_TASK_FILE")]
    pub task_file: Option<PathBuf>,

    /// Kafka brokers (comma-separated list)
    #[arg(long, env = "KAFKA_BROKERS")]
    pub brokers: Option<String>,

    /// Topic to consume from
    #[arg(long)]
    pub topic: Option<String>,

    /// Read only this partition (-1 subscribes to the whole topic)
    #[arg(long, allow_negative_numbers = true)]
    pub partition: Option<i32>,

    /// Stop after this many messages (0 = no limit)
    #[arg(long)]
    pub message_count: Option<usize>,

    /// Maximum wait for each message, e.g. "500ms", "10s", "1m" (0 = no timeout)
    #[arg(long)]
    pub timeout: Option<String>,
}

impl ConsumeArgs {
    /// Loads the task file (if any) and applies the command-line overrides.
    pub fn task(&self) -> anyhow::Result<ConsumeTaskFile> {
        let mut task: ConsumeTaskFile = match &self.task_file {
            Some(path) => load_task_file(path)?,
            None => ConsumeTaskFile::default(),
        };

        let connection = &mut task.connection;
        if let Some(brokers) = &self.brokers {
            connection.brokers = brokers.clone();
        }
        if let Some(topic) = &self.topic {
            connection.topic = topic.clone();
        }
        if let Some(partition) = self.partition {
            connection.partition = partition;
        }
        if let Some(message_count) = self.message_count {
            connection.message_count = message_count;
        }
        if let Some(timeout) = &self.timeout {
            connection.timeout_ms = parse_duration_to_millis(timeout)
                .with_context(|| format!("Invalid timeout format: {timeout}"))?;
        }

        if connection.topic.trim().is_empty() {
            anyhow::bail!("No topic given: set connection.topic in the task file or pass --topic");
        }
        Ok(task)
    }
}

pub async fn run(args: &ConsumeArgs, cancel: CancellationToken) -> anyhow::Result<ConsumeResult> {
    let task = args.task()?;
    tracing::info!(
        "Consuming from topic '{}' on {}",
        task.connection.topic,
        task.connection.brokers
    );

    kafka_consume::consume(
        &task.connection,
        &task.options,
        &task.socket,
        task.sasl.as_ref(),
        task.ssl.as_ref(),
        task.schema_registry.as_ref(),
        cancel,
    )
    .await
    .with_context(|| format!("Consume from topic '{}' failed", task.connection.topic))
}

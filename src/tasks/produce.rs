//! `kafka-tasks produce`

use crate::config::{load_task_file, ProduceTaskFile};
use anyhow::Context;
use clap::Args;
use kafka_produce::ProduceResult;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Args, Debug, Clone, Default)]
pub struct ProduceArgs {
    /// Task file (.toml, .yaml or .yml) with the connection and option groups
    #[arg(long, value_name = "PATH", env = "KAFKA_TASK_FILE")]
    pub task_file: Option<PathBuf>,

    /// Kafka brokers (comma-separated list)
    #[arg(long, env = "KAFKA_BROKERS")]
    pub brokers: Option<String>,

    /// Topic to produce to
    #[arg(long)]
    pub topic: Option<String>,

    /// Target partition (-1 lets the partitioner choose)
    #[arg(long, allow_negative_numbers = true)]
    pub partition: Option<i32>,

    /// Message key
    #[arg(long)]
    pub key: Option<String>,

    /// Message text
    #[arg(long)]
    pub message: Option<String>,
}

impl ProduceArgs {
    /// Loads the task file (if any) and applies the command-line overrides.
    pub fn task(&self) -> anyhow::Result<ProduceTaskFile> {
        let mut task: ProduceTaskFile = match &self.task_file {
            Some(path) => load_task_file(path)?,
            None => ProduceTaskFile::default(),
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
        if self.key.is_some() {
            connection.key = self.key.clone();
        }
        if self.message.is_some() {
            connection.message = self.message.clone();
        }

        if connection.topic.trim().is_empty() {
            anyhow::bail!("No topic given: set connection.topic in the task file or pass --topic");
        }
        Ok(task)
    }
}

pub async fn run(args: &ProduceArgs, cancel: CancellationToken) -> anyhow::Result<ProduceResult> {
    let task = args.task()?;
    tracing::info!(
        "Producing to topic '{}' on {}",
        task.connection.topic,
        task.connection.brokers
    );

    kafka_produce::produce(
        &task.connection,
        &task.options,
        &task.socket,
        task.sasl.as_ref(),
        task.ssl.as_ref(),
        task.schema_registry.as_ref(),
        cancel,
    )
    .await
    .with_context(|| format!("Produce to topic '{}' failed", task.connection.topic))
}

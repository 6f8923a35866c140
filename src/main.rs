//! Command-line interface for kafka-tasks
//!
//! # Usage Examples
//!
//! ## Consume
//! ```bash
//! # Everything from the task file
//! kafka-tasks consume --task-file consume.toml
//!
//! # Override the topic and stop after 5 messages or 10 idle seconds
//! kafka-tasks consume --task-file consume.toml --topic orders \
//!   --message-count 5 --timeout 10s
//! ```
//!
//! ## Produce
//! ```bash
//! kafka-tasks produce --task-file produce.yaml --key order-1 --message "hello"
//!
//! # No task file: defaults plus flags
//! kafka-tasks produce --brokers localhost:9092 --topic orders --message "hello"
//! ```
//!
//! The result is printed to stdout as JSON. Ctrl-C cancels the running task.

use anyhow::Context;
use clap::{Parser, Subcommand};
use kafka_tasks::tasks::{self, ConsumeArgs, ProduceArgs};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "kafka-tasks")]
#[command(about = "Consume messages from or produce a message to Kafka")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consume messages from a topic until a count or timeout is reached
    Consume(ConsumeArgs),

    /// Produce one message to a topic
    Produce(ProduceArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cancel = cancel_on_ctrl_c();

    match cli.command {
        Commands::Consume(args) => print_result(&tasks::consume::run(&args, cancel).await?),
        Commands::Produce(args) => print_result(&tasks::produce::run(&args, cancel).await?),
    }
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling task");
            token.cancel();
        }
    });
    cancel
}

fn print_result<T: Serialize>(result: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(result).context("Failed to render result")?;
    println!("{json}");
    Ok(())
}

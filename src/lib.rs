//! kafka-tasks
//!
//! Consume and produce tasks for Kafka, driven by task files.
//!
//! # Crates
//!
//! - `kafka_task_options`: option groups and their librdkafka mapping
//! - `kafka_consume`: the consume task
//! - `kafka_produce`: the produce task
//! - `avro_record`: Avro records built from JSON
//! - `schema_registry_client`: schema registry access and Avro framing
//!
//! # CLI Usage
//!
//! ```bash
//! # Read up to 10 messages, waiting at most 5 seconds for each
//! kafka-tasks consume --task-file consume.toml --message-count 10 --timeout 5s
//!
//! # Send one message
//! kafka-tasks produce --task-file produce.yaml --key order-1 --message "hello"
//! ```

pub mod config;
pub mod tasks;

// Re-export the task crates for convenience
pub use avro_record as avro;
pub use kafka_consume as consume;
pub use kafka_produce as produce;
pub use kafka_task_options as options;
pub use schema_registry_client as schema_registry;

//! Task files: one TOML or YAML document holding every option group of a
//! consume or produce call.
//!
//! ```toml
//! [connection]
//! brokers = "localhost:9092"
//! topic = "orders"
//!
//! [options]
//! auto_offset_reset = "Earliest"
//!
//! [sasl]
//! sasl_mechanism = "Plain"
//! sasl_username = "user"
//! sasl_password = "secret"
//! ```
//!
//! `sasl`, `ssl` and `schema_registry` are only used when their section is
//! present. Every other section and field falls back to its default.

use anyhow::Context;
use kafka_consume::ConsumeInput;
use kafka_produce::ProduceInput;
use kafka_task_options::{
    ConsumerOptions, ProducerOptions, SaslOptions, SchemaRegistryOptions, SocketOptions,
    SslOptions,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsumeTaskFile {
    pub connection: ConsumeInput,
    pub options: ConsumerOptions,
    pub socket: SocketOptions,
    pub sasl: Option<SaslOptions>,
    pub ssl: Option<SslOptions>,
    pub schema_registry: Option<SchemaRegistryOptions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProduceTaskFile {
    pub connection: ProduceInput,
    pub options: ProducerOptions,
    pub socket: SocketOptions,
    pub sasl: Option<SaslOptions>,
    pub ssl: Option<SslOptions>,
    pub schema_registry: Option<SchemaRegistryOptions>,
}

/// Reads a task file, picking the format from the extension
/// (`.toml`, `.yaml` or `.yml`).
pub fn load_task_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read task file {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "toml" => toml::from_str(&text)
            .with_context(|| format!("Failed to parse TOML task file {}", path.display())),
        "yaml" | "yml" => serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse YAML task file {}", path.display())),
        _ => anyhow::bail!(
            "Unsupported task file extension for {} (expected .toml, .yaml or .yml)",
            path.display()
        ),
    }
}

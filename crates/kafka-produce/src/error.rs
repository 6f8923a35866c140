use avro_record::AvroRecordError;
use kafka_task_options::ConfigError;
use rdkafka::error::KafkaError;
use schema_registry_client::SchemaRegistryError;
use thiserror::Error;

/// Produce failures, prefixed with the stage that failed.
#[derive(Error, Debug)]
pub enum ProduceError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// librdkafka rejected the configuration.
    #[error("config: {0}")]
    Client(KafkaError),

    #[error("config: failed to read record schema file '{path}': {source}")]
    SchemaFile {
        path: String,
        source: std::io::Error,
    },

    #[error("config: {0}")]
    SchemaRegistry(SchemaRegistryError),

    #[error("serialization: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("serialization: {0}")]
    Record(#[from] AvroRecordError),

    #[error("serialization: {0}")]
    Encode(SchemaRegistryError),

    #[error("transport: {0}")]
    Transport(KafkaError),

    #[error("transport: delivery report was not received")]
    DeliveryLost,

    #[error("transport: {0}")]
    Blocking(#[from] tokio::task::JoinError),

    #[error("Produce cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ProduceError>;

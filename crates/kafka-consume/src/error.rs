use kafka_task_options::ConfigError;
use rdkafka::error::KafkaError;
use schema_registry_client::SchemaRegistryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsumeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// librdkafka rejected the configuration; its message is kept verbatim.
    #[error(transparent)]
    Client(KafkaError),

    #[error("Consume error on topic '{topic}': {source}")]
    Transport { topic: String, source: KafkaError },

    #[error("Failed to decode message on topic '{topic}': {source}")]
    Decode {
        topic: String,
        source: SchemaRegistryError,
    },

    #[error(transparent)]
    SchemaRegistry(#[from] SchemaRegistryError),

    #[error("Consume cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ConsumeError>;

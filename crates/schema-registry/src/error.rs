use schema_registry_converter::error::SRCError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaRegistryError {
    #[error("Schema registry configuration error: {0}")]
    Config(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Schema registry TLS setup failed: {0}")]
    Tls(#[from] reqwest::Error),

    #[error("Schema registry error: {0}")]
    Registry(#[from] SRCError),

    #[error(transparent)]
    Avro(#[from] avro_record::AvroRecordError),
}

pub type Result<T> = std::result::Result<T, SchemaRegistryError>;

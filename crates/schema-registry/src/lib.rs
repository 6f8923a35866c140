//! Schema registry support for the Kafka tasks.
//!
//! Registry access, the Confluent framing (magic byte, schema id, datum) and
//! schema caching come from `schema_registry_converter`. This crate maps the
//! task's [`SchemaRegistryOptions`](kafka_task_options::SchemaRegistryOptions)
//! onto its settings and wraps its encoder and decoder:
//!
//! - [`sr_settings`]: URLs, basic auth (user info or inherited from SASL),
//!   request timeout, CA certificate and client identity
//! - [`AvroSerializer`] / [`AvroDeserializer`]: records to framed bytes and back

pub mod avro;
pub mod error;
pub mod settings;

pub use avro::{AvroDeserializer, AvroSerializer};
pub use error::{Result, SchemaRegistryError};
pub use settings::sr_settings;

//! Option groups shared by the Kafka consume and produce tasks, and their
//! translation into a librdkafka client configuration.
//!
//! Each group is a plain value deserialized from a task file. Groups that are
//! optional as a whole (SASL, SSL, schema registry) are passed as `Option<_>`;
//! a missing group writes nothing to the client configuration.

pub mod consumer;
pub mod context;
pub mod enums;
pub mod error;
pub mod mapper;
pub mod producer;
pub mod sasl;
pub mod schema_registry;
pub mod socket;
pub mod ssl;

pub use consumer::{ConsumerOptions, DEFAULT_GROUP_ID};
pub use context::TaskClientContext;
pub use enums::{
    Acks, AutoOffsetReset, BasicAuthCredentialsSource, BrokerAddressFamily, CompressionType,
    IsolationLevel, Partitioner, SaslMechanism, SaslOauthbearerMethod, SecurityProtocol,
    SslEndpointIdentificationAlgorithm,
};
pub use error::{ConfigError, Result};
pub use mapper::{base_config, log_config, ApplyConfig};
pub use producer::ProducerOptions;
pub use sasl::SaslOptions;
pub use schema_registry::SchemaRegistryOptions;
pub use socket::SocketOptions;
pub use ssl::SslOptions;

//! Kafka produce task.
//!
//! [`produce`] sends one message and waits for the broker's delivery report.
//! The payload is either the input message as JSON text or, with schema
//! registry options, an Avro record framed for the registry. The result
//! reports the persistence status, the delivery timestamp (UTC) and where the
//! message landed.
//!
//! Errors carry the stage that failed: `config`, `serialization` or
//! `transport`.

pub mod delivery;
pub mod error;
pub mod payload;
pub mod result;
pub mod task;

pub use delivery::{DeliveryContext, PersistenceStatus};
pub use error::{ProduceError, Result};
pub use result::{ProduceResult, TopicPartitionOffset};
pub use task::{produce, producer_config, ProduceInput};

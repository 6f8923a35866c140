//! Kafka consume task.
//!
//! [`consume`] connects with the given option groups, subscribes to a topic
//! (or assigns a single partition) and pulls messages until a count is reached
//! or a pull times out. Messages come back as UTF-8 key/value text; with
//! schema registry options the values are decoded from Avro into JSON text.

pub mod error;
pub mod message;
pub mod session;
pub mod task;

pub use error::{ConsumeError, Result};
pub use message::{ConsumeInput, ConsumeResult, Message};
pub use session::ConsumerSession;
pub use task::{consume, consumer_config};

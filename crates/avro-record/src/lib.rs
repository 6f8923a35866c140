//! Avro generic records built from JSON.
//!
//! The produce task receives a record schema and the field values as two JSON
//! documents. This crate walks the schema's fields in order and converts each
//! JSON value by the field's Avro type:
//!
//! - `enum`: the string must be one of the declared symbols
//! - `fixed`: base64 text, decoded to exactly the declared size
//! - `bytes`: the UTF-8 bytes of the string, no base64 decoding
//! - `array`: arrays of strings
//! - `map`: values typed by their JSON kind (null, boolean, number, string)
//! - `union`: `[null, X]` only; null selects the null branch, a string selects
//!   a `string` second branch
//! - numeric and boolean fields also accept numeric/boolean strings
//! - `record`: converted recursively
//! - named types declared once may be referenced by name in later fields
//!
//! Error types and logical types are rejected. A missing field is only allowed
//! for unions, which fall back to their default or to null.

mod builder;
pub mod error;
mod record;

pub use builder::build_record;
pub use error::{AvroRecordError, Result};
pub use record::{parse_record_schema, value_to_json, AvroRecord};

// Re-export the Avro types that appear in this crate's API
pub use apache_avro::types::Value;
pub use apache_avro::Schema;

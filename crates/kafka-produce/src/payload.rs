use crate::error::{ProduceError, Result};
use avro_record::AvroRecord;
use kafka_task_options::mapper::resolve;
use kafka_task_options::{SaslOptions, SchemaRegistryOptions};
use schema_registry_client::AvroSerializer;
use tracing::debug;

/// Plain payload: the message as a JSON string literal, `null` when absent.
pub fn json_payload(message: Option<&str>) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&message)?)
}

/// Record schema text from the inline option, or from the schema file when the
/// inline option is blank.
pub async fn record_schema(options: &SchemaRegistryOptions) -> Result<String> {
    let inline = resolve(&options.record_schema_json, "");
    if !inline.is_empty() {
        return Ok(inline.to_string());
    }
    let path = resolve(&options.record_schema_json_file, "");
    if path.is_empty() {
        return Err(ProduceError::SchemaFile {
            path: String::new(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "neither record_schema_json nor record_schema_json_file is set",
            ),
        });
    }
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ProduceError::SchemaFile {
            path: path.to_string(),
            source,
        })
}

/// Builds the Avro record from the options' schema and records JSON. Runs
/// before any connection is made, so mapping errors surface first.
pub async fn avro_record(options: &SchemaRegistryOptions) -> Result<AvroRecord> {
    let schema = record_schema(options).await?;
    Ok(AvroRecord::from_json(&schema, &options.records)?)
}

/// Avro payload: registers the record's schema for `topic` and frames the
/// datum for the schema registry.
pub async fn avro_payload(
    topic: &str,
    record: &AvroRecord,
    options: &SchemaRegistryOptions,
    sasl: Option<&SaslOptions>,
) -> Result<Vec<u8>> {
    let serializer =
        AvroSerializer::from_options(options, sasl).map_err(ProduceError::SchemaRegistry)?;
    debug!(topic, fields = ?record.field_names(), "Encoding Avro record");
    serializer
        .serialize(topic, record)
        .await
        .map_err(ProduceError::Encode)
}

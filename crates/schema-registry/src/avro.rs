use crate::error::{Result, SchemaRegistryError};
use crate::settings::sr_settings;
use avro_record::{value_to_json, AvroRecord, Schema, Value};
use kafka_task_options::{SaslOptions, SchemaRegistryOptions};
use schema_registry_converter::async_impl::avro::{AvroDecoder, AvroEncoder};
use schema_registry_converter::async_impl::schema_registry::SrSettings;
use schema_registry_converter::schema_registry_common::{
    SchemaType, SubjectNameStrategy, SuppliedSchema,
};
use tracing::debug;

/// Serializes records as schema-registry framed Avro. The record schema is
/// registered under the topic's value subject on first use and its id cached
/// by the encoder.
pub struct AvroSerializer {
    encoder: AvroEncoder<'static>,
}

impl AvroSerializer {
    pub fn new(settings: SrSettings) -> Self {
        Self {
            encoder: AvroEncoder::new(settings),
        }
    }

    pub fn from_options(options: &SchemaRegistryOptions, sasl: Option<&SaslOptions>) -> Result<Self> {
        Ok(Self::new(sr_settings(options, sasl)?))
    }

    pub async fn serialize(&self, topic: &str, record: &AvroRecord) -> Result<Vec<u8>> {
        let strategy = SubjectNameStrategy::TopicNameStrategyWithSchema(
            topic.to_string(),
            false,
            supplied_schema(record.schema())?,
        );
        let framed = self
            .encoder
            .encode_value(record.value().clone(), &strategy)
            .await?;
        debug!(topic, bytes = framed.len(), "Encoded Avro record");
        Ok(framed)
    }
}

fn supplied_schema(schema: &Schema) -> Result<SuppliedSchema> {
    let Schema::Record(record) = schema else {
        return Err(SchemaRegistryError::Config(
            "record schema must be an Avro record".to_string(),
        ));
    };
    let text = serde_json::to_string(schema)
        .map_err(|e| SchemaRegistryError::Config(format!("record schema is not serializable: {e}")))?;
    Ok(SuppliedSchema {
        name: Some(record.name.fullname(None)),
        schema_type: SchemaType::Avro,
        schema: text,
        references: vec![],
    })
}

/// Decodes schema-registry framed Avro, fetching writer schemas by id.
pub struct AvroDeserializer {
    decoder: AvroDecoder<'static>,
}

impl AvroDeserializer {
    pub fn new(settings: SrSettings) -> Self {
        Self {
            decoder: AvroDecoder::new(settings),
        }
    }

    pub fn from_options(options: &SchemaRegistryOptions, sasl: Option<&SaslOptions>) -> Result<Self> {
        Ok(Self::new(sr_settings(options, sasl)?))
    }

    pub async fn deserialize(&self, payload: &[u8]) -> Result<Value> {
        Ok(self.decoder.decode(Some(payload)).await?.value)
    }

    /// Decodes `payload` and renders the value as JSON text.
    pub async fn deserialize_to_json(&self, payload: &[u8]) -> Result<String> {
        let value = self.deserialize(payload).await?;
        Ok(value_to_json(value)?.to_string())
    }
}

use crate::builder::build_record;
use crate::error::{AvroRecordError, Result};
use apache_avro::types::Value;
use apache_avro::{from_avro_datum, to_avro_datum, Schema};
use serde_json::Value as JsonValue;
use std::io::Cursor;

/// Parses an Avro record schema from JSON text.
///
/// Error types (`"type": "error"`) are rejected anywhere in the schema, and the
/// top-level schema must be a record.
pub fn parse_record_schema(schema_json: &str) -> Result<Schema> {
    let raw: JsonValue = serde_json::from_str(schema_json)?;
    if declares_error_type(&raw) {
        return Err(AvroRecordError::UnsupportedType {
            field: "<schema>".to_string(),
            kind: "error".to_string(),
        });
    }
    let schema = Schema::parse(&raw).map_err(|e| AvroRecordError::SchemaParse(e.to_string()))?;
    if !matches!(schema, Schema::Record(_)) {
        return Err(AvroRecordError::SchemaParse(
            "top-level schema must be a record".to_string(),
        ));
    }
    Ok(schema)
}

/// Looks for `"type": "error"` in schema positions only: a schema's `type`,
/// record field types, array `items`, map `values` and union branches. Field
/// defaults are data and are not scanned.
fn declares_error_type(json: &JsonValue) -> bool {
    match json {
        JsonValue::Object(object) => {
            let kind = object.get("type");
            if kind.and_then(JsonValue::as_str) == Some("error") {
                return true;
            }
            let field_types = object
                .get("fields")
                .and_then(JsonValue::as_array)
                .into_iter()
                .flatten()
                .filter_map(|field| field.get("type"));
            kind.into_iter()
                .chain(object.get("items"))
                .chain(object.get("values"))
                .chain(field_types)
                .any(declares_error_type)
        }
        JsonValue::Array(branches) => branches.iter().any(declares_error_type),
        _ => false,
    }
}

/// JSON rendering of an Avro value. Union values are unwrapped, bytes and
/// fixed values become arrays of numbers.
pub fn value_to_json(value: Value) -> Result<JsonValue> {
    Ok(JsonValue::try_from(value)?)
}

/// A generic Avro record together with the schema it conforms to.
#[derive(Debug, Clone, PartialEq)]
pub struct AvroRecord {
    schema: Schema,
    value: Value,
}

impl AvroRecord {
    /// Builds a record from schema JSON and a JSON object of field values.
    pub fn from_json(schema_json: &str, record_json: &str) -> Result<Self> {
        let schema = parse_record_schema(schema_json)?;
        let record: JsonValue = serde_json::from_str(record_json)?;
        Self::build(schema, &record)
    }

    pub fn build(schema: Schema, record: &JsonValue) -> Result<Self> {
        let value = build_record(&schema, record)?;
        if let Schema::Record(record_schema) = &schema {
            tracing::debug!(
                record = %record_schema.name.name,
                fields = record_schema.fields.len(),
                "Built Avro record"
            );
        }
        Ok(Self { schema, value })
    }

    /// Decodes an Avro binary datum written with `schema`.
    pub fn from_datum(schema: Schema, datum: &[u8]) -> Result<Self> {
        let mut reader = Cursor::new(datum);
        let value = from_avro_datum(&schema, &mut reader, None)?;
        Ok(Self { schema, value })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> Vec<&str> {
        match &self.value {
            Value::Record(fields) => fields.iter().map(|(name, _)| name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        match &self.value {
            Value::Record(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Encodes the record as an Avro binary datum (no container header).
    pub fn to_datum(&self) -> Result<Vec<u8>> {
        Ok(to_avro_datum(&self.schema, self.value.clone())?)
    }

    pub fn to_json(&self) -> Result<JsonValue> {
        value_to_json(self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SCHEMA: &str = r#"{
        "type": "record",
        "name": "TestRecord",
        "namespace": "com.example.kafka",
        "fields": [
            {"name": "intField", "type": "int"},
            {"name": "longField", "type": "long"},
            {"name": "floatField", "type": "float"},
            {"name": "doubleField", "type": "double"},
            {"name": "booleanField", "type": "boolean"},
            {"name": "stringField", "type": "string"},
            {"name": "bytesField", "type": "bytes"},
            {"name": "nullField", "type": "null"},
            {"name": "enumField", "type": {"type": "enum", "name": "Colors", "symbols": ["RED", "GREEN", "BLUE"]}},
            {"name": "fixedField", "type": {"type": "fixed", "name": "FourBytes", "size": 4}},
            {"name": "arrayField", "type": {"type": "array", "items": "string"}},
            {"name": "mapField", "type": {"type": "map", "values": "string"}},
            {"name": "unionField", "type": ["null", "string"], "default": null},
            {"name": "optionalField", "type": ["null", "string"]},
            {"name": "recordField", "type": {
                "type": "record",
                "name": "NestedRecord",
                "fields": [
                    {"name": "nestedIntField", "type": "int"},
                    {"name": "nestedStringField", "type": "string"}
                ]
            }}
        ]
    }"#;

    const TEST_RECORD: &str = r#"{
        "intField": 123,
        "longField": 1234567890123,
        "floatField": 123.45,
        "doubleField": "123.456789",
        "booleanField": true,
        "stringField": "Hello, World!",
        "bytesField": "dGVzdDE=",
        "nullField": null,
        "enumField": "GREEN",
        "fixedField": "YWJjZA==",
        "arrayField": ["one", "two", "three"],
        "mapField": {"key1": "value1", "key2": "value2"},
        "unionField": "Hello, Union!",
        "recordField": {"nestedIntField": 456, "nestedStringField": "Nested Hello"}
    }"#;

    #[test]
    fn test_every_field_in_schema_order() {
        let record = AvroRecord::from_json(TEST_SCHEMA, TEST_RECORD).unwrap();
        assert_eq!(
            record.field_names(),
            vec![
                "intField",
                "longField",
                "floatField",
                "doubleField",
                "booleanField",
                "stringField",
                "bytesField",
                "nullField",
                "enumField",
                "fixedField",
                "arrayField",
                "mapField",
                "unionField",
                "optionalField",
                "recordField",
            ]
        );
        assert_eq!(record.get("intField"), Some(&Value::Int(123)));
        assert_eq!(record.get("doubleField"), Some(&Value::Double(123.456789)));
        assert_eq!(
            record.get("optionalField"),
            Some(&Value::Union(0, Box::new(Value::Null)))
        );
        assert_eq!(
            record.get("recordField"),
            Some(&Value::Record(vec![
                ("nestedIntField".to_string(), Value::Int(456)),
                (
                    "nestedStringField".to_string(),
                    Value::String("Nested Hello".to_string())
                ),
            ]))
        );
    }

    #[test]
    fn test_datum_round_trip_keeps_bytes_as_text() {
        let schema_json = r#"{"type":"record","name":"B","fields":[
            {"name":"bytesField","type":"bytes"},
            {"name":"fixedField","type":{"type":"fixed","name":"FourBytes","size":4}}
        ]}"#;
        let record = AvroRecord::from_json(
            schema_json,
            r#"{"bytesField": "test1", "fixedField": "YWJjZA=="}"#,
        )
        .unwrap();

        let datum = record.to_datum().unwrap();
        let decoded = AvroRecord::from_datum(record.schema().clone(), &datum).unwrap();

        let Some(Value::Bytes(bytes)) = decoded.get("bytesField") else {
            panic!("expected bytes");
        };
        assert_eq!(std::str::from_utf8(bytes).unwrap(), "test1");
        assert_eq!(
            decoded.get("fixedField"),
            Some(&Value::Fixed(4, b"abcd".to_vec()))
        );
    }

    #[test]
    fn test_full_record_encodes() {
        let record = AvroRecord::from_json(TEST_SCHEMA, TEST_RECORD).unwrap();
        let datum = record.to_datum().unwrap();
        let decoded = AvroRecord::from_datum(record.schema().clone(), &datum).unwrap();
        assert_eq!(
            decoded.get("unionField"),
            Some(&Value::Union(
                1,
                Box::new(Value::String("Hello, Union!".to_string()))
            ))
        );
        assert_eq!(decoded.get("enumField"), Some(&Value::Enum(1, "GREEN".to_string())));
    }

    #[test]
    fn test_to_json() {
        let record = AvroRecord::from_json(
            r#"{"type":"record","name":"J","fields":[
                {"name":"name","type":"string"},
                {"name":"nick","type":["null","string"]}
            ]}"#,
            r#"{"name": "alice"}"#,
        )
        .unwrap();
        assert_eq!(
            record.to_json().unwrap(),
            serde_json::json!({"name": "alice", "nick": null})
        );
    }

    #[test]
    fn test_error_type_rejected() {
        let err = parse_record_schema(
            r#"{"type":"record","name":"R","fields":[
                {"name":"failure","type":{"type":"error","name":"Oops","fields":[]}}
            ]}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unsupported type error (field '<schema>')");
    }

    #[test]
    fn test_error_shaped_default_is_data() {
        let record = AvroRecord::from_json(
            r#"{"type":"record","name":"Event","fields":[
                {"name":"meta","type":{"type":"map","values":"string"},"default":{"type":"error"}},
                {"name":"kind","type":"string"}
            ]}"#,
            r#"{"meta": {"type": "error"}, "kind": "failure"}"#,
        )
        .unwrap();
        assert_eq!(record.field_names(), vec!["meta", "kind"]);

        let err = parse_record_schema(
            r#"{"type":"record","name":"R","fields":[
                {"name":"items","type":{"type":"array","items":{"type":"error","name":"E","fields":[]}}}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AvroRecordError::UnsupportedType { ref kind, .. } if kind == "error"));
    }

    #[test]
    fn test_non_record_schema_rejected() {
        let err = parse_record_schema(r#""string""#).unwrap_err();
        assert!(matches!(err, AvroRecordError::SchemaParse(_)));
    }

    #[test]
    fn test_invalid_record_json() {
        let err = AvroRecord::from_json(TEST_SCHEMA, "{not json").unwrap_err();
        assert!(matches!(err, AvroRecordError::Json(_)));
    }
}

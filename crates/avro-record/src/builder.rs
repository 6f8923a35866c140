//! JSON to Avro value conversion, driven by the record schema.
//!
//! Fields are visited in schema order and each JSON value is converted by the
//! field's declared Avro type. `fixed` fields take base64 text while `bytes`
//! fields take the UTF-8 bytes of the JSON string as-is. The two encodings are
//! intentionally different and must stay that way.
//!
//! A named type (record, enum, fixed) used more than once appears as a
//! reference after its first definition; references are looked up in the
//! names table of the top-level schema.

use crate::error::{AvroRecordError, Result};
use apache_avro::schema::{NamesRef, RecordField, RecordSchema, ResolvedSchema, UnionSchema};
use apache_avro::types::Value;
use apache_avro::Schema;
use base64::Engine;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::str::FromStr;

/// Builds a `Value::Record` for a record `schema` from a JSON object.
pub fn build_record(schema: &Schema, json: &JsonValue) -> Result<Value> {
    let Schema::Record(record) = schema else {
        return Err(AvroRecordError::SchemaParse(
            "top-level schema must be a record".to_string(),
        ));
    };
    let resolved = ResolvedSchema::try_from(schema)?;
    let builder = Builder {
        root: schema,
        names: resolved.get_names(),
    };
    let object = json
        .as_object()
        .ok_or_else(|| AvroRecordError::NotAnObject(record.name.name.clone()))?;
    builder.record_from_object(record, object)
}

struct Builder<'s> {
    root: &'s Schema,
    names: &'s NamesRef<'s>,
}

impl<'s> Builder<'s> {
    /// Follows a named reference to its definition.
    fn resolve(&self, field: &str, schema: &'s Schema) -> Result<&'s Schema> {
        match schema {
            Schema::Ref { name } => self.names.get(name).copied().ok_or_else(|| {
                AvroRecordError::SchemaParse(format!(
                    "unknown named type {} (field '{field}')",
                    name.fullname(None)
                ))
            }),
            other => Ok(other),
        }
    }

    fn record_from_object(
        &self,
        schema: &'s RecordSchema,
        object: &Map<String, JsonValue>,
    ) -> Result<Value> {
        let mut fields = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let value = match object.get(&field.name) {
                Some(json) => self.convert(&field.name, &field.schema, json)?,
                None => self.missing_field(field)?,
            };
            fields.push((field.name.clone(), value));
        }
        Ok(Value::Record(fields))
    }

    /// Value for a field absent from the JSON object. Only union (optional)
    /// fields may be left out.
    fn missing_field(&self, field: &'s RecordField) -> Result<Value> {
        let Schema::Union(union) = self.resolve(&field.name, &field.schema)? else {
            return Err(AvroRecordError::MissingField(field.name.clone()));
        };

        match &field.default {
            None | Some(JsonValue::Null) => null_branch(&field.name, union)
                .ok_or_else(|| AvroRecordError::MissingField(field.name.clone())),
            Some(default) => {
                let (index, branch) = self.second_branch(&field.name, union)?;
                let value = match (branch, default) {
                    (Schema::Record(record), JsonValue::Object(object)) => {
                        self.record_from_object(record, object)?
                    }
                    _ => self.convert(&field.name, branch, default)?,
                };
                Ok(Value::Union(index, Box::new(value)))
            }
        }
    }

    fn convert(&self, field: &str, schema: &'s Schema, json: &JsonValue) -> Result<Value> {
        match self.resolve(field, schema)? {
            Schema::Enum(enum_schema) => {
                let symbol = expect_str(field, "enum", json)?;
                let index = enum_schema
                    .symbols
                    .iter()
                    .position(|s| s == symbol)
                    .ok_or_else(|| AvroRecordError::InvalidEnumSymbol {
                        field: field.to_string(),
                        symbol: symbol.to_string(),
                    })?;
                Ok(Value::Enum(index as u32, symbol.to_string()))
            }
            Schema::Fixed(fixed) => {
                let encoded = expect_str(field, "fixed", json)?;
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|source| AvroRecordError::Base64 {
                        field: field.to_string(),
                        source,
                    })?;
                if bytes.len() != fixed.size {
                    return Err(AvroRecordError::InvalidFixedSize {
                        field: field.to_string(),
                        expected: fixed.size,
                        actual: bytes.len(),
                    });
                }
                Ok(Value::Fixed(fixed.size, bytes))
            }
            Schema::Array(array) => {
                let items_schema = self.resolve(field, &array.items)?;
                if !matches!(items_schema, Schema::String) {
                    return Err(AvroRecordError::UnsupportedType {
                        field: field.to_string(),
                        kind: format!("array of {}", type_name(items_schema)),
                    });
                }
                let items = json.as_array().ok_or_else(|| mismatch(field, "array", json))?;
                items
                    .iter()
                    .map(|item| Ok(Value::String(expect_str(field, "string", item)?.to_string())))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array)
            }
            Schema::Null => Ok(Value::Null),
            Schema::Boolean => match json {
                JsonValue::Bool(b) => Ok(Value::Boolean(*b)),
                JsonValue::String(s) => parse_str(field, "boolean", s).map(Value::Boolean),
                other => Err(mismatch(field, "boolean", other)),
            },
            Schema::Int => match json {
                JsonValue::Number(n) => n
                    .as_i64()
                    .and_then(|i| i32::try_from(i).ok())
                    .map(Value::Int)
                    .ok_or_else(|| format_error(field, "int", n)),
                JsonValue::String(s) => parse_str(field, "int", s).map(Value::Int),
                other => Err(mismatch(field, "int", other)),
            },
            Schema::Long => match json {
                JsonValue::Number(n) => n
                    .as_i64()
                    .map(Value::Long)
                    .ok_or_else(|| format_error(field, "long", n)),
                JsonValue::String(s) => parse_str(field, "long", s).map(Value::Long),
                other => Err(mismatch(field, "long", other)),
            },
            Schema::Float => match json {
                JsonValue::Number(n) => n
                    .as_f64()
                    .and_then(narrow_to_f32)
                    .map(Value::Float)
                    .ok_or_else(|| format_error(field, "float", n)),
                JsonValue::String(s) => narrow_to_f32(parse_str(field, "float", s)?)
                    .map(Value::Float)
                    .ok_or_else(|| AvroRecordError::Format {
                        field: field.to_string(),
                        expected: "float",
                        value: s.to_string(),
                    }),
                other => Err(mismatch(field, "float", other)),
            },
            // str::parse always reads '.' as the decimal point.
            Schema::Double => match json {
                JsonValue::Number(n) => n
                    .as_f64()
                    .map(Value::Double)
                    .ok_or_else(|| format_error(field, "double", n)),
                JsonValue::String(s) => parse_str(field, "double", s).map(Value::Double),
                other => Err(mismatch(field, "double", other)),
            },
            Schema::Bytes => {
                let text = expect_str(field, "bytes", json)?;
                Ok(Value::Bytes(text.as_bytes().to_vec()))
            }
            Schema::String => match json {
                JsonValue::String(s) => Ok(Value::String(s.clone())),
                JsonValue::Number(n) => Ok(Value::String(n.to_string())),
                JsonValue::Bool(b) => Ok(Value::String(b.to_string())),
                other => Err(mismatch(field, "string", other)),
            },
            Schema::Record(record) => {
                let object = json
                    .as_object()
                    .ok_or_else(|| mismatch(field, "record", json))?;
                self.record_from_object(record, object)
            }
            Schema::Map(map) => {
                let object = json.as_object().ok_or_else(|| mismatch(field, "map", json))?;
                let values = self.resolve(field, &map.types)?;
                let mut entries = HashMap::with_capacity(object.len());
                for (key, item) in object {
                    let value = map_entry(field, key, item)?
                        .resolve_schemata(values, vec![self.root])
                        .map_err(|_| mismatch(field, type_name(values), item))?;
                    entries.insert(key.clone(), value);
                }
                Ok(Value::Map(entries))
            }
            Schema::Union(union) => self.convert_union(field, union, json),
            other => Err(AvroRecordError::UnsupportedType {
                field: field.to_string(),
                kind: type_name(other).to_string(),
            }),
        }
    }

    /// Only `[null, X]` unions are supported: JSON null selects the null branch
    /// and a JSON string selects a string second branch.
    fn convert_union(&self, field: &str, union: &'s UnionSchema, json: &JsonValue) -> Result<Value> {
        let (index, branch) = self.second_branch(field, union)?;
        match (json, branch) {
            (JsonValue::Null, _) => {
                null_branch(field, union).ok_or_else(|| unsupported_union(field, branch))
            }
            (JsonValue::String(s), Schema::String) => {
                Ok(Value::Union(index, Box::new(Value::String(s.clone()))))
            }
            _ => Err(unsupported_union(field, branch)),
        }
    }

    fn second_branch(&self, field: &str, union: &'s UnionSchema) -> Result<(u32, &'s Schema)> {
        match union.variants() {
            [_, second] => Ok((1, self.resolve(field, second)?)),
            variants => Err(AvroRecordError::UnsupportedUnion {
                field: field.to_string(),
                branch: variants
                    .iter()
                    .map(type_name)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

/// Map values are typed by their JSON kind, not by the map's value schema.
fn map_entry(field: &str, key: &str, json: &JsonValue) -> Result<Value> {
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Boolean(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64().and_then(|i| i32::try_from(i).ok()) {
                Ok(Value::Int(i))
            } else if let Some(l) = n.as_i64() {
                Ok(Value::Long(l))
            } else {
                n.as_f64()
                    .map(Value::Double)
                    .ok_or_else(|| format_error(field, "double", n))
            }
        }
        JsonValue::String(s) => Ok(Value::String(s.clone())),
        other => Err(AvroRecordError::UnsupportedType {
            field: format!("{field}.{key}"),
            kind: format!("map value {}", json_kind(other)),
        }),
    }
}

fn null_branch(field: &str, union: &UnionSchema) -> Option<Value> {
    tracing::trace!(field, "selecting null branch");
    union
        .variants()
        .iter()
        .position(|v| matches!(v, Schema::Null))
        .map(|index| Value::Union(index as u32, Box::new(Value::Null)))
}

/// `None` when the value does not fit in an `f32`.
fn narrow_to_f32(value: f64) -> Option<f32> {
    (value.is_nan() || (f32::MIN as f64..=f32::MAX as f64).contains(&value))
        .then_some(value as f32)
}

fn expect_str<'a>(field: &str, expected: &str, json: &'a JsonValue) -> Result<&'a str> {
    json.as_str().ok_or_else(|| mismatch(field, expected, json))
}

fn parse_str<T: FromStr>(field: &str, expected: &'static str, s: &str) -> Result<T> {
    s.trim().parse().map_err(|_| AvroRecordError::Format {
        field: field.to_string(),
        expected,
        value: s.to_string(),
    })
}

fn format_error(field: &str, expected: &'static str, n: &serde_json::Number) -> AvroRecordError {
    AvroRecordError::Format {
        field: field.to_string(),
        expected,
        value: n.to_string(),
    }
}

fn mismatch(field: &str, expected: &str, json: &JsonValue) -> AvroRecordError {
    AvroRecordError::TypeMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        actual: json_kind(json).to_string(),
    }
}

fn unsupported_union(field: &str, branch: &Schema) -> AvroRecordError {
    AvroRecordError::UnsupportedUnion {
        field: field.to_string(),
        branch: type_name(branch).to_string(),
    }
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn type_name(schema: &Schema) -> &'static str {
    match schema {
        Schema::Null => "null",
        Schema::Boolean => "boolean",
        Schema::Int => "int",
        Schema::Long => "long",
        Schema::Float => "float",
        Schema::Double => "double",
        Schema::Bytes => "bytes",
        Schema::String => "string",
        Schema::Array(_) => "array",
        Schema::Map(_) => "map",
        Schema::Union(_) => "union",
        Schema::Record(_) => "record",
        Schema::Enum(_) => "enum",
        Schema::Fixed(_) => "fixed",
        Schema::Ref { .. } => "named reference",
        _ => "logical type",
    }
}

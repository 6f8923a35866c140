use thiserror::Error;

#[derive(Error, Debug)]
pub enum AvroRecordError {
    #[error("Invalid record schema: {0}")]
    SchemaParse(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object for {0}")]
    NotAnObject(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unsupported union type: {branch} (field '{field}')")]
    UnsupportedUnion { field: String, branch: String },

    #[error("Unsupported type {kind} (field '{field}')")]
    UnsupportedType { field: String, kind: String },

    #[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Format error for field '{field}': '{value}' is not a valid {expected}")]
    Format {
        field: String,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid symbol '{symbol}' for enum field '{field}'")]
    InvalidEnumSymbol { field: String, symbol: String },

    #[error("Fixed field '{field}' expects {expected} bytes, got {actual}")]
    InvalidFixedSize {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid base64 in field '{field}': {source}")]
    Base64 {
        field: String,
        source: base64::DecodeError,
    },

    #[error("Avro error: {0}")]
    Avro(#[from] apache_avro::Error),
}

pub type Result<T> = std::result::Result<T, AvroRecordError>;

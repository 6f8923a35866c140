use crate::enums::BasicAuthCredentialsSource;
use serde::Deserialize;

/// Schema registry connection, plus the Avro schema and record values used by
/// the produce task. Only used when present.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchemaRegistryOptions {
    /// Comma-separated list of schema registry URLs, tried in order.
    pub url: String,
    pub basic_auth_credentials_source: BasicAuthCredentialsSource,
    /// `user:password`, used with [`BasicAuthCredentialsSource::UserInfo`].
    pub basic_auth_user_info: String,
    pub enable_ssl_certificate_verification: bool,
    /// Number of schemas kept in the local cache before it is cleared.
    pub max_cached_schemas: i32,
    pub request_timeout_ms: i32,
    /// CA certificate (PEM) used to verify the registry.
    pub ssl_ca_location: String,
    /// PEM bundle with the client certificate chain and private key.
    pub ssl_keystore_location: String,
    /// Avro record schema as JSON text.
    pub record_schema_json: String,
    /// File holding the Avro record schema. Used when `record_schema_json` is blank.
    pub record_schema_json_file: String,
    /// JSON object with the record's field values.
    pub records: String,
}

impl Default for SchemaRegistryOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            basic_auth_credentials_source: BasicAuthCredentialsSource::default(),
            basic_auth_user_info: String::new(),
            enable_ssl_certificate_verification: true,
            max_cached_schemas: 1000,
            request_timeout_ms: 30000,
            ssl_ca_location: String::new(),
            ssl_keystore_location: String::new(),
            record_schema_json: String::new(),
            record_schema_json_file: String::new(),
            records: String::new(),
        }
    }
}

impl std::fmt::Debug for SchemaRegistryOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistryOptions")
            .field("url", &self.url)
            .field(
                "basic_auth_credentials_source",
                &self.basic_auth_credentials_source,
            )
            .field(
                "enable_ssl_certificate_verification",
                &self.enable_ssl_certificate_verification,
            )
            .field("max_cached_schemas", &self.max_cached_schemas)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("record_schema_json_file", &self.record_schema_json_file)
            .finish_non_exhaustive()
    }
}

impl SchemaRegistryOptions {
    /// Registry URLs with blanks removed.
    pub fn urls(&self) -> Vec<&str> {
        self.url
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .collect()
    }
}

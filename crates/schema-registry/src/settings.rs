use crate::error::{Result, SchemaRegistryError};
use kafka_task_options::{BasicAuthCredentialsSource, SaslOptions, SchemaRegistryOptions};
use reqwest::{Certificate, Client, Identity};
use schema_registry_converter::async_impl::schema_registry::SrSettings;
use std::time::Duration;
use tracing::debug;

/// Registry settings for the task options.
///
/// URLs are tried in order. Without TLS options the converter builds its own
/// HTTP client; with a CA certificate, a client identity or verification
/// turned off, a client carrying them is handed over instead.
pub fn sr_settings(options: &SchemaRegistryOptions, sasl: Option<&SaslOptions>) -> Result<SrSettings> {
    let urls: Vec<String> = options
        .urls()
        .into_iter()
        .map(|url| url.trim_end_matches('/').to_string())
        .collect();
    let Some((first, rest)) = urls.split_first() else {
        return Err(SchemaRegistryError::Config(
            "schema registry url is required".to_string(),
        ));
    };

    let timeout = u64::try_from(options.request_timeout_ms).map_err(|_| {
        SchemaRegistryError::Config(format!(
            "request_timeout_ms must not be negative, got {}",
            options.request_timeout_ms
        ))
    })?;
    let timeout = Duration::from_millis(timeout);

    if options.max_cached_schemas < 1 {
        return Err(SchemaRegistryError::Config(format!(
            "max_cached_schemas must be positive, got {}",
            options.max_cached_schemas
        )));
    }

    let mut builder = SrSettings::new_builder(first.clone());
    for url in rest {
        builder.add_url(url.clone());
    }
    if let Some((user, password)) = credentials(options, sasl)? {
        builder.set_basic_authorization(&user, Some(&password));
    }

    debug!(urls = ?urls, timeout_ms = options.request_timeout_ms, "Schema registry settings");

    let settings = match tls_client(options, timeout)? {
        Some(client) => builder.build_with_client(client)?,
        None => builder.set_timeout(timeout).build()?,
    };
    Ok(settings)
}

/// HTTP client for the registry's TLS options, `None` when the defaults apply.
fn tls_client(options: &SchemaRegistryOptions, timeout: Duration) -> Result<Option<Client>> {
    let ca = options.ssl_ca_location.trim();
    let keystore = options.ssl_keystore_location.trim();
    if ca.is_empty() && keystore.is_empty() && options.enable_ssl_certificate_verification {
        return Ok(None);
    }

    let mut builder = Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(!options.enable_ssl_certificate_verification);
    if !ca.is_empty() {
        builder = builder.add_root_certificate(Certificate::from_pem(&read_file(ca)?)?);
    }
    if !keystore.is_empty() {
        builder = builder.identity(Identity::from_pem(&read_file(keystore)?)?);
    }
    Ok(Some(builder.build()?))
}

/// Basic-auth credentials for the configured source, if any.
fn credentials(
    options: &SchemaRegistryOptions,
    sasl: Option<&SaslOptions>,
) -> Result<Option<(String, String)>> {
    match options.basic_auth_credentials_source {
        BasicAuthCredentialsSource::UserInfo => {
            let user_info = options.basic_auth_user_info.trim();
            if user_info.is_empty() {
                return Ok(None);
            }
            let (user, password) = user_info.split_once(':').ok_or_else(|| {
                SchemaRegistryError::Config(
                    "basic_auth_user_info must have the form user:password".to_string(),
                )
            })?;
            Ok(Some((user.to_string(), password.to_string())))
        }
        BasicAuthCredentialsSource::SaslInherit => {
            let sasl = sasl.ok_or_else(|| {
                SchemaRegistryError::Config(
                    "basic_auth_credentials_source SaslInherit needs SASL options".to_string(),
                )
            })?;
            Ok(Some((sasl.sasl_username.clone(), sasl.sasl_password.clone())))
        }
    }
}

fn read_file(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| SchemaRegistryError::Io {
        path: path.to_string(),
        source,
    })
}

//! Writing option groups into a librdkafka [`ClientConfig`].
//!
//! String options follow one rule: a blank value (empty or whitespace only) is
//! replaced by the documented default for that option, and an option that
//! still resolves to an empty string is not written at all, leaving
//! librdkafka's own default in place.

use crate::context::log_level;
use crate::enums::SecurityProtocol;
use rdkafka::config::ClientConfig;

/// An option group that contributes keys to a client configuration.
pub trait ApplyConfig {
    fn apply(&self, config: &mut ClientConfig);
}

/// Returns `value`, or `default` when `value` is blank.
pub fn resolve<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

/// Sets `key` to the resolved value unless it resolves to an empty string.
pub(crate) fn set_resolved(config: &mut ClientConfig, key: &str, value: &str, default: &str) {
    let value = resolve(value, default);
    if !value.is_empty() {
        config.set(key, value);
    }
}

pub(crate) fn set_value<T: ToString>(config: &mut ClientConfig, key: &str, value: T) {
    config.set(key, value.to_string());
}

/// Starting configuration shared by both tasks: brokers and security protocol.
pub fn base_config(brokers: &str, security_protocol: SecurityProtocol) -> ClientConfig {
    let mut config = ClientConfig::new();
    config
        .set("bootstrap.servers", brokers)
        .set("security.protocol", security_protocol.as_config_value())
        .set_log_level(log_level());
    config
}

/// Applies the `debug` contexts option and raises the client log level so the
/// requested debug output reaches the log.
pub(crate) fn set_debug(config: &mut ClientConfig, debug: &str) {
    let debug = resolve(debug, "");
    if !debug.is_empty() {
        config
            .set("debug", debug)
            .set_log_level(rdkafka::config::RDKafkaLogLevel::Debug);
    }
}

/// Logs the final configuration, masking anything that looks like a secret.
pub fn log_config(task: &str, config: &ClientConfig) {
    let mut entries: Vec<_> = config.config_map().iter().collect();
    entries.sort();
    for (key, value) in entries {
        if key.contains("password") || key.contains("secret") || key.ends_with(".pem") {
            tracing::debug!(task, "{key} = ******");
        } else {
            tracing::debug!(task, "{key} = {value}");
        }
    }
}

use crate::enums::{SaslMechanism, SaslOauthbearerMethod};
use crate::mapper::{set_resolved, set_value, ApplyConfig};
use rdkafka::config::ClientConfig;
use serde::Deserialize;

pub const DEFAULT_KERBEROS_PRINCIPAL: &str = "kafkaclient";
pub const DEFAULT_KERBEROS_SERVICE_NAME: &str = "kafka";

/// SASL authentication. Only applied when present.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SaslOptions {
    pub sasl_mechanism: SaslMechanism,
    /// Username for the PLAIN and SCRAM mechanisms.
    pub sasl_username: String,
    /// Password for the PLAIN and SCRAM mechanisms.
    pub sasl_password: String,
    pub sasl_oauthbearer_method: SaslOauthbearerMethod,
    /// Client identifier used with the OIDC method.
    pub sasl_oauthbearer_client_id: String,
    pub sasl_oauthbearer_client_secret: String,
    /// OAuth/OIDC issuer token endpoint URL used to retrieve tokens.
    pub sasl_oauthbearer_token_endpoint_url: String,
    /// SASL/OAUTHBEARER configuration, e.g. `principal=admin extension_traceId=123`.
    pub sasl_oauthbearer_config: String,
    /// Additional `key=value` pairs sent to the broker, comma separated.
    pub sasl_oauthbearer_extensions: String,
    /// Scope of the access request sent to the token endpoint.
    pub sasl_oauthbearer_scope: String,
    /// Path to the Kerberos keytab. The keytab and the relogin interval are
    /// only written when this is set.
    pub sasl_kerberos_keytab: String,
    /// Minimum time between key refresh attempts. 0 disables automatic refresh.
    pub sasl_kerberos_min_time_before_relogin: i32,
    /// This client's Kerberos principal name. Blank uses `kafkaclient`.
    pub sasl_kerberos_principal: String,
    /// Kerberos principal name Kafka runs as. Blank uses `kafka`.
    pub sasl_kerberos_service_name: String,
}

impl Default for SaslOptions {
    fn default() -> Self {
        Self {
            sasl_mechanism: SaslMechanism::default(),
            sasl_username: String::new(),
            sasl_password: String::new(),
            sasl_oauthbearer_method: SaslOauthbearerMethod::default(),
            sasl_oauthbearer_client_id: String::new(),
            sasl_oauthbearer_client_secret: String::new(),
            sasl_oauthbearer_token_endpoint_url: String::new(),
            sasl_oauthbearer_config: String::new(),
            sasl_oauthbearer_extensions: String::new(),
            sasl_oauthbearer_scope: String::new(),
            sasl_kerberos_keytab: String::new(),
            sasl_kerberos_min_time_before_relogin: 60000,
            sasl_kerberos_principal: DEFAULT_KERBEROS_PRINCIPAL.to_string(),
            sasl_kerberos_service_name: DEFAULT_KERBEROS_SERVICE_NAME.to_string(),
        }
    }
}

impl std::fmt::Debug for SaslOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaslOptions")
            .field("sasl_mechanism", &self.sasl_mechanism)
            .field("sasl_username", &self.sasl_username)
            .field("sasl_oauthbearer_method", &self.sasl_oauthbearer_method)
            .field("sasl_kerberos_principal", &self.sasl_kerberos_principal)
            .field("sasl_kerberos_service_name", &self.sasl_kerberos_service_name)
            .finish_non_exhaustive()
    }
}

impl ApplyConfig for SaslOptions {
    fn apply(&self, config: &mut ClientConfig) {
        config.set("sasl.mechanism", self.sasl_mechanism.as_config_value());
        set_resolved(config, "sasl.username", &self.sasl_username, "");
        set_resolved(config, "sasl.password", &self.sasl_password, "");
        config.set(
            "sasl.oauthbearer.method",
            self.sasl_oauthbearer_method.as_config_value(),
        );
        set_resolved(
            config,
            "sasl.oauthbearer.client.id",
            &self.sasl_oauthbearer_client_id,
            "",
        );
        set_resolved(
            config,
            "sasl.oauthbearer.client.secret",
            &self.sasl_oauthbearer_client_secret,
            "",
        );
        set_resolved(
            config,
            "sasl.oauthbearer.token.endpoint.url",
            &self.sasl_oauthbearer_token_endpoint_url,
            "",
        );
        set_resolved(config, "sasl.oauthbearer.config", &self.sasl_oauthbearer_config, "");
        set_resolved(
            config,
            "sasl.oauthbearer.extensions",
            &self.sasl_oauthbearer_extensions,
            "",
        );
        set_resolved(config, "sasl.oauthbearer.scope", &self.sasl_oauthbearer_scope, "");

        // Keytab handling is only compiled into librdkafka together with Cyrus SASL.
        if !self.sasl_kerberos_keytab.trim().is_empty() {
            config.set("sasl.kerberos.keytab", self.sasl_kerberos_keytab.as_str());
            set_value(
                config,
                "sasl.kerberos.min.time.before.relogin",
                self.sasl_kerberos_min_time_before_relogin,
            );
        }
        set_resolved(
            config,
            "sasl.kerberos.principal",
            &self.sasl_kerberos_principal,
            DEFAULT_KERBEROS_PRINCIPAL,
        );
        set_resolved(
            config,
            "sasl.kerberos.service.name",
            &self.sasl_kerberos_service_name,
            DEFAULT_KERBEROS_SERVICE_NAME,
        );
    }
}

use crate::enums::SslEndpointIdentificationAlgorithm;
use crate::mapper::{resolve, set_resolved, set_value, ApplyConfig};
use rdkafka::config::ClientConfig;
use serde::Deserialize;

pub const DEFAULT_CA_CERTIFICATE_STORES: &str = "Root";

/// TLS settings for broker connections. Only applied when present.
///
/// Location fields point at files on disk, `*_pem` fields carry the PEM text
/// itself. Blank fields are left out of the client configuration.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SslOptions {
    pub ssl_endpoint_identification_algorithm: SslEndpointIdentificationAlgorithm,
    /// Verify the broker certificate.
    pub enable_ssl_certificate_verification: bool,
    /// Client public key (PEM) used for authentication.
    pub ssl_certificate_location: String,
    pub ssl_certificate_pem: String,
    /// Windows certificate stores to load CA certificates from. Ignored on
    /// other platforms. Blank uses `Root`.
    pub ssl_ca_certificate_stores: String,
    /// File or directory of CA certificates for verifying the broker key.
    pub ssl_ca_location: String,
    pub ssl_ca_pem: String,
    /// Client private key (PEM) used for authentication.
    pub ssl_key_location: String,
    pub ssl_key_password: String,
    pub ssl_key_pem: String,
    /// PKCS#12 keystore holding the client key and certificate.
    pub ssl_keystore_location: String,
    pub ssl_keystore_password: String,
    /// Path to an OpenSSL engine library.
    pub ssl_engine_location: String,
    pub ssl_cipher_suites: String,
    /// Certificate revocation list location.
    pub ssl_crl_location: String,
    /// Supported curves, in the format of OpenSSL's `SSL_set1_curves_list`.
    pub ssl_curves_list: String,
    /// Signature algorithms, in the format of OpenSSL's `SSL_set1_sigalgs_list`.
    pub ssl_sigalgs_list: String,
}

impl Default for SslOptions {
    fn default() -> Self {
        Self {
            ssl_endpoint_identification_algorithm: SslEndpointIdentificationAlgorithm::default(),
            enable_ssl_certificate_verification: true,
            ssl_certificate_location: String::new(),
            ssl_certificate_pem: String::new(),
            ssl_ca_certificate_stores: DEFAULT_CA_CERTIFICATE_STORES.to_string(),
            ssl_ca_location: String::new(),
            ssl_ca_pem: String::new(),
            ssl_key_location: String::new(),
            ssl_key_password: String::new(),
            ssl_key_pem: String::new(),
            ssl_keystore_location: String::new(),
            ssl_keystore_password: String::new(),
            ssl_engine_location: String::new(),
            ssl_cipher_suites: String::new(),
            ssl_crl_location: String::new(),
            ssl_curves_list: String::new(),
            ssl_sigalgs_list: String::new(),
        }
    }
}

impl std::fmt::Debug for SslOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SslOptions")
            .field(
                "ssl_endpoint_identification_algorithm",
                &self.ssl_endpoint_identification_algorithm,
            )
            .field(
                "enable_ssl_certificate_verification",
                &self.enable_ssl_certificate_verification,
            )
            .field("ssl_certificate_location", &self.ssl_certificate_location)
            .field("ssl_ca_location", &self.ssl_ca_location)
            .field("ssl_key_location", &self.ssl_key_location)
            .field("ssl_keystore_location", &self.ssl_keystore_location)
            .finish_non_exhaustive()
    }
}

impl ApplyConfig for SslOptions {
    fn apply(&self, config: &mut ClientConfig) {
        config.set(
            "ssl.endpoint.identification.algorithm",
            self.ssl_endpoint_identification_algorithm.as_config_value(),
        );
        set_value(
            config,
            "enable.ssl.certificate.verification",
            self.enable_ssl_certificate_verification,
        );
        set_resolved(config, "ssl.certificate.location", &self.ssl_certificate_location, "");
        set_resolved(config, "ssl.certificate.pem", &self.ssl_certificate_pem, "");
        if cfg!(windows) {
            config.set(
                "ssl.ca.certificate.stores",
                resolve(&self.ssl_ca_certificate_stores, DEFAULT_CA_CERTIFICATE_STORES),
            );
        }
        set_resolved(config, "ssl.ca.location", &self.ssl_ca_location, "");
        set_resolved(config, "ssl.ca.pem", &self.ssl_ca_pem, "");
        set_resolved(config, "ssl.key.location", &self.ssl_key_location, "");
        set_resolved(config, "ssl.key.password", &self.ssl_key_password, "");
        set_resolved(config, "ssl.key.pem", &self.ssl_key_pem, "");
        set_resolved(config, "ssl.keystore.location", &self.ssl_keystore_location, "");
        set_resolved(config, "ssl.keystore.password", &self.ssl_keystore_password, "");
        set_resolved(config, "ssl.engine.location", &self.ssl_engine_location, "");
        set_resolved(config, "ssl.cipher.suites", &self.ssl_cipher_suites, "");
        set_resolved(config, "ssl.crl.location", &self.ssl_crl_location, "");
        set_resolved(config, "ssl.curves.list", &self.ssl_curves_list, "");
        set_resolved(config, "ssl.sigalgs.list", &self.ssl_sigalgs_list, "");
    }
}

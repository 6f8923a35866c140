//! Enum-valued task options and their librdkafka string values.
//!
//! Every enum maps to its configuration value through a total `match`, so an
//! option can never reach the client configuration with an unmapped value.
//! Parsing from text accepts either the variant name or the librdkafka value,
//! ignoring case, `_` and `-` (`SaslSsl`, `sasl_ssl` and `SASL-SSL` are all the
//! same protocol).

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($field:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $value:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize)]
        #[serde(try_from = "String")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Value written into the librdkafka configuration.
            pub fn as_config_value(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, ConfigError> {
                let wanted = normalize(s);
                $(
                    if wanted == normalize(stringify!($variant)) || wanted == normalize($value) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ConfigError::InvalidEnumValue {
                    field: $field,
                    value: s.to_string(),
                })
            }
        }

        impl TryFrom<String> for $name {
            type Error = ConfigError;

            fn try_from(value: String) -> Result<Self, ConfigError> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_config_value())
            }
        }
    };
}

config_enum! {
    /// Protocol used to communicate with brokers.
    pub enum SecurityProtocol ("security_protocol") {
        #[default]
        Plaintext => "plaintext",
        Ssl => "ssl",
        SaslPlaintext => "sasl_plaintext",
        SaslSsl => "sasl_ssl",
    }
}

config_enum! {
    /// Number of in-sync replica acknowledgements required before a write is
    /// considered delivered.
    pub enum Acks ("acks") {
        /// Broker does not send any response to the client.
        #[default]
        None => "0",
        /// Only the partition leader acknowledges.
        Leader => "1",
        /// All in-sync replicas acknowledge.
        All => "all",
    }
}

config_enum! {
    /// Whether transactional messages that are not yet committed are visible.
    pub enum IsolationLevel ("isolation_level") {
        ReadUncommitted => "read_uncommitted",
        #[default]
        ReadCommitted => "read_committed",
    }
}

config_enum! {
    pub enum BrokerAddressFamily ("broker_address_family") {
        #[default]
        Any => "any",
        V4 => "v4",
        V6 => "v6",
    }
}

config_enum! {
    /// Where to start when there is no committed offset, or it is out of range.
    pub enum AutoOffsetReset ("auto_offset_reset") {
        #[default]
        Latest => "latest",
        Earliest => "earliest",
        Error => "error",
    }
}

config_enum! {
    pub enum SaslMechanism ("sasl_mechanism") {
        Gssapi => "GSSAPI",
        Plain => "PLAIN",
        #[default]
        ScramSha256 => "SCRAM-SHA-256",
        ScramSha512 => "SCRAM-SHA-512",
        OAuthBearer => "OAUTHBEARER",
    }
}

config_enum! {
    pub enum SaslOauthbearerMethod ("sasl_oauthbearer_method") {
        #[default]
        Default => "default",
        Oidc => "oidc",
    }
}

config_enum! {
    /// Endpoint identification algorithm used to validate the broker hostname
    /// against its certificate.
    pub enum SslEndpointIdentificationAlgorithm ("ssl_endpoint_identification_algorithm") {
        #[default]
        None => "none",
        Https => "https",
    }
}

config_enum! {
    /// Partitioner used when a produce call does not name a partition.
    pub enum Partitioner ("partitioner") {
        /// Random distribution.
        Random => "random",
        /// CRC32 hash of the key. Empty and null keys map to a single partition.
        Consistent => "consistent",
        /// CRC32 hash of the key. Empty and null keys are randomly partitioned.
        #[default]
        ConsistentRandom => "consistent_random",
        /// Java producer compatible murmur2 hash of the key.
        Murmur2 => "murmur2",
        /// Murmur2 hash of the key. Null keys are randomly partitioned.
        Murmur2Random => "murmur2_random",
    }
}

config_enum! {
    pub enum CompressionType ("compression_type") {
        #[default]
        None => "none",
        Gzip => "gzip",
        Snappy => "snappy",
        Lz4 => "lz4",
        Zstd => "zstd",
    }
}

config_enum! {
    /// Where schema registry basic-auth credentials come from.
    pub enum BasicAuthCredentialsSource ("basic_auth_credentials_source") {
        /// `basic_auth_user_info` holds `user:password`.
        #[default]
        UserInfo => "USER_INFO",
        /// Reuse the SASL username and password.
        SaslInherit => "SASL_INHERIT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_values() {
        assert_eq!(Acks::None.as_config_value(), "0");
        assert_eq!(Acks::Leader.as_config_value(), "1");
        assert_eq!(Acks::All.as_config_value(), "all");
        assert_eq!(SecurityProtocol::SaslSsl.as_config_value(), "sasl_ssl");
        assert_eq!(SaslMechanism::ScramSha512.as_config_value(), "SCRAM-SHA-512");
        assert_eq!(Partitioner::Murmur2Random.as_config_value(), "murmur2_random");
        assert_eq!(IsolationLevel::ReadCommitted.as_config_value(), "read_committed");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SecurityProtocol::default(), SecurityProtocol::Plaintext);
        assert_eq!(Acks::default(), Acks::None);
        assert_eq!(AutoOffsetReset::default(), AutoOffsetReset::Latest);
        assert_eq!(SaslMechanism::default(), SaslMechanism::ScramSha256);
        assert_eq!(Partitioner::default(), Partitioner::ConsistentRandom);
        assert_eq!(
            BasicAuthCredentialsSource::default(),
            BasicAuthCredentialsSource::UserInfo
        );
    }

    #[test]
    fn test_parse_variant_name_and_config_value() {
        assert_eq!(
            "SaslPlaintext".parse::<SecurityProtocol>().unwrap(),
            SecurityProtocol::SaslPlaintext
        );
        assert_eq!(
            "sasl_plaintext".parse::<SecurityProtocol>().unwrap(),
            SecurityProtocol::SaslPlaintext
        );
        assert_eq!(
            "scram-sha-256".parse::<SaslMechanism>().unwrap(),
            SaslMechanism::ScramSha256
        );
        assert_eq!("all".parse::<Acks>().unwrap(), Acks::All);
        assert_eq!("0".parse::<Acks>().unwrap(), Acks::None);
        assert_eq!(" V6 ".parse::<BrokerAddressFamily>().unwrap(), BrokerAddressFamily::V6);
    }

    #[test]
    fn test_parse_unknown_value_names_field() {
        let err = "carrier-pigeon".parse::<SecurityProtocol>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnumValue {
                field: "security_protocol",
                value: "carrier-pigeon".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid value 'carrier-pigeon' for security_protocol"
        );
    }

    #[test]
    fn test_deserialize_from_string() {
        let parsed: Partitioner = serde_json::from_str("\"murmur2\"").unwrap();
        assert_eq!(parsed, Partitioner::Murmur2);

        let err = serde_json::from_str::<IsolationLevel>("\"dirty\"").unwrap_err();
        assert!(err.to_string().contains("isolation_level"));
    }
}

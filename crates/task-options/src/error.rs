use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Invalid value '{value}' for {field}")]
    InvalidEnumValue { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

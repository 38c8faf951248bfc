use thiserror::Error;

use crate::ConfigOption;

/// Failure to resolve a `Configuration`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A resolved value could not be coerced into the option's type
    #[error("invalid value '{value}' for {option}: {reason}")]
    InvalidValue {
        option: ConfigOption,
        value: String,
        reason: String,
    },

    /// HTTPS was requested without certificate and key paths
    #[error("HTTPS requires both TLS_CERTIFICATE and TLS_PRIVATE_KEY")]
    MissingTls,

    /// A property file could not be read or parsed
    #[error("failed to load property file {path}: {reason}")]
    PropertyFile { path: String, reason: String },
}

impl ConfigurationError {
    pub(crate) fn invalid(option: ConfigOption, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            option,
            value: value.to_owned(),
            reason: reason.into(),
        }
    }
}

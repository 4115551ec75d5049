//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or interpreting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A configuration field has an invalid value.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

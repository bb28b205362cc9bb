//! Error types for option declaration and argument parsing.
//!
//! Declaration mistakes surface as `InvalidArgument` to the caller that
//! declared the option. Parse failures (`IllegalOption`, `MissingParameter`)
//! abort the whole `parse` call; no partial results are returned.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced by the option registry, the parser and the facade.
#[derive(Debug, Error)]
pub enum Error {
    /// Declaration-time misuse (no flag, duplicate flag, malformed flag).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// An option-shaped argument that was never declared.
    #[error("illegal option: {option}")]
    IllegalOption { option: String },

    /// A required value could not be obtained.
    #[error("option requires a parameter: {option}")]
    MissingParameter { option: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn illegal_short(flag: char) -> Self {
        Error::IllegalOption {
            option: format!("-{}", flag),
        }
    }

    pub(crate) fn illegal_long(flag: &str) -> Self {
        Error::IllegalOption {
            option: format!("--{}", flag),
        }
    }

    pub(crate) fn missing_short(flag: char, token: &str) -> Self {
        let option = if token.len() > 2 {
            format!("-{} in {}", flag, token)
        } else {
            format!("-{}", flag)
        };
        Error::MissingParameter { option }
    }

    pub(crate) fn missing_long(flag: &str) -> Self {
        Error::MissingParameter {
            option: format!("--{}", flag),
        }
    }

    /// Stable error type tag, e.g. for machine-readable output.
    pub fn error_type(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::IllegalOption { .. } => "illegal_option",
            Error::MissingParameter { .. } => "missing_parameter",
            Error::Config(_) => "config_error",
        }
    }

    /// Whether the error came from parsing user arguments rather than
    /// from declaring options or loading configuration.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::IllegalOption { .. } | Error::MissingParameter { .. }
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

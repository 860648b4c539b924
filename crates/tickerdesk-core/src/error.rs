use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Generic message used whenever the service gives us nothing better.
pub const SERVICE_UNAVAILABLE: &str = "Service temporarily unavailable";

/// Message used for a success status with no body to decode.
pub const EMPTY_RESPONSE: &str = "Empty response from server";

/// Validation errors for locally constructed values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp is not ISO-8601: '{value}'")]
    InvalidTimestamp { value: String },
    #[error("date is not YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
}

/// Startup configuration errors. Fatal by design: callers report and exit,
/// they do not recover.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not set")]
    MissingBaseUrl { var: &'static str },
    #[error("base URL cannot be empty")]
    EmptyBaseUrl,
    #[error("base URL must start with http:// or https://: '{value}'")]
    InvalidScheme { value: String },
}

/// Normalized failure from the remote API.
///
/// Every transport, decode, and service-side failure collapses into a single
/// human-readable message at the [`ApiClient`](crate::ApiClient) boundary.
/// No error-kind information survives past that boundary; components that
/// want detail must look at the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The catch-all used for transport failures and undecodable bodies.
    pub fn service_unavailable() -> Self {
        Self::new(SERVICE_UNAVAILABLE)
    }

    /// A success status whose body was empty.
    pub fn empty_response() -> Self {
        Self::new(EMPTY_RESPONSE)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

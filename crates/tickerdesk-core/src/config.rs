//! Process-wide client configuration.
//!
//! The base endpoint URL is required configuration: it is read and validated
//! exactly once at startup, and its absence is a fatal startup condition.
//! Nothing in the library falls back to a default endpoint at call time.

use crate::error::ConfigError;

/// Environment variable holding the service base URL.
pub const BASE_URL_VAR: &str = "TICKERDESK_API_URL";

/// Fixed transport timeout applied to every request, in milliseconds.
pub const REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Validated client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout_ms: u64,
}

impl ApiConfig {
    /// Validate a base URL and build a config with the standard timeout.
    ///
    /// The URL must carry an explicit `http`/`https` scheme; a trailing
    /// slash is trimmed so path joining stays uniform.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let trimmed = base_url.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::InvalidScheme {
                value: trimmed.to_owned(),
            });
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_owned(),
            timeout_ms: REQUEST_TIMEOUT_MS,
        })
    }

    /// Read the base URL from [`BASE_URL_VAR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = std::env::var(BASE_URL_VAR)
            .map_err(|_| ConfigError::MissingBaseUrl { var: BASE_URL_VAR })?;
        Self::new(value)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Join a path onto the base URL. `path` must start with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        debug_assert!(path.starts_with('/'));
        format!("{}{}", self.base_url, path)
    }
}

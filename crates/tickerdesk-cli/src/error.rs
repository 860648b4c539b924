use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] tickerdesk_core::ConfigError),

    #[error(transparent)]
    Validation(#[from] tickerdesk_core::ValidationError),

    #[error(transparent)]
    Api(#[from] tickerdesk_core::ApiError),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Usage(_) => 2,
            Self::Api(_) => 3,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}

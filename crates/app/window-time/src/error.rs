use std::path::PathBuf;

use thiserror::Error;
use window_provider::ProviderKind;

#[derive(Debug, Error)]
pub enum ReceiverError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read configuration from {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to create provider for key \"{kind}\": {source}")]
    Provider {
        kind: ProviderKind,
        #[source]
        source: window_provider::ProviderError,
    },

    #[error("Metrics sink error: {0}")]
    Sink(String),

    #[error("Join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Receiver is already running")]
    AlreadyRunning,
}

impl ReceiverError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }
}

pub type ReceiverResult<T> = std::result::Result<T, ReceiverError>;

use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Platform error: {message}")]
    Platform {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Unsupported")]
    Unsupported,

    #[error("No display available")]
    NoDisplay,

    #[error("No window currently has focus")]
    NoActiveWindow,

    #[error("Provider call cancelled")]
    Cancelled,

    #[error("Invalid provider configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl ProviderError {
    pub fn platform(message: impl Into<String>) -> Self {
        ProviderError::Platform {
            message: message.into(),
            source: None,
        }
    }

    pub fn platform_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ProviderError::Platform {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

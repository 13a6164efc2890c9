use async_trait::async_trait;
use enum_dispatch::enum_dispatch;
use tokio_util::sync::CancellationToken;

use crate::{ActiveWindow, ProviderKind, ProviderResult, ProvidersConfig, X11Provider};

/// A configured provider, one variant per [`ProviderKind`].
#[enum_dispatch(ActiveWindowProvider)]
#[derive(Debug, Clone)]
pub enum WindowProvider {
    X11Provider,
}

/// A source of the currently focused window.
#[async_trait]
#[enum_dispatch]
pub trait ActiveWindowProvider {
    /// Returns the window holding focus right now.
    ///
    /// Implementations should give up with
    /// [`ProviderError::Cancelled`](crate::ProviderError::Cancelled) once
    /// `cancel` fires.
    async fn active_window(&self, cancel: &CancellationToken) -> ProviderResult<ActiveWindow>;
}

impl WindowProvider {
    /// Builds the provider for `kind` from its section of `config`.
    pub fn new(kind: ProviderKind, config: &ProvidersConfig) -> ProviderResult<WindowProvider> {
        match kind {
            ProviderKind::X11 => {
                let x11 = config.x11.clone().unwrap_or_default();
                Ok(WindowProvider::X11Provider(X11Provider::new(&x11)?))
            }
        }
    }
}

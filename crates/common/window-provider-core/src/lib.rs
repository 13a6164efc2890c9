mod active_window;
mod config;
mod error;

pub use active_window::ActiveWindow;
pub use config::{ProviderKind, ProvidersConfig, X11Config};
pub use error::{ProviderError, ProviderResult};

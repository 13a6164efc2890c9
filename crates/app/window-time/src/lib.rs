// Re-export main types for easy access
pub use aggregator::{Aggregator, WindowKey};
pub use config::{MetricConfig, MetricsConfig, ReceiverConfig};
pub use controller::{MetricsSink, ScrapeController};
pub use emitter::{Emitter, WindowTimePoint};
pub use error::{ReceiverError, ReceiverResult};
pub use metrics::{DataPoint, Metric, Metrics, WINDOW_TIME_METRIC};
pub use receiver::ActiveWindowReceiver;
pub use sampler::Sampler;
pub use ticker::{ChannelTicker, IntervalTicker, TickHandle, Ticker};
pub use title::{ParsedTitle, parse_title};
// Re-export provider types for convenience
pub use window_provider::{
    ActiveWindow, ActiveWindowProvider, ProviderError, ProviderKind, ProviderResult,
    ProvidersConfig, WindowProvider, X11Config,
};

// Internal modules
mod aggregator;
mod config;
mod controller;
mod emitter;
mod error;
mod metrics;
mod receiver;
mod sampler;
mod ticker;
mod title;

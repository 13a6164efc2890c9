//! Fixed-interval sampling of the focused window
use std::{sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use window_provider::{ActiveWindowProvider, ProviderError};

use crate::{aggregator::Aggregator, ticker::Ticker};

/// Queries every provider on each tick and credits the focused window with
/// one sampling interval.
pub struct Sampler<P> {
    aggregator: Arc<Aggregator>,
    interval: Duration,
    providers: Vec<P>,
}

impl<P> Sampler<P>
where
    P: ActiveWindowProvider + Send + Sync,
{
    pub fn new(aggregator: Arc<Aggregator>, interval: Duration, providers: Vec<P>) -> Self {
        debug!(
            "Creating sampler with interval {:?} and {} providers",
            interval,
            providers.len()
        );

        Self {
            aggregator,
            interval,
            providers,
        }
    }

    /// Samples on every tick until `cancel` fires or the ticker closes.
    pub async fn run<T: Ticker>(&self, mut ticker: T, cancel: CancellationToken) {
        debug!("Starting window sampling");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Window sampling cancelled");
                    break;
                }
                ticked = ticker.tick() => {
                    if !ticked {
                        debug!("Tick source closed, stopping window sampling");
                        break;
                    }
                    self.sample(&cancel).await;
                }
            }
        }
    }

    /// Runs one sampling pass over all providers in registration order and
    /// returns how many of them recorded a window.
    ///
    /// A failing or timed out provider is logged and skipped for this pass
    /// only. Nothing is recorded once `cancel` has fired.
    pub async fn sample(&self, cancel: &CancellationToken) -> usize {
        let mut recorded = 0;

        for (index, provider) in self.providers.iter().enumerate() {
            if cancel.is_cancelled() {
                break;
            }

            match tokio::time::timeout(self.interval, provider.active_window(cancel)).await {
                Ok(Ok(window)) => {
                    if cancel.is_cancelled() {
                        debug!("Dropping sample from provider {index} observed after cancellation");
                        break;
                    }
                    self.aggregator.record(window.into(), self.interval);
                    recorded += 1;
                }
                Ok(Err(ProviderError::Cancelled)) => break,
                Ok(Err(ProviderError::NoActiveWindow)) => {
                    debug!("Provider {index} reports no focused window");
                }
                Ok(Err(err)) => {
                    warn!("Provider {index} failed to get the active window: {err}");
                }
                Err(_) => {
                    warn!(
                        "Provider {index} did not answer within {:?}",
                        self.interval
                    );
                }
            }
        }

        recorded
    }
}

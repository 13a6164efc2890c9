//! Scrape scheduling and metric delivery
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};
use window_provider::ActiveWindowProvider;

use crate::{
    config::ReceiverConfig,
    error::ReceiverResult,
    metrics::Metrics,
    receiver::ActiveWindowReceiver,
    ticker::{IntervalTicker, Ticker},
};

/// Destination for scraped metrics.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn consume(&self, metrics: Metrics) -> ReceiverResult<()>;
}

/// Scrapes a receiver on `collection_interval` and hands every non-empty
/// batch to a [`MetricsSink`].
pub struct ScrapeController<S> {
    collection_interval: Duration,
    initial_delay: Duration,
    sink: S,
}

impl<S: MetricsSink> ScrapeController<S> {
    pub fn new(config: &ReceiverConfig, sink: S) -> Self {
        Self {
            collection_interval: config.collection_interval,
            initial_delay: config.initial_delay,
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Waits `initial_delay`, scrapes once, then scrapes every
    /// `collection_interval` until `cancel` fires.
    pub async fn run<P>(&self, receiver: &ActiveWindowReceiver<P>, cancel: CancellationToken)
    where
        P: ActiveWindowProvider + Send + Sync + 'static,
    {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(self.initial_delay) => {}
        }

        self.scrape_once(receiver).await;
        self.run_with_ticker(receiver, IntervalTicker::new(self.collection_interval), cancel)
            .await;
    }

    /// Scrapes on every tick of `ticker` until `cancel` fires or the ticker
    /// closes.
    pub async fn run_with_ticker<P, T>(
        &self,
        receiver: &ActiveWindowReceiver<P>,
        mut ticker: T,
        cancel: CancellationToken,
    ) where
        P: ActiveWindowProvider + Send + Sync + 'static,
        T: Ticker,
    {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Scrape controller cancelled");
                    break;
                }
                ticked = ticker.tick() => {
                    if !ticked {
                        break;
                    }
                    self.scrape_once(receiver).await;
                }
            }
        }
    }

    /// Returns whether a batch was delivered.
    pub async fn scrape_once<P>(&self, receiver: &ActiveWindowReceiver<P>) -> bool
    where
        P: ActiveWindowProvider + Send + Sync + 'static,
    {
        let metrics = receiver.scrape();
        if metrics.is_empty() {
            debug!("Nothing accumulated yet, skipping delivery");
            return false;
        }

        let count = metrics.data_point_count();
        match self.sink.consume(metrics).await {
            Ok(()) => {
                debug!("Delivered {count} window time data points");
                true
            }
            Err(err) => {
                error!("Failed to deliver metrics: {err}");
                false
            }
        }
    }
}

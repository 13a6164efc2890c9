//! Receiver lifecycle: provider resolution, background sampling, scraping
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use window_provider::{ActiveWindowProvider, WindowProvider};

use crate::{
    aggregator::Aggregator,
    config::ReceiverConfig,
    emitter::Emitter,
    error::{ReceiverError, ReceiverResult},
    metrics::Metrics,
    sampler::Sampler,
    ticker::{IntervalTicker, Ticker},
};

/// Owns the aggregator and runs one background sampling task that feeds it.
pub struct ActiveWindowReceiver<P = WindowProvider> {
    config: ReceiverConfig,
    aggregator: Arc<Aggregator>,
    sampler: Arc<Sampler<P>>,
    emitter: Emitter,
    cancel: Option<CancellationToken>,
    sampling_task: Option<JoinHandle<()>>,
}

impl ActiveWindowReceiver<WindowProvider> {
    /// Validates `config` and connects every configured provider.
    pub fn new(config: ReceiverConfig) -> ReceiverResult<Self> {
        config.validate()?;

        let providers = config
            .providers
            .kinds()
            .into_iter()
            .map(|kind| {
                WindowProvider::new(kind, &config.providers)
                    .map_err(|source| ReceiverError::Provider { kind, source })
            })
            .collect::<ReceiverResult<Vec<_>>>()?;

        Self::with_providers(config, providers)
    }
}

impl<P> ActiveWindowReceiver<P>
where
    P: ActiveWindowProvider + Send + Sync + 'static,
{
    /// Builds a receiver around providers that were created elsewhere. The
    /// `providers` section of `config` is ignored.
    pub fn with_providers(config: ReceiverConfig, providers: Vec<P>) -> ReceiverResult<Self> {
        config.validate_schedule()?;
        if providers.is_empty() {
            return Err(ReceiverError::configuration(
                "must specify at least one active window provider",
            ));
        }

        debug!(
            "Creating active window receiver with precision {:?} and {} providers",
            config.precision,
            providers.len()
        );

        let aggregator = Arc::new(Aggregator::new());
        let sampler = Arc::new(Sampler::new(
            Arc::clone(&aggregator),
            config.precision,
            providers,
        ));
        let emitter = Emitter::new(
            Arc::clone(&aggregator),
            config.metrics.clone(),
            Utc::now(),
        );

        Ok(Self {
            config,
            aggregator,
            sampler,
            emitter,
            cancel: None,
            sampling_task: None,
        })
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    pub fn aggregator(&self) -> &Arc<Aggregator> {
        &self.aggregator
    }

    /// Starts sampling on the wall clock, once per `precision`.
    pub fn start(&mut self) -> ReceiverResult<()> {
        let ticker = IntervalTicker::new(self.config.precision);
        self.start_with_ticker(ticker)
    }

    /// Starts sampling paced by `ticker`.
    pub fn start_with_ticker<T>(&mut self, ticker: T) -> ReceiverResult<()>
    where
        T: Ticker + 'static,
    {
        if self.is_running() {
            return Err(ReceiverError::AlreadyRunning);
        }

        debug!("Starting active window receiver");

        let cancel = CancellationToken::new();
        let sampler = Arc::clone(&self.sampler);
        let task_cancel = cancel.clone();
        self.sampling_task = Some(tokio::spawn(async move {
            sampler.run(ticker, task_cancel).await;
        }));
        self.cancel = Some(cancel);

        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.sampling_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Current accumulated focus time as metrics, timestamped now.
    pub fn scrape(&self) -> Metrics {
        self.scrape_at(Utc::now())
    }

    pub fn scrape_at(&self, now: DateTime<Utc>) -> Metrics {
        self.emitter.emit(now)
    }

    /// Waits for the sampling task to stop on its own, which happens when its
    /// ticker closes.
    pub async fn wait_stopped(&mut self) -> ReceiverResult<()> {
        if let Some(task) = self.sampling_task.take() {
            task.await?;
        }
        self.cancel = None;
        Ok(())
    }

    /// Cancels sampling and waits for the task to exit. Does nothing when
    /// the receiver is not running.
    pub async fn shutdown(&mut self) -> ReceiverResult<()> {
        if let Some(cancel) = self.cancel.take() {
            debug!("Shutting down active window receiver");
            cancel.cancel();
        }
        if let Some(task) = self.sampling_task.take() {
            task.await?;
        }
        Ok(())
    }
}

impl<P> Drop for ActiveWindowReceiver<P> {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }
}

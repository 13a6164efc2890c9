//! Tick sources driving the sampler
use std::time::Duration;

use async_trait::async_trait;
use tokio::{
    sync::mpsc,
    time::{self, Instant, Interval, MissedTickBehavior},
};

/// Paces the sampler.
#[async_trait]
pub trait Ticker: Send {
    /// Waits for the next tick. Returns `false` once the source is closed
    /// and no more ticks will come.
    async fn tick(&mut self) -> bool;
}

/// Wall-clock ticker. The first tick fires one full period after creation.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Ticker driven by hand through a [`TickHandle`].
#[derive(Debug)]
pub struct ChannelTicker {
    receiver: mpsc::UnboundedReceiver<()>,
}

/// Sends ticks to a [`ChannelTicker`]. Dropping every handle closes the
/// ticker once the queued ticks are consumed.
#[derive(Debug, Clone)]
pub struct TickHandle {
    sender: mpsc::UnboundedSender<()>,
}

impl ChannelTicker {
    pub fn pair() -> (TickHandle, ChannelTicker) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (TickHandle { sender }, ChannelTicker { receiver })
    }
}

impl TickHandle {
    /// Queues one tick. Returns `false` if the ticker has been dropped.
    pub fn tick(&self) -> bool {
        self.sender.send(()).is_ok()
    }

    pub fn tick_n(&self, count: usize) -> bool {
        (0..count).all(|_| self.tick())
    }
}

#[async_trait]
impl Ticker for ChannelTicker {
    async fn tick(&mut self) -> bool {
        self.receiver.recv().await.is_some()
    }
}

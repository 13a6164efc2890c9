//! Accumulated focus time per window
use std::time::Duration;

use dashmap::{DashMap, mapref::entry::Entry};
use tracing::debug;
use window_provider::ActiveWindow;

/// Accumulation bucket key. A title change on the same window starts a new
/// bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowKey {
    pub window_id: String,
    pub window_title: String,
}

impl WindowKey {
    pub fn new(window_id: impl Into<String>, window_title: impl Into<String>) -> Self {
        Self {
            window_id: window_id.into(),
            window_title: window_title.into(),
        }
    }
}

impl From<ActiveWindow> for WindowKey {
    fn from(window: ActiveWindow) -> Self {
        Self {
            window_id: window.id,
            window_title: window.title,
        }
    }
}

/// Concurrent map from [`WindowKey`] to the time that window held focus.
///
/// Values only ever grow. Nothing is evicted and emission never resets a
/// bucket, so every entry lives until the aggregator is dropped.
#[derive(Debug, Default)]
pub struct Aggregator {
    windows: DashMap<WindowKey, Duration>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` to the bucket for `key`, creating it if needed.
    ///
    /// The shard holding `key` stays write-locked for the whole
    /// read-modify-write, so concurrent records never lose an update.
    pub fn record(&self, key: WindowKey, delta: Duration) {
        match self.windows.entry(key) {
            Entry::Occupied(mut entry) => {
                let total = entry.get_mut();
                *total = total.saturating_add(delta);
            }
            Entry::Vacant(entry) => {
                debug!(
                    "New window bucket for {} ({:?})",
                    entry.key().window_id,
                    entry.key().window_title
                );
                entry.insert(delta);
            }
        }
    }

    /// Every bucket as it is while the map is walked. Writes landing during
    /// the walk may or may not be reflected.
    pub fn snapshot(&self) -> Vec<(WindowKey, Duration)> {
        self.windows
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn get(&self, key: &WindowKey) -> Option<Duration> {
        self.windows.get(key).map(|value| *value)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

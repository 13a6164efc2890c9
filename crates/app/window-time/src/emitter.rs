//! Converts accumulated focus time into metric data points
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::{
    aggregator::Aggregator,
    config::MetricsConfig,
    metrics::{Metrics, MetricsBuilder},
    title::parse_title,
};

/// One window's accumulated focus time at the moment of emission.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowTimePoint {
    pub window_id: String,
    pub window_title: String,
    /// Canonical application label derived from the title.
    pub label: String,
    pub seconds: f64,
    pub timestamp: DateTime<Utc>,
}

/// Reads the aggregator on the host's scrape cadence.
///
/// Emission is cumulative: buckets are never reset, so every scrape reports
/// the total focus time since the receiver started.
#[derive(Debug)]
pub struct Emitter {
    aggregator: Arc<Aggregator>,
    builder: Mutex<MetricsBuilder>,
}

impl Emitter {
    pub fn new(
        aggregator: Arc<Aggregator>,
        config: MetricsConfig,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            aggregator,
            builder: Mutex::new(MetricsBuilder::new(config, start_time)),
        }
    }

    /// One point per accumulation bucket, ordered by window id then title.
    pub fn points(&self, now: DateTime<Utc>) -> Vec<WindowTimePoint> {
        let mut snapshot = self.aggregator.snapshot();
        snapshot.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

        snapshot
            .into_iter()
            .map(|(key, elapsed)| {
                let label = parse_title(&key.window_title).label;
                WindowTimePoint {
                    window_id: key.window_id,
                    window_title: key.window_title,
                    label,
                    seconds: elapsed.as_secs_f64(),
                    timestamp: now,
                }
            })
            .collect()
    }

    pub fn emit(&self, now: DateTime<Utc>) -> Metrics {
        let points = self.points(now);
        let mut builder = self.builder.lock();
        for point in &points {
            builder.record_window_time(
                point.timestamp,
                point.seconds,
                &point.window_id,
                &point.window_title,
                &point.label,
            );
        }
        builder.emit()
    }
}

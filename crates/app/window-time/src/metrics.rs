//! Metric schema for reported window focus time
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::MetricsConfig;

pub const WINDOW_TIME_METRIC: &str = "system.gui.window.time";
const WINDOW_TIME_DESCRIPTION: &str = "Time a window has been focused";
const WINDOW_TIME_UNIT: &str = "s";

const ATTRIBUTE_WINDOW_ID: &str = "window.id";
const ATTRIBUTE_WINDOW_NAME: &str = "window.name";
const ATTRIBUTE_WINDOW_APP: &str = "window.app";

const RESOURCE_ENTITY_TYPE: &str = "entity.type";
const ENTITY_TYPE: &str = "host";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub start_time: DateTime<Utc>,
    pub time: DateTime<Utc>,
    pub value: f64,
    pub attributes: BTreeMap<String, String>,
}

/// A cumulative monotonic sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub monotonic: bool,
    pub cumulative: bool,
    pub data_points: Vec<DataPoint>,
}

/// One scrape's worth of metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub resource: BTreeMap<String, String>,
    pub metrics: Vec<Metric>,
}

impl Metrics {
    pub fn data_point_count(&self) -> usize {
        self.metrics.iter().map(|m| m.data_points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data_point_count() == 0
    }

    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }
}

/// Buffers data points between two calls to [`MetricsBuilder::emit`].
#[derive(Debug)]
pub(crate) struct MetricsBuilder {
    config: MetricsConfig,
    start_time: DateTime<Utc>,
    window_time: Vec<DataPoint>,
}

impl MetricsBuilder {
    pub(crate) fn new(config: MetricsConfig, start_time: DateTime<Utc>) -> Self {
        Self {
            config,
            start_time,
            window_time: Vec::new(),
        }
    }

    pub(crate) fn record_window_time(
        &mut self,
        time: DateTime<Utc>,
        seconds: f64,
        window_id: &str,
        window_name: &str,
        window_app: &str,
    ) {
        if !self.config.system_gui_window_time.enabled {
            return;
        }

        let attributes = BTreeMap::from([
            (ATTRIBUTE_WINDOW_ID.to_owned(), window_id.to_owned()),
            (ATTRIBUTE_WINDOW_NAME.to_owned(), window_name.to_owned()),
            (ATTRIBUTE_WINDOW_APP.to_owned(), window_app.to_owned()),
        ]);

        self.window_time.push(DataPoint {
            start_time: self.start_time,
            time,
            value: seconds,
            attributes,
        });
    }

    /// Takes every buffered point, leaving the builder empty.
    pub(crate) fn emit(&mut self) -> Metrics {
        let mut metrics = Vec::new();
        if self.config.system_gui_window_time.enabled {
            metrics.push(Metric {
                name: WINDOW_TIME_METRIC.to_owned(),
                description: WINDOW_TIME_DESCRIPTION.to_owned(),
                unit: WINDOW_TIME_UNIT.to_owned(),
                monotonic: true,
                cumulative: true,
                data_points: std::mem::take(&mut self.window_time),
            });
        }

        Metrics {
            resource: BTreeMap::from([(
                RESOURCE_ENTITY_TYPE.to_owned(),
                ENTITY_TYPE.to_owned(),
            )]),
            metrics,
        }
    }
}

//! Common test utilities for window-time integration tests

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use window_time::{
    ActiveWindow, ActiveWindowProvider, Metrics, MetricsSink, ProviderError, ProviderResult,
    ReceiverError, ReceiverResult,
};

/// Provider replaying a fixed list of answers, repeating the last one.
pub struct ScriptedProvider {
    answers: Vec<Option<(&'static str, &'static str)>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn always(id: &'static str, title: &'static str) -> Self {
        Self::sequence(vec![Some((id, title))])
    }

    pub fn failing() -> Self {
        Self::sequence(vec![None])
    }

    /// `None` entries answer with an error.
    pub fn sequence(answers: Vec<Option<(&'static str, &'static str)>>) -> Self {
        Self {
            answers,
            calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActiveWindowProvider for ScriptedProvider {
    async fn active_window(&self, _cancel: &CancellationToken) -> ProviderResult<ActiveWindow> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self.answers[call.min(self.answers.len() - 1)];
        match answer {
            Some((id, title)) => Ok(ActiveWindow::new(id, title)),
            None => Err(ProviderError::platform("window system unavailable")),
        }
    }
}

/// Sink keeping every batch it receives.
#[derive(Default)]
#[allow(dead_code)]
pub struct CollectingSink {
    pub batches: Mutex<Vec<Metrics>>,
}

#[async_trait]
impl MetricsSink for CollectingSink {
    async fn consume(&self, metrics: Metrics) -> ReceiverResult<()> {
        self.batches.lock().unwrap().push(metrics);
        Ok(())
    }
}

/// Sink rejecting every batch.
#[derive(Default)]
#[allow(dead_code)]
pub struct FailingSink {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl MetricsSink for FailingSink {
    async fn consume(&self, _metrics: Metrics) -> ReceiverResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(ReceiverError::sink("backend unreachable"))
    }
}

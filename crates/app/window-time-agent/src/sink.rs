use async_trait::async_trait;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt, Stdout},
    sync::Mutex,
};
use window_time::{Metrics, MetricsSink, ReceiverError, ReceiverResult};

/// Writes each metrics batch as one JSON document per line.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl JsonLinesSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> MetricsSink for JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn consume(&self, metrics: Metrics) -> ReceiverResult<()> {
        let mut line =
            serde_json::to_vec(&metrics).map_err(|e| ReceiverError::sink(e.to_string()))?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer
            .write_all(&line)
            .await
            .map_err(|e| ReceiverError::sink(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| ReceiverError::sink(e.to_string()))
    }
}

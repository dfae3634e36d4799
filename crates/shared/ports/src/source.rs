use async_trait::async_trait;
use sentinel_core::Sample;

use crate::error::SourceError;

/// Port for pulling the next live sample
///
/// Each call may block on I/O. Timeouts and backoff, if any, are the
/// adapter's business; the ingestion loop imposes none.
#[async_trait]
pub trait SampleSource: Send {
    /// Pull one sample or report why none is available this cycle
    async fn pull(&mut self) -> Result<Sample, SourceError>;

    /// Source name for logs
    fn name(&self) -> &str {
        "SampleSource"
    }
}

/// Port for fetching recent history in bulk, used to warm the buffer at startup
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Up to `limit` most recent samples, oldest first
    async fn recent(&self, limit: usize) -> Result<Vec<Sample>, SourceError>;
}

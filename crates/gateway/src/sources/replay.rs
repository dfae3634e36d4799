use async_trait::async_trait;
use sentinel_core::Sample;
use sentinel_ports::{SampleSource, SourceError};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

use super::{FreshnessGuard, validate};

/// Replays recorded samples from a JSON-lines file
///
/// One `{"timestamp": "<RFC3339>", "price": <f64>}` object per line, oldest
/// first. Blank lines are skipped. A line that does not parse is reported
/// as `Malformed` and the next pull moves on to the following line; end of
/// file is `Exhausted`.
pub struct ReplaySource {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
    freshness: FreshnessGuard,
}

impl ReplaySource {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .await
            .map_err(|e| SourceError::unavailable(format!("{}: {}", path.display(), e)))?;

        debug!("Replaying samples from {}", path.display());
        Ok(Self {
            path,
            lines: BufReader::new(file).lines(),
            line_no: 0,
            freshness: FreshnessGuard::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines consumed so far, blank ones included
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

#[async_trait]
impl SampleSource for ReplaySource {
    async fn pull(&mut self) -> Result<Sample, SourceError> {
        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|e| SourceError::unavailable(format!("{}: {}", self.path.display(), e)))?;

            let Some(line) = line else {
                return Err(SourceError::Exhausted);
            };
            self.line_no += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let sample: Sample = serde_json::from_str(line).map_err(|e| {
                SourceError::malformed(format!("{} line {}: {}", self.path.display(), self.line_no, e))
            })?;
            return self.freshness.check(validate(sample)?);
        }
    }

    fn name(&self) -> &str {
        "Replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let result = ReplaySource::open("/nonexistent/sentinel/replay.jsonl").await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }
}

//! Ingestion loop - one cycle per sample
//!
//! Each cycle walks a fixed sequence of phases:
//!
//! ```text
//! Fetching → Buffering → Gated  → Skipped
//!                      ↘ Ready  → Signaled
//!                               ↘ Skipped (inference failed)
//! ```
//!
//! Source and inference failures end the cycle early and the loop moves
//! on. A sample older than the buffer's newest one counts as a source
//! failure and never reaches the buffer. Sink failures are reported but do
//! not change the outcome. The only error that escapes is a violated
//! buffer invariant, which means the loop itself is broken.

use sentinel_core::{
    BufferError, Emission, FeatureVector, HistoryBuffer, Sample, Signal, SignalRecord, Timestamp,
    WarmUp,
};
use sentinel_indicators::{IndicatorEngine, is_ready, missing_features};
use sentinel_ports::{
    Classifier, HistorySource, InferenceError, SampleSource, SignalSink, SourceError,
};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::shutdown::Shutdown;

/// Fatal loop error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    #[error("Buffer invariant violated: {0}")]
    Buffer(#[from] BufferError),
}

/// Where the current (or last) cycle is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Fetching,
    Buffering,
    /// Features computed, at least one undefined
    Gated,
    /// Features computed, all defined
    Ready,
    /// Cycle ended without a signal
    Skipped,
    Signaled,
}

/// How a single cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Signaled(Signal),
    WarmingUp { missing: Vec<&'static str> },
    SourceFailed(SourceError),
    Stale,
    InferenceFailed(InferenceError),
    /// The source has no more samples; the loop stops
    Exhausted,
}

/// Counters reported by the loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub cycles: u64,
    pub signals: u64,
    pub warmups: u64,
    pub source_failures: u64,
    pub stale: u64,
    pub inference_failures: u64,
    pub sink_failures: u64,
}

/// Loop tuning
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSettings {
    pub capacity: usize,
    /// Minimum time between the starts of two cycles
    pub poll_interval: Duration,
    /// Cycles between periodic stats lines
    pub stats_log_interval: u64,
    pub max_cycles: Option<u64>,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            capacity: sentinel_core::DEFAULT_CAPACITY,
            poll_interval: Duration::from_secs(60),
            stats_log_interval: 100,
            max_cycles: None,
        }
    }
}

/// Owns the buffer and drives source → engine → gate → classifier → sink
pub struct IngestionLoop {
    source: Box<dyn SampleSource>,
    classifier: Box<dyn Classifier>,
    sink: Box<dyn SignalSink>,
    engine: IndicatorEngine,
    buffer: HistoryBuffer,
    settings: LoopSettings,
    stats: LoopStats,
    phase: CyclePhase,
}

impl IngestionLoop {
    pub fn new(
        source: Box<dyn SampleSource>,
        classifier: Box<dyn Classifier>,
        sink: Box<dyn SignalSink>,
        engine: IndicatorEngine,
        settings: LoopSettings,
    ) -> Self {
        Self {
            source,
            classifier,
            sink,
            engine,
            buffer: HistoryBuffer::new(settings.capacity),
            settings,
            stats: LoopStats::default(),
            phase: CyclePhase::Fetching,
        }
    }

    pub fn buffer(&self) -> &HistoryBuffer {
        &self.buffer
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn settings(&self) -> &LoopSettings {
        &self.settings
    }

    /// Prefill the buffer with historical samples, oldest first
    ///
    /// Unusable or out-of-order samples are dropped. Returns how many were
    /// accepted.
    pub fn seed(&mut self, samples: impl IntoIterator<Item = Sample>) -> usize {
        let mut accepted = 0;
        for sample in samples {
            if !sample.is_usable() {
                debug!("Dropping unusable history sample at {}", sample.timestamp());
                continue;
            }
            match self.buffer.append(sample) {
                Ok(_) => accepted += 1,
                Err(e) => warn!("Dropping history sample: {}", e),
            }
        }
        accepted
    }

    /// Prefill from a history source; failure leaves the buffer untouched
    pub async fn warm_start(&mut self, history: &dyn HistorySource, limit: usize) -> usize {
        match history.recent(limit).await {
            Ok(samples) => {
                let accepted = self.seed(samples);
                info!(
                    "Warm start: {} samples buffered ({} needed for signals)",
                    self.buffer.len(),
                    self.engine.config().warmup_len()
                );
                accepted
            }
            Err(e) => {
                warn!("Warm start failed, starting cold: {}", e);
                0
            }
        }
    }

    /// Run one cycle to completion
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, IngestError> {
        self.phase = CyclePhase::Fetching;
        let pulled = self.source.pull().await;
        if matches!(pulled, Err(SourceError::Exhausted)) {
            self.phase = CyclePhase::Skipped;
            return Ok(CycleOutcome::Exhausted);
        }
        self.stats.cycles += 1;

        let latest = self.buffer.latest().map(Sample::timestamp);
        let sample = match pulled
            .and_then(require_usable)
            .and_then(|sample| require_not_older(latest, sample))
        {
            Ok(sample) => sample,
            Err(SourceError::Stale(at)) => {
                debug!("Cycle {}: no new sample since {}", self.stats.cycles, at);
                self.stats.stale += 1;
                self.phase = CyclePhase::Skipped;
                return Ok(CycleOutcome::Stale);
            }
            Err(e) => {
                warn!(
                    "Cycle {}: source '{}' failed: {}",
                    self.stats.cycles,
                    self.source.name(),
                    e
                );
                self.stats.source_failures += 1;
                self.phase = CyclePhase::Skipped;
                return Ok(CycleOutcome::SourceFailed(e));
            }
        };

        self.phase = CyclePhase::Buffering;
        if let Err(e) = self.buffer.append(sample) {
            error!("Cycle {}: {}", self.stats.cycles, e);
            return Err(e.into());
        }

        let snapshot = self.buffer.snapshot();
        let features = self.engine.compute_snapshot(&snapshot);

        if !is_ready(&features) {
            self.phase = CyclePhase::Gated;
            let missing = missing_features(&features);
            self.emit(Emission::WarmingUp(WarmUp {
                timestamp: sample.timestamp(),
                price: sample.price(),
                buffered: self.buffer.len(),
                missing: missing.iter().map(|name| name.to_string()).collect(),
            }));
            self.stats.warmups += 1;
            self.phase = CyclePhase::Skipped;
            return Ok(CycleOutcome::WarmingUp { missing });
        }

        self.phase = CyclePhase::Ready;
        let signal = match self.infer(&features) {
            Ok(signal) => signal,
            Err(e) => {
                warn!(
                    "Cycle {}: classifier '{}' failed: {}",
                    self.stats.cycles,
                    self.classifier.name(),
                    e
                );
                self.stats.inference_failures += 1;
                self.phase = CyclePhase::Skipped;
                return Ok(CycleOutcome::InferenceFailed(e));
            }
        };

        self.emit(Emission::Signal(SignalRecord::new(
            sample.timestamp(),
            sample.price(),
            signal,
            features,
        )));
        self.stats.signals += 1;
        self.phase = CyclePhase::Signaled;
        Ok(CycleOutcome::Signaled(signal))
    }

    /// Run cycles until shutdown, source exhaustion, `max_cycles` or a fatal error
    pub async fn run(&mut self, mut shutdown: Shutdown) -> Result<LoopStats, IngestError> {
        info!(
            "Starting ingestion loop: source '{}', classifier '{}', capacity {}, {}ms poll interval",
            self.source.name(),
            self.classifier.name(),
            self.buffer.capacity(),
            self.settings.poll_interval.as_millis()
        );

        let result = self.drive(&mut shutdown).await;
        self.flush_sink();

        info!(
            "Ingestion loop stopped after {} cycles: {} signals, {} warm-ups, {} source failures, {} stale, {} inference failures, {} sink failures",
            self.stats.cycles,
            self.stats.signals,
            self.stats.warmups,
            self.stats.source_failures,
            self.stats.stale,
            self.stats.inference_failures,
            self.stats.sink_failures
        );

        result.map(|_| self.stats.clone())
    }

    async fn drive(&mut self, shutdown: &mut Shutdown) -> Result<(), IngestError> {
        let stats_interval = self.settings.stats_log_interval.max(1);
        let mut last_stats_time = Instant::now();

        loop {
            if shutdown.is_triggered() {
                info!("Shutdown requested");
                return Ok(());
            }
            if let Some(max) = self.settings.max_cycles
                && self.stats.cycles >= max
            {
                info!("Reached {} cycles", max);
                return Ok(());
            }

            let cycle_start = Instant::now();
            if self.run_cycle().await? == CycleOutcome::Exhausted {
                info!("Source '{}' exhausted", self.source.name());
                return Ok(());
            }

            // Log statistics periodically
            if self.stats.cycles > 0 && self.stats.cycles.is_multiple_of(stats_interval) {
                let elapsed = last_stats_time.elapsed();
                debug!(
                    "{} cycles ({:.1} cycles/s), {} signals, buffer {}/{}",
                    self.stats.cycles,
                    stats_interval as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
                    self.stats.signals,
                    self.buffer.len(),
                    self.buffer.capacity()
                );
                last_stats_time = Instant::now();
            }

            // Maintain poll rate
            let elapsed = cycle_start.elapsed();
            if elapsed < self.settings.poll_interval {
                tokio::select! {
                    _ = tokio::time::sleep(self.settings.poll_interval - elapsed) => {}
                    _ = shutdown.wait() => {}
                }
            }
        }
    }

    fn infer(&self, features: &FeatureVector) -> Result<Signal, InferenceError> {
        let prediction = self.classifier.predict(features)?;
        Ok(Signal::from_prediction(
            prediction.class,
            prediction.probability,
        )?)
    }

    fn emit(&mut self, emission: Emission) {
        if let Err(e) = self.sink.emit(&emission) {
            warn!("Cycle {}: sink rejected emission: {}", self.stats.cycles, e);
            self.stats.sink_failures += 1;
        }
    }

    fn flush_sink(&mut self) {
        if let Err(e) = self.sink.flush() {
            warn!("Failed to flush sink: {}", e);
            self.stats.sink_failures += 1;
        }
    }
}

/// A sample older than the newest buffered one is bad source data; the
/// buffer must never see it
fn require_not_older(latest: Option<Timestamp>, sample: Sample) -> Result<Sample, SourceError> {
    match latest {
        Some(latest) if sample.timestamp() < latest => Err(SourceError::malformed(format!(
            "sample at {} is older than buffered sample at {}",
            sample.timestamp(),
            latest
        ))),
        _ => Ok(sample),
    }
}

fn require_usable(sample: Sample) -> Result<Sample, SourceError> {
    if sample.is_usable() {
        Ok(sample)
    } else {
        Err(SourceError::malformed(format!(
            "no usable price at {}",
            sample.timestamp()
        )))
    }
}

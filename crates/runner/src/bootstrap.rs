//! Bootstrap - build the pipeline from configuration
//!
//! Everything that can fail before the first cycle fails here: loading the
//! classifier, opening the replay file, creating the output file. A
//! pipeline that builds successfully only meets per-cycle failures.

use sentinel_gateway::{
    BinanceKlineHistory, BinanceRestClient, BinanceTickerSource, FanoutSink, JsonLinesSink,
    LogSink, ReplaySource, RestError, SimulatedSource, sources::WalkParams,
};
use sentinel_indicators::IndicatorEngine;
use sentinel_model::{ModelError, load_classifier};
use sentinel_ports::{
    Classifier, Clock, HistorySource, SampleSource, SignalSink, SinkError, SourceError,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, SentinelConfig, SourceConfig};
use crate::ingest::{IngestError, IngestionLoop, LoopStats};
use crate::shutdown::Shutdown;

/// Startup failure; the loop never starts
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to load classifier: {0}")]
    Model(#[from] ModelError),

    #[error("Failed to open source: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to open sink: {0}")]
    Sink(#[from] SinkError),

    #[error("Failed to build REST client: {0}")]
    Rest(#[from] RestError),
}

/// A ready-to-run pipeline
pub struct Pipeline {
    ingestion: IngestionLoop,
    history: Option<Box<dyn HistorySource>>,
    warm_start_limit: usize,
}

impl Pipeline {
    /// Build every component described by `config`
    pub async fn build(config: &SentinelConfig, clock: Arc<dyn Clock>) -> Result<Self, BootstrapError> {
        config.validate()?;

        let classifier = load_classifier(&config.model_path)?;
        let (source, history) = build_source(config, clock).await?;
        let sink = build_sink(config)?;

        Ok(Self::from_parts(config, source, history, classifier, sink))
    }

    /// Assemble a pipeline from already constructed components
    pub fn from_parts(
        config: &SentinelConfig,
        source: Box<dyn SampleSource>,
        history: Option<Box<dyn HistorySource>>,
        classifier: Box<dyn Classifier>,
        sink: Box<dyn SignalSink>,
    ) -> Self {
        let engine = IndicatorEngine::new(config.indicators.clone());
        let ingestion = IngestionLoop::new(source, classifier, sink, engine, config.loop_settings());

        let history = history.filter(|_| config.warm_start.enabled);
        Self {
            ingestion,
            history,
            warm_start_limit: config.warm_start.limit,
        }
    }

    pub fn ingestion(&self) -> &IngestionLoop {
        &self.ingestion
    }

    /// Warm start (if configured), then run the loop until it stops
    pub async fn run(mut self, shutdown: Shutdown) -> Result<LoopStats, IngestError> {
        if let Some(history) = self.history.take() {
            self.ingestion
                .warm_start(history.as_ref(), self.warm_start_limit)
                .await;
        }
        self.ingestion.run(shutdown).await
    }
}

async fn build_source(
    config: &SentinelConfig,
    clock: Arc<dyn Clock>,
) -> Result<(Box<dyn SampleSource>, Option<Box<dyn HistorySource>>), BootstrapError> {
    let built: (Box<dyn SampleSource>, Option<Box<dyn HistorySource>>) = match &config.source {
        SourceConfig::BinanceTicker {
            rest_url,
            symbol,
            request_timeout_ms,
        } => {
            let client = BinanceRestClient::new(
                rest_url.clone(),
                Duration::from_millis(*request_timeout_ms),
            )?;
            let history: Box<dyn HistorySource> = Box::new(BinanceKlineHistory::new(
                client.clone(),
                symbol.clone(),
                clock.clone(),
            ));
            let ticker: Box<dyn SampleSource> =
                Box::new(BinanceTickerSource::new(client, symbol.clone(), clock));
            info!("Polling {} ticker from {}", symbol, rest_url);
            (ticker, Some(history))
        }
        SourceConfig::Replay { path } => {
            let replay: Box<dyn SampleSource> = Box::new(ReplaySource::open(path).await?);
            info!("Replaying {}", path.display());
            (replay, None)
        }
        SourceConfig::Simulated {
            seed,
            start_price,
            drift,
            volatility,
        } => {
            let params = WalkParams {
                start_price: *start_price,
                drift: *drift,
                volatility: *volatility,
            };
            let simulated: Box<dyn SampleSource> =
                Box::new(SimulatedSource::new(*seed, params, clock));
            info!("Simulating random walk (seed {}) from {}", seed, start_price);
            (simulated, None)
        }
    };
    Ok(built)
}

fn build_sink(config: &SentinelConfig) -> Result<Box<dyn SignalSink>, BootstrapError> {
    let mut fanout = FanoutSink::new();
    if config.sinks.log {
        fanout.push(Box::new(LogSink::new()));
    }
    if let Some(path) = &config.sinks.jsonl_path {
        fanout.push(Box::new(JsonLinesSink::create(path)?));
        info!("Writing emissions to {}", path.display());
    }
    Ok(Box::new(fanout))
}

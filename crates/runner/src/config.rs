//! Runtime configuration loaded from a JSON file
//!
//! Every field has a default, so `{}` is a valid config that polls the
//! Binance BTCUSDT ticker once a minute with the stock indicator windows.

use sentinel_core::DEFAULT_CAPACITY;
use sentinel_gateway::rest_client::MAX_KLINES;
use sentinel_indicators::{IndicatorConfig, IndicatorConfigError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::ingest::LoopSettings;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid indicator windows: {0}")]
    Indicators(#[from] IndicatorConfigError),

    #[error("Buffer capacity {capacity} is below the {required} samples the indicators need")]
    CapacityTooSmall { capacity: usize, required: usize },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root configuration for the `sentinel` binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentinelConfig {
    #[serde(default)]
    pub source: SourceConfig,
    /// Classifier artifact (JSON)
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default)]
    pub buffer: BufferConfig,
    #[serde(default)]
    pub indicators: IndicatorConfig,
    /// Minimum time between the starts of two cycles
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub warm_start: WarmStartConfig,
    #[serde(default)]
    pub sinks: SinkConfig,
    /// Cycles between periodic stats lines
    #[serde(default = "default_stats_log_interval")]
    pub stats_log_interval: u64,
    /// Stop after this many cycles (unbounded when absent)
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        SentinelConfig {
            source: SourceConfig::default(),
            model_path: default_model_path(),
            buffer: BufferConfig::default(),
            indicators: IndicatorConfig::default(),
            poll_interval_ms: default_poll_interval_ms(),
            warm_start: WarmStartConfig::default(),
            sinks: SinkConfig::default(),
            stats_log_interval: default_stats_log_interval(),
            max_cycles: None,
        }
    }
}

impl SentinelConfig {
    /// Parse and validate a config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SentinelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()?;

        let required = self.indicators.warmup_len();
        if self.buffer.capacity < required {
            return Err(ConfigError::CapacityTooSmall {
                capacity: self.buffer.capacity,
                required,
            });
        }
        // Warm start asks for one extra kline to drop the unclosed one
        if self.warm_start.limit > MAX_KLINES - 1 {
            return Err(ConfigError::Invalid(format!(
                "warm_start.limit must be at most {}, got {}",
                MAX_KLINES - 1,
                self.warm_start.limit
            )));
        }
        if self.stats_log_interval == 0 {
            return Err(ConfigError::Invalid(
                "stats_log_interval must be at least 1".to_string(),
            ));
        }
        self.source.validate()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Settings handed to the ingestion loop
    pub fn loop_settings(&self) -> LoopSettings {
        LoopSettings {
            capacity: self.buffer.capacity,
            poll_interval: self.poll_interval(),
            stats_log_interval: self.stats_log_interval,
            max_cycles: self.max_cycles,
        }
    }
}

/// Where samples come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Poll the Binance REST ticker
    BinanceTicker {
        #[serde(default = "default_rest_url")]
        rest_url: String,
        #[serde(default = "default_symbol")]
        symbol: String,
        #[serde(default = "default_request_timeout_ms")]
        request_timeout_ms: u64,
    },
    /// Replay a JSON-lines file of samples
    Replay { path: PathBuf },
    /// Seeded geometric random walk
    Simulated {
        #[serde(default)]
        seed: u64,
        #[serde(default = "default_start_price")]
        start_price: f64,
        #[serde(default)]
        drift: f64,
        #[serde(default = "default_volatility")]
        volatility: f64,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::BinanceTicker {
            rest_url: default_rest_url(),
            symbol: default_symbol(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl SourceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            SourceConfig::BinanceTicker {
                symbol,
                request_timeout_ms,
                ..
            } => {
                if symbol.trim().is_empty() {
                    return Err(ConfigError::Invalid("source symbol is empty".to_string()));
                }
                if *request_timeout_ms == 0 {
                    return Err(ConfigError::Invalid(
                        "request_timeout_ms must be at least 1".to_string(),
                    ));
                }
            }
            SourceConfig::Replay { .. } => {}
            SourceConfig::Simulated {
                start_price,
                drift,
                volatility,
                ..
            } => {
                if !(start_price.is_finite() && *start_price > 0.0) {
                    return Err(ConfigError::Invalid(format!(
                        "start_price must be finite and positive, got {}",
                        start_price
                    )));
                }
                if !drift.is_finite() || !(volatility.is_finite() && *volatility >= 0.0) {
                    return Err(ConfigError::Invalid(
                        "drift and volatility must be finite, volatility non-negative".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            SourceConfig::BinanceTicker { .. } => "binance_ticker",
            SourceConfig::Replay { .. } => "replay",
            SourceConfig::Simulated { .. } => "simulated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        BufferConfig {
            capacity: default_capacity(),
        }
    }
}

/// Prefill the buffer from recent history before the first live cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarmStartConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_capacity")]
    pub limit: usize,
}

impl Default for WarmStartConfig {
    fn default() -> Self {
        WarmStartConfig {
            enabled: true,
            limit: default_capacity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Report each cycle through tracing
    #[serde(default = "default_true")]
    pub log: bool,
    /// Append emissions as JSON lines to this file
    #[serde(default)]
    pub jsonl_path: Option<PathBuf>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        SinkConfig {
            log: true,
            jsonl_path: None,
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.json")
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_poll_interval_ms() -> u64 {
    60_000
}

fn default_stats_log_interval() -> u64 {
    100
}

fn default_rest_url() -> String {
    sentinel_gateway::rest_client::DEFAULT_REST_URL.to_string()
}

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_start_price() -> f64 {
    50_000.0
}

fn default_volatility() -> f64 {
    0.001
}

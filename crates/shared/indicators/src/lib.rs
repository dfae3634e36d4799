//! Sentinel Indicators
//!
//! The numerically sensitive part of the pipeline:
//!
//! - **stats**: EMA, Wilder smoothing and rolling statistics in f64
//! - **indicators**: RSI, MACD, volatility and lagged returns as pure functions
//! - **engine**: the feature vector for the latest sample of a snapshot
//! - **gate**: the readiness predicate guarding inference
//! - **dataset**: training tables computed with the same engine
//!
//! ## Usage
//!
//! ```ignore
//! use sentinel_indicators::{IndicatorEngine, IndicatorConfig, is_ready};
//!
//! let engine = IndicatorEngine::new(IndicatorConfig::default());
//! let features = engine.compute(&prices);
//! if is_ready(&features) {
//!     // safe to classify
//! }
//! ```

mod config;
pub mod dataset;
mod engine;
mod gate;
pub mod indicators;
pub mod stats;

pub use config::{IndicatorConfig, IndicatorConfigError};
pub use dataset::{DEFAULT_HORIZON, DEFAULT_THRESHOLD, FeatureRow, FeatureTable};
pub use engine::IndicatorEngine;
pub use gate::{is_ready, missing_features};

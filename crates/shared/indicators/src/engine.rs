//! Indicator Engine - recomputes the feature vector for the latest sample
//!
//! The engine is stateless: every call folds the whole snapshot from
//! scratch, so the output is a pure function of the ordered prices.
//! The same engine builds live features and offline training tables.

use sentinel_core::{FeatureVector, Sample};

use crate::config::IndicatorConfig;
use crate::indicators::{macd, pct_return, rsi, volatility};

/// Computes `{rsi, macd, macd_diff, volatility, return_5m, return_15m}`
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Feature vector for the last price in `prices`
    ///
    /// Earlier prices are scratch input only. Undefined indicators are NaN.
    pub fn compute(&self, prices: &[f64]) -> FeatureVector {
        let c = &self.config;
        let macd = macd(prices, c.macd_fast, c.macd_slow, c.macd_signal);

        FeatureVector {
            rsi: rsi(prices, c.rsi_period),
            macd: macd.macd,
            macd_diff: macd.diff,
            volatility: volatility(prices, c.volatility_window),
            return_5m: pct_return(prices, c.short_lag),
            return_15m: pct_return(prices, c.long_lag),
        }
    }

    /// Feature vector for the last sample of a buffer snapshot
    pub fn compute_snapshot(&self, snapshot: &[Sample]) -> FeatureVector {
        let prices: Vec<f64> = snapshot.iter().map(Sample::price).collect();
        self.compute(&prices)
    }
}

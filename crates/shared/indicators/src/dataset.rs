//! Training feature tables built with the live indicator engine
//!
//! Each row is computed over exactly the trailing window the live
//! history buffer would hold at that point, so offline features match
//! what the ingestion loop feeds the classifier.

use serde::{Deserialize, Serialize};
use sentinel_core::{FeatureVector, Price, Sample, Timestamp};

use crate::engine::IndicatorEngine;
use crate::gate::is_ready;

/// Default prediction horizon in samples
pub const DEFAULT_HORIZON: usize = 15;

/// Default forward return above which a row is labelled 1
pub const DEFAULT_THRESHOLD: f64 = 0.001;

/// One row of a feature table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub timestamp: Timestamp,
    pub price: Price,
    pub features: FeatureVector,
    /// 1 if the price rose by more than the threshold `horizon` samples later
    pub target: Option<u8>,
}

impl FeatureRow {
    /// Row is usable for training: every feature defined and a target known
    pub fn is_trainable(&self) -> bool {
        self.target.is_some() && is_ready(&self.features)
    }
}

/// Feature rows for a historical price series
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Compute features for every sample, each over its trailing `capacity` window
    pub fn build(samples: &[Sample], capacity: usize, engine: &IndicatorEngine) -> Self {
        let capacity = capacity.max(1);
        let prices: Vec<f64> = samples.iter().map(Sample::price).collect();

        let rows = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let start = (i + 1).saturating_sub(capacity);
                FeatureRow {
                    timestamp: sample.timestamp(),
                    price: sample.price(),
                    features: engine.compute(&prices[start..=i]),
                    target: None,
                }
            })
            .collect();

        Self { rows }
    }

    /// Label each row by its forward return over `horizon` samples
    ///
    /// Rows without a sample `horizon` steps ahead keep `target = None`.
    pub fn with_targets(mut self, horizon: usize, threshold: f64) -> Self {
        let prices: Vec<f64> = self.rows.iter().map(|r| r.price).collect();
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.target = prices
                .get(i + horizon)
                .filter(|_| horizon > 0)
                .map(|future| {
                    let future_return = (future - row.price) / row.price;
                    u8::from(future_return > threshold)
                });
        }
        self
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Rows with complete features and a known target
    pub fn trainable(&self) -> impl Iterator<Item = &FeatureRow> {
        self.rows.iter().filter(|row| row.is_trainable())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

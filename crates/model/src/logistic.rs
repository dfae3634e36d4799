//! Logistic regression over the six indicator features

use serde::{Deserialize, Serialize};
use sentinel_core::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
use sentinel_ports::{Classifier, InferenceError, Prediction};

use crate::error::ModelError;
use crate::{default_threshold, sigmoid};

/// Per-feature standardisation applied before the linear term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// `p = sigmoid(intercept + sum(w_i * x_i))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<Scaler>,
    /// Probability at or above which the BUY class is predicted
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticModel {
    pub fn validate(&self) -> Result<(), ModelError> {
        check_len("weights", self.weights.len())?;
        check_finite("weights", &self.weights)?;
        if !self.intercept.is_finite() {
            return Err(ModelError::invalid("intercept is not finite"));
        }
        if let Some(scaler) = &self.scaler {
            check_len("scaler.mean", scaler.mean.len())?;
            check_len("scaler.scale", scaler.scale.len())?;
            check_finite("scaler.mean", &scaler.mean)?;
            check_finite("scaler.scale", &scaler.scale)?;
            if let Some(idx) = scaler.scale.iter().position(|s| *s == 0.0) {
                return Err(ModelError::invalid(format!(
                    "scaler.scale for {} is zero",
                    FEATURE_NAMES[idx]
                )));
            }
        }
        check_threshold(self.threshold)
    }

    /// Probability of the BUY class
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let x = features.to_array();
        let margin = (0..FEATURE_COUNT).fold(self.intercept, |acc, i| {
            let value = match &self.scaler {
                Some(s) => (x[i] - s.mean[i]) / s.scale[i],
                None => x[i],
            };
            acc + self.weights[i] * value
        });
        sigmoid(margin)
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let probability = self.probability(features);
        Ok(Prediction {
            class: u8::from(probability >= self.threshold),
            probability,
        })
    }

    fn name(&self) -> &str {
        "logistic"
    }
}

pub(crate) fn check_threshold(threshold: f64) -> Result<(), ModelError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ModelError::invalid(format!(
            "threshold {threshold} is outside [0, 1]"
        )));
    }
    Ok(())
}

fn check_len(field: &str, len: usize) -> Result<(), ModelError> {
    if len != FEATURE_COUNT {
        return Err(ModelError::invalid(format!(
            "{field} has {len} entries, expected {FEATURE_COUNT}"
        )));
    }
    Ok(())
}

fn check_finite(field: &str, values: &[f64]) -> Result<(), ModelError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::invalid(format!("{field} contains non-finite values")));
    }
    Ok(())
}

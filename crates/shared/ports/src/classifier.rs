use sentinel_core::FeatureVector;

use crate::error::InferenceError;

/// Raw binary classifier output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class, expected to be 0 (hold) or 1 (buy)
    pub class: u8,
    /// Predicted probability of class 1
    pub probability: f64,
}

/// Port for a pre-fitted binary classifier
///
/// Implementations are loaded once before the loop starts. The loop
/// only ever calls `predict` with a vector that passed the readiness gate.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError>;

    /// Model name for logs
    fn name(&self) -> &str {
        "Classifier"
    }
}

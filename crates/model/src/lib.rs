//! Sentinel Model
//!
//! Loads a pre-fitted binary classifier from a JSON artifact and exposes
//! it through the `Classifier` port. Training happens elsewhere; this
//! crate only evaluates.
//!
//! Supported artifacts (selected by `"kind"`):
//! - `logistic`: linear model with optional standardisation
//! - `tree_ensemble`: gradient-boosted regression trees with a logistic link
//!
//! Features are always read in `FEATURE_NAMES` order.

mod artifact;
mod error;
mod logistic;
mod tree;

pub use artifact::{ModelArtifact, load_classifier};
pub use error::ModelError;
pub use logistic::{LogisticModel, Scaler};
pub use tree::{Tree, TreeEnsemble, TreeNode};

/// Logistic link
#[inline]
pub(crate) fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

pub(crate) fn default_threshold() -> f64 {
    0.5
}

//! Readiness Gate - guards inference from incomplete feature vectors

use sentinel_core::{FEATURE_NAMES, FeatureVector};

/// True iff every feature is defined
pub fn is_ready(features: &FeatureVector) -> bool {
    features.to_array().iter().all(|v| v.is_finite())
}

/// Names of the features that are still undefined
pub fn missing_features(features: &FeatureVector) -> Vec<&'static str> {
    FEATURE_NAMES
        .iter()
        .zip(features.to_array())
        .filter(|(_, value)| !value.is_finite())
        .map(|(name, _)| *name)
        .collect()
}

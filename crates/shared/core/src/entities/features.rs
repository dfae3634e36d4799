//! Feature vector produced by the indicator engine for the latest sample

use serde::{Deserialize, Serialize};

/// Number of features fed to the classifier
pub const FEATURE_COUNT: usize = 6;

/// Feature names in classifier column order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "rsi",
    "macd",
    "macd_diff",
    "volatility",
    "return_5m",
    "return_15m",
];

/// Indicator values for the most recent sample of a buffer snapshot
///
/// Each field is either a number or NaN, which marks the indicator as
/// undefined (not enough history yet). The vector is recomputed from
/// scratch every cycle and carries no identity of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub rsi: f64,
    pub macd: f64,
    pub macd_diff: f64,
    pub volatility: f64,
    pub return_5m: f64,
    pub return_15m: f64,
}

impl FeatureVector {
    /// A vector with every feature undefined
    pub const UNDEFINED: FeatureVector = FeatureVector {
        rsi: f64::NAN,
        macd: f64::NAN,
        macd_diff: f64::NAN,
        volatility: f64::NAN,
        return_5m: f64::NAN,
        return_15m: f64::NAN,
    };

    /// Values in `FEATURE_NAMES` order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.rsi,
            self.macd,
            self.macd_diff,
            self.volatility,
            self.return_5m,
            self.return_15m,
        ]
    }

    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [rsi, macd, macd_diff, volatility, return_5m, return_15m] = values;
        Self {
            rsi,
            macd,
            macd_diff,
            volatility,
            return_5m,
            return_15m,
        }
    }

    /// Look up a feature by name
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.to_array()[idx])
    }

    /// Bitwise comparison, treating identical NaN payloads as equal
    pub fn bitwise_eq(&self, other: &FeatureVector) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_order_matches_names() {
        let fv = FeatureVector::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(fv.get("rsi"), Some(1.0));
        assert_eq!(fv.get("macd_diff"), Some(3.0));
        assert_eq!(fv.get("return_15m"), Some(6.0));
        assert_eq!(fv.get("unknown"), None);
    }

    #[test]
    fn test_undefined_is_all_nan() {
        assert!(FeatureVector::UNDEFINED.to_array().iter().all(|v| v.is_nan()));
        assert!(FeatureVector::default().bitwise_eq(&FeatureVector::UNDEFINED));
    }

    #[test]
    fn test_bitwise_eq_distinguishes_values() {
        let a = FeatureVector::from_array([1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN]);
        let b = FeatureVector::from_array([1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN]);
        let c = FeatureVector::from_array([1.0, 2.0, 3.0, 4.0, 5.000_000_1, f64::NAN]);
        assert!(a.bitwise_eq(&b));
        assert!(!a.bitwise_eq(&c));
    }
}

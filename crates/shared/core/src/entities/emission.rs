//! Per-cycle observations handed to the downstream sink

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FeatureVector, Signal, SignalLabel};
use crate::values::{Price, Timestamp};

/// A cycle that ended at the readiness gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarmUp {
    pub timestamp: Timestamp,
    pub price: Price,
    /// Samples currently buffered
    pub buffered: usize,
    /// Names of the features that are still undefined
    pub missing: Vec<String>,
}

/// A cycle that produced a classified signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub id: Uuid,
    pub timestamp: Timestamp,
    pub price: Price,
    pub label: SignalLabel,
    pub confidence: f64,
    pub features: FeatureVector,
}

impl SignalRecord {
    pub fn new(timestamp: Timestamp, price: Price, signal: Signal, features: FeatureVector) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            price,
            label: signal.label,
            confidence: signal.confidence,
            features,
        }
    }

    pub fn signal(&self) -> Signal {
        Signal {
            label: self.label,
            confidence: self.confidence,
        }
    }
}

/// What a completed cycle reports downstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Emission {
    WarmingUp(WarmUp),
    Signal(SignalRecord),
}

impl Emission {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Emission::WarmingUp(w) => w.timestamp,
            Emission::Signal(s) => s.timestamp,
        }
    }

    pub fn is_signal(&self) -> bool {
        matches!(self, Emission::Signal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_signal_record_json_is_tagged() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let features = FeatureVector::from_array([55.0, 1.0, 0.5, 0.01, 0.002, 0.004]);
        let record = SignalRecord::new(
            ts,
            64_000.0,
            Signal::from_prediction(1, 0.8).unwrap(),
            features,
        );

        let value = serde_json::to_value(Emission::Signal(record.clone())).unwrap();
        assert_eq!(value["kind"], "signal");
        assert_eq!(value["label"], "BUY");
        assert_eq!(value["confidence"], 0.8);
        assert_eq!(value["features"]["rsi"], 55.0);
        assert_eq!(record.signal().label, SignalLabel::Buy);
    }

    #[test]
    fn test_warm_up_json() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let emission = Emission::WarmingUp(WarmUp {
            timestamp: ts,
            price: 1.0,
            buffered: 3,
            missing: vec!["rsi".to_string()],
        });

        let value = serde_json::to_value(&emission).unwrap();
        assert_eq!(value["kind"], "warming_up");
        assert_eq!(value["buffered"], 3);
        assert!(!emission.is_signal());
        assert_eq!(emission.timestamp(), ts);
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Discrete trading signal emitted by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalLabel {
    Hold,
    Buy,
}

impl SignalLabel {
    /// Map a binary classifier class (0 = hold, 1 = buy)
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(SignalLabel::Hold),
            1 => Some(SignalLabel::Buy),
            _ => None,
        }
    }

    pub fn class(&self) -> u8 {
        match self {
            SignalLabel::Hold => 0,
            SignalLabel::Buy => 1,
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, SignalLabel::Buy)
    }
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalLabel::Hold => write!(f, "HOLD"),
            SignalLabel::Buy => write!(f, "BUY"),
        }
    }
}

/// Classifier output that cannot be turned into a signal
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Unknown class label {0}, expected 0 or 1")]
    UnknownClass(u8),

    #[error("Confidence {0} is not a probability in [0, 1]")]
    InvalidConfidence(f64),
}

/// A classified signal: label plus the probability of the BUY class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub label: SignalLabel,
    pub confidence: f64,
}

impl Signal {
    /// Build a signal from raw classifier output, rejecting malformed values
    ///
    /// The confidence is surfaced unmodified; it is validated, never clamped.
    pub fn from_prediction(class: u8, confidence: f64) -> Result<Self, SignalError> {
        let label = SignalLabel::from_class(class).ok_or(SignalError::UnknownClass(class))?;
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(SignalError::InvalidConfidence(confidence));
        }
        Ok(Self { label, confidence })
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (conf {:.2})", self.label, self.confidence)
    }
}

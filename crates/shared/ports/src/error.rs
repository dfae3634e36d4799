use sentinel_core::SignalError;
use thiserror::Error;

/// Failure to obtain a usable sample for this cycle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Transport-level failure (network, I/O)
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// A response arrived but carried no usable price
    #[error("Malformed sample: {0}")]
    Malformed(String),

    /// The source has nothing newer than the previous sample
    #[error("No new sample since {0}")]
    Stale(String),

    /// A finite source has run out of samples
    #[error("Source exhausted")]
    Exhausted,
}

impl SourceError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Classifier call failed or returned something unusable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Malformed classifier output: {0}")]
    Malformed(#[from] SignalError),
}

/// Downstream sink could not accept an emission
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sink serialization error: {0}")]
    Serialize(String),

    #[error("Sink closed")]
    Closed,
}

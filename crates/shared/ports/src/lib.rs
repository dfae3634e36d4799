//! Sentinel Ports
//!
//! Port definitions (traits) for the Sentinel signal pipeline.
//! These define the boundaries between the ingestion loop and the
//! outside world: where samples come from, who classifies features,
//! and where emissions go.

mod classifier;
mod clock;
mod error;
mod sink;
mod source;

pub use classifier::{Classifier, Prediction};
pub use clock::Clock;
pub use error::{InferenceError, SinkError, SourceError};
pub use sink::SignalSink;
pub use source::{HistorySource, SampleSource};

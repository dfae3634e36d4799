mod emission;
mod features;
mod history;
mod sample;
mod signal;

pub use emission::{Emission, SignalRecord, WarmUp};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
pub use history::{BufferError, DEFAULT_CAPACITY, HistoryBuffer};
pub use sample::Sample;
pub use signal::{Signal, SignalError, SignalLabel};

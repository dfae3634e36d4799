//! Sentinel Core Domain
//!
//! Pure domain types for the Sentinel signal pipeline.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    BufferError, DEFAULT_CAPACITY, Emission, FEATURE_COUNT, FEATURE_NAMES, FeatureVector,
    HistoryBuffer, Sample, Signal, SignalError, SignalLabel, SignalRecord, WarmUp,
};
pub use values::{Price, Timestamp};

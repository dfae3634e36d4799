//! Sentinel Runner - streaming price signal pipeline
//!
//! Wires the shared kernel and the gateway adapters into a running loop:
//!
//! - **Config**: JSON file with defaults for every field
//! - **Bootstrap**: builds source, classifier and sinks; startup failures stop here
//! - **Ingestion**: the per-cycle state machine and its recovery boundary
//! - **Export**: offline feature tables computed with the live engine
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐   Sample    ┌────────────────┐
//!   │ SampleSource │────────────▶│ HistoryBuffer  │
//!   └──────────────┘             └───────┬────────┘
//!                                        │ snapshot
//!                                        ▼
//!                               ┌─────────────────┐
//!                               │ IndicatorEngine │
//!                               └───────┬─────────┘
//!                                       │ FeatureVector
//!                                       ▼
//!                               ┌─────────────────┐  not ready
//!                               │ Readiness gate  │────────────┐
//!                               └───────┬─────────┘            │
//!                                       │ ready                │
//!                                       ▼                      │
//!                               ┌─────────────────┐            │
//!                               │   Classifier    │            │
//!                               └───────┬─────────┘            │
//!                                       │ Signal      WarmingUp│
//!                                       ▼                      ▼
//!                               ┌──────────────────────────────────┐
//!                               │            SignalSink            │
//!                               └──────────────────────────────────┘
//! ```

pub mod bootstrap;
pub mod config;
pub mod export;
pub mod ingest;
pub mod shutdown;

// Re-export main types
pub use bootstrap::{BootstrapError, Pipeline};
pub use config::{ConfigError, SentinelConfig, SourceConfig};
pub use export::{ExportError, ExportOptions, ExportSummary, export_features};
pub use ingest::{CycleOutcome, CyclePhase, IngestError, IngestionLoop, LoopSettings, LoopStats};
pub use shutdown::{Shutdown, ShutdownTrigger, shutdown_channel};

//! Sentinel Gateway
//!
//! Edge adapters for the Sentinel signal pipeline. Provides:
//! - Sample sources (Binance REST ticker, JSON-lines replay, seeded simulator)
//! - A history source for warm start (Binance 1m klines)
//! - Signal sinks (tracing log, JSON-lines file, channel, fan-out)
//!
//! ## Architecture
//!
//! ```text
//! External World (Binance, replay file, simulator)
//!         │
//!    ┌────▼────┐
//!    │ Sources │  SampleSource / HistorySource
//!    └────┬────┘
//!         │ Sample
//!    ┌────▼────┐
//!    │ Runner  │  buffer → indicators → gate → classifier
//!    └────┬────┘
//!         │ Emission
//!    ┌────▼────┐
//!    │  Sinks  │  SignalSink
//!    └─────────┘
//! ```
//!
//! Every source stamps or reads a timestamp and rejects unusable prices at
//! the boundary, so the buffer only ever sees finite positive prices.

pub mod error;
pub mod rest_client;
pub mod sinks;
pub mod sources;

// Re-export commonly used types
pub use error::RestError;
pub use rest_client::BinanceRestClient;
pub use sinks::{ChannelSink, FanoutSink, JsonLinesSink, LogSink};
pub use sources::{BinanceKlineHistory, BinanceTickerSource, ReplaySource, SimulatedSource};

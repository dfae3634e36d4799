//! Sentinel Clock Infrastructure
//!
//! Provides time abstractions for live runs and deterministic replays:
//!
//! - [`SystemClock`]: wall-clock UTC time, used to stamp live samples
//! - [`ManualClock`]: time that only moves when told to, optionally
//!   stepping forward on every read (one sample per minute, for example)
//!
//! ## Usage
//!
//! ```ignore
//! use sentinel_clock::{Clock, ManualClock};
//! use chrono::{Duration, Utc};
//!
//! let clock = ManualClock::new(Utc::now()).with_step(Duration::minutes(1));
//! let t0 = clock.now();
//! let t1 = clock.now();
//! assert_eq!(t1 - t0, Duration::minutes(1));
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use sentinel_ports::Clock;

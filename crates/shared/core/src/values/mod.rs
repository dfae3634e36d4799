use chrono::{DateTime, Utc};

/// Price value - plain f64, the indicator math is done in floating point
pub type Price = f64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

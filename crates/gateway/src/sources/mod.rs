//! Sample sources and the warm-start history source

mod binance;
mod replay;
mod simulated;

pub use binance::{BinanceKlineHistory, BinanceTickerSource};
pub use replay::ReplaySource;
pub use simulated::{SimulatedSource, WalkParams};

use sentinel_core::{Sample, Timestamp};
use sentinel_ports::SourceError;

/// Remembers the last timestamp a source handed out
///
/// A repeat of that timestamp is reported as `Stale` and an older one as
/// `Malformed`; either way the cycle is skipped and the last accepted
/// timestamp stays in place.
#[derive(Debug, Default, Clone)]
pub(crate) struct FreshnessGuard {
    last: Option<Timestamp>,
}

impl FreshnessGuard {
    pub(crate) fn check(&mut self, sample: Sample) -> Result<Sample, SourceError> {
        if let Some(last) = self.last {
            if sample.timestamp() == last {
                return Err(SourceError::Stale(last.to_rfc3339()));
            }
            if sample.timestamp() < last {
                return Err(SourceError::malformed(format!(
                    "timestamp {} is older than previous sample at {}",
                    sample.timestamp().to_rfc3339(),
                    last.to_rfc3339()
                )));
            }
        }
        self.last = Some(sample.timestamp());
        Ok(sample)
    }
}

/// Reject a sample whose price cannot enter the pipeline
pub(crate) fn validate(sample: Sample) -> Result<Sample, SourceError> {
    if sample.is_usable() {
        Ok(sample)
    } else {
        Err(SourceError::malformed(format!(
            "unusable price {} at {}",
            sample.price(),
            sample.timestamp().to_rfc3339()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_freshness_guard_flags_repeated_timestamp() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut guard = FreshnessGuard::default();

        assert!(guard.check(Sample::new(t0, 1.0)).is_ok());
        assert!(matches!(
            guard.check(Sample::new(t0, 2.0)),
            Err(SourceError::Stale(_))
        ));
        assert!(guard.check(Sample::new(t0 + Duration::seconds(1), 2.0)).is_ok());
    }

    #[test]
    fn test_freshness_guard_rejects_older_timestamps() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut guard = FreshnessGuard::default();

        guard.check(Sample::new(t0, 1.0)).unwrap();
        assert!(matches!(
            guard.check(Sample::new(t0 - Duration::seconds(1), 1.0)),
            Err(SourceError::Malformed(_))
        ));
        // The rejected sample does not move the reference point
        assert!(guard.check(Sample::new(t0 + Duration::seconds(1), 1.0)).is_ok());
    }

    #[test]
    fn test_validate_rejects_unusable_price() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(validate(Sample::new(t0, 10.0)).is_ok());
        assert!(matches!(
            validate(Sample::new(t0, 0.0)),
            Err(SourceError::Malformed(_))
        ));
        assert!(validate(Sample::new(t0, f64::NAN)).is_err());
    }
}

use chrono::Duration;
use parking_lot::Mutex;
use sentinel_core::Timestamp;
use sentinel_ports::Clock;

/// Clock that only advances when explicitly moved
///
/// With a step configured, every `now()` returns the current time and
/// then moves it forward by the step, so consecutive reads are strictly
/// increasing. Without a step the time is frozen between `advance` calls.
pub struct ManualClock {
    current: Mutex<Timestamp>,
    step: Duration,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
            step: Duration::zero(),
        }
    }

    /// Advance by `step` after every read
    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Move time forward without reading it
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock();
        *current += duration;
    }

    /// Explicitly set the time
    ///
    /// Warning: moving time backwards will make stamped samples non-chronological.
    pub fn set_time(&self, time: Timestamp) {
        *self.current.lock() = time;
    }

    /// Current time without applying the step
    pub fn peek(&self) -> Timestamp {
        *self.current.lock()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let mut current = self.current.lock();
        let now = *current;
        *current += self.step;
        now
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn start() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_frozen_without_step() {
        let clock = ManualClock::new(start());
        assert_eq!(clock.now(), start());
        assert_eq!(clock.now(), start());

        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now() - start(), Duration::seconds(5));
    }

    #[test]
    fn test_step_on_read() {
        let clock = ManualClock::new(start()).with_step(Duration::minutes(1));
        let t0 = clock.now();
        let t1 = clock.now();
        assert_eq!(t0, start());
        assert_eq!(t1 - t0, Duration::minutes(1));
        assert_eq!(clock.peek() - start(), Duration::minutes(2));
    }

    #[test]
    fn test_set_time() {
        let clock = ManualClock::new(start());
        let later = start() + Duration::hours(3);
        clock.set_time(later);
        assert_eq!(clock.now(), later);
    }
}

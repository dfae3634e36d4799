//! Wilder's smoothed moving average

/// Wilder smoothing (a.k.a. RMA)
///
/// The first `period` observations are averaged arithmetically to seed
/// the value; afterwards `avg = (avg * (period - 1) + x) / period`.
#[derive(Debug, Clone)]
pub struct WilderAverage {
    period: usize,
    count: usize,
    seed_sum: f64,
    value: f64,
}

impl WilderAverage {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
            count: 0,
            seed_sum: 0.0,
            value: 0.0,
        }
    }

    #[inline]
    pub fn update(&mut self, x: f64) {
        self.count += 1;
        let period = self.period as f64;
        if self.count < self.period {
            self.seed_sum += x;
        } else if self.count == self.period {
            self.seed_sum += x;
            self.value = self.seed_sum / period;
        } else {
            self.value = (self.value * (period - 1.0) + x) / period;
        }
    }

    /// Smoothed value, `None` until `period` observations
    #[inline]
    pub fn value(&self) -> Option<f64> {
        if self.count >= self.period {
            Some(self.value)
        } else {
            None
        }
    }
}

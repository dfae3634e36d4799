//! Exponential Moving Average

/// EMA (Exponential Moving Average) calculator
///
/// Seeded with the first observation, then
/// `ema = alpha * value + (1 - alpha) * ema`.
/// The value is reported only once `min_periods` observations have been seen.
#[derive(Debug, Clone)]
pub struct Ema {
    /// Current EMA value
    value: f64,
    /// Smoothing factor in (0, 1]
    alpha: f64,
    /// Observations folded in so far
    count: usize,
    /// Observations required before the value is defined
    min_periods: usize,
}

impl Ema {
    /// Create EMA from a span (standard formula: alpha = 2 / (span + 1))
    pub fn from_period(period: usize) -> Self {
        let period = period.max(1);
        Self::with_alpha(2.0 / (period as f64 + 1.0), period)
    }

    /// Create EMA with a custom alpha
    pub fn with_alpha(alpha: f64, min_periods: usize) -> Self {
        Self {
            value: 0.0,
            alpha,
            count: 0,
            min_periods: min_periods.max(1),
        }
    }

    /// Update EMA with new value
    #[inline]
    pub fn update(&mut self, value: f64) {
        if self.count == 0 {
            self.value = value;
        } else {
            self.value = self.alpha * value + (1.0 - self.alpha) * self.value;
        }
        self.count += 1;
    }

    /// Current EMA value, `None` until `min_periods` observations
    #[inline]
    pub fn value(&self) -> Option<f64> {
        if self.count >= self.min_periods {
            Some(self.value)
        } else {
            None
        }
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

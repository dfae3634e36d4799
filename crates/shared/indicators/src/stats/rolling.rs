//! Rolling window statistics

/// Rolling statistics over the most recent `window_size` values
#[derive(Debug, Clone)]
pub struct RollingStats {
    /// Values in the window, oldest first
    values: Vec<f64>,
    /// Window size
    window_size: usize,
}

impl RollingStats {
    /// Create a new rolling stats calculator
    pub fn new(window_size: usize) -> Self {
        Self {
            values: Vec::with_capacity(window_size),
            window_size: window_size.max(1),
        }
    }

    /// Add a value, dropping the oldest once the window is full
    #[inline]
    pub fn push(&mut self, value: f64) {
        if self.values.len() >= self.window_size {
            self.values.remove(0);
        }
        self.values.push(value);
    }

    /// Mean of the window
    pub fn mean(&self) -> Option<f64> {
        super::mean(&self.values)
    }

    /// Sample variance (n - 1 denominator), `None` below two values
    pub fn variance(&self) -> Option<f64> {
        if self.values.len() < 2 {
            return None;
        }
        let mean = self.mean()?;
        let sum_sq_diff: f64 = self
            .values
            .iter()
            .map(|&x| {
                let diff = x - mean;
                diff * diff
            })
            .sum();
        Some(sum_sq_diff / (self.values.len() - 1) as f64)
    }

    /// Sample standard deviation
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Get number of values
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_stats_mean() {
        let mut stats = RollingStats::new(5);

        for i in 1..=5 {
            stats.push(i as f64);
        }

        assert_eq!(stats.len(), 5);
        assert_eq!(stats.mean(), Some(3.0));

        // Add one more, window shifts
        stats.push(6.0);
        assert_eq!(stats.len(), 5);
        assert_eq!(stats.mean(), Some(4.0)); // (2+3+4+5+6)/5
    }

    #[test]
    fn test_variance_constant() {
        let mut stats = RollingStats::new(5);

        // All same values -> variance = 0
        for _ in 0..5 {
            stats.push(1.0);
        }
        assert_eq!(stats.variance(), Some(0.0));
        assert_eq!(stats.std_dev(), Some(0.0));
    }

    #[test]
    fn test_variance_sample() {
        let mut stats = RollingStats::new(5);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            stats.push(v);
        }
        // Sample variance of [1,2,3,4,5] = 2.5
        assert!((stats.variance().unwrap() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_variance_needs_two_values() {
        let mut stats = RollingStats::new(5);
        stats.push(1.0);
        assert!(stats.variance().is_none());
    }

    #[test]
    fn test_empty_window_has_no_mean() {
        let stats = RollingStats::new(5);
        assert!(stats.is_empty());
        assert!(stats.mean().is_none());
        assert!(stats.std_dev().is_none());
    }
}

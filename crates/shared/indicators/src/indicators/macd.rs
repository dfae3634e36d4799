use crate::stats::{Ema, defined};

/// MACD line, signal line and histogram at the last price
#[derive(Debug, Clone, Copy)]
pub struct MacdValues {
    /// fast EMA - slow EMA
    pub macd: f64,
    /// EMA of the MACD line
    pub signal: f64,
    /// macd - signal
    pub diff: f64,
}

/// Moving Average Convergence Divergence
///
/// The MACD line is defined once the slow EMA has `slow` observations.
/// The signal line is an EMA over the MACD series starting at its first
/// defined value, so the histogram needs `slow + signal - 1` prices.
pub fn macd(prices: &[f64], fast: usize, slow: usize, signal: usize) -> MacdValues {
    let mut ema_fast = Ema::from_period(fast);
    let mut ema_slow = Ema::from_period(slow);
    let mut ema_signal = Ema::from_period(signal);
    let mut line = f64::NAN;

    for &price in prices {
        ema_fast.update(price);
        ema_slow.update(price);
        if let (Some(f), Some(s)) = (ema_fast.value(), ema_slow.value()) {
            line = f - s;
            ema_signal.update(line);
        }
    }

    let signal_line = ema_signal.value().unwrap_or(f64::NAN);
    MacdValues {
        macd: defined(line),
        signal: defined(signal_line),
        diff: defined(line - signal_line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0 + i as f64 * 0.1).collect()
    }

    #[test]
    fn test_macd_line_warmup() {
        assert!(macd(&ramp(25), 12, 26, 9).macd.is_nan());
        let values = macd(&ramp(26), 12, 26, 9);
        assert!(values.macd.is_finite());
        assert!(values.diff.is_nan());
    }

    #[test]
    fn test_histogram_warmup() {
        assert!(macd(&ramp(33), 12, 26, 9).diff.is_nan());
        let values = macd(&ramp(34), 12, 26, 9);
        assert!(values.signal.is_finite());
        assert!(values.diff.is_finite());
        assert!((values.diff - (values.macd - values.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_constant_prices_have_zero_macd() {
        let values = macd(&[250.0; 40], 12, 26, 9);
        assert!(values.macd.abs() < 1e-9);
        assert!(values.signal.abs() < 1e-9);
        assert!(values.diff.abs() < 1e-9);
    }

    #[test]
    fn test_uptrend_is_positive() {
        let prices: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let values = macd(&prices, 12, 26, 9);
        assert!(values.macd > 0.0);
    }

    #[test]
    fn test_empty_input() {
        let values = macd(&[], 12, 26, 9);
        assert!(values.macd.is_nan());
        assert!(values.diff.is_nan());
    }
}

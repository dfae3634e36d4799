//! Floating-point building blocks for the indicators
//!
//! Every calculator here is folded over a slice from scratch on each
//! call, so results depend only on the input order.

mod ema;
mod rolling;
mod wilder;

pub use ema::Ema;
pub use rolling::RollingStats;
pub use wilder::WilderAverage;

/// Percentage change from `old` to `new`, NaN when not finite
#[inline]
pub fn pct_change(old: f64, new: f64) -> f64 {
    defined(new / old - 1.0)
}

/// Map any non-finite value to NaN (the "undefined" marker)
#[inline]
pub fn defined(value: f64) -> f64 {
    if value.is_finite() { value } else { f64::NAN }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_change() {
        assert!((pct_change(100.0, 110.0) - 0.1).abs() < 1e-12);
        assert!((pct_change(100.0, 95.0) + 0.05).abs() < 1e-12);
        assert!(pct_change(0.0, 1.0).is_nan());
    }

    #[test]
    fn test_defined() {
        assert_eq!(defined(1.5), 1.5);
        assert!(defined(f64::INFINITY).is_nan());
        assert!(defined(f64::NEG_INFINITY).is_nan());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
        assert_eq!(mean(&[]), None);
    }
}

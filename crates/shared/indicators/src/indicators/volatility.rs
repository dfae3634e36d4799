use crate::stats::{RollingStats, pct_change};

/// Rolling sample standard deviation of percentage price changes
///
/// Uses the last `window` changes, so `window + 1` prices are required.
pub fn volatility(prices: &[f64], window: usize) -> f64 {
    if window < 2 || prices.len() < window + 1 {
        return f64::NAN;
    }

    let tail = &prices[prices.len() - (window + 1)..];
    let mut changes = RollingStats::new(window);
    for pair in tail.windows(2) {
        let change = pct_change(pair[0], pair[1]);
        if change.is_nan() {
            return f64::NAN;
        }
        changes.push(change);
    }

    changes.std_dev().unwrap_or(f64::NAN)
}

use crate::stats::{WilderAverage, defined};

/// Neutral reading when the window saw neither gains nor losses
const NEUTRAL_RSI: f64 = 50.0;

/// Wilder's Relative Strength Index at the last price
///
/// Needs `period` price differences, i.e. `period + 1` prices.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return f64::NAN;
    }

    let mut gains = WilderAverage::new(period);
    let mut losses = WilderAverage::new(period);
    for pair in prices.windows(2) {
        let diff = pair[1] - pair[0];
        gains.update(diff.max(0.0));
        losses.update((-diff).max(0.0));
    }

    match (gains.value(), losses.value()) {
        (Some(avg_gain), Some(avg_loss)) => rsi_from_averages(avg_gain, avg_loss),
        _ => f64::NAN,
    }
}

/// RSI from smoothed average gain and loss
///
/// Flat input (no gains, no losses) reads 50; no losses reads 100.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return f64::NAN;
    }
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { NEUTRAL_RSI } else { 100.0 };
    }
    defined(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}

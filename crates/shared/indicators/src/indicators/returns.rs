use crate::stats::pct_change;

/// Percentage change between the last price and the price `lag` samples earlier
pub fn pct_return(prices: &[f64], lag: usize) -> f64 {
    if lag == 0 || prices.len() < lag + 1 {
        return f64::NAN;
    }
    let last = prices.len() - 1;
    pct_change(prices[last - lag], prices[last])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lag_warmup() {
        assert!(pct_return(&[1.0, 2.0, 3.0, 4.0, 5.0], 5).is_nan());
        let value = pct_return(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 5);
        assert!((value - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_return() {
        let value = pct_return(&[200.0, 150.0, 100.0], 2);
        assert!((value + 0.5).abs() < 1e-12);
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid indicator parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorConfigError {
    #[error("{name} must be at least {min}, got {value}")]
    TooSmall {
        name: &'static str,
        value: usize,
        min: usize,
    },

    #[error("MACD fast period ({fast}) must be shorter than slow period ({slow})")]
    MacdPeriods { fast: usize, slow: usize },
}

/// Window parameters for every indicator in the feature vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
    #[serde(default = "default_volatility_window")]
    pub volatility_window: usize,
    /// Lag for `return_5m`
    #[serde(default = "default_short_lag")]
    pub short_lag: usize,
    /// Lag for `return_15m`
    #[serde(default = "default_long_lag")]
    pub long_lag: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            volatility_window: default_volatility_window(),
            short_lag: default_short_lag(),
            long_lag: default_long_lag(),
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), IndicatorConfigError> {
        let checks = [
            ("rsi_period", self.rsi_period, 1),
            ("macd_fast", self.macd_fast, 1),
            ("macd_slow", self.macd_slow, 1),
            ("macd_signal", self.macd_signal, 1),
            // Sample std needs at least two observations
            ("volatility_window", self.volatility_window, 2),
            ("short_lag", self.short_lag, 1),
            ("long_lag", self.long_lag, 1),
        ];
        for (name, value, min) in checks {
            if value < min {
                return Err(IndicatorConfigError::TooSmall { name, value, min });
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorConfigError::MacdPeriods {
                fast: self.macd_fast,
                slow: self.macd_slow,
            });
        }
        Ok(())
    }

    /// Samples needed before `rsi` is defined
    pub fn rsi_warmup(&self) -> usize {
        self.rsi_period + 1
    }

    /// Samples needed before `macd` is defined
    pub fn macd_warmup(&self) -> usize {
        self.macd_slow
    }

    /// Samples needed before `macd_diff` is defined
    pub fn macd_diff_warmup(&self) -> usize {
        self.macd_slow + self.macd_signal - 1
    }

    /// Samples needed before `volatility` is defined
    pub fn volatility_warmup(&self) -> usize {
        self.volatility_window + 1
    }

    /// Samples needed before `return_5m` is defined
    pub fn short_return_warmup(&self) -> usize {
        self.short_lag + 1
    }

    /// Samples needed before `return_15m` is defined
    pub fn long_return_warmup(&self) -> usize {
        self.long_lag + 1
    }

    /// Samples needed before every feature is defined
    pub fn warmup_len(&self) -> usize {
        [
            self.rsi_warmup(),
            self.macd_warmup(),
            self.macd_diff_warmup(),
            self.volatility_warmup(),
            self.short_return_warmup(),
            self.long_return_warmup(),
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }
}

// Default value functions for serde
fn default_rsi_period() -> usize {
    14
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_volatility_window() -> usize {
    20
}

fn default_short_lag() -> usize {
    5
}

fn default_long_lag() -> usize {
    15
}

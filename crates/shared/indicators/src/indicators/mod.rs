//! Individual indicator functions
//!
//! Each function evaluates one indicator at the last element of a price
//! slice. They are independent of each other and return NaN while the
//! slice is too short.

mod macd;
mod returns;
mod rsi;
mod volatility;

pub use macd::{MacdValues, macd};
pub use returns::pct_return;
pub use rsi::rsi;
pub use volatility::volatility;

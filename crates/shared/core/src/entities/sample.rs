use serde::{Deserialize, Serialize};

use crate::values::{Price, Timestamp};

/// A single timestamped price observation
///
/// Produced once per cycle by a sample source. Fields are private so a
/// sample cannot be altered after it has been handed to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    timestamp: Timestamp,
    price: Price,
}

impl Sample {
    pub fn new(timestamp: Timestamp, price: Price) -> Self {
        Self { timestamp, price }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Whether a raw price can enter the pipeline (finite and strictly positive)
    pub fn is_usable_price(price: Price) -> bool {
        price.is_finite() && price > 0.0
    }

    /// Whether this sample's price is usable
    pub fn is_usable(&self) -> bool {
        Self::is_usable_price(self.price)
    }
}

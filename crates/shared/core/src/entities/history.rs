//! Bounded, chronologically ordered history of recent samples

use std::collections::VecDeque;
use thiserror::Error;

use super::Sample;
use crate::values::Timestamp;

/// Default number of samples retained for indicator computation
pub const DEFAULT_CAPACITY: usize = 50;

/// Invariant violations on the history buffer
///
/// These indicate a bug in the caller, not an external condition,
/// and must not be retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BufferError {
    #[error("Buffer holds {len} samples, capacity is {capacity}")]
    CapacityExceeded { len: usize, capacity: usize },

    #[error("Sample at {attempted} is older than the latest buffered sample at {latest}")]
    NonChronological {
        latest: Timestamp,
        attempted: Timestamp,
    },
}

/// Fixed-capacity FIFO of samples in arrival order
///
/// Appending past capacity evicts exactly one sample from the head.
/// Evicted samples are dropped; no older history is kept anywhere.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a sample at the tail, evicting the oldest if over capacity
    ///
    /// Returns the evicted sample, if any. Samples must arrive in
    /// non-decreasing timestamp order.
    pub fn append(&mut self, sample: Sample) -> Result<Option<Sample>, BufferError> {
        if let Some(latest) = self.samples.back()
            && sample.timestamp() < latest.timestamp()
        {
            return Err(BufferError::NonChronological {
                latest: latest.timestamp(),
                attempted: sample.timestamp(),
            });
        }

        self.samples.push_back(sample);
        let evicted = if self.samples.len() > self.capacity {
            self.samples.pop_front()
        } else {
            None
        };

        if self.samples.len() > self.capacity {
            return Err(BufferError::CapacityExceeded {
                len: self.samples.len(),
                capacity: self.capacity,
            });
        }

        Ok(evicted)
    }

    /// Copy of the current contents, oldest first
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    /// Prices of the current contents, oldest first
    pub fn prices(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::price).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Most recently appended sample
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

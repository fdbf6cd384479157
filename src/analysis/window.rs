/// Fixed-size sliding window over the most recent hourly values.
///
/// The event detector needs "rain over the last N hours" at every hour
/// boundary. The window keeps only the last N values, so the detector
/// never rescans the series. `total` sums the held values oldest to newest,
/// so it is bit-for-bit the sum of the same hours taken from the series.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingSum {
    capacity: usize,
    values: VecDeque<f64>,
}

impl RollingSum {
    /// A window holding at most `capacity` values. A zero capacity is
    /// treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    /// Add the newest value, evicting the oldest once the window is full.
    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Sum of the values currently in the window.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

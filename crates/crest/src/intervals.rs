// ABOUTME: Weighted half-open intervals over volume-profile positions.
// ABOUTME: Overlapping intervals add up when a position is queried.

use serde::Serialize;

/// A half-open range `[begin, end)` carrying a weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub begin: f64,
    pub end: f64,
    pub weight: f64,
}

impl Interval {
    pub fn contains(&self, position: f64) -> bool {
        self.begin <= position && position < self.end
    }
}

/// Weighted intervals over profile positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntervalMap {
    intervals: Vec<Interval>,
}

impl IntervalMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `[begin, end)` with `weight`. Empty ranges are ignored.
    pub fn insert(&mut self, begin: f64, end: f64, weight: f64) {
        if begin < end {
            self.intervals.push(Interval { begin, end, weight });
        }
    }

    /// Sum of the weights of every interval containing `position`.
    pub fn weight_at(&self, position: f64) -> f64 {
        self.intervals
            .iter()
            .filter(|iv| iv.contains(position))
            .map(|iv| iv.weight)
            .sum()
    }

    /// Upper bound of the furthest interval, 0 when empty.
    pub fn end(&self) -> f64 {
        self.intervals.iter().map(|iv| iv.end).fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }
}

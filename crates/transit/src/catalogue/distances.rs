//! Directed road distances between stops.

use std::collections::HashMap;

use crate::identifiers::StopId;

/// Asymmetric table of measured road distances, meters.
///
/// An entry from A to B says nothing about B to A. Lookups fall back to the
/// reverse pair when the forward pair was never recorded.
#[derive(Clone, Debug, Default)]
pub struct DistanceTable {
    entries: HashMap<(StopId, StopId), f64>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite the distance from `from` to `to`.
    pub fn set(&mut self, from: StopId, to: StopId, meters: f64) {
        self.entries.insert((from, to), meters);
    }

    /// The distance exactly as recorded for this direction.
    pub fn get_directly(&self, from: StopId, to: StopId) -> Option<f64> {
        self.entries.get(&(from, to)).copied()
    }

    /// Forward lookup, then the reverse pair.
    pub fn get(&self, from: StopId, to: StopId) -> Option<f64> {
        self.get_directly(from, to)
            .or_else(|| self.get_directly(to, from))
    }

    /// All recorded entries ordered by (from, to).
    pub fn entries(&self) -> Vec<(StopId, StopId, f64)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(&(from, to), &meters)| (from, to, meters))
            .collect();
        entries.sort_by_key(|&(from, to, _)| (from, to));
        entries
    }
}

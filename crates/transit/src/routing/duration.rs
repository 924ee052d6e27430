//! Edge weights and per-edge travel records of the transit graph.

use std::cmp::Ordering;
use std::ops::Add;

use crate::graph::{compare_totals, EdgeWeight};
use crate::identifiers::{BusId, StopId};

/// Cost of riding one bus over `span_count` consecutive legs.
///
/// Durations add component-wise. They order by total time
/// (`wait_time + travel_time`) only; the span is informational.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TravelDuration {
    pub span_count: u32,
    /// Seconds
    pub wait_time: f64,
    /// Seconds
    pub travel_time: f64,
}

impl TravelDuration {
    pub fn new(span_count: u32, wait_time: f64, travel_time: f64) -> Self {
        Self {
            span_count,
            wait_time,
            travel_time,
        }
    }

    pub fn total_time(&self) -> f64 {
        self.wait_time + self.travel_time
    }
}

impl Add for TravelDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            span_count: self.span_count + rhs.span_count,
            wait_time: self.wait_time + rhs.wait_time,
            travel_time: self.travel_time + rhs.travel_time,
        }
    }
}

impl EdgeWeight for TravelDuration {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        compare_totals(self.total_time(), other.total_time())
    }
}

/// What a graph edge means for a passenger: board `bus` at `from`, ride to
/// `to`. Stored apart from the graph, indexed by edge id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TravelProperties {
    pub from: StopId,
    pub to: StopId,
    pub bus: BusId,
    pub duration: TravelDuration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations_add_componentwise() {
        let sum = TravelDuration::new(2, 360.0, 180.0) + TravelDuration::new(1, 360.0, 90.0);

        assert_eq!(sum, TravelDuration::new(3, 720.0, 270.0));
        assert_eq!(sum.total_time(), 990.0);
        assert_eq!(TravelDuration::default().total_time(), 0.0);
    }

    #[test]
    fn test_ordering_ignores_span() {
        let short_hop = TravelDuration::new(1, 300.0, 100.0);
        let long_ride = TravelDuration::new(5, 100.0, 300.0);
        let slower = TravelDuration::new(1, 300.0, 101.0);

        assert_eq!(short_hop.compare(&long_ride), Some(Ordering::Equal));
        assert_eq!(short_hop.compare(&slower), Some(Ordering::Less));
        assert_eq!(slower.compare(&long_ride), Some(Ordering::Greater));

        let summed = TravelDuration::new(1, 0.0, 0.1) + TravelDuration::new(1, 0.0, 0.2);
        assert_eq!(summed.compare(&TravelDuration::new(2, 0.0, 0.3)), Some(Ordering::Equal));
    }
}

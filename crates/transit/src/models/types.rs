//! Core data types and errors for the transit catalogue.

use std::sync::Arc;

use geo::Point;

use crate::graph::GraphError;
use crate::identifiers::*;

// ============================================================================
// Entities
// ============================================================================

/// A named point of service.
///
/// The location is stored as a `geo::Point` with `x` = longitude and
/// `y` = latitude, both in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub name: Arc<str>,
    pub location: Point,
}

impl Stop {
    pub fn new(name: impl Into<Arc<str>>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            location: Point::new(longitude, latitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }
}

/// Statistics cached on a bus when it is added to the catalogue.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RouteStats {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Sum of directed ground distances along the ride path, meters
    pub route_length: f64,
    /// Sum of great-circle distances along the ride path, meters
    pub geo_length: f64,
    pub curvature: f64,
}

/// A bus route.
///
/// `stops` is the path exactly as entered. A roundtrip bus rides it once and
/// returns to its first stop; any other bus rides it forward and then back.
#[derive(Clone, Debug, PartialEq)]
pub struct Bus {
    pub name: Arc<str>,
    pub stops: Vec<StopId>,
    pub is_roundtrip: bool,
    pub stats: RouteStats,
}

impl Bus {
    /// Whether a roundtrip path needs an implicit leg back to its first stop.
    pub fn needs_closing_leg(&self) -> bool {
        self.is_roundtrip && self.stops.len() > 1 && self.stops.first() != self.stops.last()
    }

    /// Every stop visited in riding order over one full cycle of the bus.
    pub fn ride_path(&self) -> Vec<StopId> {
        let mut path = self.stops.clone();
        if self.is_roundtrip {
            if self.needs_closing_leg() {
                path.push(self.stops[0]);
            }
        } else if self.stops.len() > 1 {
            path.extend(self.stops.iter().rev().skip(1));
        }
        path
    }

    /// Number of stops on the route as reported to users.
    ///
    /// Roundtrip buses report the entered path length; back-and-forth buses
    /// with `n` entered stops report `2n - 1`.
    pub fn stop_count(&self) -> usize {
        match (self.is_roundtrip, self.stops.len()) {
            (true, n) => n,
            (false, 0) => 0,
            (false, n) => 2 * n - 1,
        }
    }
}

/// Read-only summary of a bus for stat queries.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteInfo {
    pub name: Arc<str>,
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_length: f64,
    pub curvature: f64,
}

// ============================================================================
// Routing settings
// ============================================================================

/// Routing settings in the units users provide them in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSettings {
    /// Minutes spent waiting at a stop before every boarding
    pub bus_wait_time: f64,
    /// Bus speed in km/h
    pub bus_velocity: f64,
}

/// Routing settings converted to the units graph weights use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoutingParameters {
    /// Seconds
    pub wait_time: f64,
    /// Meters per second
    pub velocity: f64,
}

impl RoutingParameters {
    const SECONDS_PER_MINUTE: f64 = 60.0;
    const KMH_PER_MPS: f64 = 3.6;

    /// Validate settings and convert them to seconds and meters per second.
    pub fn from_settings(settings: &RouteSettings) -> Result<Self> {
        if !settings.bus_velocity.is_finite() || settings.bus_velocity <= 0.0 {
            return Err(TransitError::InvalidData(format!(
                "bus velocity must be positive, got {} km/h",
                settings.bus_velocity
            )));
        }
        if !settings.bus_wait_time.is_finite() || settings.bus_wait_time < 0.0 {
            return Err(TransitError::InvalidData(format!(
                "bus wait time must not be negative, got {} min",
                settings.bus_wait_time
            )));
        }

        Ok(Self {
            wait_time: settings.bus_wait_time * Self::SECONDS_PER_MINUTE,
            velocity: settings.bus_velocity / Self::KMH_PER_MPS,
        })
    }

    /// Seconds needed to ride `meters` at the configured velocity.
    pub fn travel_time(&self, meters: f64) -> f64 {
        meters / self.velocity
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Stop not found: {0}")]
    StopNotFound(String),

    #[error("Bus not found: {0}")]
    BusNotFound(String),

    #[error("No road distance between {from} and {to} in either direction")]
    MissingDistance { from: String, to: String },

    #[error("No route from {from} to {to}")]
    Unreachable { from: String, to: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bus(stops: &[usize], is_roundtrip: bool) -> Bus {
        Bus {
            name: "test".into(),
            stops: stops.iter().copied().map(StopId::new).collect(),
            is_roundtrip,
            stats: RouteStats::default(),
        }
    }

    #[test]
    fn test_stop_coordinates() {
        let stop = Stop::new("Marushkino", 55.595884, 37.209755);
        assert_eq!(stop.latitude(), 55.595884);
        assert_eq!(stop.longitude(), 37.209755);
        assert_eq!(stop.location.x(), 37.209755);
    }

    #[test]
    fn test_ride_path_back_and_forth() {
        let bus = bus(&[0, 1, 2], false);
        let path: Vec<usize> = bus.ride_path().into_iter().map(StopId::index).collect();
        assert_eq!(path, vec![0, 1, 2, 1, 0]);
        assert_eq!(bus.stop_count(), 5);
    }

    #[test]
    fn test_ride_path_roundtrip_closed_as_entered() {
        let bus = bus(&[0, 1, 2, 0], true);
        assert!(!bus.needs_closing_leg());
        assert_eq!(bus.ride_path().len(), 4);
        assert_eq!(bus.stop_count(), 4);
    }

    #[test]
    fn test_ride_path_roundtrip_closed_implicitly() {
        let bus = bus(&[0, 1, 2], true);
        assert!(bus.needs_closing_leg());
        let path: Vec<usize> = bus.ride_path().into_iter().map(StopId::index).collect();
        assert_eq!(path, vec![0, 1, 2, 0]);
        assert_eq!(bus.stop_count(), 3);
    }

    #[test]
    fn test_degenerate_buses() {
        assert_eq!(bus(&[], false).stop_count(), 0);
        assert_eq!(bus(&[4], false).stop_count(), 1);
        assert_eq!(bus(&[4], false).ride_path().len(), 1);
        assert!(!bus(&[4], true).needs_closing_leg());
    }

    #[test]
    fn test_routing_parameters_conversion() {
        let params = RoutingParameters::from_settings(&RouteSettings {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        })
        .unwrap();

        assert_relative_eq!(params.wait_time, 360.0);
        assert_relative_eq!(params.velocity, 40.0 / 3.6);
        assert_relative_eq!(params.travel_time(2000.0), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_routing_parameters_rejects_bad_values() {
        let zero_speed = RouteSettings { bus_wait_time: 1.0, bus_velocity: 0.0 };
        assert!(matches!(
            RoutingParameters::from_settings(&zero_speed),
            Err(TransitError::InvalidData(_))
        ));

        let negative_wait = RouteSettings { bus_wait_time: -1.0, bus_velocity: 30.0 };
        assert!(RoutingParameters::from_settings(&negative_wait).is_err());

        let nan_speed = RouteSettings { bus_wait_time: 1.0, bus_velocity: f64::NAN };
        assert!(RoutingParameters::from_settings(&nan_speed).is_err());
    }
}

//! In-memory transit catalogue.
//!
//! Owns every stop, bus and road distance. Stops and buses are stored in
//! append-only arenas and addressed by [`StopId`] / [`BusId`] handles, so
//! handles handed out once stay valid for the catalogue's lifetime. Other
//! structures (the routing graph, the snapshot codec) refer to entities only
//! through these handles.

pub mod distances;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use log::{debug, warn};

use crate::identifiers::*;
use crate::models::types::*;
use crate::spatial::queries::path_length;

pub use distances::DistanceTable;

#[derive(Clone, Debug, Default)]
pub struct TransportCatalogue {
    // Core data
    stops: Vec<Stop>,
    buses: Vec<Bus>,

    // Lookup maps
    stop_map: HashMap<Arc<str>, StopId>,
    bus_map: HashMap<Arc<str>, BusId>,
    buses_at_stop: Vec<BTreeSet<BusId>>,

    distances: DistanceTable,
}

impl TransportCatalogue {
    /// Create a new empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Stops ----

    /// Insert a stop. A name that is already known keeps its first
    /// definition and its existing handle is returned.
    pub fn add_stop(&mut self, name: &str, latitude: f64, longitude: f64) -> StopId {
        if let Some(&id) = self.stop_map.get(name) {
            warn!("Stop {name} is already defined, keeping the first definition");
            return id;
        }

        let id = StopId::new(self.stops.len());
        let stop = Stop::new(name, latitude, longitude);
        self.stop_map.insert(stop.name.clone(), id);
        self.stops.push(stop);
        self.buses_at_stop.push(BTreeSet::new());
        id
    }

    pub fn find_stop(&self, name: &str) -> Option<StopId> {
        self.stop_map.get(name).copied()
    }

    /// Stop behind a handle issued by this catalogue.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this catalogue.
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    /// All stops in insertion order; a stop's position is its handle index.
    pub fn all_stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    // ---- Distances ----

    /// Store or overwrite the road distance from `from` to `to`.
    pub fn set_distance(&mut self, from: StopId, to: StopId, meters: f64) -> Result<()> {
        for id in [from, to] {
            if id.index() >= self.stops.len() {
                return Err(TransitError::StopNotFound(id.to_string()));
            }
        }
        if !meters.is_finite() || meters < 0.0 {
            return Err(TransitError::InvalidData(format!(
                "distance from {} to {} must be a non-negative number of meters, got {meters}",
                self.stop(from).name,
                self.stop(to).name,
            )));
        }
        self.distances.set(from, to, meters);
        Ok(())
    }

    /// Road distance from `from` to `to`, falling back to the reverse entry.
    ///
    /// A stop is at distance zero from itself unless an explicit entry says
    /// otherwise. Any other pair with no entry in either direction is an
    /// error: routing over it would be meaningless.
    pub fn get_distance(&self, from: StopId, to: StopId) -> Result<f64> {
        match self.distances.get(from, to) {
            Some(meters) => Ok(meters),
            None if from == to => Ok(0.0),
            None => Err(TransitError::MissingDistance {
                from: self.stop(from).name.to_string(),
                to: self.stop(to).name.to_string(),
            }),
        }
    }

    /// Every recorded directed distance ordered by (from, to).
    pub fn all_distances(&self) -> Vec<(StopId, StopId, f64)> {
        self.distances.entries()
    }

    // ---- Buses ----

    /// Insert a bus over already known stops and cache its route statistics.
    ///
    /// Every stop name must resolve, and every leg of the ride path must have
    /// a road distance, so stops and distances have to be loaded first. A bus
    /// name that is already known keeps its first definition.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: &str,
        stop_names: &[S],
        is_roundtrip: bool,
    ) -> Result<BusId> {
        if let Some(&id) = self.bus_map.get(name) {
            warn!("Bus {name} is already defined, keeping the first definition");
            return Ok(id);
        }

        let stops = stop_names
            .iter()
            .map(|stop_name| {
                let stop_name = stop_name.as_ref();
                self.find_stop(stop_name)
                    .ok_or_else(|| TransitError::StopNotFound(stop_name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut bus = Bus {
            name: name.into(),
            stops,
            is_roundtrip,
            stats: RouteStats::default(),
        };
        bus.stats = self.compute_stats(&bus)?;

        let id = BusId::new(self.buses.len());
        for stop in &bus.stops {
            self.buses_at_stop[stop.index()].insert(id);
        }
        debug!(
            "Added bus {} with {} stops, {:.0} m",
            bus.name, bus.stats.stop_count, bus.stats.route_length
        );
        self.bus_map.insert(bus.name.clone(), id);
        self.buses.push(bus);
        Ok(id)
    }

    fn compute_stats(&self, bus: &Bus) -> Result<RouteStats> {
        let path = bus.ride_path();

        let mut route_length = 0.0;
        for leg in path.windows(2) {
            route_length += self.get_distance(leg[0], leg[1])?;
        }
        let geo_length = path_length(path.iter().map(|&id| self.stop(id)));

        let unique_stop_count = bus.stops.iter().collect::<HashSet<_>>().len();
        let curvature = if geo_length > 0.0 {
            route_length / geo_length
        } else {
            1.0
        };

        Ok(RouteStats {
            stop_count: bus.stop_count(),
            unique_stop_count,
            route_length,
            geo_length,
            curvature,
        })
    }

    pub fn find_bus(&self, name: &str) -> Option<BusId> {
        self.bus_map.get(name).copied()
    }

    /// Bus behind a handle issued by this catalogue.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this catalogue.
    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.index()]
    }

    /// All buses in insertion order; a bus's position is its handle index.
    pub fn all_buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    // ---- Stat queries ----

    pub fn get_route_info(&self, bus_name: &str) -> Option<RouteInfo> {
        let bus = self.bus(self.find_bus(bus_name)?);
        Some(RouteInfo {
            name: bus.name.clone(),
            stop_count: bus.stats.stop_count,
            unique_stop_count: bus.stats.unique_stop_count,
            route_length: bus.stats.route_length,
            curvature: bus.stats.curvature,
        })
    }

    /// Names of the buses serving a stop, sorted.
    ///
    /// `None` means the stop is unknown; an empty set means the stop exists
    /// but no bus serves it.
    pub fn get_stop_info(&self, stop_name: &str) -> Option<BTreeSet<&str>> {
        let id = self.find_stop(stop_name)?;
        Some(
            self.buses_at_stop[id.index()]
                .iter()
                .map(|&bus| &*self.bus(bus).name)
                .collect(),
        )
    }
}

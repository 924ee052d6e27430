//! Snapshot codec: persist a built router with its catalogue and restore it
//! without recomputing anything.
//!
//! On save: capture records -> bitcode encode -> prepend header -> atomic write.
//! On load: read -> check header -> decode -> rebuild catalogue -> restore graph,
//! router table and edge records as stored.

pub mod atomic_write;
pub mod header;
pub mod schema;

use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::catalogue::TransportCatalogue;
use crate::graph::{DirectedWeightedGraph, Edge, RouteInternalData, RoutesInternalData};
use crate::identifiers::*;
use crate::models::types::*;
use crate::routing::{RoutingState, TransportRouter, TravelDuration, TravelProperties};

use self::atomic_write::atomic_write;
use self::header::{unwrap_header, wrap_with_header};
use self::schema::*;

/// Translates between catalogue handles and the names snapshots store.
#[derive(Clone, Copy)]
pub struct SnapshotContext<'a> {
    catalogue: &'a TransportCatalogue,
}

impl<'a> SnapshotContext<'a> {
    pub fn new(catalogue: &'a TransportCatalogue) -> Self {
        Self { catalogue }
    }

    fn stop_name(&self, id: StopId) -> String {
        self.catalogue.stop(id).name.to_string()
    }

    fn bus_name(&self, id: BusId) -> String {
        self.catalogue.bus(id).name.to_string()
    }

    fn stop_id(&self, name: &str) -> Result<StopId> {
        self.catalogue
            .find_stop(name)
            .ok_or_else(|| TransitError::StopNotFound(name.to_string()))
    }

    fn bus_id(&self, name: &str) -> Result<BusId> {
        self.catalogue
            .find_bus(name)
            .ok_or_else(|| TransitError::BusNotFound(name.to_string()))
    }

    fn save_travel(&self, props: &TravelProperties) -> SavedTravel {
        SavedTravel {
            from: self.stop_name(props.from),
            to: self.stop_name(props.to),
            bus: self.bus_name(props.bus),
            duration: props.duration.into(),
        }
    }

    fn restore_travel(&self, saved: &SavedTravel) -> Result<TravelProperties> {
        Ok(TravelProperties {
            from: self.stop_id(&saved.from)?,
            to: self.stop_id(&saved.to)?,
            bus: self.bus_id(&saved.bus)?,
            duration: saved.duration.into(),
        })
    }
}

// ============================================================================
// Capture
// ============================================================================

fn capture_catalogue(context: SnapshotContext<'_>) -> (Vec<SavedStop>, Vec<SavedBus>, Vec<SavedDistance>) {
    let catalogue = context.catalogue;

    let stops = catalogue
        .all_stops()
        .iter()
        .map(|stop| SavedStop {
            name: stop.name.to_string(),
            latitude: stop.latitude(),
            longitude: stop.longitude(),
        })
        .collect();

    let buses = catalogue
        .all_buses()
        .iter()
        .map(|bus| SavedBus {
            name: bus.name.to_string(),
            stop_names: bus.stops.iter().map(|&id| context.stop_name(id)).collect(),
            is_roundtrip: bus.is_roundtrip,
        })
        .collect();

    let distances = catalogue
        .all_distances()
        .into_iter()
        .map(|(from, to, meters)| SavedDistance {
            from: context.stop_name(from),
            to: context.stop_name(to),
            meters,
        })
        .collect();

    (stops, buses, distances)
}

fn capture_routing(context: SnapshotContext<'_>, router: &TransportRouter) -> SavedRouting {
    let graph = router.graph();
    let parameters = router.parameters();

    SavedRouting {
        wait_time: parameters.wait_time,
        velocity: parameters.velocity,
        vertex_stops: router
            .vertex_stops()
            .iter()
            .map(|&id| context.stop_name(id))
            .collect(),
        edges: graph
            .edges()
            .iter()
            .map(|edge| SavedEdge {
                from: edge.from as u32,
                to: edge.to as u32,
                weight: edge.weight.into(),
            })
            .collect(),
        incidence_lists: graph
            .incidence_lists()
            .iter()
            .map(|list| list.iter().map(|&edge| edge as u32).collect())
            .collect(),
        edge_properties: router
            .edge_properties()
            .iter()
            .map(|props| context.save_travel(props))
            .collect(),
        routes: router
            .router()
            .internal_data()
            .iter()
            .flatten()
            .map(|&route| {
                route.map(|route| SavedRoute {
                    weight: route.weight.into(),
                    hops: route.hops,
                    prev_edge: route.prev_edge.map(|edge| edge as u32),
                })
            })
            .collect(),
    }
}

/// Collect everything a snapshot persists from a built router.
pub fn capture(router: &TransportRouter) -> SnapshotData {
    let context = SnapshotContext::new(router.catalogue());
    let (stops, buses, distances) = capture_catalogue(context);

    SnapshotData {
        stops,
        buses,
        distances,
        routing: capture_routing(context, router),
    }
}

// ============================================================================
// Restore
// ============================================================================

fn restore_catalogue(data: &SnapshotData) -> Result<TransportCatalogue> {
    let mut catalogue = TransportCatalogue::new();

    for stop in &data.stops {
        catalogue.add_stop(&stop.name, stop.latitude, stop.longitude);
    }
    if catalogue.stop_count() != data.stops.len() {
        return Err(TransitError::InvalidData("duplicate stop names".to_string()));
    }

    {
        let context = SnapshotContext::new(&catalogue);
        let entries = data
            .distances
            .iter()
            .map(|entry| -> Result<(StopId, StopId, f64)> {
                Ok((context.stop_id(&entry.from)?, context.stop_id(&entry.to)?, entry.meters))
            })
            .collect::<Result<Vec<_>>>()?;
        for (from, to, meters) in entries {
            catalogue.set_distance(from, to, meters)?;
        }
    }

    for bus in &data.buses {
        catalogue.add_bus(&bus.name, &bus.stop_names, bus.is_roundtrip)?;
    }
    if catalogue.bus_count() != data.buses.len() {
        return Err(TransitError::InvalidData("duplicate bus names".to_string()));
    }

    Ok(catalogue)
}

fn restore_router(catalogue: Arc<TransportCatalogue>, saved: &SavedRouting) -> Result<TransportRouter> {
    let context = SnapshotContext::new(&catalogue);

    if !saved.velocity.is_finite() || saved.velocity <= 0.0 || !saved.wait_time.is_finite() || saved.wait_time < 0.0 {
        return Err(TransitError::InvalidData(format!(
            "routing parameters wait {}s, velocity {}m/s are out of range",
            saved.wait_time, saved.velocity
        )));
    }
    let parameters = RoutingParameters {
        wait_time: saved.wait_time,
        velocity: saved.velocity,
    };

    let vertex_stops = saved
        .vertex_stops
        .iter()
        .map(|name| context.stop_id(name))
        .collect::<Result<Vec<_>>>()?;

    let edges = saved
        .edges
        .iter()
        .map(|edge| Edge {
            from: edge.from as usize,
            to: edge.to as usize,
            weight: edge.weight.into(),
        })
        .collect();
    let incidence_lists = saved
        .incidence_lists
        .iter()
        .map(|list| list.iter().map(|&edge| edge as usize).collect())
        .collect();
    let graph = DirectedWeightedGraph::from_parts(edges, incidence_lists)?;

    let edge_properties = saved
        .edge_properties
        .iter()
        .map(|props| context.restore_travel(props))
        .collect::<Result<Vec<_>>>()?;

    let vertex_count = graph.vertex_count();
    if saved.routes.len() != vertex_count * vertex_count {
        return Err(TransitError::InvalidData(format!(
            "router table has {} cells for {vertex_count} vertices",
            saved.routes.len()
        )));
    }
    let routes: RoutesInternalData<TravelDuration> = saved
        .routes
        .chunks(vertex_count.max(1))
        .take(vertex_count)
        .map(|row| {
            row.iter()
                .map(|&cell| {
                    cell.map(|route| RouteInternalData {
                        weight: route.weight.into(),
                        hops: route.hops,
                        prev_edge: route.prev_edge.map(|edge| edge as usize),
                    })
                })
                .collect()
        })
        .collect();

    TransportRouter::from_state(
        catalogue,
        RoutingState {
            parameters,
            vertex_stops,
            edge_properties,
            graph,
            routes,
        },
    )
}

/// Rebuild a router from captured records.
///
/// Any inconsistency in the records is reported as `CorruptSnapshot`.
pub fn restore(data: &SnapshotData) -> Result<TransportRouter> {
    let corrupt = |error: TransitError| TransitError::CorruptSnapshot(error.to_string());

    let catalogue = Arc::new(restore_catalogue(data).map_err(corrupt)?);
    restore_router(catalogue, &data.routing).map_err(corrupt)
}

// ============================================================================
// Bytes and files
// ============================================================================

/// Encode a router and its catalogue into framed snapshot bytes.
pub fn encode_snapshot(router: &TransportRouter) -> Result<Vec<u8>> {
    wrap_with_header(&capture(router).encode())
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<TransportRouter> {
    let payload = unwrap_header(bytes)?;
    let data = SnapshotData::decode(payload)
        .map_err(|error| TransitError::CorruptSnapshot(format!("undecodable payload: {error}")))?;
    restore(&data)
}

pub fn save_snapshot(path: impl AsRef<Path>, router: &TransportRouter) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_snapshot(router)?;
    atomic_write(path, &bytes)?;
    info!("Saved snapshot of {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<TransportRouter> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let router = decode_snapshot(&bytes)?;
    info!(
        "Loaded snapshot from {}: {} stops, {} buses",
        path.display(),
        router.catalogue().stop_count(),
        router.catalogue().bus_count()
    );
    Ok(router)
}

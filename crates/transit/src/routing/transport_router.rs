//! Transit graph construction and itinerary queries.
//!
//! One graph vertex per catalogue stop, numbered in catalogue order. For every
//! bus, an edge joins each pair of stops reachable by one uninterrupted ride,
//! weighted with the boarding wait plus the ride time. Edges never straddle
//! two buses, so every transfer pays the wait again.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};

use crate::catalogue::TransportCatalogue;
use crate::graph::{DirectedWeightedGraph, Edge, Router, RoutesInternalData, VertexId};
use crate::identifiers::*;
use crate::models::types::*;
use crate::routing::duration::{TravelDuration, TravelProperties};

/// Cumulative road distances along one stop sequence, computed once per bus
/// so any span costs a subtraction.
#[derive(Debug)]
struct SpanDistances {
    forward: Vec<f64>,
    backward: Vec<f64>,
}

impl SpanDistances {
    /// `backward` is only filled for buses that also ride the sequence in
    /// reverse.
    fn new(catalogue: &TransportCatalogue, stops: &[StopId], with_backward: bool) -> Result<Self> {
        let mut forward = Vec::with_capacity(stops.len());
        let mut backward = Vec::with_capacity(if with_backward { stops.len() } else { 0 });
        if !stops.is_empty() {
            forward.push(0.0);
            if with_backward {
                backward.push(0.0);
            }
        }

        for leg in stops.windows(2) {
            let ahead = forward.last().copied().unwrap_or_default();
            forward.push(ahead + catalogue.get_distance(leg[0], leg[1])?);
            if with_backward {
                let behind = backward.last().copied().unwrap_or_default();
                backward.push(behind + catalogue.get_distance(leg[1], leg[0])?);
            }
        }

        Ok(Self { forward, backward })
    }

    /// Road distance riding from position `from` to position `to`.
    fn between(&self, from: usize, to: usize) -> f64 {
        if from <= to {
            self.forward[to] - self.forward[from]
        } else {
            self.backward[from] - self.backward[to]
        }
    }
}

/// Everything the router needs besides the catalogue. Produced by a fresh
/// build or by restoring a snapshot.
#[derive(Clone, Debug)]
pub struct RoutingState {
    pub parameters: RoutingParameters,
    /// Stop of each vertex, indexed by vertex id
    pub vertex_stops: Vec<StopId>,
    /// Travel record of each edge, indexed by edge id
    pub edge_properties: Vec<TravelProperties>,
    pub graph: DirectedWeightedGraph<TravelDuration>,
    /// Precomputed router table for `graph`
    pub routes: RoutesInternalData<TravelDuration>,
}

struct GraphBuilder {
    parameters: RoutingParameters,
    graph: DirectedWeightedGraph<TravelDuration>,
    edge_properties: Vec<TravelProperties>,
}

impl GraphBuilder {
    fn add_ride(&mut self, bus: BusId, from: StopId, to: StopId, span_count: usize, meters: f64) {
        if from == to {
            return;
        }

        let duration = TravelDuration::new(
            span_count as u32,
            self.parameters.wait_time,
            self.parameters.travel_time(meters),
        );
        // Vertex ids equal stop indices in a fresh build
        self.graph.add_edge(Edge {
            from: from.index(),
            to: to.index(),
            weight: duration,
        });
        self.edge_properties.push(TravelProperties {
            from,
            to,
            bus,
            duration,
        });
    }

    fn add_bus(&mut self, catalogue: &TransportCatalogue, bus_id: BusId) -> Result<()> {
        let bus = catalogue.bus(bus_id);

        if bus.is_roundtrip {
            let path = bus.ride_path();
            let distances = SpanDistances::new(catalogue, &path, false)?;
            for i in 0..path.len() {
                for j in i + 1..path.len() {
                    self.add_ride(bus_id, path[i], path[j], j - i, distances.between(i, j));
                }
            }
        } else {
            let stops = &bus.stops;
            let distances = SpanDistances::new(catalogue, stops, true)?;
            for i in 0..stops.len() {
                for j in i + 1..stops.len() {
                    self.add_ride(bus_id, stops[i], stops[j], j - i, distances.between(i, j));
                    self.add_ride(bus_id, stops[j], stops[i], j - i, distances.between(j, i));
                }
            }
        }

        Ok(())
    }
}

/// Answers fastest-itinerary queries over an immutable catalogue.
///
/// A value of this type is always fully built: construction either completes
/// or returns an error, and nothing mutates it afterwards.
#[derive(Clone, Debug)]
pub struct TransportRouter {
    catalogue: Arc<TransportCatalogue>,
    parameters: RoutingParameters,
    vertex_stops: Vec<StopId>,
    stop_vertices: HashMap<StopId, VertexId>,
    edge_properties: Vec<TravelProperties>,
    graph: DirectedWeightedGraph<TravelDuration>,
    router: Router<TravelDuration>,
}

impl TransportRouter {
    /// Build the routing graph for every bus in `catalogue` and precompute
    /// all shortest paths.
    pub fn new(catalogue: Arc<TransportCatalogue>, settings: RouteSettings) -> Result<Self> {
        let parameters = RoutingParameters::from_settings(&settings)?;
        let vertex_stops: Vec<StopId> = (0..catalogue.stop_count()).map(StopId::new).collect();

        let mut builder = GraphBuilder {
            parameters,
            graph: DirectedWeightedGraph::new(vertex_stops.len()),
            edge_properties: Vec::new(),
        };
        for index in 0..catalogue.bus_count() {
            builder.add_bus(&catalogue, BusId::new(index))?;
        }
        debug!(
            "Routing graph has {} vertices and {} edges",
            builder.graph.vertex_count(),
            builder.graph.edge_count()
        );

        let routes = Router::new(&builder.graph).into_internal_data();
        info!(
            "Built router over {} stops and {} buses",
            catalogue.stop_count(),
            catalogue.bus_count()
        );

        Self::from_state(
            catalogue,
            RoutingState {
                parameters,
                vertex_stops,
                edge_properties: builder.edge_properties,
                graph: builder.graph,
                routes,
            },
        )
    }

    /// Assemble a router from previously built state without recomputing it.
    ///
    /// The vertex mapping must be a bijection onto the catalogue's stops,
    /// every travel record must match its graph edge, and the router table
    /// must fit the graph.
    pub fn from_state(catalogue: Arc<TransportCatalogue>, state: RoutingState) -> Result<Self> {
        let RoutingState {
            parameters,
            vertex_stops,
            edge_properties,
            graph,
            routes,
        } = state;

        if vertex_stops.len() != catalogue.stop_count() || graph.vertex_count() != vertex_stops.len() {
            return Err(TransitError::InvalidData(format!(
                "{} vertices and {} mapped stops do not cover {} catalogue stops",
                graph.vertex_count(),
                vertex_stops.len(),
                catalogue.stop_count()
            )));
        }

        let mut stop_vertices = HashMap::with_capacity(vertex_stops.len());
        for (vertex, &stop) in vertex_stops.iter().enumerate() {
            if stop.index() >= catalogue.stop_count() || stop_vertices.insert(stop, vertex).is_some() {
                return Err(TransitError::InvalidData(format!(
                    "vertex {vertex} maps to an unknown or already mapped stop {stop}"
                )));
            }
        }

        if edge_properties.len() != graph.edge_count() {
            return Err(TransitError::InvalidData(format!(
                "{} travel records for {} graph edges",
                edge_properties.len(),
                graph.edge_count()
            )));
        }
        for (edge_id, (edge, props)) in graph.edges().iter().zip(&edge_properties).enumerate() {
            let endpoints_match = stop_vertices.get(&props.from) == Some(&edge.from)
                && stop_vertices.get(&props.to) == Some(&edge.to);
            if !endpoints_match || edge.weight != props.duration || props.bus.index() >= catalogue.bus_count() {
                return Err(TransitError::InvalidData(format!(
                    "travel record of edge {edge_id} does not match the graph"
                )));
            }
        }

        let router = Router::from_internal_data(&graph, routes)?;

        Ok(Self {
            catalogue,
            parameters,
            vertex_stops,
            stop_vertices,
            edge_properties,
            graph,
            router,
        })
    }

    /// Fastest sequence of rides from stop `from` to stop `to`.
    ///
    /// The same stop on both ends yields an empty sequence. Unknown stops
    /// give `StopNotFound`; known stops with no connecting service give
    /// `Unreachable`.
    pub fn find_route(&self, from: &str, to: &str) -> Result<Vec<&TravelProperties>> {
        let from_vertex = self.vertex_of(from)?;
        let to_vertex = self.vertex_of(to)?;
        if from_vertex == to_vertex {
            return Ok(Vec::new());
        }

        let path = self
            .router
            .build_route(&self.graph, from_vertex, to_vertex)
            .ok_or_else(|| TransitError::Unreachable {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        Ok(path
            .edges
            .iter()
            .map(|&edge_id| &self.edge_properties[edge_id])
            .collect())
    }

    fn vertex_of(&self, stop_name: &str) -> Result<VertexId> {
        self.catalogue
            .find_stop(stop_name)
            .and_then(|stop| self.stop_vertices.get(&stop).copied())
            .ok_or_else(|| TransitError::StopNotFound(stop_name.to_string()))
    }

    // ---- Accessors for the snapshot codec ----

    pub fn catalogue(&self) -> &Arc<TransportCatalogue> {
        &self.catalogue
    }

    pub fn parameters(&self) -> RoutingParameters {
        self.parameters
    }

    pub fn vertex_stops(&self) -> &[StopId] {
        &self.vertex_stops
    }

    pub fn edge_properties(&self) -> &[TravelProperties] {
        &self.edge_properties
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<TravelDuration> {
        &self.graph
    }

    pub fn router(&self) -> &Router<TravelDuration> {
        &self.router
    }
}

//! All-pairs shortest path router.
//!
//! Construction runs a Floyd–Warshall relaxation over the whole graph once and
//! keeps, for every ordered vertex pair, the best known weight and the last
//! edge of that path. A query then only walks predecessor edges back from the
//! target, without searching.
//!
//! ## Ordering and ties
//!
//! Paths compare by weight first. Between paths of equal weight the one with
//! fewer edges wins. Floating point totals within [`RELATIVE_TOLERANCE`] of
//! each other count as equal, so summation order never decides a tie. Remaining ties keep whichever path the relaxation found
//! first, which is deterministic for a given vertex numbering and edge order.

use std::cmp::Ordering;
use std::ops::Add;

use log::debug;

use super::{DirectedWeightedGraph, EdgeId, GraphError, VertexId};

/// Weight usable by the router: composes by addition and `Default` is the
/// weight of the empty path.
pub trait EdgeWeight: Copy + Default + Add<Output = Self> {
    /// Order two weights; `None` when they are not comparable.
    fn compare(&self, other: &Self) -> Option<Ordering>;
}

impl EdgeWeight for f64 {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        compare_totals(*self, *other)
    }
}

pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Order two floating point totals, treating values that differ by at most
/// `RELATIVE_TOLERANCE` of the larger magnitude as equal.
pub fn compare_totals(a: f64, b: f64) -> Option<Ordering> {
    if (a - b).abs() <= RELATIVE_TOLERANCE * a.abs().max(b.abs()) {
        return Some(Ordering::Equal);
    }
    a.partial_cmp(&b)
}

/// Best known path between one ordered pair of vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteInternalData<W> {
    pub weight: W,
    /// Number of edges on the path
    pub hops: u32,
    /// Last edge of the path, `None` for the empty path
    pub prev_edge: Option<EdgeId>,
}

impl<W: EdgeWeight> RouteInternalData<W> {
    fn is_better_than(&self, other: &Self) -> bool {
        match self.weight.compare(&other.weight) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => self.hops < other.hops,
            _ => false,
        }
    }
}

/// Result of a path query: total weight and the edges to follow in order.
#[derive(Clone, Debug, PartialEq)]
pub struct PathInfo<W> {
    pub weight: W,
    pub edges: Vec<EdgeId>,
}

/// Row-major table indexed by `[from][to]`
pub type RoutesInternalData<W> = Vec<Vec<Option<RouteInternalData<W>>>>;

#[derive(Clone, Debug, PartialEq)]
pub struct Router<W> {
    routes_internal_data: RoutesInternalData<W>,
}

impl<W: EdgeWeight> Router<W> {
    /// Precompute best paths between all pairs of vertices of `graph`.
    pub fn new(graph: &DirectedWeightedGraph<W>) -> Self {
        let vertex_count = graph.vertex_count();
        let mut router = Self {
            routes_internal_data: vec![vec![None; vertex_count]; vertex_count],
        };
        router.initialize(graph);
        router.relax_all();
        debug!(
            "Router precomputed {} vertices, {} edges",
            vertex_count,
            graph.edge_count()
        );
        router
    }

    fn initialize(&mut self, graph: &DirectedWeightedGraph<W>) {
        for vertex in 0..graph.vertex_count() {
            self.routes_internal_data[vertex][vertex] = Some(RouteInternalData {
                weight: W::default(),
                hops: 0,
                prev_edge: None,
            });

            for &edge_id in graph.incident_edges(vertex) {
                let edge = graph.edge(edge_id);
                let candidate = RouteInternalData {
                    weight: edge.weight,
                    hops: 1,
                    prev_edge: Some(edge_id),
                };
                let slot = &mut self.routes_internal_data[vertex][edge.to];
                if slot.map_or(true, |current| candidate.is_better_than(&current)) {
                    *slot = Some(candidate);
                }
            }
        }
    }

    fn relax_all(&mut self) {
        let vertex_count = self.routes_internal_data.len();
        for through in 0..vertex_count {
            for from in 0..vertex_count {
                let Some(route_from) = self.routes_internal_data[from][through] else {
                    continue;
                };
                for to in 0..vertex_count {
                    let Some(route_to) = self.routes_internal_data[through][to] else {
                        continue;
                    };
                    let candidate = RouteInternalData {
                        weight: route_from.weight + route_to.weight,
                        hops: route_from.hops + route_to.hops,
                        prev_edge: route_to.prev_edge.or(route_from.prev_edge),
                    };
                    let slot = &mut self.routes_internal_data[from][to];
                    if slot.map_or(true, |current| candidate.is_better_than(&current)) {
                        *slot = Some(candidate);
                    }
                }
            }
        }
    }

    /// Restore a router from previously computed data for the same graph.
    ///
    /// Checks the table shape and that every predecessor edge exists and ends
    /// at its column's vertex.
    pub fn from_internal_data(
        graph: &DirectedWeightedGraph<W>,
        routes_internal_data: RoutesInternalData<W>,
    ) -> Result<Self, GraphError> {
        let expected = graph.vertex_count();
        if routes_internal_data.len() != expected {
            return Err(GraphError::RouterSizeMismatch {
                expected,
                found: routes_internal_data.len(),
            });
        }

        for (from, row) in routes_internal_data.iter().enumerate() {
            if row.len() != expected {
                return Err(GraphError::RouterSizeMismatch {
                    expected,
                    found: row.len(),
                });
            }
            for (to, route) in row.iter().enumerate() {
                let Some(edge_id) = route.and_then(|route| route.prev_edge) else {
                    continue;
                };
                if edge_id >= graph.edge_count() {
                    return Err(GraphError::EdgeOutOfRange {
                        edge: edge_id,
                        edge_count: graph.edge_count(),
                    });
                }
                if graph.edge(edge_id).to != to {
                    return Err(GraphError::RouteEdgeMismatch {
                        from,
                        to,
                        edge: edge_id,
                    });
                }
            }
        }

        Ok(Self {
            routes_internal_data,
        })
    }

    pub fn internal_data(&self) -> &RoutesInternalData<W> {
        &self.routes_internal_data
    }

    pub fn into_internal_data(self) -> RoutesInternalData<W> {
        self.routes_internal_data
    }

    /// Cheapest path from `from` to `to`, or `None` when `to` is unreachable.
    ///
    /// `graph` must be the graph this router was built for.
    pub fn build_route(
        &self,
        graph: &DirectedWeightedGraph<W>,
        from: VertexId,
        to: VertexId,
    ) -> Option<PathInfo<W>> {
        let route = (*self.routes_internal_data.get(from)?.get(to)?)?;

        let mut edges = Vec::with_capacity(route.hops as usize);
        let mut prev_edge = route.prev_edge;
        while let Some(edge_id) = prev_edge {
            if edges.len() >= graph.vertex_count() {
                debug!("Predecessor chain from {from} to {to} does not terminate");
                return None;
            }
            edges.push(edge_id);
            prev_edge = self.routes_internal_data[from][graph.edge(edge_id).from]
                .and_then(|route| route.prev_edge);
        }
        edges.reverse();

        Some(PathInfo {
            weight: route.weight,
            edges,
        })
    }
}

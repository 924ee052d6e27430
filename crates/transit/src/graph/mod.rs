//! Directed weighted graph with stable edge ids.
//!
//! The graph knows nothing about transit. Vertices are dense indices fixed at
//! construction, edges are appended and never removed, and an edge's id is its
//! position in insertion order. Routers and persisted data rely on both.

pub mod router;

pub use router::{compare_totals, EdgeWeight, PathInfo, RouteInternalData, Router, RoutesInternalData};

pub type VertexId = usize;
pub type EdgeId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge<W> {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: W,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: VertexId, vertex_count: usize },

    #[error("Edge {edge} is out of range for a graph with {edge_count} edges")]
    EdgeOutOfRange { edge: EdgeId, edge_count: usize },

    #[error("Edge {edge} is listed as incident to vertex {vertex} but starts at {from}")]
    MisplacedEdge {
        edge: EdgeId,
        vertex: VertexId,
        from: VertexId,
    },

    #[error("Edge {edge} appears {count} times in the incidence lists")]
    IncidenceMismatch { edge: EdgeId, count: usize },

    #[error("Router data covers {found} vertices, graph has {expected}")]
    RouterSizeMismatch { expected: usize, found: usize },

    #[error("Route from {from} to {to} ends with edge {edge}, which does not reach {to}")]
    RouteEdgeMismatch {
        from: VertexId,
        to: VertexId,
        edge: EdgeId,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectedWeightedGraph<W> {
    edges: Vec<Edge<W>>,
    incidence_lists: Vec<Vec<EdgeId>>,
}

impl<W> DirectedWeightedGraph<W> {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence_lists: (0..vertex_count).map(|_| Vec::new()).collect(),
        }
    }

    /// Rebuild a graph from persisted parts, checking that every edge is
    /// listed exactly once, under its own source vertex.
    pub fn from_parts(
        edges: Vec<Edge<W>>,
        incidence_lists: Vec<Vec<EdgeId>>,
    ) -> Result<Self, GraphError> {
        let vertex_count = incidence_lists.len();
        let mut seen = vec![0usize; edges.len()];

        for edge in &edges {
            for vertex in [edge.from, edge.to] {
                if vertex >= vertex_count {
                    return Err(GraphError::VertexOutOfRange {
                        vertex,
                        vertex_count,
                    });
                }
            }
        }

        for (vertex, list) in incidence_lists.iter().enumerate() {
            for &edge in list {
                let from = edges
                    .get(edge)
                    .ok_or(GraphError::EdgeOutOfRange {
                        edge,
                        edge_count: edges.len(),
                    })?
                    .from;
                if from != vertex {
                    return Err(GraphError::MisplacedEdge { edge, vertex, from });
                }
                seen[edge] += 1;
            }
        }

        if let Some((edge, &count)) = seen.iter().enumerate().find(|&(_, &count)| count != 1) {
            return Err(GraphError::IncidenceMismatch { edge, count });
        }

        Ok(Self {
            edges,
            incidence_lists,
        })
    }

    /// Append an edge and return its id.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a vertex of this graph.
    pub fn add_edge(&mut self, edge: Edge<W>) -> EdgeId {
        assert!(
            edge.from < self.vertex_count() && edge.to < self.vertex_count(),
            "edge {} -> {} is outside a graph with {} vertices",
            edge.from,
            edge.to,
            self.vertex_count()
        );
        let id = self.edges.len();
        self.incidence_lists[edge.from].push(id);
        self.edges.push(edge);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence_lists.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id: EdgeId) -> &Edge<W> {
        &self.edges[id]
    }

    /// Ids of the edges leaving `vertex`, in insertion order.
    pub fn incident_edges(&self, vertex: VertexId) -> &[EdgeId] {
        &self.incidence_lists[vertex]
    }

    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }

    pub fn incidence_lists(&self) -> &[Vec<EdgeId>] {
        &self.incidence_lists
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: VertexId, to: VertexId, weight: f64) -> Edge<f64> {
        Edge { from, to, weight }
    }

    #[test]
    fn test_edge_ids_follow_insertion_order() {
        let mut graph = DirectedWeightedGraph::new(3);
        assert_eq!(graph.add_edge(edge(0, 1, 1.0)), 0);
        assert_eq!(graph.add_edge(edge(1, 2, 2.0)), 1);
        assert_eq!(graph.add_edge(edge(0, 2, 5.0)), 2);

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.incident_edges(0), &[0, 2]);
        assert_eq!(graph.incident_edges(2), &[] as &[EdgeId]);
        assert_eq!(graph.edge(1).weight, 2.0);
    }

    #[test]
    #[should_panic]
    fn test_add_edge_out_of_range() {
        let mut graph = DirectedWeightedGraph::new(2);
        graph.add_edge(edge(0, 2, 1.0));
    }

    #[test]
    fn test_from_parts_roundtrip() {
        let mut graph = DirectedWeightedGraph::new(3);
        graph.add_edge(edge(0, 1, 1.0));
        graph.add_edge(edge(2, 0, 4.0));

        let rebuilt = DirectedWeightedGraph::from_parts(
            graph.edges().to_vec(),
            graph.incidence_lists().to_vec(),
        )
        .unwrap();
        assert_eq!(rebuilt, graph);
    }

    #[test]
    fn test_from_parts_rejects_inconsistent_data() {
        let edges = vec![edge(0, 1, 1.0)];

        assert_eq!(
            DirectedWeightedGraph::from_parts(edges.clone(), vec![vec![], vec![0]]),
            Err(GraphError::MisplacedEdge {
                edge: 0,
                vertex: 1,
                from: 0
            })
        );
        assert_eq!(
            DirectedWeightedGraph::from_parts(edges.clone(), vec![vec![0, 0], vec![]]),
            Err(GraphError::IncidenceMismatch { edge: 0, count: 2 })
        );
        assert_eq!(
            DirectedWeightedGraph::from_parts(edges.clone(), vec![vec![], vec![]]),
            Err(GraphError::IncidenceMismatch { edge: 0, count: 0 })
        );
        assert!(matches!(
            DirectedWeightedGraph::from_parts(edges.clone(), vec![vec![0]]),
            Err(GraphError::VertexOutOfRange { vertex: 1, .. })
        ));
        assert!(matches!(
            DirectedWeightedGraph::from_parts(edges, vec![vec![3], vec![]]),
            Err(GraphError::EdgeOutOfRange { edge: 3, .. })
        ));
    }
}

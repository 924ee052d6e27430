//! Persisted snapshot records.
//!
//! Catalogue entities are stored by name so a snapshot does not depend on
//! in-memory handle values; graph data is stored by vertex and edge id, which
//! are stable by construction.

use bitcode::{Decode, Encode};

use crate::routing::TravelDuration;

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct SnapshotData {
    pub stops: Vec<SavedStop>,
    pub buses: Vec<SavedBus>,
    pub distances: Vec<SavedDistance>,
    pub routing: SavedRouting,
}

impl SnapshotData {
    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, bitcode::Error> {
        bitcode::decode(bytes)
    }
}

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct SavedStop {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct SavedBus {
    pub name: String,
    pub stop_names: Vec<String>,
    pub is_roundtrip: bool,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct SavedDistance {
    pub from: String,
    pub to: String,
    pub meters: f64,
}

#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq)]
pub struct SavedDuration {
    pub span_count: u32,
    pub wait_time: f64,
    pub travel_time: f64,
}

impl From<TravelDuration> for SavedDuration {
    fn from(duration: TravelDuration) -> Self {
        Self {
            span_count: duration.span_count,
            wait_time: duration.wait_time,
            travel_time: duration.travel_time,
        }
    }
}

impl From<SavedDuration> for TravelDuration {
    fn from(saved: SavedDuration) -> Self {
        TravelDuration::new(saved.span_count, saved.wait_time, saved.travel_time)
    }
}

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct SavedEdge {
    pub from: u32,
    pub to: u32,
    pub weight: SavedDuration,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct SavedTravel {
    pub from: String,
    pub to: String,
    pub bus: String,
    pub duration: SavedDuration,
}

#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq)]
pub struct SavedRoute {
    pub weight: SavedDuration,
    pub hops: u32,
    pub prev_edge: Option<u32>,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
pub struct SavedRouting {
    /// Seconds
    pub wait_time: f64,
    /// Meters per second
    pub velocity: f64,
    /// Stop name of each vertex, by vertex id
    pub vertex_stops: Vec<String>,
    pub edges: Vec<SavedEdge>,
    pub incidence_lists: Vec<Vec<u32>>,
    /// Travel record of each edge, by edge id
    pub edge_properties: Vec<SavedTravel>,
    /// Router table flattened row-major, `vertex_count * vertex_count` cells
    pub routes: Vec<Option<SavedRoute>>,
}

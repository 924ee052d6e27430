//! Geodesic distance utilities.

pub mod queries;

pub use queries::{geodesic_distance, haversine_distance, path_length};

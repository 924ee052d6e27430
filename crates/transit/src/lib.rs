//! # transport-catalogue
//!
//! City bus catalogue with fastest-itinerary routing.
//!
//! ## Features
//!
//! - **Catalogue**: stops, buses and directed road distances with cached route statistics
//! - **Routing**: all-pairs shortest paths over a graph with one edge per ride
//! - **Itineraries**: fastest route as alternating waits and rides
//! - **Snapshots**: persist the catalogue and the precomputed router, reload without rebuilding
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use transport_catalogue::prelude::*;
//!
//! let mut catalogue = TransportCatalogue::new();
//! let a = catalogue.add_stop("A", 0.0, 0.0);
//! let b = catalogue.add_stop("B", 0.0, 1.0);
//! let c = catalogue.add_stop("C", 0.0, 2.0);
//! catalogue.set_distance(a, b, 1000.0).unwrap();
//! catalogue.set_distance(b, c, 1000.0).unwrap();
//! catalogue.set_distance(c, a, 1000.0).unwrap();
//! catalogue.add_bus("1", &["A", "B", "C"], true).unwrap();
//!
//! let info = catalogue.get_route_info("1").unwrap();
//! assert_eq!(info.stop_count, 3);
//! assert_eq!(info.route_length, 3000.0);
//!
//! let settings = RouteSettings { bus_wait_time: 6.0, bus_velocity: 40.0 };
//! let router = TransportRouter::new(Arc::new(catalogue), settings).unwrap();
//!
//! let itinerary = router.build_itinerary("A", "C").unwrap();
//! assert_eq!(itinerary.items.len(), 2);
//! assert!((itinerary.total_time - 540.0).abs() < 1e-9);
//! ```

pub mod catalogue;
pub mod graph;
pub mod identifiers;
pub mod models;
pub mod routing;
pub mod snapshot;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalogue::TransportCatalogue;
    pub use crate::identifiers::*;
    pub use crate::models::types::*;
    pub use crate::routing::{
        Itinerary, ItineraryItem, TransportRouter, TravelDuration, TravelProperties,
    };
    pub use crate::snapshot::{load_snapshot, save_snapshot};
}

pub use prelude::*;

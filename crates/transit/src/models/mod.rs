//! Transit data models, settings and errors.

pub mod types;

// Re-exports for convenience
pub use types::{
    Bus, Result, RouteInfo, RouteSettings, RouteStats, RoutingParameters, Stop, TransitError,
};

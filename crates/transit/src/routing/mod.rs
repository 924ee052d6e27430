//! Fastest-itinerary routing over the bus network.

pub mod duration;
pub mod itinerary;
pub mod transport_router;

pub use duration::{TravelDuration, TravelProperties};
pub use itinerary::{Itinerary, ItineraryItem};
pub use transport_router::{RoutingState, TransportRouter};

//! Passenger-facing itineraries built from router legs.

use std::sync::Arc;

use crate::catalogue::TransportCatalogue;
use crate::models::types::Result;
use crate::routing::duration::TravelProperties;
use crate::routing::transport_router::TransportRouter;

/// One step of an itinerary. Times are in seconds.
#[derive(Clone, Debug, PartialEq)]
pub enum ItineraryItem {
    /// Wait at `stop_name` for the next bus
    Wait { stop_name: Arc<str>, time: f64 },
    /// Ride `bus` over `span_count` consecutive legs
    Ride {
        bus: Arc<str>,
        span_count: u32,
        time: f64,
    },
}

impl ItineraryItem {
    pub fn time(&self) -> f64 {
        match self {
            ItineraryItem::Wait { time, .. } | ItineraryItem::Ride { time, .. } => *time,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Itinerary {
    /// Seconds
    pub total_time: f64,
    pub items: Vec<ItineraryItem>,
}

impl Itinerary {
    /// Expand each leg into a wait at its boarding stop followed by the ride.
    pub fn from_legs(catalogue: &TransportCatalogue, legs: &[&TravelProperties]) -> Self {
        let mut itinerary = Itinerary::default();

        for leg in legs {
            let wait = ItineraryItem::Wait {
                stop_name: catalogue.stop(leg.from).name.clone(),
                time: leg.duration.wait_time,
            };
            let ride = ItineraryItem::Ride {
                bus: catalogue.bus(leg.bus).name.clone(),
                span_count: leg.duration.span_count,
                time: leg.duration.travel_time,
            };
            itinerary.total_time += leg.duration.total_time();
            itinerary.items.extend([wait, ride]);
        }

        itinerary
    }
}

impl TransportRouter {
    /// Fastest itinerary between two stops, as alternating waits and rides.
    pub fn build_itinerary(&self, from: &str, to: &str) -> Result<Itinerary> {
        let legs = self.find_route(from, to)?;
        Ok(Itinerary::from_legs(self.catalogue(), &legs))
    }
}

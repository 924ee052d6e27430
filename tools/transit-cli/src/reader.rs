use anyhow::{Context, Result};
use transport_catalogue::TransportCatalogue;

use crate::requests::{BaseRequest, BusRequest, StopRequest};

/// Fill a catalogue from base requests: every stop first, then the road
/// distances between them, then the buses.
///
/// A repeated stop request is ignored together with its road distances.
pub fn build_catalogue(requests: &[BaseRequest]) -> Result<TransportCatalogue> {
    let mut catalogue = TransportCatalogue::new();

    let stops: Vec<&StopRequest> = requests
        .iter()
        .filter_map(|request| match request {
            BaseRequest::Stop(stop) => Some(stop),
            BaseRequest::Bus(_) => None,
        })
        .collect();
    let buses: Vec<&BusRequest> = requests
        .iter()
        .filter_map(|request| match request {
            BaseRequest::Bus(bus) => Some(bus),
            BaseRequest::Stop(_) => None,
        })
        .collect();

    let mut inserted = Vec::with_capacity(stops.len());
    for stop in &stops {
        let known = catalogue.stop_count();
        let id = catalogue.add_stop(&stop.name, stop.latitude, stop.longitude);
        if catalogue.stop_count() > known {
            inserted.push((id, *stop));
        }
    }
    log::info!("Added {} stops", catalogue.stop_count());

    for (from, stop) in inserted {
        for (neighbour, &meters) in &stop.road_distances {
            let to = catalogue.find_stop(neighbour).with_context(|| {
                format!("Stop {} lists a distance to unknown stop {neighbour}", stop.name)
            })?;
            catalogue
                .set_distance(from, to, meters)
                .with_context(|| format!("Bad distance from {} to {neighbour}", stop.name))?;
        }
    }

    for bus in &buses {
        catalogue
            .add_bus(&bus.name, &bus.stops, bus.is_roundtrip)
            .with_context(|| format!("Failed to add bus {}", bus.name))?;
    }
    log::info!("Added {} buses", catalogue.bus_count());

    Ok(catalogue)
}

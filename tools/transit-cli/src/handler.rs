use serde_json::{json, Value};
use transport_catalogue::{Itinerary, ItineraryItem, TransportRouter};

use crate::requests::StatRequest;

const SECONDS_PER_MINUTE: f64 = 60.0;

fn not_found(id: i64) -> Value {
    json!({ "request_id": id, "error_message": "not found" })
}

fn minutes(seconds: f64) -> f64 {
    seconds / SECONDS_PER_MINUTE
}

fn itinerary_to_json(id: i64, itinerary: &Itinerary) -> Value {
    let items: Vec<Value> = itinerary
        .items
        .iter()
        .map(|item| match item {
            ItineraryItem::Wait { stop_name, time } => json!({
                "type": "Wait",
                "stop_name": &**stop_name,
                "time": minutes(*time),
            }),
            ItineraryItem::Ride {
                bus,
                span_count,
                time,
            } => json!({
                "type": "Bus",
                "bus": &**bus,
                "span_count": span_count,
                "time": minutes(*time),
            }),
        })
        .collect();

    json!({
        "request_id": id,
        "total_time": minutes(itinerary.total_time),
        "items": items,
    })
}

/// Answer one stat request. Lookup failures become a "not found" response.
pub fn handle_request(router: &TransportRouter, request: &StatRequest) -> Value {
    let catalogue = router.catalogue();

    match request {
        StatRequest::Bus { id, name } => match catalogue.get_route_info(name) {
            Some(info) => json!({
                "request_id": id,
                "curvature": info.curvature,
                "route_length": info.route_length,
                "stop_count": info.stop_count,
                "unique_stop_count": info.unique_stop_count,
            }),
            None => not_found(*id),
        },
        StatRequest::Stop { id, name } => match catalogue.get_stop_info(name) {
            Some(buses) => json!({ "request_id": id, "buses": buses }),
            None => not_found(*id),
        },
        StatRequest::Route { id, from, to } => match router.build_itinerary(from, to) {
            Ok(itinerary) => itinerary_to_json(*id, &itinerary),
            Err(error) => {
                log::debug!("Route request {id}: {error}");
                not_found(*id)
            }
        },
        StatRequest::Map { id } => json!({
            "request_id": id,
            "error_message": "map rendering is not available",
        }),
    }
}

pub fn handle_requests(router: &TransportRouter, requests: &[StatRequest]) -> Value {
    Value::Array(
        requests
            .iter()
            .map(|request| handle_request(router, request))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use transport_catalogue::{RouteSettings, TransportCatalogue};

    fn router() -> TransportRouter {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop("A", 0.0, 0.0);
        let b = catalogue.add_stop("B", 0.0, 1.0);
        let c = catalogue.add_stop("C", 0.0, 2.0);
        catalogue.add_stop("D", 1.0, 1.0);
        catalogue.set_distance(a, b, 1000.0).unwrap();
        catalogue.set_distance(b, c, 1000.0).unwrap();
        catalogue.set_distance(c, a, 1000.0).unwrap();
        catalogue.add_bus("1", &["A", "B", "C"], true).unwrap();
        catalogue.add_bus("2", &["B", "C"], false).unwrap();

        let settings = RouteSettings {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        };
        TransportRouter::new(Arc::new(catalogue), settings).unwrap()
    }

    #[test]
    fn test_bus_response() {
        let response = handle_request(
            &router(),
            &StatRequest::Bus {
                id: 7,
                name: "1".into(),
            },
        );

        assert_eq!(response["request_id"], 7);
        assert_eq!(response["stop_count"], 3);
        assert_eq!(response["unique_stop_count"], 3);
        assert_relative_eq!(response["route_length"].as_f64().unwrap(), 3000.0);
        assert!(response["curvature"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_stop_response_lists_sorted_buses() {
        let router = router();
        let response = handle_request(
            &router,
            &StatRequest::Stop {
                id: 1,
                name: "B".into(),
            },
        );
        assert_eq!(response, json!({ "request_id": 1, "buses": ["1", "2"] }));

        let idle = handle_request(
            &router,
            &StatRequest::Stop {
                id: 2,
                name: "D".into(),
            },
        );
        assert_eq!(idle, json!({ "request_id": 2, "buses": [] }));
    }

    #[test]
    fn test_route_response_in_minutes() {
        let response = handle_request(
            &router(),
            &StatRequest::Route {
                id: 3,
                from: "A".into(),
                to: "C".into(),
            },
        );

        assert_relative_eq!(response["total_time"].as_f64().unwrap(), 9.0, epsilon = 1e-9);
        let items = response["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["type"], "Wait");
        assert_eq!(items[0]["stop_name"], "A");
        assert_relative_eq!(items[0]["time"].as_f64().unwrap(), 6.0);
        assert_eq!(items[1]["type"], "Bus");
        assert_eq!(items[1]["bus"], "1");
        assert_eq!(items[1]["span_count"], 2);
        assert_relative_eq!(items[1]["time"].as_f64().unwrap(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_failures_are_not_found() {
        let router = router();
        let requests = vec![
            StatRequest::Bus {
                id: 1,
                name: "999".into(),
            },
            StatRequest::Stop {
                id: 2,
                name: "Nowhere".into(),
            },
            StatRequest::Route {
                id: 3,
                from: "A".into(),
                to: "D".into(),
            },
        ];

        let responses = handle_requests(&router, &requests);
        for (index, response) in responses.as_array().unwrap().iter().enumerate() {
            assert_eq!(*response, not_found(index as i64 + 1));
        }
    }

    #[test]
    fn test_map_is_unavailable() {
        let response = handle_request(&router(), &StatRequest::Map { id: 4 });
        assert_eq!(response["request_id"], 4);
        assert!(response["error_message"].is_string());
    }
}

//! Great-circle distance between stops.
//!
//! Uses the Haversine formula for distances on Earth's surface.

use geo::{HaversineDistance, Point};

use crate::models::types::Stop;

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Straight-line distance over the Earth's surface between two stops, meters
pub fn geodesic_distance(from: &Stop, to: &Stop) -> f64 {
    haversine_distance(from.location, to.location)
}

/// Geodesic length of a path through consecutive stops, meters
pub fn path_length<'a>(path: impl IntoIterator<Item = &'a Stop>) -> f64 {
    let mut total = 0.0;
    let mut previous: Option<&Stop> = None;
    for stop in path {
        if let Some(prev) = previous {
            total += geodesic_distance(prev, stop);
        }
        previous = Some(stop);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_haversine_distance() {
        // Distance from NYC to LA is approximately 3,936 km
        let nyc = Point::new(-74.0060, 40.7128);
        let la = Point::new(-118.2437, 34.0522);

        let dist = haversine_distance(nyc, la);
        assert!((dist - 3_936_000.0).abs() < 50_000.0); // Within 50km
    }

    #[test]
    fn test_one_degree_along_equator() {
        let a = Stop::new("A", 0.0, 0.0);
        let b = Stop::new("B", 0.0, 1.0);

        // ~111.2 km per degree of longitude at the equator
        assert_abs_diff_eq!(geodesic_distance(&a, &b), 111_195.0, epsilon = 200.0);
        assert_eq!(geodesic_distance(&a, &a), 0.0);
    }

    #[test]
    fn test_path_length() {
        let stops = [
            Stop::new("A", 0.0, 0.0),
            Stop::new("B", 0.0, 1.0),
            Stop::new("C", 0.0, 2.0),
        ];
        let direct = geodesic_distance(&stops[0], &stops[2]);

        assert_abs_diff_eq!(path_length(&stops), direct, epsilon = 1.0);
        assert_eq!(path_length(&stops[..1]), 0.0);
        assert_eq!(path_length(&[]), 0.0);
    }
}

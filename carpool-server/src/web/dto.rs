//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dispatch::ResolvedRoute;
use crate::domain::{Coord, Passenger, TripRequest};

/// Body of `POST /get-data`.
///
/// Points are `[lat, lng]`; a passenger is `[pickup, dropoff]`. Missing
/// lists are treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct TripRequestBody {
    #[serde(default)]
    pub drivers: Vec<Vec<f64>>,

    #[serde(default)]
    pub passengers: Vec<Vec<Vec<f64>>>,
}

fn point(values: &[f64]) -> Option<Coord> {
    match *values {
        [lat, lng] => Some(Coord::new(lat, lng)),
        _ => None,
    }
}

impl TripRequestBody {
    /// Convert to a domain request, skipping entries of the wrong shape.
    pub fn into_trip_request(self) -> TripRequest {
        let mut drivers = Vec::with_capacity(self.drivers.len());
        for (i, entry) in self.drivers.iter().enumerate() {
            match point(entry) {
                Some(coord) => drivers.push(coord),
                None => warn!(index = i, values = ?entry, "skipping malformed driver"),
            }
        }

        let mut passengers = Vec::with_capacity(self.passengers.len());
        for (i, entry) in self.passengers.iter().enumerate() {
            let parsed = match entry.as_slice() {
                [pickup, dropoff] => point(pickup).zip(point(dropoff)),
                _ => None,
            };
            match parsed {
                Some((pickup, dropoff)) => passengers.push(Passenger::new(pickup, dropoff)),
                None => warn!(index = i, values = ?entry, "skipping malformed passenger"),
            }
        }

        TripRequest::new(drivers, passengers)
    }
}

/// A route in a response.
#[derive(Debug, Serialize)]
pub struct PathResult {
    /// Total minutes, `-1` when no route was found
    #[serde(rename = "shortestTime")]
    pub shortest_time: i64,

    /// Visited points as `[lng, lat]`
    pub path: Vec<[f64; 2]>,
}

impl From<ResolvedRoute> for PathResult {
    fn from(route: ResolvedRoute) -> Self {
        Self {
            shortest_time: route.total_time_minutes,
            path: route
                .path
                .into_iter()
                .map(|(lng, lat)| [lng, lat])
                .collect(),
        }
    }
}

/// Response to `POST /get-data`.
#[derive(Debug, Serialize)]
pub struct PathsResponse {
    pub success: bool,
    pub message: String,
    pub paths: Vec<PathResult>,
}

impl PathsResponse {
    pub fn handled(routes: Vec<ResolvedRoute>) -> Self {
        Self {
            success: true,
            message: "Request handled successfully".to_string(),
            paths: routes.into_iter().map(PathResult::from).collect(),
        }
    }
}

/// Response to `GET /`.
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: serde_json::Value) -> TripRequestBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_lat_lng_points() {
        let request = body(json!({
            "drivers": [[51.5, -0.1]],
            "passengers": [[[51.6, -0.2], [51.7, -0.3]]]
        }))
        .into_trip_request();

        assert_eq!(request.drivers, vec![Coord::new(51.5, -0.1)]);
        assert_eq!(
            request.passengers,
            vec![Passenger::new(Coord::new(51.6, -0.2), Coord::new(51.7, -0.3))]
        );
    }

    #[test]
    fn skips_wrong_arity() {
        let request = body(json!({
            "drivers": [[1.0], [1.0, 2.0], [1.0, 2.0, 3.0]],
            "passengers": [
                [[1.0, 1.0]],
                [[1.0, 1.0], [2.0]],
                [[1.0, 1.0], [2.0, 2.0]],
                [[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]
            ]
        }))
        .into_trip_request();

        assert_eq!(request.drivers, vec![Coord::new(1.0, 2.0)]);
        assert_eq!(request.passengers.len(), 1);
    }

    #[test]
    fn missing_lists_are_empty() {
        let request = body(json!({})).into_trip_request();
        assert!(request.drivers.is_empty());
        assert!(request.passengers.is_empty());
    }

    #[test]
    fn response_shape() {
        let response = PathsResponse::handled(vec![
            ResolvedRoute {
                total_time_minutes: -1,
                path: vec![],
            },
            ResolvedRoute {
                total_time_minutes: 8,
                path: vec![(0.5, 1.5), (2.5, 3.5)],
            },
        ]);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "message": "Request handled successfully",
                "paths": [
                    {"shortestTime": -1, "path": []},
                    {"shortestTime": 8, "path": [[0.5, 1.5], [2.5, 3.5]]}
                ]
            })
        );
    }
}

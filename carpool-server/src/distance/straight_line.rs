//! Great-circle travel-time estimate.

use crate::domain::Coord;

use super::convert::seconds_to_minutes;
use super::error::TravelTimeError;
use super::provider::TravelTimeProvider;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Default average speed for the estimate.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Haversine distance between two coordinates, in metres.
pub(crate) fn haversine_distance(from: Coord, to: Coord) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lon1_rad = from.lng.to_radians();
    let lat2_rad = to.lat.to_radians();
    let lon2_rad = to.lng.to_radians();

    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = lon2_rad - lon1_rad;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Travel times estimated from straight-line distance at a fixed speed.
///
/// Used when no Distance Matrix API key is configured. Symmetric and
/// infallible.
#[derive(Debug, Clone, Copy)]
pub struct StraightLineTravelTimes {
    speed_kmh: f64,
}

impl StraightLineTravelTimes {
    /// Create an estimator for the given average speed.
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    fn estimate_minutes(&self, from: Coord, to: Coord) -> u32 {
        let metres_per_second = self.speed_kmh * 1000.0 / 3600.0;
        seconds_to_minutes(haversine_distance(from, to) / metres_per_second)
    }
}

impl Default for StraightLineTravelTimes {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_KMH)
    }
}

impl TravelTimeProvider for StraightLineTravelTimes {
    async fn travel_time_minutes(&self, from: Coord, to: Coord) -> Result<u32, TravelTimeError> {
        Ok(self.estimate_minutes(from, to))
    }
}

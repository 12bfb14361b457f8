//! The outbound travel-time interface.

use std::future::Future;
use std::sync::Arc;

use crate::domain::Coord;

use super::client::DistanceMatrixClient;
use super::error::TravelTimeError;
use super::straight_line::StraightLineTravelTimes;

/// Source of directional travel times between two coordinates.
///
/// This abstraction allows the dispatcher to be tested with fixed tables
/// and run against a live API in production. Implementations may be
/// asymmetric: `from -> to` need not equal `to -> from`.
pub trait TravelTimeProvider: Send + Sync {
    /// Travel time from `from` to `to`, in whole minutes rounded to nearest.
    fn travel_time_minutes(
        &self,
        from: Coord,
        to: Coord,
    ) -> impl Future<Output = Result<u32, TravelTimeError>> + Send;
}

impl<P: TravelTimeProvider> TravelTimeProvider for Arc<P> {
    fn travel_time_minutes(
        &self,
        from: Coord,
        to: Coord,
    ) -> impl Future<Output = Result<u32, TravelTimeError>> + Send {
        self.as_ref().travel_time_minutes(from, to)
    }
}

/// The provider chosen at start-up.
#[derive(Debug, Clone)]
pub enum TravelTimeSource {
    /// Live Google Distance Matrix lookups.
    DistanceMatrix(DistanceMatrixClient),
    /// Offline great-circle estimate.
    StraightLine(StraightLineTravelTimes),
}

impl TravelTimeSource {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            TravelTimeSource::DistanceMatrix(_) => "distance-matrix",
            TravelTimeSource::StraightLine(_) => "straight-line",
        }
    }
}

impl TravelTimeProvider for TravelTimeSource {
    async fn travel_time_minutes(&self, from: Coord, to: Coord) -> Result<u32, TravelTimeError> {
        match self {
            TravelTimeSource::DistanceMatrix(client) => client.travel_time_minutes(from, to).await,
            TravelTimeSource::StraightLine(estimate) => {
                estimate.travel_time_minutes(from, to).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn straight_line_source_delegates() {
        let source = TravelTimeSource::StraightLine(StraightLineTravelTimes::default());
        assert_eq!(source.name(), "straight-line");

        let here = Coord::new(51.5, -0.1);
        assert_eq!(source.travel_time_minutes(here, here).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn arc_provider_delegates() {
        let source = Arc::new(StraightLineTravelTimes::default());
        let a = Coord::new(51.5, -0.1);
        let b = Coord::new(51.6, -0.1);

        let direct = source.as_ref().travel_time_minutes(a, b).await.unwrap();
        let via_arc = source.travel_time_minutes(a, b).await.unwrap();
        assert_eq!(direct, via_arc);
    }
}

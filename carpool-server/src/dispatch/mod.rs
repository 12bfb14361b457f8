//! Dispatch and route synthesis.
//!
//! Given drivers and passengers, decides which driver serves whom and in
//! what order pickups and drop-offs happen:
//!
//! 1. build the node model ([`RoutingContext`])
//! 2. split passengers across drivers ([`assign_passengers`]), skipped for
//!    a single driver
//! 3. per driver, search its subgraph for the cheapest route that respects
//!    pickup-before-drop-off and seat capacity ([`find_route`])
//! 4. collect the distinct routes ([`RouteSet`])
//!
//! Every travel time goes through the request's [`TravelTimeCache`], so each
//! ordered pair is fetched at most once per request.

mod assign;
mod config;
mod context;
mod graph;
mod manifest;
mod results;
mod search;
mod travel_cache;

#[cfg(test)]
pub(crate) mod test_support;


pub use assign::{Assignment, CostMap, assign_greedy, assign_passengers};
pub use config::{DispatchConfig, SEAT_CAPACITY};
pub use context::RoutingContext;
pub use graph::Adjacency;
pub use manifest::Manifest;
pub use results::{ResolvedRoute, RouteSet};
pub use search::{Route, RouteQuery, SearchError, find_route};
pub use travel_cache::{PairKey, TravelTimeCache};

use tracing::{info, warn};

use crate::distance::{TravelTimeError, TravelTimeProvider};
use crate::domain::{DomainError, NodeIndex, TripRequest};

/// Error that aborts a whole trip request.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Request cannot be dispatched at all
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] DomainError),

    /// A travel time could not be fetched
    #[error("travel time unavailable: {0}")]
    TravelTimeUnavailable(#[from] TravelTimeError),
}

/// Resolves trip requests against a travel-time provider.
pub struct Dispatcher<'a, P: TravelTimeProvider> {
    provider: &'a P,
    config: &'a DispatchConfig,
}

impl<'a, P: TravelTimeProvider> Dispatcher<'a, P> {
    /// Create a new dispatcher.
    pub fn new(provider: &'a P, config: &'a DispatchConfig) -> Self {
        Self { provider, config }
    }

    /// Assign passengers and find one route per driver.
    ///
    /// A driver whose search finds nothing contributes the
    /// [`Route::not_found`] placeholder; the other drivers are unaffected.
    /// Any travel-time failure aborts the request.
    pub async fn resolve_trip_request(
        &self,
        request: &TripRequest,
    ) -> Result<Vec<ResolvedRoute>, DispatchError> {
        let (ctx, routes) = self.dispatch(request).await?;
        Ok(routes.resolve(&ctx))
    }

    /// Like [`Dispatcher::resolve_trip_request`] but returns the context and
    /// routes in node-index form.
    pub async fn dispatch(
        &self,
        request: &TripRequest,
    ) -> Result<(RoutingContext, RouteSet), DispatchError> {
        request.validate()?;

        let mut ctx = RoutingContext::from_request(request);
        let assignment = assign_passengers(&mut ctx, self.provider, self.config).await?;

        let mut routes = RouteSet::new();

        match assignment {
            None => {
                let adjacency = Adjacency::global(&ctx);
                let manifest = Manifest::for_request(&ctx);
                let route = self
                    .route_for(&mut ctx, &adjacency, NodeIndex(0), &manifest)
                    .await?;
                routes.insert(route);
            }
            Some(assignment) => {
                for (driver, sources) in assignment.iter() {
                    let adjacency = Adjacency::for_driver(&ctx, driver, sources);
                    let manifest = Manifest::for_sources(&ctx, sources);
                    let route = self
                        .route_for(&mut ctx, &adjacency, driver, &manifest)
                        .await?;
                    routes.insert(route);
                }
            }
        }

        info!(
            drivers = ctx.driver_count(),
            passengers = ctx.passengers().len(),
            routes = routes.len(),
            found = routes.found_count(),
            lookups = ctx.times.lookups(),
            "trip request resolved"
        );

        Ok((ctx, routes))
    }

    async fn route_for(
        &self,
        ctx: &mut RoutingContext,
        adjacency: &Adjacency,
        driver: NodeIndex,
        manifest: &Manifest,
    ) -> Result<Route, DispatchError> {
        let query = RouteQuery {
            adjacency,
            driver,
            manifest,
            seat_capacity: self.config.seat_capacity,
        };

        match find_route(ctx, self.provider, &query).await {
            Ok(route) => Ok(route),
            Err(SearchError::NoRouteFound { driver }) => {
                warn!(
                    driver = %driver,
                    stops = manifest.stop_count(),
                    "no route found for driver"
                );
                Ok(Route::not_found())
            }
            Err(SearchError::TravelTime(e)) => Err(DispatchError::TravelTimeUnavailable(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DispatchError::from(DomainError::NoDrivers);
        assert_eq!(err.to_string(), "malformed request: trip request has no drivers");

        let err = DispatchError::from(TravelTimeError::Status("REQUEST_DENIED".into()));
        assert_eq!(
            err.to_string(),
            "travel time unavailable: distance matrix status: REQUEST_DENIED"
        );
    }
}

//! Collecting per-driver routes into the response.

use std::collections::BTreeSet;

use super::context::RoutingContext;
use super::search::Route;

/// A resolved route in response form.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    /// Total travel time in minutes, `-1` if no route was found.
    pub total_time_minutes: i64,

    /// Visited points as `(longitude, latitude)`, driver start first.
    pub path: Vec<(f64, f64)>,
}

/// Distinct routes for one request.
///
/// Keyed on `(time, path)` by value, so two drivers that start on the same
/// spot with the same assignment produce one entry.
#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    routes: BTreeSet<Route>,
}

impl RouteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route; returns `false` if an equal one was already present.
    pub fn insert(&mut self, route: Route) -> bool {
        self.routes.insert(route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in `(time, path)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of routes that were actually found.
    pub fn found_count(&self) -> usize {
        self.routes.iter().filter(|r| r.is_found()).count()
    }

    /// Map node indices back to coordinates.
    pub fn resolve(&self, ctx: &RoutingContext) -> Vec<ResolvedRoute> {
        self.routes
            .iter()
            .map(|route| ResolvedRoute {
                total_time_minutes: route.total_time,
                path: route
                    .path
                    .iter()
                    .map(|&i| ctx.node(i).coord.lng_lat())
                    .collect(),
            })
            .collect()
    }
}

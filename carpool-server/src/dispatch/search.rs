//! Capacity-aware uniform-cost route search.
//!
//! A search state is `(time, node, visited, path, occupants)`, so the state
//! graph is exponential in the number of passengers. This is only workable
//! because the assignment step keeps each driver's passenger count small.
//!
//! States are popped in non-decreasing time order; the first popped state
//! that has visited every stop in the [`Manifest`] is an optimal route.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use tracing::{debug, trace};

use crate::distance::{TravelTimeError, TravelTimeProvider};
use crate::domain::NodeIndex;

use super::context::RoutingContext;
use super::graph::Adjacency;
use super::manifest::Manifest;

/// Error from a single driver's route search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Frontier exhausted before every required node was visited
    #[error("no route found for driver {driver}")]
    NoRouteFound { driver: NodeIndex },

    /// A travel time could not be fetched
    #[error(transparent)]
    TravelTime(#[from] TravelTimeError),
}

/// A driver's route: total minutes and the nodes visited, driver first.
///
/// Ordering is by time and then path, so equal routes collapse in sets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Route {
    pub total_time: i64,
    pub path: Vec<NodeIndex>,
}

impl Route {
    /// The placeholder reported when no route exists: `-1` and no nodes.
    pub fn not_found() -> Self {
        Self {
            total_time: -1,
            path: Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.total_time >= 0
    }
}

/// What to search for.
#[derive(Debug, Clone, Copy)]
pub struct RouteQuery<'a> {
    /// Legal transitions.
    pub adjacency: &'a Adjacency,

    /// Start node.
    pub driver: NodeIndex,

    /// Stops to visit and how many passengers each moves.
    pub manifest: &'a Manifest,

    /// Maximum passengers on board at once.
    pub seat_capacity: u8,
}

/// Frontier entry.
#[derive(Debug, Clone)]
struct SearchState {
    time: i64,
    node: NodeIndex,
    visited: BTreeSet<NodeIndex>,
    path: Vec<NodeIndex>,
    occupants: u32,
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchState {}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip to make BinaryHeap a min-heap on time
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.path.cmp(&self.path))
    }
}

impl SearchState {
    fn initial(driver: NodeIndex) -> Self {
        Self {
            time: 0,
            node: driver,
            visited: BTreeSet::new(),
            path: vec![driver],
            occupants: 0,
        }
    }

    /// Occupancy after moving to `next`, or `None` if the move is illegal.
    fn boarding(&self, manifest: &Manifest, next: NodeIndex, seat_capacity: u8) -> Option<u32> {
        if self.visited.contains(&next) {
            return None;
        }

        let alighting = manifest.alighting_at(next);
        if alighting > 0 {
            if !manifest.pickups_for(next).all(|s| self.visited.contains(&s)) {
                return None;
            }
            return self.occupants.checked_sub(alighting);
        }

        let boarding = manifest.boarding_at(next);
        if boarding == 0 {
            return None;
        }
        let occupants = self.occupants.checked_add(boarding)?;
        (occupants <= u32::from(seat_capacity)).then_some(occupants)
    }

    fn extend(&self, next: NodeIndex, minutes: u32, occupants: u32) -> Self {
        let mut visited = self.visited.clone();
        visited.insert(next);
        let mut path = self.path.clone();
        path.push(next);

        Self {
            time: self.time + i64::from(minutes),
            node: next,
            visited,
            path,
            occupants,
        }
    }

    fn into_route(self) -> Route {
        Route {
            total_time: self.time,
            path: self.path,
        }
    }
}

/// Find the cheapest route from `query.driver` that visits every stop in
/// `query.manifest`.
///
/// A move is rejected if the node was already visited, if it is not a stop
/// in the manifest, if it is a pickup whose passengers would not fit, or if
/// it is a drop-off before all of its passengers' pickups. Travel times are
/// fetched through the request cache.
pub async fn find_route<P: TravelTimeProvider>(
    ctx: &mut RoutingContext,
    provider: &P,
    query: &RouteQuery<'_>,
) -> Result<Route, SearchError> {
    let mut queue = BinaryHeap::new();
    queue.push(SearchState::initial(query.driver));

    let goal = query.manifest.stop_count();
    let mut states_explored = 0usize;

    while let Some(state) = queue.pop() {
        states_explored += 1;

        if state.visited.len() >= goal {
            debug!(
                driver = %query.driver,
                time = state.time,
                states_explored,
                "route found"
            );
            return Ok(state.into_route());
        }

        for &next in query.adjacency.neighbours(state.node) {
            let Some(occupants) = state.boarding(query.manifest, next, query.seat_capacity) else {
                continue;
            };

            let minutes = ctx.cost(provider, state.node, next).await?;

            trace!(
                from = %state.node,
                to = %next,
                minutes,
                occupants,
                "expanding"
            );

            queue.push(state.extend(next, minutes, occupants));
        }
    }

    debug!(
        driver = %query.driver,
        states_explored,
        "frontier exhausted"
    );
    Err(SearchError::NoRouteFound {
        driver: query.driver,
    })
}

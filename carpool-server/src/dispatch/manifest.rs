//! Who boards and alights where, for one route search.
//!
//! Several passengers may share a pickup or a drop-off, so a stop moves a
//! passenger count rather than a single seat.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::NodeIndex;

use super::context::RoutingContext;

/// Passenger counts per stop for the passengers one search must serve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    boarding: BTreeMap<NodeIndex, u32>,
    alighting: BTreeMap<NodeIndex, u32>,

    /// Pickups that must precede each drop-off
    pickups_for: BTreeMap<NodeIndex, BTreeSet<NodeIndex>>,
}

impl Manifest {
    /// Build from `(source, dest)` pairs, one per passenger.
    pub fn new(passengers: impl IntoIterator<Item = (NodeIndex, NodeIndex)>) -> Self {
        let mut manifest = Self::default();
        for (source, dest) in passengers {
            *manifest.boarding.entry(source).or_default() += 1;
            *manifest.alighting.entry(dest).or_default() += 1;
            manifest.pickups_for.entry(dest).or_default().insert(source);
        }
        manifest
    }

    /// Every passenger in the request.
    pub fn for_request(ctx: &RoutingContext) -> Self {
        Self::new(ctx.passengers().iter().copied())
    }

    /// Passengers whose pickup is one of `sources`.
    pub fn for_sources(ctx: &RoutingContext, sources: &[NodeIndex]) -> Self {
        Self::new(
            ctx.passengers()
                .iter()
                .copied()
                .filter(|(source, _)| sources.contains(source)),
        )
    }

    /// Number of distinct stops a complete route visits, the start not
    /// included.
    pub fn stop_count(&self) -> usize {
        self.boarding.len() + self.alighting.len()
    }

    /// Passengers picked up at `node`, zero if it is not a pickup here.
    pub fn boarding_at(&self, node: NodeIndex) -> u32 {
        self.boarding.get(&node).copied().unwrap_or(0)
    }

    /// Passengers dropped off at `node`, zero if it is not a drop-off here.
    pub fn alighting_at(&self, node: NodeIndex) -> u32 {
        self.alighting.get(&node).copied().unwrap_or(0)
    }

    /// Pickups that must be visited before `dest`.
    pub fn pickups_for(&self, dest: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.pickups_for.get(&dest).into_iter().flatten().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, Passenger, TripRequest};

    fn n(i: usize) -> NodeIndex {
        NodeIndex(i)
    }

    #[test]
    fn counts_shared_stops() {
        // driver 0; sources 1, 2; dests 3 (shared), 4
        let ctx = RoutingContext::from_request(&TripRequest::new(
            vec![Coord::new(0.0, 0.0)],
            vec![
                Passenger::new(Coord::new(1.0, 1.0), Coord::new(5.0, 5.0)),
                Passenger::new(Coord::new(1.0, 1.0), Coord::new(6.0, 6.0)),
                Passenger::new(Coord::new(2.0, 2.0), Coord::new(5.0, 5.0)),
            ],
        ));
        let manifest = Manifest::for_request(&ctx);

        assert_eq!(manifest.stop_count(), 4);
        assert_eq!(manifest.boarding_at(n(1)), 2);
        assert_eq!(manifest.boarding_at(n(2)), 1);
        assert_eq!(manifest.alighting_at(n(3)), 2);
        assert_eq!(manifest.alighting_at(n(4)), 1);
        assert_eq!(manifest.pickups_for(n(3)).collect::<Vec<_>>(), vec![n(1), n(2)]);
        assert_eq!(manifest.boarding_at(n(0)), 0);
    }

    #[test]
    fn restricted_to_assigned_sources() {
        let ctx = RoutingContext::from_request(&TripRequest::new(
            vec![Coord::new(0.0, 0.0), Coord::new(9.0, 9.0)],
            vec![
                Passenger::new(Coord::new(1.0, 1.0), Coord::new(5.0, 5.0)),
                Passenger::new(Coord::new(2.0, 2.0), Coord::new(5.0, 5.0)),
            ],
        ));
        // drivers 0, 1; sources 2, 3; dest 4
        let manifest = Manifest::for_sources(&ctx, &[n(3)]);

        assert_eq!(manifest.stop_count(), 2);
        assert_eq!(manifest.alighting_at(n(4)), 1);
        assert_eq!(manifest.pickups_for(n(4)).collect::<Vec<_>>(), vec![n(3)]);

        assert_eq!(Manifest::for_sources(&ctx, &[]).stop_count(), 0);
    }
}

//! Per-request routing context: the node model and its lookups.
//!
//! Nodes are interned in three phases (drivers, then pickups, then
//! drop-offs), which fixes the index layout every other component relies
//! on:
//!
//! ```text
//! [0, D)          drivers
//! [D, D+P)        unique passenger sources
//! [D+P, D+P+Q)    unique passenger destinations
//! ```
//!
//! Passengers may share a pickup or a drop-off, so one source can lead to
//! several destinations and the other way round. Every passenger keeps its
//! own `(source, dest)` pair.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Range;

use tracing::debug;

use crate::distance::{TravelTimeError, TravelTimeProvider};
use crate::domain::{Coord, Node, NodeIndex, NodeKey, Role, TripRequest};

use super::travel_cache::TravelTimeCache;

/// Mutable state for resolving one trip request.
///
/// Owned by a single request and dropped when it completes.
#[derive(Debug, Clone, Default)]
pub struct RoutingContext {
    nodes: Vec<Node>,
    index_of: HashMap<NodeKey, NodeIndex>,

    driver_count: usize,
    source_count: usize,

    /// One `(source, dest)` pair per passenger, in request order.
    passengers: Vec<(NodeIndex, NodeIndex)>,
    dests_of: BTreeMap<NodeIndex, BTreeSet<NodeIndex>>,
    sources: BTreeSet<NodeIndex>,
    dests: BTreeSet<NodeIndex>,

    /// Travel times fetched so far for this request.
    pub times: TravelTimeCache,
}

impl RoutingContext {
    /// Build the node model for a request.
    pub fn from_request(request: &TripRequest) -> Self {
        let mut ctx = Self::default();

        for &coord in &request.drivers {
            ctx.intern(coord, Role::Driver);
        }
        ctx.driver_count = ctx.nodes.len();

        for passenger in &request.passengers {
            ctx.intern(passenger.pickup, Role::PassengerSource);
        }
        ctx.source_count = ctx.nodes.len() - ctx.driver_count;

        for passenger in &request.passengers {
            ctx.intern(passenger.dropoff, Role::PassengerDest);
        }

        for passenger in &request.passengers {
            let src = ctx.index_of[&Node::new(passenger.pickup, Role::PassengerSource).key()];
            let dst = ctx.index_of[&Node::new(passenger.dropoff, Role::PassengerDest).key()];
            ctx.sources.insert(src);
            ctx.dests.insert(dst);
            ctx.dests_of.entry(src).or_default().insert(dst);
            ctx.passengers.push((src, dst));
        }

        debug!(
            nodes = ctx.nodes.len(),
            drivers = ctx.driver_count,
            sources = ctx.source_count,
            dests = ctx.dest_count(),
            passengers = ctx.passengers.len(),
            "routing context built"
        );

        ctx
    }

    /// Return the index of `(coord, role)`, appending a new node if unseen.
    pub fn intern(&mut self, coord: Coord, role: Role) -> NodeIndex {
        let node = Node::new(coord, role);
        let next = NodeIndex(self.nodes.len());
        let index = *self.index_of.entry(node.key()).or_insert(next);
        if index == next {
            self.nodes.push(node);
        }
        index
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn driver_count(&self) -> usize {
        self.driver_count
    }

    pub fn source_count(&self) -> usize {
        self.source_count
    }

    pub fn dest_count(&self) -> usize {
        self.nodes.len() - self.driver_count - self.source_count
    }

    /// Driver node indices, in request order.
    pub fn drivers(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.driver_count).map(NodeIndex)
    }

    /// Index range of every passenger node, sources then destinations.
    pub fn passenger_range(&self) -> Range<usize> {
        self.driver_count..self.nodes.len()
    }

    /// Passenger source indices in ascending order.
    pub fn sources(&self) -> &BTreeSet<NodeIndex> {
        &self.sources
    }

    /// Passenger destination indices in ascending order.
    pub fn dests(&self) -> &BTreeSet<NodeIndex> {
        &self.dests
    }

    /// `(source, dest)` per passenger, in request order.
    ///
    /// Identical passengers appear once each.
    pub fn passengers(&self) -> &[(NodeIndex, NodeIndex)] {
        &self.passengers
    }

    /// Drop-offs of the passengers boarding at `source`, ascending.
    pub fn dests_of(&self, source: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.dests_of.get(&source).into_iter().flatten().copied()
    }

    /// Whether some passenger rides from `source` to `dest`.
    pub fn is_paired(&self, source: NodeIndex, dest: NodeIndex) -> bool {
        self.dests_of
            .get(&source)
            .is_some_and(|dests| dests.contains(&dest))
    }

    /// Travel time for `from -> to`, fetched through the request cache.
    pub async fn cost<P: TravelTimeProvider>(
        &mut self,
        provider: &P,
        from: NodeIndex,
        to: NodeIndex,
    ) -> Result<u32, TravelTimeError> {
        self.times.cost(provider, &self.nodes, from, to).await
    }

    /// Fetch every missing pair concurrently, `batch_size` at a time.
    pub async fn warm<P, I>(
        &mut self,
        provider: &P,
        pairs: I,
        batch_size: usize,
    ) -> Result<usize, TravelTimeError>
    where
        P: TravelTimeProvider,
        I: IntoIterator<Item = (NodeIndex, NodeIndex)>,
    {
        self.times.warm(provider, &self.nodes, pairs, batch_size).await
    }
}

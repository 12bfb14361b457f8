//! Transition graphs over a request's nodes.
//!
//! An edge `a -> b` means "b may be visited right after a". Edges carry no
//! weight; travel times come from the request cache on demand. Pickup
//! before drop-off and seat capacity are not encoded here, the route
//! search enforces them.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::NodeIndex;

use super::context::RoutingContext;

/// Directed successor lists, indexed by node.
///
/// Each list keeps insertion order and holds no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    edges: Vec<Vec<NodeIndex>>,
}

impl Adjacency {
    /// An edgeless graph over `node_count` nodes.
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            edges: vec![Vec::new(); node_count],
        }
    }

    /// Add `from -> to` unless it is a self-loop or already present.
    pub fn connect(&mut self, from: NodeIndex, to: NodeIndex) {
        if from == to {
            return;
        }
        let successors = &mut self.edges[from.0];
        if !successors.contains(&to) {
            successors.push(to);
        }
    }

    /// Successors of `node`, in insertion order.
    pub fn neighbours(&self, node: NodeIndex) -> &[NodeIndex] {
        self.edges.get(node.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.neighbours(from).contains(&to)
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Graph over every node in the request.
    ///
    /// Used when there is a single driver. Every driver reaches every
    /// source; passenger nodes reach each other, except that a destination
    /// never leads back to a source of its own passengers.
    pub fn global(ctx: &RoutingContext) -> Self {
        let mut adj = Self::with_nodes(ctx.node_count());

        for driver in ctx.drivers() {
            for &source in ctx.sources() {
                adj.connect(driver, source);
            }
        }

        let passengers = ctx.passenger_range();
        for i in passengers.clone().map(NodeIndex) {
            for j in passengers.clone().map(NodeIndex) {
                if ctx.is_paired(j, i) {
                    continue;
                }
                adj.connect(i, j);
            }
        }

        debug!(
            nodes = adj.node_count(),
            edges = adj.edge_count(),
            "global graph built"
        );
        adj
    }

    /// Graph restricted to one driver and the sources assigned to it.
    ///
    /// Same edge rules as [`Adjacency::global`], over the assigned sources
    /// and every destination of their passengers.
    pub fn for_driver(ctx: &RoutingContext, driver: NodeIndex, assigned: &[NodeIndex]) -> Self {
        let mut adj = Self::with_nodes(ctx.node_count());
        let dests: BTreeSet<NodeIndex> = assigned
            .iter()
            .flat_map(|&source| ctx.dests_of(source))
            .collect();

        for &source in assigned {
            adj.connect(driver, source);
        }

        for &source in assigned {
            for &other in assigned {
                adj.connect(source, other);
            }
            for &dest in &dests {
                adj.connect(source, dest);
            }
        }

        for &dest in &dests {
            for &other in &dests {
                adj.connect(dest, other);
            }
            for &source in assigned {
                if !ctx.is_paired(source, dest) {
                    adj.connect(dest, source);
                }
            }
        }

        debug!(
            driver = %driver,
            assigned = assigned.len(),
            edges = adj.edge_count(),
            "driver subgraph built"
        );
        adj
    }
}

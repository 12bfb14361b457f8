//! Greedy driver/passenger assignment.
//!
//! Splits passengers across drivers before routing so that each driver's
//! search space stays small. The result is not globally optimal:
//!
//! 1. Round one walks drivers in index order and gives each the cheapest
//!    still-unassigned pickup. Every driver gets a passenger whenever there
//!    are at least as many passengers as drivers.
//! 2. Round two gives each remaining pickup to the driver with the lowest
//!    cost for it, ties going to the lower driver index.
//!
//! The cost of driver `d` serving pickup `s` is `time(d -> s)` plus
//! `time(s -> t)` for every distinct drop-off `t` of the passengers waiting
//! at `s`. All passengers at one pickup go to the same driver.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::distance::{TravelTimeError, TravelTimeProvider};
use crate::domain::NodeIndex;

use super::config::DispatchConfig;
use super::context::RoutingContext;

/// Which pickups each driver will serve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    by_driver: BTreeMap<NodeIndex, Vec<NodeIndex>>,
}

impl Assignment {
    /// An assignment with an empty list for each driver.
    pub fn for_drivers(drivers: impl IntoIterator<Item = NodeIndex>) -> Self {
        Self {
            by_driver: drivers.into_iter().map(|d| (d, Vec::new())).collect(),
        }
    }

    /// Add `source` to the end of `driver`'s list.
    pub fn assign(&mut self, driver: NodeIndex, source: NodeIndex) {
        self.by_driver.entry(driver).or_default().push(source);
    }

    /// Pickups for a driver, in assignment order.
    pub fn sources_for(&self, driver: NodeIndex) -> &[NodeIndex] {
        self.by_driver.get(&driver).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(driver, pickups)` in driver order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &[NodeIndex])> {
        self.by_driver.iter().map(|(d, s)| (*d, s.as_slice()))
    }

    /// Total number of assigned pickups.
    pub fn assigned_count(&self) -> usize {
        self.by_driver.values().map(Vec::len).sum()
    }
}

/// Per-pickup cost of each driver, indexed by driver position.
pub type CostMap = BTreeMap<NodeIndex, Vec<u32>>;

/// Assign every pickup to a driver.
///
/// Returns `None` when there is a single driver: the caller then searches
/// the global graph instead. Otherwise warms the request cache with every
/// driver-to-pickup and pickup-to-drop-off time, which the later per-driver
/// searches reuse.
pub async fn assign_passengers<P: TravelTimeProvider>(
    ctx: &mut RoutingContext,
    provider: &P,
    config: &DispatchConfig,
) -> Result<Option<Assignment>, TravelTimeError> {
    if ctx.driver_count() <= 1 {
        return Ok(None);
    }

    let drivers: Vec<NodeIndex> = ctx.drivers().collect();
    let sources: Vec<NodeIndex> = ctx.sources().iter().copied().collect();
    let dests: Vec<NodeIndex> = ctx.dests().iter().copied().collect();

    let driver_pairs = drivers
        .iter()
        .flat_map(|&d| sources.iter().map(move |&s| (d, s)));
    let source_pairs = sources
        .iter()
        .flat_map(|&s| dests.iter().map(move |&t| (s, t)));
    let pairs: Vec<_> = driver_pairs.chain(source_pairs).collect();

    ctx.warm(provider, pairs, config.batch_size).await?;

    let costs = cost_map(ctx, provider, &drivers).await?;
    for (source, driver_costs) in &costs {
        debug!(source = %source, costs = ?driver_costs, "passenger cost by driver");
    }

    let assignment = assign_greedy(&drivers, &costs);
    for (driver, assigned) in assignment.iter() {
        debug!(driver = %driver, sources = ?assigned, "driver assignment");
    }
    debug!(
        drivers = drivers.len(),
        assigned = assignment.assigned_count(),
        "passengers assigned"
    );

    Ok(Some(assignment))
}

/// Build the cost map, reading through the request cache.
///
/// After warm-up every lookup here is a cache hit.
async fn cost_map<P: TravelTimeProvider>(
    ctx: &mut RoutingContext,
    provider: &P,
    drivers: &[NodeIndex],
) -> Result<CostMap, TravelTimeError> {
    let sources: Vec<NodeIndex> = ctx.sources().iter().copied().collect();
    let mut costs = CostMap::new();

    for source in sources {
        let dests: Vec<NodeIndex> = ctx.dests_of(source).collect();
        let mut ride = 0;
        for dest in dests {
            ride += ctx.cost(provider, source, dest).await?;
        }

        let mut driver_costs = Vec::with_capacity(drivers.len());
        for &driver in drivers {
            driver_costs.push(ctx.cost(provider, driver, source).await? + ride);
        }
        costs.insert(source, driver_costs);
    }

    Ok(costs)
}

/// The two-round greedy pass over a cost map.
///
/// `costs[source][i]` is the cost for `drivers[i]`.
pub fn assign_greedy(drivers: &[NodeIndex], costs: &CostMap) -> Assignment {
    let mut assignment = Assignment::for_drivers(drivers.iter().copied());
    let mut assigned: BTreeSet<NodeIndex> = BTreeSet::new();

    for (i, &driver) in drivers.iter().enumerate() {
        let best = costs
            .iter()
            .filter(|(source, _)| !assigned.contains(*source))
            .filter_map(|(source, driver_costs)| driver_costs.get(i).map(|c| (*source, *c)))
            .fold(None, |best: Option<(NodeIndex, u32)>, (source, cost)| match best {
                Some((_, best_cost)) if best_cost <= cost => best,
                _ => Some((source, cost)),
            });

        if let Some((source, _)) = best {
            assignment.assign(driver, source);
            assigned.insert(source);
        }
    }

    for (&source, driver_costs) in costs {
        if assigned.contains(&source) {
            continue;
        }
        let best_driver = driver_costs
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, u32)>, (i, &cost)| match best {
                Some((_, best_cost)) if best_cost <= cost => best,
                _ => Some((i, cost)),
            });

        if let Some((i, _)) = best_driver {
            assignment.assign(drivers[i], source);
            assigned.insert(source);
        }
    }

    assignment
}

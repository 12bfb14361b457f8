//! Per-request memo of travel times between nodes.
//!
//! Each ordered `(from, to)` pair is looked up at most once per request.
//! Entries are never evicted; a fresh cache is created for every request.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use tracing::debug;

use crate::distance::{TravelTimeError, TravelTimeProvider};
use crate::domain::{Node, NodeIndex};

/// Cache key: ordered pair of node indices.
pub type PairKey = (NodeIndex, NodeIndex);

/// Travel times in minutes, keyed by ordered node pair.
#[derive(Debug, Clone, Default)]
pub struct TravelTimeCache {
    times: HashMap<PairKey, u32>,

    /// External lookups made so far.
    lookups: usize,
}

impl TravelTimeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached time for a pair, without fetching.
    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> Option<u32> {
        self.times.get(&(from, to)).copied()
    }

    pub fn contains(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.times.contains_key(&(from, to))
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of external lookups made.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// Travel time for `from -> to`, fetching it on first use.
    ///
    /// The reverse pair is never filled in automatically.
    pub async fn cost<P: TravelTimeProvider>(
        &mut self,
        provider: &P,
        nodes: &[Node],
        from: NodeIndex,
        to: NodeIndex,
    ) -> Result<u32, TravelTimeError> {
        if let Some(minutes) = self.get(from, to) {
            return Ok(minutes);
        }

        self.lookups += 1;
        let minutes = provider
            .travel_time_minutes(nodes[from.0].coord, nodes[to.0].coord)
            .await?;
        self.times.insert((from, to), minutes);
        Ok(minutes)
    }

    /// Fetch every missing pair, `batch_size` lookups at a time.
    ///
    /// Results are stored in pair order. The first failure aborts the warm-up
    /// and is returned; pairs fetched before it stay cached. Returns the
    /// number of lookups issued.
    pub async fn warm<P, I>(
        &mut self,
        provider: &P,
        nodes: &[Node],
        pairs: I,
        batch_size: usize,
    ) -> Result<usize, TravelTimeError>
    where
        P: TravelTimeProvider,
        I: IntoIterator<Item = PairKey>,
    {
        let mut seen = HashSet::new();
        let missing: Vec<PairKey> = pairs
            .into_iter()
            .filter(|pair| !self.times.contains_key(pair) && seen.insert(*pair))
            .collect();

        if missing.is_empty() {
            return Ok(0);
        }

        let mut issued = 0;

        for batch in missing.chunks(batch_size.max(1)) {
            let futures: Vec<_> = batch
                .iter()
                .map(|&(from, to)| {
                    provider.travel_time_minutes(nodes[from.0].coord, nodes[to.0].coord)
                })
                .collect();

            let results = join_all(futures).await;
            issued += batch.len();
            self.lookups += batch.len();

            for (&pair, result) in batch.iter().zip(results) {
                self.times.insert(pair, result?);
            }
        }

        debug!(lookups = issued, cached = self.times.len(), "travel-time cache warmed");

        Ok(issued)
    }
}

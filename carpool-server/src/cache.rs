//! Process-wide caching of travel times.
//!
//! Travel times between two fixed points change slowly, and the same pickup
//! and drop-off spots tend to come up in many requests. Entries are keyed on
//! the exact coordinate bits and expire after a TTL.
//!
//! Failed lookups are never cached.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::distance::{TravelTimeError, TravelTimeProvider};
use crate::domain::Coord;

/// `(from.lat, from.lng, to.lat, to.lng)` as canonical bit patterns.
type PairKey = (u64, u64, u64, u64);

fn pair_key(from: Coord, to: Coord) -> PairKey {
    let (a, b) = from.key();
    let (c, d) = to.key();
    (a, b, c, d)
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 10_000,
        }
    }
}

/// Travel-time provider with caching.
///
/// Wraps another provider and remembers its answers across requests.
pub struct CachedTravelTimeProvider<P> {
    inner: P,
    times: MokaCache<PairKey, u32>,
}

impl<P: TravelTimeProvider> CachedTravelTimeProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let times = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, times }
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.times.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.times.invalidate_all();
    }
}

impl<P: TravelTimeProvider> TravelTimeProvider for CachedTravelTimeProvider<P> {
    async fn travel_time_minutes(&self, from: Coord, to: Coord) -> Result<u32, TravelTimeError> {
        let key = pair_key(from, to);

        if let Some(minutes) = self.times.get(&key).await {
            trace!(%from, %to, minutes, "travel time cache hit");
            return Ok(minutes);
        }

        let minutes = self.inner.travel_time_minutes(from, to).await?;
        self.times.insert(key, minutes).await;
        Ok(minutes)
    }
}

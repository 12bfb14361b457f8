//! Deterministic travel-time provider for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::distance::{TravelTimeError, TravelTimeProvider};
use crate::domain::Coord;

type CoordKey = (u64, u64);

fn key(lat: f64, lng: f64) -> CoordKey {
    Coord::new(lat, lng).key()
}

/// How to answer pairs without an explicit entry.
enum Fallback {
    Fixed(u32),
    /// `|dlat| + |dlng|`, rounded.
    Manhattan,
}

/// Table-driven [`TravelTimeProvider`] that counts its calls.
pub(crate) struct MockTravelTimes {
    table: HashMap<(CoordKey, CoordKey), u32>,
    failing: HashSet<(CoordKey, CoordKey)>,
    fallback: Fallback,
    call_count: Mutex<usize>,
}

impl MockTravelTimes {
    /// Every pair takes `default_minutes` unless overridden.
    pub(crate) fn new(default_minutes: u32) -> Self {
        Self::with_fallback(Fallback::Fixed(default_minutes))
    }

    /// Every pair takes its Manhattan distance in minutes unless overridden.
    pub(crate) fn manhattan() -> Self {
        Self::with_fallback(Fallback::Manhattan)
    }

    fn with_fallback(fallback: Fallback) -> Self {
        Self {
            table: HashMap::new(),
            failing: HashSet::new(),
            fallback,
            call_count: Mutex::new(0),
        }
    }

    /// Fix the time for one ordered pair of `(lat, lng)` points.
    pub(crate) fn with(mut self, from: (f64, f64), to: (f64, f64), minutes: u32) -> Self {
        self.table
            .insert((key(from.0, from.1), key(to.0, to.1)), minutes);
        self
    }

    /// Make lookups for one ordered pair fail.
    pub(crate) fn failing_on(mut self, from: (f64, f64), to: (f64, f64)) -> Self {
        self.failing.insert((key(from.0, from.1), key(to.0, to.1)));
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The time this provider reports for a pair, without counting a call.
    pub(crate) fn minutes(&self, from: Coord, to: Coord) -> Option<u32> {
        let pair = (from.key(), to.key());
        if self.failing.contains(&pair) {
            return None;
        }
        if let Some(&minutes) = self.table.get(&pair) {
            return Some(minutes);
        }
        Some(match self.fallback {
            Fallback::Fixed(minutes) => minutes,
            Fallback::Manhattan => {
                ((from.lat - to.lat).abs() + (from.lng - to.lng).abs()).round() as u32
            }
        })
    }
}

impl TravelTimeProvider for MockTravelTimes {
    async fn travel_time_minutes(&self, from: Coord, to: Coord) -> Result<u32, TravelTimeError> {
        *self.call_count.lock().unwrap() += 1;
        self.minutes(from, to)
            .ok_or_else(|| TravelTimeError::Status("MOCK_FAILURE".to_string()))
    }
}

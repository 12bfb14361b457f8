//! Dispatch configuration.

/// Hard ceiling on concurrent passengers in one vehicle.
pub const SEAT_CAPACITY: u8 = 4;

/// Configuration parameters for dispatching a trip request.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum passengers in a vehicle at the same time.
    pub seat_capacity: u8,

    /// Maximum number of travel-time lookups issued concurrently when
    /// pre-warming the cache for assignment.
    pub batch_size: usize,
}

impl DispatchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(seat_capacity: u8, batch_size: usize) -> Self {
        Self {
            seat_capacity,
            batch_size,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            seat_capacity: SEAT_CAPACITY,
            batch_size: 8,
        }
    }
}

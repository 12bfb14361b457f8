//! Domain error types.
//!
//! Raised when a decoded trip request cannot be dispatched at all. These are
//! distinct from travel-time lookup failures.

/// A trip request that is structurally unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// No driver coordinates were supplied
    #[error("trip request has no drivers")]
    NoDrivers,

    /// No passenger pickup/drop-off pairs were supplied
    #[error("trip request has no passengers")]
    NoPassengers,
}

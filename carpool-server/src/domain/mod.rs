//! Domain types for the ride-pooling dispatcher.
//!
//! Coordinates, node roles and the decoded trip request. Everything here is
//! plain data; the graph and search live in [`crate::dispatch`].

mod coord;
mod error;
mod trip;

pub use coord::{Coord, Node, NodeIndex, Role};
pub use error::DomainError;
pub use trip::{Passenger, TripRequest};

pub(crate) use coord::NodeKey;

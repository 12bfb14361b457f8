//! Travel-time lookups between two coordinates.
//!
//! The dispatcher only knows the [`TravelTimeProvider`] trait. This module
//! provides the implementations:
//! - [`DistanceMatrixClient`] calls the Google Distance Matrix API, one
//!   origin/destination pair per request
//! - [`StraightLineTravelTimes`] estimates from great-circle distance, for
//!   running without an API key
//! - [`TravelTimeSource`] picks one of the two at start-up

mod client;
mod convert;
mod error;
mod provider;
mod straight_line;
mod types;

pub use client::{DistanceMatrixClient, DistanceMatrixConfig};
pub use convert::{minutes_from_response, seconds_to_minutes};
pub use error::TravelTimeError;
pub use provider::{TravelTimeProvider, TravelTimeSource};
pub use straight_line::StraightLineTravelTimes;
pub use types::{DistanceMatrixResponse, Element, ElementDuration, Row};

//! Ride-pooling dispatch server.
//!
//! Given drivers and passengers, decides which driver picks up whom and
//! in what order, minimising each driver's total travel time while
//! respecting pickup-before-drop-off and seat capacity.

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod distance;
pub mod domain;
pub mod web;

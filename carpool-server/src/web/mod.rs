//! Web layer for the ride-pooling dispatcher.
//!
//! Accepts trip requests as JSON and answers with one route per driver.

mod dto;
mod error;
mod routes;
mod state;

pub use dto::*;
pub use error::AppError;
pub use routes::{create_router, resolve_paths};
pub use state::AppState;

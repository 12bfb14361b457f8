//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedTravelTimeProvider;
use crate::dispatch::DispatchConfig;
use crate::distance::TravelTimeSource;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Travel-time provider shared by every request
    pub travel_times: Arc<CachedTravelTimeProvider<TravelTimeSource>>,

    /// Dispatch settings
    pub dispatch: Arc<DispatchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        travel_times: CachedTravelTimeProvider<TravelTimeSource>,
        dispatch: DispatchConfig,
    ) -> Self {
        Self {
            travel_times: Arc::new(travel_times),
            dispatch: Arc::new(dispatch),
        }
    }
}

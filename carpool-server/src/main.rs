use carpool_server::cache::CachedTravelTimeProvider;
use carpool_server::config::ServerConfig;
use carpool_server::dispatch::DispatchConfig;
use carpool_server::distance::{
    DistanceMatrixClient, DistanceMatrixConfig, StraightLineTravelTimes, TravelTimeSource,
};
use carpool_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env().expect("Invalid configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Pick the travel-time source
    let source = match &config.google_api_key {
        Some(key) => {
            let client = DistanceMatrixClient::new(DistanceMatrixConfig::new(key))
                .expect("Failed to create Distance Matrix client");
            TravelTimeSource::DistanceMatrix(client)
        }
        None => {
            warn!("GOOGLE_API_KEY not set, falling back to straight-line travel times");
            TravelTimeSource::StraightLine(StraightLineTravelTimes::default())
        }
    };
    info!(source = source.name(), "travel-time source selected");

    let travel_times = CachedTravelTimeProvider::new(source, &config.travel_cache);
    let state = AppState::new(travel_times, DispatchConfig::default());

    let app = create_router(state, &config.cors_origins);

    // Bind and serve
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    info!(%addr, origins = ?config.cors_origins, "carpool server listening");
    info!("  GET  /          - Hello");
    info!("  GET  /health    - Health check");
    info!("  POST /get-data  - Assign passengers and route drivers");

    axum::serve(listener, app).await.expect("Server error");
}

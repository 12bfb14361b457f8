//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{debug, warn};

use crate::dispatch::{DispatchConfig, Dispatcher};
use crate::distance::TravelTimeProvider;

use super::dto::*;
use super::error::AppError;
use super::state::AppState;

/// Create the application router.
///
/// `cors_origins` lists the browser origins allowed to call the API;
/// entries that are not valid header values are skipped.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .route("/get-data", post(get_data))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from backend".to_string(),
    })
}

/// Assign passengers to drivers and route every driver.
async fn get_data(
    State(state): State<AppState>,
    Json(body): Json<TripRequestBody>,
) -> Result<Json<PathsResponse>, AppError> {
    let response = resolve_paths(&*state.travel_times, &state.dispatch, body).await?;
    Ok(Json(response))
}

/// Decode a request body, dispatch it and build the response.
pub async fn resolve_paths<P: TravelTimeProvider>(
    provider: &P,
    config: &DispatchConfig,
    body: TripRequestBody,
) -> Result<PathsResponse, AppError> {
    let request = body.into_trip_request();
    debug!(
        drivers = request.drivers.len(),
        passengers = request.passengers.len(),
        "trip request received"
    );

    let routes = Dispatcher::new(provider, config)
        .resolve_trip_request(&request)
        .await?;

    Ok(PathsResponse::handled(routes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, CachedTravelTimeProvider};
    use crate::dispatch::test_support::MockTravelTimes;
    use crate::distance::{StraightLineTravelTimes, TravelTimeSource};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::json;
    use tower::ServiceExt;

    fn body(value: serde_json::Value) -> TripRequestBody {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn resolves_single_driver() {
        let mock = MockTravelTimes::new(100)
            .with((0.0, 0.0), (1.0, 2.0), 5)
            .with((1.0, 2.0), (3.0, 4.0), 3);

        let response = resolve_paths(
            &mock,
            &DispatchConfig::default(),
            body(json!({
                "drivers": [[0.0, 0.0]],
                "passengers": [[[1.0, 2.0], [3.0, 4.0]]]
            })),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.paths.len(), 1);
        assert_eq!(response.paths[0].shortest_time, 8);
        assert_eq!(
            response.paths[0].path,
            vec![[0.0, 0.0], [2.0, 1.0], [4.0, 3.0]]
        );
    }

    #[tokio::test]
    async fn only_malformed_entries_is_bad_request() {
        let mock = MockTravelTimes::new(1);

        let err = resolve_paths(
            &mock,
            &DispatchConfig::default(),
            body(json!({
                "drivers": [[0.0]],
                "passengers": [[[1.0, 2.0], [3.0, 4.0]]]
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn lookup_failure_is_bad_gateway() {
        let mock = MockTravelTimes::new(1).failing_on((0.0, 0.0), (1.0, 2.0));

        let err = resolve_paths(
            &mock,
            &DispatchConfig::default(),
            body(json!({
                "drivers": [[0.0, 0.0]],
                "passengers": [[[1.0, 2.0], [3.0, 4.0]]]
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    async fn preflight(router: Router, origin: &str) -> axum::response::Response {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/get-data")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        router.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn cors_allows_configured_origins_only() {
        let state = AppState::new(
            CachedTravelTimeProvider::new(
                TravelTimeSource::StraightLine(StraightLineTravelTimes::default()),
                &CacheConfig::default(),
            ),
            DispatchConfig::default(),
        );
        // The second origin is not a valid header value and is skipped
        let router = create_router(
            state,
            &["http://localhost:5173".to_string(), "bad\norigin".to_string()],
        );

        let allowed = preflight(router.clone(), "http://localhost:5173").await;
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );

        let denied = preflight(router, "http://evil.test").await;
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}

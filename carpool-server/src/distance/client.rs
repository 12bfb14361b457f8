//! Google Distance Matrix HTTP client.
//!
//! Issues one request per origin/destination pair and converts the result
//! to whole minutes. Credentials stay in [`DistanceMatrixConfig`]; nothing
//! outside this module sees them.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::Coord;

use super::convert::minutes_from_response;
use super::error::TravelTimeError;
use super::provider::TravelTimeProvider;
use super::types::DistanceMatrixResponse;

/// Default base URL for the Distance Matrix API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the Distance Matrix client.
#[derive(Clone)]
pub struct DistanceMatrixConfig {
    /// API key for authentication
    pub api_key: String,
    /// Endpoint URL (defaults to the public Google endpoint)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for DistanceMatrixConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceMatrixConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_concurrent", &self.max_concurrent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DistanceMatrixConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Distance Matrix API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Clone)]
pub struct DistanceMatrixClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl std::fmt::Debug for DistanceMatrixClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceMatrixClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DistanceMatrixClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DistanceMatrixConfig) -> Result<Self, TravelTimeError> {
        if config.api_key.is_empty() {
            return Err(TravelTimeError::NotConfigured(
                "distance matrix API key is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Fetch the raw response for one origin/destination pair.
    pub async fn get_matrix(
        &self,
        from: Coord,
        to: Coord,
    ) -> Result<DistanceMatrixResponse, TravelTimeError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TravelTimeError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&query_params(from, to, &self.api_key))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TravelTimeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            TravelTimeError::Malformed(format!(
                "{e} (body: {})",
                body.chars().take(500).collect::<String>()
            ))
        })
    }
}

/// Query string for a single pair. Coordinates are `lat,lng`.
fn query_params(from: Coord, to: Coord, api_key: &str) -> [(&'static str, String); 3] {
    [
        ("origins", format!("{},{}", from.lat, from.lng)),
        ("destinations", format!("{},{}", to.lat, to.lng)),
        ("key", api_key.to_string()),
    ]
}

impl TravelTimeProvider for DistanceMatrixClient {
    async fn travel_time_minutes(&self, from: Coord, to: Coord) -> Result<u32, TravelTimeError> {
        let response = self.get_matrix(from, to).await?;
        let minutes = minutes_from_response(&response)?;
        trace!(%from, %to, minutes, "distance matrix lookup");
        Ok(minutes)
    }
}

//! Server configuration read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::cache::CacheConfig;

/// Origin allowed by CORS when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8000;

/// Errors from reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name} {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Everything `main` needs to start the server.
#[derive(Clone)]
pub struct ServerConfig {
    /// Distance Matrix API key; `None` selects the straight-line estimate
    pub google_api_key: Option<String>,

    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,

    pub host: IpAddr,
    pub port: u16,

    /// Cross-request travel-time cache
    pub travel_cache: CacheConfig,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "<redacted>"))
            .field("cors_origins", &self.cors_origins)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("travel_cache", &self.travel_cache)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            travel_cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present;
    /// variables already set take precedence over it.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.google_api_key = get("GOOGLE_API_KEY").map(|k| k.trim().to_string());

        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(host) = get("HOST") {
            config.host = host
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("HOST", &host, e))?;
        }

        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("PORT", &port, e))?;
        }

        if let Some(ttl) = get("TRAVEL_CACHE_TTL_SECS") {
            let secs: u64 = ttl
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("TRAVEL_CACHE_TTL_SECS", &ttl, e))?;
            config.travel_cache.ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

//! Travel-time lookup error types.

/// Errors from a travel-time lookup.
///
/// Any of these aborts the whole trip-request resolution; nothing is
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum TravelTimeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Top-level response status was not `OK`
    #[error("distance matrix status: {0}")]
    Status(String),

    /// The element for this origin/destination has no route
    #[error("no route found (element status {0})")]
    NoRoute(String),

    /// Response could not be interpreted as a duration
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Provider could not be set up
    #[error("not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TravelTimeError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = TravelTimeError::Status("REQUEST_DENIED".into());
        assert_eq!(err.to_string(), "distance matrix status: REQUEST_DENIED");

        let err = TravelTimeError::NoRoute("ZERO_RESULTS".into());
        assert!(err.to_string().contains("ZERO_RESULTS"));

        let err = TravelTimeError::Malformed("missing duration.value".into());
        assert!(err.to_string().contains("malformed response"));
    }
}

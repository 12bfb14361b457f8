//! Google Distance Matrix API response types.
//!
//! Only the fields needed to extract a single duration are modelled. Every
//! field defaults so that a partial body still deserializes and the missing
//! piece can be reported precisely.

use serde::Deserialize;

/// Top-level Distance Matrix response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistanceMatrixResponse {
    /// `"OK"` on success, otherwise e.g. `"REQUEST_DENIED"`.
    #[serde(default)]
    pub status: String,

    /// Present on some failures.
    #[serde(default)]
    pub error_message: Option<String>,

    /// One row per origin.
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Results for one origin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Row {
    /// One element per destination.
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Result for one origin/destination pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Element {
    /// `"OK"`, `"NOT_FOUND"` or `"ZERO_RESULTS"`.
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub duration: Option<ElementDuration>,
}

/// Duration of the fastest route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElementDuration {
    /// Seconds.
    #[serde(default)]
    pub value: Option<f64>,

    /// Human readable, e.g. `"5 mins"`.
    #[serde(default)]
    pub text: Option<String>,
}

//! Conversion from Distance Matrix responses to whole minutes.

use super::error::TravelTimeError;
use super::types::DistanceMatrixResponse;

/// Round a duration in seconds to the nearest whole minute.
///
/// Halves round to even (90 s is 2 min, 150 s is 2 min). Negative or
/// non-finite input is clamped to zero.
pub fn seconds_to_minutes(seconds: f64) -> u32 {
    let minutes = (seconds / 60.0).round_ties_even();
    if minutes.is_finite() && minutes > 0.0 {
        minutes.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Extract the single origin/destination duration from a response.
///
/// A failed top-level status carries the response's `error_message`, if
/// any, as `"STATUS: message"`.
pub fn minutes_from_response(response: &DistanceMatrixResponse) -> Result<u32, TravelTimeError> {
    if response.status != "OK" {
        let status = if response.status.is_empty() {
            "MISSING"
        } else {
            response.status.as_str()
        };
        let detail = match response.error_message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => format!("{status}: {message}"),
            _ => status.to_string(),
        };
        return Err(TravelTimeError::Status(detail));
    }

    let element = response
        .rows
        .first()
        .and_then(|row| row.elements.first())
        .ok_or_else(|| TravelTimeError::Malformed("missing rows/elements".to_string()))?;

    if element.status != "OK" {
        return Err(TravelTimeError::NoRoute(element.status.clone()));
    }

    let seconds = element
        .duration
        .as_ref()
        .and_then(|d| d.value)
        .ok_or_else(|| TravelTimeError::Malformed("missing duration.value".to_string()))?;

    Ok(seconds_to_minutes(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> DistanceMatrixResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn rounds_to_nearest_minute() {
        assert_eq!(seconds_to_minutes(0.0), 0);
        assert_eq!(seconds_to_minutes(29.0), 0);
        assert_eq!(seconds_to_minutes(31.0), 1);
        assert_eq!(seconds_to_minutes(300.0), 5);
        assert_eq!(seconds_to_minutes(329.0), 5);
        assert_eq!(seconds_to_minutes(331.0), 6);
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(seconds_to_minutes(90.0), 2);
        assert_eq!(seconds_to_minutes(150.0), 2);
        assert_eq!(seconds_to_minutes(210.0), 4);
    }

    #[test]
    fn nonsense_clamps_to_zero() {
        assert_eq!(seconds_to_minutes(-120.0), 0);
        assert_eq!(seconds_to_minutes(f64::NAN), 0);
    }

    #[test]
    fn extracts_duration() {
        let response = parse(
            r#"{"status": "OK", "rows": [{"elements": [
                {"status": "OK", "duration": {"value": 600, "text": "10 mins"}}
            ]}]}"#,
        );
        assert_eq!(minutes_from_response(&response).unwrap(), 10);
    }

    #[test]
    fn top_level_status_is_checked() {
        let response = parse(r#"{"status": "OVER_QUERY_LIMIT", "rows": []}"#);
        assert!(matches!(
            minutes_from_response(&response),
            Err(TravelTimeError::Status(s)) if s == "OVER_QUERY_LIMIT"
        ));

        let response = parse("{}");
        assert!(matches!(
            minutes_from_response(&response),
            Err(TravelTimeError::Status(s)) if s == "MISSING"
        ));
    }

    #[test]
    fn error_message_is_carried() {
        let response = parse(
            r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid.", "rows": []}"#,
        );
        let err = minutes_from_response(&response).unwrap_err();
        assert!(matches!(
            &err,
            TravelTimeError::Status(s) if s == "REQUEST_DENIED: The provided API key is invalid."
        ));
        assert_eq!(
            err.to_string(),
            "distance matrix status: REQUEST_DENIED: The provided API key is invalid."
        );

        let response = parse(r#"{"status": "INVALID_REQUEST", "error_message": " "}"#);
        assert!(matches!(
            minutes_from_response(&response),
            Err(TravelTimeError::Status(s)) if s == "INVALID_REQUEST"
        ));
    }

    #[test]
    fn missing_elements_is_malformed() {
        let response = parse(r#"{"status": "OK", "rows": [{"elements": []}]}"#);
        assert!(matches!(
            minutes_from_response(&response),
            Err(TravelTimeError::Malformed(_))
        ));
    }

    #[test]
    fn element_status_is_checked() {
        let response = parse(r#"{"status": "OK", "rows": [{"elements": [{"status": "ZERO_RESULTS"}]}]}"#);
        assert!(matches!(
            minutes_from_response(&response),
            Err(TravelTimeError::NoRoute(s)) if s == "ZERO_RESULTS"
        ));
    }

    #[test]
    fn missing_duration_is_malformed() {
        let response = parse(r#"{"status": "OK", "rows": [{"elements": [{"status": "OK"}]}]}"#);
        assert!(matches!(
            minutes_from_response(&response),
            Err(TravelTimeError::Malformed(m)) if m.contains("duration")
        ));
    }
}

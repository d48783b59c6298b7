//! Error normalization for service responses.
//!
//! The priority is fixed: a string `detail` from the service, then the
//! transport-level description, then the generic "Request failed".

use roadcost_core::RoadcostError;
use roadcost_core::config::REQUEST_TIMEOUT;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Extracts a non-empty string `detail` from an error body.
///
/// Structured details (such as validation error lists) are not strings and
/// are ignored.
pub fn service_detail(body: &[u8]) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_slice(body).ok()?;
    match payload.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

/// Converts a non-2xx response into a [`RoadcostError::Service`].
pub fn normalize_failure(status: u16, body: &[u8]) -> RoadcostError {
    let message = service_detail(body)
        .unwrap_or_else(|| format!("Request failed with status code {status}"));
    RoadcostError::service(status, message)
}

/// Converts a reqwest failure that produced no usable response.
pub fn normalize_transport(err: &reqwest::Error) -> RoadcostError {
    if err.is_timeout() {
        return RoadcostError::transport(format!(
            "Request timed out after {} seconds",
            REQUEST_TIMEOUT.as_secs()
        ));
    }
    if err.is_connect() {
        return RoadcostError::transport(format!("Network error: {err}"));
    }
    RoadcostError::transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_wins() {
        let err = normalize_failure(400, br#"{"detail": "Unsupported file type"}"#);
        assert_eq!(err.user_message(), "Unsupported file type");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_detail_with_size_limit_message() {
        let err = normalize_failure(413, br#"{"detail": "File too large. Maximum size is 50MB"}"#);
        assert_eq!(err.user_message(), "File too large. Maximum size is 50MB");
    }

    #[test]
    fn test_missing_detail_falls_back_to_status_message() {
        let err = normalize_failure(500, b"<html>Internal Server Error</html>");
        assert_eq!(err.user_message(), "Request failed with status code 500");

        let err = normalize_failure(502, br#"{"error": "bad gateway"}"#);
        assert_eq!(err.user_message(), "Request failed with status code 502");
    }

    #[test]
    fn test_structured_detail_is_ignored() {
        let body = br#"{"detail": [{"loc": ["body", "file"], "msg": "field required"}]}"#;
        assert_eq!(service_detail(body), None);
        assert_eq!(
            normalize_failure(422, body).user_message(),
            "Request failed with status code 422"
        );
    }

    #[test]
    fn test_blank_detail_is_ignored() {
        assert_eq!(service_detail(br#"{"detail": "  "}"#), None);
        assert_eq!(service_detail(b""), None);
    }
}

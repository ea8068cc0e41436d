// Request parsing utilities for HTTP handlers

use hyper::{Body, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::web::response_helpers::json_error;
use crate::{log_debug, log_error};

/// Parse JSON request body into a typed structure.
///
/// Returns the deserialized value on success, or a ready-to-send 400
/// Response on failure. The error response carries the parse error message
/// so callers can surface missing or mistyped fields to the client.
pub async fn parse_json_body<T: DeserializeOwned>(body: Body) -> Result<T, Response<Body>> {
    let body_bytes = match hyper::body::to_bytes(body).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log_error!("[REQUEST] Failed to read request body: {}", e);
            return Err(json_error(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            ));
        }
    };

    // Debug: log the received JSON for troubleshooting
    if let Ok(body_str) = std::str::from_utf8(&body_bytes) {
        if !body_str.is_empty() {
            log_debug!("[REQUEST] Body: {}", body_str);
        }
    }

    match serde_json::from_slice::<T>(&body_bytes) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            log_error!("[REQUEST] JSON parsing error: {}", e);
            Err(json_error(StatusCode::BAD_REQUEST, &e.to_string()))
        }
    }
}

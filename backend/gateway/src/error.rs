//! Maps relay failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use medrelay_core::RelayError;
use medrelay_logging::{EventLogger, RelayEvent};

/// A terminal failure for one request, rendered as `{"error": <message>}`.
#[derive(Debug)]
pub struct ApiError(pub RelayError);

impl ApiError {
    /// Record the failure on the event log and wrap it for the response.
    pub fn logged(route: &str, request_id: &str, err: RelayError) -> Self {
        EventLogger::log_event(
            request_id,
            RelayEvent::Failed {
                route: route.to_string(),
                kind: err.kind().to_string(),
                message: err.to_string(),
            },
        );
        Self(err)
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RelayError::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            err if err.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

// --- File: crates/staybook_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, StaybookError};

/// Extension trait for StaybookError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for StaybookError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Flat `{ "error": "..." }` body, the shape the booking UI reads
        let body = Json(json!({ "error": self.to_string() }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for StaybookError to make it easier to use in Axum handlers.
impl IntoResponse for StaybookError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

// File: crates/staybook_reserve/src/handlers.rs
use crate::logic::{
    process_reservation, IntakeOutcome, ReserveError, ReserveResponse, MAX_RESERVATION_BYTES,
};
use axum::{
    body::{to_bytes, Body},
    response::Json,
};
use tracing::{error, info};

/// Accepts any body and always answers 200 `{ok:true}`.
///
/// The submission only ends up in the server log; a body that cannot be read
/// is logged as an error and the response carries a `note`.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/reserve",
    request_body(content = serde_json::Value, description = "Free-form booking form submission", example = json!({
        "first_name": "Anna",
        "last_name": "Muster",
        "check_in": "2025-07-01",
        "check_out": "2025-07-04",
        "email": "anna@example.com"
    })),
    responses(
        (status = 200, description = "Always returned, even if the submission could not be read", body = ReserveResponse)
    ),
    tag = "Reservations"
))]
pub async fn reserve_handler(body: Body) -> Json<ReserveResponse> {
    // Oversized or broken bodies become a logged failure, never a 413
    let outcome = match to_bytes(body, MAX_RESERVATION_BYTES).await {
        Ok(bytes) => process_reservation(&bytes),
        Err(e) => IntakeOutcome::LoggedFailure(ReserveError::Unreadable(e)),
    };
    match &outcome {
        IntakeOutcome::Recorded(summary) => info!(
            reference = %summary.reference,
            "Reservation received: name={:?} dates={} email={}",
            summary.name,
            summary.dates(),
            summary.email
        ),
        IntakeOutcome::LoggedFailure(e) => error!("Reserve handler error: {}", e),
    }
    Json(ReserveResponse::from(&outcome))
}

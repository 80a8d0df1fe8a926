// --- File: crates/staybook_common/src/handlers.rs ---
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Liveness reply for `/api/ping`.
#[derive(Serialize, Debug)]
pub struct PingResponse {
    pub ok: bool,
    /// Server time, RFC 3339 in UTC.
    pub at: String,
}

pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Plain-text health check for load balancers.
pub async fn healthz_handler() -> &'static str {
    "ok"
}

// --- File: crates/staybook_common/src/routes.rs ---
use axum::{routing::get, Router};

use crate::handlers::{healthz_handler, ping_handler};

/// Liveness routes shared by every deployment: `/api/ping` and `/healthz`.
pub fn routes() -> Router {
    Router::new()
        .route("/api/ping", get(ping_handler))
        .route("/healthz", get(healthz_handler))
}

// File: crates/staybook_reserve/src/routes.rs
use crate::handlers::reserve_handler;
use axum::{extract::DefaultBodyLimit, routing::post, Router};

/// `POST /api/reserve`. The handler enforces its own size cap, so axum's
/// default limit is lifted for this route.
pub fn routes() -> Router {
    Router::new().route(
        "/api/reserve",
        post(reserve_handler).layer(DefaultBodyLimit::disable()),
    )
}

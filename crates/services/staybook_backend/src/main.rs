// File: services/staybook_backend/src/main.rs
use staybook_backend::{build_app, AppState, StartupError};
use staybook_common::{log_result, logging};
use staybook_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("staybook-backend: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Arc::new(load_config()?);
    let _log_guard = logging::init_from_config(config.logging.as_ref());

    let state = log_result(
        AppState::initialize(config.clone()).await,
        "Application state initialized",
        "Startup failed",
    )?;
    let app = build_app(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

// --- File: crates/services/staybook_backend/src/static_site.rs ---
//! The booking page: files from the static directory, with the index page as
//! fallback for every other non-API path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Router,
};
use staybook_common::StaybookError;
use staybook_config::StaticSiteConfig;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::{debug, error};

#[derive(Clone)]
pub struct StaticSite {
    files: ServeDir,
    index_path: PathBuf,
    index_file: String,
}

impl StaticSite {
    pub fn new(config: &StaticSiteConfig) -> Self {
        let dir = PathBuf::from(&config.dir);
        Self {
            files: ServeDir::new(&dir),
            index_path: dir.join(&config.index_file),
            index_file: config.index_file.clone(),
        }
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Reads the index page on every call so a page deployed after boot is picked up.
    async fn index_page(&self) -> Response {
        match tokio::fs::read_to_string(&self.index_path).await {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                error!("Missing file: {} ({})", self.index_path.display(), e);
                (
                    StatusCode::NOT_FOUND,
                    format!(
                        "{} not found. Ensure {} exists.",
                        self.index_file,
                        self.index_path.display()
                    ),
                )
                    .into_response()
            }
        }
    }
}

pub fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

fn api_not_found(path: &str) -> Response {
    StaybookError::NotFoundError(format!("no API route for {}", path)).into_response()
}

async fn serve_site(State(site): State<Arc<StaticSite>>, request: Request) -> Response {
    let path = request.uri().path().to_string();
    if is_api_path(&path) {
        debug!("Unknown API path: {}", path);
        return api_not_found(&path);
    }

    let response = match site.files.clone().oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    if response.status() == StatusCode::NOT_FOUND {
        return site.index_page().await;
    }
    response.into_response()
}

/// A router with only a fallback; merge it last.
pub fn router(site: StaticSite) -> Router {
    Router::new()
        .fallback(serve_site)
        .with_state(Arc::new(site))
}

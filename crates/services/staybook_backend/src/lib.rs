// File: services/staybook_backend/src/lib.rs
use axum::Router;
use http::{header::CONTENT_TYPE, Method};
use staybook_config::AppConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod app_state;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod static_site;

pub use app_state::{AppState, AppStateBuilder, StartupError};
use static_site::StaticSite;

/// Any origin, GET/POST/OPTIONS, `Content-Type` only.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

fn static_site(config: &AppConfig) -> StaticSite {
    let site = StaticSite::new(&config.static_site.clone().unwrap_or_default());
    info!("Serving static files, index at {}", site.index_path().display());
    site
}

/// Assembles the full application: liveness routes, enabled feature routes,
/// Swagger UI (with `openapi`) and the static booking page as fallback.
pub fn build_app(state: &AppState) -> Router {
    let config = &state.config;

    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut router = staybook_common::routes();

    #[cfg(feature = "reserve")]
    {
        use staybook_common::is_reserve_enabled;

        if is_reserve_enabled(config) {
            router = router.merge(staybook_reserve::routes());
        } else {
            info!("Reservation intake disabled by configuration");
        }
    }

    #[cfg(feature = "gcal")]
    {
        if let Some(gcal_state) = &state.gcal_state {
            router = router.merge(staybook_gcal::routes::router(gcal_state.clone()));
        }
    }
    #[cfg(not(feature = "gcal"))]
    {
        use tracing::warn;

        if config.use_gcal {
            warn!("use_gcal is set but this build has no gcal feature");
        }
    }

    #[cfg(feature = "openapi")]
    {
        info!("Adding Swagger UI at /api/docs");
        router = router.merge(openapi::swagger_ui());
    }

    router
        .merge(static_site::router(static_site(config)))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

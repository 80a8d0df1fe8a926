// --- File: crates/staybook_gcal/src/routes.rs ---

use crate::auth::create_calendar_hub;
use crate::handlers::{add_booking_handler, booked_dates_handler, calendar_add_handler, GcalState};
use crate::logic::{GcalError, GcalSettings, OccupancyCache};
use crate::service::GoogleCalendarService;
use axum::{
    routing::{get, post},
    Router,
};
use staybook_config::{AppConfig, ServiceAccountSource};
use std::sync::Arc;
use tracing::info;

/// Builds the Google Calendar state from configuration: resolves the service account,
/// authenticates, and sets up the occupancy cache when enabled.
pub async fn build_state(config: &AppConfig) -> Result<GcalState, GcalError> {
    let gcal_config = config
        .gcal
        .as_ref()
        .ok_or_else(|| GcalError::Config("GCal config missing".to_string()))?;
    let settings = GcalSettings::from_config(gcal_config)?;

    let source =
        ServiceAccountSource::resolve(gcal_config).map_err(|e| GcalError::Config(e.to_string()))?;
    info!("Authenticating Google Calendar client via {:?}", source);
    let calendar_hub = create_calendar_hub(&source)
        .await
        .map_err(|e| GcalError::Config(format!("Failed to create calendar client: {}", e)))?;

    let cache = gcal_config
        .cache_occupancy
        .then(|| Arc::new(OccupancyCache::new()));

    Ok(GcalState {
        settings,
        calendar: Arc::new(GoogleCalendarService::new(Arc::new(calendar_hub))),
        cache,
    })
}

/// Routes over an already built state. Paths are absolute; merge, don't nest.
pub fn router(gcal_state: Arc<GcalState>) -> Router {
    Router::new()
        .route("/bookedDates", get(booked_dates_handler))
        .route("/addBooking", post(add_booking_handler))
        .route("/api/calendar/add", post(calendar_add_handler))
        .with_state(gcal_state)
}

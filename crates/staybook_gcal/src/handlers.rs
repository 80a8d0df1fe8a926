// File: crates/staybook_gcal/src/handlers.rs
use crate::logic::{
    aggregate_occupancy, default_window, window_from_query, BookedDatesQuery, BookingRequest,
    BookingResponse, CalendarAddRequest, CalendarAddResponse, GcalError, GcalSettings,
    OccupancyCache, OccupancyMap,
};
use crate::service::GcalServiceError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use staybook_common::services::{AllDayEvent, CalendarService};
use staybook_common::{validation_error, StaybookError};
use std::sync::Arc;
use tracing::{error, info};

pub type SharedCalendar = Arc<dyn CalendarService<Error = GcalServiceError>>;

// Shared state needed by GCal handlers
#[derive(Clone)]
pub struct GcalState {
    pub settings: GcalSettings,
    pub calendar: SharedCalendar, // Share the authenticated Calendar client
    /// Present when `gcal.cache_occupancy` is on.
    pub cache: Option<Arc<OccupancyCache>>,
}

impl GcalState {
    /// Inserts `event` into the configured calendar and drops any cached occupancy.
    async fn insert(&self, event: AllDayEvent) -> Result<String, GcalError> {
        let result = self
            .calendar
            .insert_all_day_event(&self.settings.calendar_id, event)
            .await?;
        if let Some(cache) = &self.cache {
            cache.invalidate();
        }
        result.event_id.ok_or(GcalError::MissingEventId)
    }
}

/// Handler returning the per-day event count for the booking window.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookedDates",
    params(BookedDatesQuery),
    responses(
        (status = 200, description = "Number of events starting on each date", body = std::collections::BTreeMap<String, u32>),
        (status = 400, description = "Invalid from/to date"),
        (status = 500, description = "Calendar error")
    ),
    tag = "GCal"
))]
pub async fn booked_dates_handler(
    State(state): State<Arc<GcalState>>,
    query: Result<Query<BookedDatesQuery>, QueryRejection>,
) -> Result<Json<OccupancyMap>, StaybookError> {
    let Query(query) = query.map_err(|rejection| validation_error(rejection.body_text()))?;
    let settings = &state.settings;
    let now = Utc::now();

    // Only the default window is cached; explicit ranges always go to the calendar
    let cache = if query.is_explicit() {
        None
    } else {
        state.cache.as_ref()
    };
    if let Some(map) = cache.and_then(|cache| cache.get()) {
        return Ok(Json(map));
    }

    let generation = cache.map(|cache| cache.generation());
    let window = if query.is_explicit() {
        window_from_query(&query, &settings.time_zone, now, settings.window_months)?
    } else {
        default_window(now, settings.window_months)
    };

    let events = state
        .calendar
        .list_events(&settings.calendar_id, window)
        .await
        .map_err(|e| {
            error!("Error fetching booked dates: {}", e);
            GcalError::from(e)
        })?;

    let map = aggregate_occupancy(&events, &settings.time_zone);
    if let (Some(cache), Some(generation)) = (cache, generation) {
        cache.replace(map.clone(), generation);
    }
    Ok(Json(map))
}

/// Handler for the booking form: one all-day event from check-in to check-out.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/addBooking",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking stored", body = BookingResponse),
        (status = 400, description = "Missing or invalid dates", body = BookingResponse),
        (status = 500, description = "Calendar error", body = BookingResponse)
    ),
    tag = "GCal"
))]
pub async fn add_booking_handler(
    State(state): State<Arc<GcalState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> (StatusCode, Json<BookingResponse>) {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            info!("Rejected booking body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(BookingResponse::error(rejection.body_text())),
            );
        }
    };

    let event = match request.into_all_day_event(&state.settings.time_zone) {
        Ok(event) => event,
        Err(e) => {
            info!("Invalid booking: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(BookingResponse::error(e.to_string())),
            );
        }
    };

    let summary = event.summary.clone();
    match state.insert(event).await {
        Ok(event_id) => {
            info!("Booking stored as event {}: {}", event_id, summary);
            (StatusCode::OK, Json(BookingResponse::ok(Some(event_id))))
        }
        Err(e) => {
            error!("Error storing booking: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(BookingResponse::error(e.to_string())),
            )
        }
    }
}

/// Handler inserting an arbitrary all-day event.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/calendar/add",
    request_body = CalendarAddRequest,
    responses(
        (status = 200, description = "Event created", body = CalendarAddResponse),
        (status = 400, description = "title, start or end missing or invalid"),
        (status = 500, description = "Calendar error")
    ),
    tag = "GCal"
))]
pub async fn calendar_add_handler(
    State(state): State<Arc<GcalState>>,
    payload: Result<Json<CalendarAddRequest>, JsonRejection>,
) -> Result<Json<CalendarAddResponse>, StaybookError> {
    let Json(request) =
        payload.map_err(|rejection| validation_error(rejection.body_text()))?;

    let event = request.into_all_day_event(&state.settings.time_zone)?;

    let event_id = state.insert(event).await.map_err(|e| {
        error!("Error creating calendar event: {}", e);
        e
    })?;
    info!("Created all-day event {}", event_id);

    Ok(Json(CalendarAddResponse { ok: true, event_id }))
}

// --- File: crates/staybook_gcal/src/logic.rs ---
use chrono::{DateTime, Months, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use staybook_common::services::{AllDayEvent, CalendarEvent, EventWindow};
use staybook_common::{external_service_error, StaybookError};
use staybook_config::GcalConfig;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::RwLock;
use tracing::{debug, warn};

use crate::service::GcalServiceError;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Calendar used when `gcal.calendar_id` is not configured.
pub const DEFAULT_CALENDAR_ID: &str =
    "c_2f7d1c0e9a6b4e1f8d3a5b7c9e0f1a2b@group.calendar.google.com";

/// Default reach of the booked-dates window.
pub const DEFAULT_WINDOW_MONTHS: u32 = 12;

/// Longest accepted `gcal.window_months` (ten years).
pub const MAX_WINDOW_MONTHS: u32 = 120;

/// Zone used when `gcal.time_zone` is not configured.
pub const DEFAULT_TIME_ZONE: Tz = Tz::Europe__Zurich;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum GcalError {
    #[error("{0}")]
    Validation(String),
    #[error("GCal configuration error: {0}")]
    Config(String),
    #[error("Calendar service error: {0}")]
    ServiceError(#[from] GcalServiceError),
    #[error("Calendar did not return an event id")]
    MissingEventId,
}

impl From<GcalError> for StaybookError {
    fn from(err: GcalError) -> Self {
        match err {
            GcalError::Validation(msg) => StaybookError::ValidationError(msg),
            GcalError::Config(msg) => StaybookError::ConfigError(msg),
            other => external_service_error("Google Calendar", other),
        }
    }
}

// --- Settings ---

/// Resolved calendar settings shared by the handlers.
#[derive(Debug, Clone)]
pub struct GcalSettings {
    pub calendar_id: String,
    pub time_zone: Tz,
    pub window_months: u32,
}

impl GcalSettings {
    pub fn from_config(config: &GcalConfig) -> Result<Self, GcalError> {
        let time_zone = match config.time_zone.as_deref() {
            Some(name) => Tz::from_str(name)
                .map_err(|_| GcalError::Config(format!("Unknown time zone: {}", name)))?,
            None => DEFAULT_TIME_ZONE,
        };
        let calendar_id = config
            .calendar_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CALENDAR_ID.to_string());

        let window_months = config.window_months.unwrap_or(DEFAULT_WINDOW_MONTHS);
        if !(1..=MAX_WINDOW_MONTHS).contains(&window_months) {
            return Err(GcalError::Config(format!(
                "window_months must be between 1 and {}, got {}",
                MAX_WINDOW_MONTHS, window_months
            )));
        }

        Ok(Self {
            calendar_id,
            time_zone,
            window_months,
        })
    }
}

// --- Data Structures ---

/// Accepts a string, number or bool and keeps its text; `null` and missing become `None`.
pub fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Body of `POST /api/calendar/add`.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CalendarAddRequest {
    #[serde(default, deserialize_with = "loose_string")]
    #[cfg_attr(feature = "openapi", schema(example = "Family Muster"))]
    pub title: Option<String>,
    /// First day, YYYY-MM-DD
    #[serde(default, deserialize_with = "loose_string")]
    #[cfg_attr(feature = "openapi", schema(example = "2025-07-01"))]
    pub start: Option<String>,
    /// End day, YYYY-MM-DD, passed to the calendar unchanged
    #[serde(default, deserialize_with = "loose_string")]
    #[cfg_attr(feature = "openapi", schema(example = "2025-07-04"))]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    #[cfg_attr(feature = "openapi", schema(example = "Europe/Zurich"))]
    pub timezone: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CalendarAddResponse {
    pub ok: bool,
    #[serde(rename = "eventId")]
    pub event_id: String,
}

/// Body of `POST /addBooking`. Values are taken as sent; nothing checks date order
/// or the number of adults.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingRequest {
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    #[cfg_attr(feature = "openapi", schema(example = "2"))]
    pub adults: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    #[cfg_attr(feature = "openapi", schema(example = "2025-07-01"))]
    pub checkin: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    #[cfg_attr(feature = "openapi", schema(example = "2025-07-04"))]
    pub checkout: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<bool>))]
    pub dinner: Option<Value>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingResponse {
    pub status: String,
    #[serde(rename = "eventId", skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookingResponse {
    pub fn ok(event_id: Option<String>) -> Self {
        Self {
            status: "ok".to_string(),
            event_id,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            event_id: None,
            error: Some(message.into()),
        }
    }
}

/// Optional explicit window for `GET /bookedDates`.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct BookedDatesQuery {
    /// First day, YYYY-MM-DD (default: now)
    pub from: Option<String>,
    /// Last day, inclusive, YYYY-MM-DD (default: `window_months` after `from`)
    pub to: Option<String>,
}

impl BookedDatesQuery {
    pub fn is_explicit(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}

/// Date -> number of events starting that day. Ordered, so the JSON is stable.
pub type OccupancyMap = BTreeMap<String, u32>;

// --- Validation ---

fn required(field: &str, value: Option<String>) -> Result<String, GcalError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| GcalError::Validation(format!("{} is required", field)))
}

/// Parses a YYYY-MM-DD date. A date-time (`2025-07-01T15:00` or
/// `2025-07-01 15:00`) is accepted and its date used, since all-day events carry
/// no time of day. Any other trailing text is rejected.
pub fn parse_all_day_date(field: &str, raw: &str) -> Result<NaiveDate, GcalError> {
    let raw = raw.trim();
    let candidate = match (raw.get(..10), raw.get(10..)) {
        (Some(date), Some(time)) if time.starts_with(['T', ' ']) => date,
        _ => raw,
    };
    NaiveDate::parse_from_str(candidate, "%Y-%m-%d").map_err(|_| {
        GcalError::Validation(format!("{} must be a date in YYYY-MM-DD format", field))
    })
}

impl CalendarAddRequest {
    /// Checks title/start/end are present and builds the event to insert.
    pub fn into_all_day_event(self, default_time_zone: &Tz) -> Result<AllDayEvent, GcalError> {
        let title = required("title", self.title)?;
        let start = required("start", self.start)?;
        let end = required("end", self.end)?;

        Ok(AllDayEvent {
            summary: title,
            start: parse_all_day_date("start", &start)?,
            end: parse_all_day_date("end", &end)?,
            description: self.description.filter(|d| !d.trim().is_empty()),
            time_zone: Some(
                self.timezone
                    .filter(|tz| !tz.trim().is_empty())
                    .unwrap_or_else(|| default_time_zone.name().to_string()),
            ),
        })
    }
}

fn dinner_label(dinner: Option<&Value>) -> String {
    match dinner {
        Some(Value::Bool(true)) => "yes".to_string(),
        Some(Value::Bool(false)) | Some(Value::Null) | None => "no".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl BookingRequest {
    /// Builds the all-day event for a stay: check-in day to check-out day.
    ///
    /// Only the two dates are required. The calendar treats the end date as
    /// exclusive, so the check-out day itself stays free.
    pub fn into_all_day_event(self, time_zone: &Tz) -> Result<AllDayEvent, GcalError> {
        let checkin = required("checkin", self.checkin)?;
        let checkout = required("checkout", self.checkout)?;
        let start = parse_all_day_date("checkin", &checkin)?;
        let end = parse_all_day_date("checkout", &checkout)?;

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Guest".to_string());
        let adults = self.adults.unwrap_or_else(|| "?".to_string());
        let email = self.email.unwrap_or_else(|| "?".to_string());

        let description = format!(
            "Name: {}\nEmail: {}\nAdults: {}\nDinner: {}\nCheck-in: {}\nCheck-out: {}",
            name,
            email,
            adults,
            dinner_label(self.dinner.as_ref()),
            start,
            end
        );

        Ok(AllDayEvent {
            summary: format!("Booking: {} ({} adults)", name, adults),
            start,
            end,
            description: Some(description),
            time_zone: Some(time_zone.name().to_string()),
        })
    }
}

// --- Windows ---

/// `now` through `months` months ahead, capped at [`MAX_WINDOW_MONTHS`] and at
/// the largest representable time.
pub fn default_window(now: DateTime<Utc>, months: u32) -> EventWindow {
    let time_max = now
        .checked_add_months(Months::new(months.min(MAX_WINDOW_MONTHS)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    EventWindow {
        time_min: now,
        time_max,
    }
}

fn local_midnight(date: NaiveDate, tz: &Tz) -> Result<DateTime<Utc>, GcalError> {
    let naive = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| GcalError::Validation(format!("Invalid date: {}", date)))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| GcalError::Validation(format!("No local midnight on {}", date)))
}

/// Window for an explicit `from`/`to` query; `to` is inclusive.
pub fn window_from_query(
    query: &BookedDatesQuery,
    tz: &Tz,
    now: DateTime<Utc>,
    months: u32,
) -> Result<EventWindow, GcalError> {
    let time_min = match query.from.as_deref() {
        Some(from) => local_midnight(parse_all_day_date("from", from)?, tz)?,
        None => now,
    };
    let time_max = match query.to.as_deref() {
        Some(to) => {
            let last_day = parse_all_day_date("to", to)?;
            let day_after = last_day
                .succ_opt()
                .ok_or_else(|| GcalError::Validation("to is out of range".to_string()))?;
            local_midnight(day_after, tz)?
        }
        None => default_window(time_min, months).time_max,
    };

    if time_max <= time_min {
        return Err(GcalError::Validation(
            "to must not be before from".to_string(),
        ));
    }
    Ok(EventWindow { time_min, time_max })
}

// --- Aggregation ---

/// The day an event counts against: its all-day start date, else the local date
/// of its timed start in `tz`.
pub fn event_start_date(event: &CalendarEvent, tz: &Tz) -> Option<NaiveDate> {
    event
        .start
        .date
        .or_else(|| event.start.date_time.map(|dt| dt.with_timezone(tz).date_naive()))
}

/// Counts events per start date.
///
/// An event counts once, on the day it starts; the nights up to its end are not
/// expanded. Events without any start are skipped.
pub fn aggregate_occupancy(events: &[CalendarEvent], tz: &Tz) -> OccupancyMap {
    events.iter().fold(OccupancyMap::new(), |mut map, event| {
        match event_start_date(event, tz) {
            Some(date) => *map.entry(date.format("%Y-%m-%d").to_string()).or_insert(0) += 1,
            None => warn!("Skipping event without start: {:?}", event.id),
        }
        map
    })
}

// --- Cache ---

#[derive(Debug, Default)]
struct CacheState {
    map: Option<OccupancyMap>,
    /// Bumped by every `invalidate`.
    generation: u64,
}

/// In-process copy of the last occupancy map for the default window.
///
/// A refresh reads [`generation`](Self::generation) before listing events and
/// hands it back to [`replace`](Self::replace). If an insert invalidated the
/// cache in the meantime, the refreshed map predates that insert and is
/// dropped instead of stored. Otherwise the last refresh wins.
#[derive(Debug, Default)]
pub struct OccupancyCache {
    inner: RwLock<CacheState>,
}

impl OccupancyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<OccupancyMap> {
        let guard = self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.map.clone()
    }

    pub fn generation(&self) -> u64 {
        let guard = self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.generation
    }

    /// Stores `map` unless the cache was invalidated after `seen_generation`
    /// was read. Returns whether it was stored.
    pub fn replace(&self, map: OccupancyMap, seen_generation: u64) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.generation != seen_generation {
            debug!("Discarding occupancy refresh started before an insert");
            return false;
        }
        debug!("Occupancy cache refreshed with {} dates", map.len());
        guard.map = Some(map);
        true
    }

    pub fn invalidate(&self) {
        let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.generation += 1;
        if guard.map.take().is_some() {
            debug!("Occupancy cache invalidated");
        }
    }
}

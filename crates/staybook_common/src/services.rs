// --- File: crates/staybook_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers talk to the calendar through [`CalendarService`] so that the Google
//! implementation can be swapped for an in-memory one in tests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Calendar operations the booking endpoints rely on.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// List events overlapping `window`, recurring events expanded into instances,
    /// ordered by start time.
    fn list_events(
        &self,
        calendar_id: &str,
        window: EventWindow,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error>;

    /// Insert an all-day event and return the created event's identifier.
    fn insert_all_day_event(
        &self,
        calendar_id: &str,
        event: AllDayEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;
}

/// Half-open time range `[time_min, time_max)` for an event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
}

/// Start or end of a calendar event.
///
/// All-day events carry `date`, timed events carry `date_time`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBoundary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
}

impl EventBoundary {
    pub fn all_day(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            date_time: None,
        }
    }

    pub fn timed(date_time: DateTime<Utc>) -> Self {
        Self {
            date: None,
            date_time: Some(date_time),
        }
    }
}

/// A calendar event as read back from the calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start: EventBoundary,
    #[serde(default)]
    pub end: EventBoundary,
}

/// An all-day event to insert. `end` is passed through unchanged, so callers
/// decide whether it is inclusive or exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllDayEvent {
    pub summary: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub description: Option<String>,
    pub time_zone: Option<String>,
}

/// Represents the result of a calendar event operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventResult {
    /// The ID of the event.
    pub event_id: Option<String>,
    /// The status of the event.
    pub status: String,
}

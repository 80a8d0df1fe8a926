// --- File: crates/staybook_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for Google Calendar.

use std::sync::Arc;

use google_calendar3::api::{Event, EventDateTime};
use staybook_common::services::{
    AllDayEvent, BoxFuture, CalendarEvent, CalendarEventResult, CalendarService, EventBoundary,
    EventWindow,
};
use thiserror::Error;
use tracing::debug;

use crate::auth::HubType;

/// Page size requested from the events list endpoint (the API maximum).
const MAX_RESULTS_PER_PAGE: i32 = 2500;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Calendar unavailable: {0}")]
    Unavailable(String),
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

fn to_boundary(value: Option<EventDateTime>) -> EventBoundary {
    match value {
        Some(edt) => EventBoundary {
            date: edt.date,
            date_time: edt.date_time,
        },
        None => EventBoundary::default(),
    }
}

fn to_calendar_event(event: Event) -> CalendarEvent {
    CalendarEvent {
        id: event.id,
        summary: event.summary,
        description: event.description,
        start: to_boundary(event.start),
        end: to_boundary(event.end),
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Lists events in `window`, following every result page.
    ///
    /// Recurring events are expanded (`singleEvents=true`), which is also what allows
    /// ordering by start time.
    fn list_events(
        &self,
        calendar_id: &str,
        window: EventWindow,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let mut events = Vec::new();
            let mut page_token: Option<String> = None;

            loop {
                let mut request = calendar_hub
                    .events()
                    .list(&calendar_id)
                    .time_min(window.time_min)
                    .time_max(window.time_max)
                    .single_events(true) // Expand recurring events
                    .order_by("startTime")
                    .max_results(MAX_RESULTS_PER_PAGE);
                if let Some(token) = page_token.as_deref() {
                    request = request.page_token(token);
                }

                let (_response, page) = request.doit().await?;
                events.extend(page.items.unwrap_or_default().into_iter().map(to_calendar_event));

                match page.next_page_token {
                    Some(token) if !token.is_empty() => page_token = Some(token),
                    _ => break,
                }
            }

            debug!(
                "Listed {} events on {} between {} and {}",
                events.len(),
                calendar_id,
                window.time_min,
                window.time_max
            );
            Ok(events)
        })
    }

    /// Inserts an all-day event: both boundaries are dates, never date-times.
    ///
    /// No conflict check is made against existing events.
    fn insert_all_day_event(
        &self,
        calendar_id: &str,
        event: AllDayEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let new_event = Event {
                summary: Some(event.summary),
                description: event.description,
                start: Some(EventDateTime {
                    date: Some(event.start),
                    time_zone: event.time_zone.clone(),
                    ..Default::default()
                }),
                end: Some(EventDateTime {
                    date: Some(event.end),
                    time_zone: event.time_zone,
                    ..Default::default()
                }),
                ..Default::default()
            };

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .doit()
                .await?;

            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }
}

/// Mock implementation of CalendarService for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory calendar. Inserted all-day events show up in later listings.
    #[derive(Default)]
    pub struct MockCalendarService {
        events: Mutex<Vec<CalendarEvent>>,
        inserted: Mutex<Vec<(String, AllDayEvent)>>,
        list_calls: AtomicUsize,
        failure: Option<String>,
    }

    impl MockCalendarService {
        /// Create a new mock calendar service.
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_events(events: Vec<CalendarEvent>) -> Self {
            Self {
                events: Mutex::new(events),
                ..Self::default()
            }
        }

        /// Every call fails with [`GcalServiceError::Unavailable`].
        pub fn failing(message: &str) -> Self {
            Self {
                failure: Some(message.to_string()),
                ..Self::default()
            }
        }

        pub fn inserted(&self) -> Vec<(String, AllDayEvent)> {
            self.inserted.lock().unwrap().clone()
        }

        pub fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    impl CalendarService for MockCalendarService {
        type Error = GcalServiceError;

        fn list_events(
            &self,
            _calendar_id: &str,
            window: EventWindow,
        ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
            Box::pin(async move {
                self.list_calls.fetch_add(1, Ordering::SeqCst);
                if let Some(message) = &self.failure {
                    return Err(GcalServiceError::Unavailable(message.clone()));
                }

                let events = self.events.lock().unwrap();
                let mut listed: Vec<CalendarEvent> = events
                    .iter()
                    .filter(|event| match event.start.date_time {
                        Some(dt) => dt >= window.time_min && dt < window.time_max,
                        // all-day events are kept regardless of the window
                        None => true,
                    })
                    .cloned()
                    .collect();
                listed.sort_by_key(|event| (event.start.date, event.start.date_time));
                Ok(listed)
            })
        }

        fn insert_all_day_event(
            &self,
            calendar_id: &str,
            event: AllDayEvent,
        ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
            let calendar_id = calendar_id.to_string();

            Box::pin(async move {
                if let Some(message) = &self.failure {
                    return Err(GcalServiceError::Unavailable(message.clone()));
                }

                let event_id = format!("mock-event-{}", uuid::Uuid::new_v4());
                self.events.lock().unwrap().push(CalendarEvent {
                    id: Some(event_id.clone()),
                    summary: Some(event.summary.clone()),
                    description: event.description.clone(),
                    start: EventBoundary::all_day(event.start),
                    end: EventBoundary::all_day(event.end),
                });
                self.inserted.lock().unwrap().push((calendar_id, event));

                Ok(CalendarEventResult {
                    event_id: Some(event_id),
                    status: "confirmed".to_string(),
                })
            })
        }
    }
}

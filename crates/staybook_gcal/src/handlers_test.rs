#[cfg(test)]
mod tests {
    use crate::handlers::{GcalState, SharedCalendar};
    use crate::logic::{GcalSettings, OccupancyCache};
    use crate::routes::router;
    use crate::service::mock::MockCalendarService;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use chrono::NaiveDate;
    use chrono_tz::Tz;
    use serde_json::{json, Value};
    use staybook_common::services::{CalendarEvent, EventBoundary};
    use std::sync::Arc;
    use tower::ServiceExt;

    const CALENDAR_ID: &str = "test-calendar@group.calendar.google.com";

    fn state(mock: &Arc<MockCalendarService>, cached: bool) -> Arc<GcalState> {
        let calendar: SharedCalendar = mock.clone();
        Arc::new(GcalState {
            settings: GcalSettings {
                calendar_id: CALENDAR_ID.to_string(),
                time_zone: Tz::Europe__Zurich,
                window_months: 12,
            },
            calendar,
            cache: cached.then(|| Arc::new(OccupancyCache::new())),
        })
    }

    fn all_day(y: i32, m: u32, d: u32) -> CalendarEvent {
        CalendarEvent {
            start: EventBoundary::all_day(NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            ..Default::default()
        }
    }

    async fn post_json(state: &Arc<GcalState>, uri: &str, body: &str) -> Response {
        router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get(state: &Arc<GcalState>, uri: &str) -> Response {
        router(state.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).expect("body should be JSON")
    }

    // --- /api/calendar/add ---

    #[tokio::test]
    async fn calendar_add_returns_event_id() {
        let mock = Arc::new(MockCalendarService::new());
        let state = state(&mock, false);

        let response = post_json(
            &state,
            "/api/calendar/add",
            r#"{"title":"Family Muster","start":"2025-07-01","end":"2025-07-04","description":"Room 2"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["ok"], true);
        assert!(body["eventId"].as_str().unwrap().starts_with("mock-event-"));

        let inserted = mock.inserted();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].0, CALENDAR_ID);
        assert_eq!(inserted[0].1.summary, "Family Muster");
        assert_eq!(inserted[0].1.time_zone.as_deref(), Some("Europe/Zurich"));
    }

    #[tokio::test]
    async fn calendar_add_missing_fields_is_400_without_insert() {
        let mock = Arc::new(MockCalendarService::new());
        let state = state(&mock, false);

        let bodies = [
            r#"{"start":"2025-07-01","end":"2025-07-04"}"#,
            r#"{"title":"x","end":"2025-07-04"}"#,
            r#"{"title":"x","start":"2025-07-01"}"#,
            r#"{"title":"","start":"2025-07-01","end":"2025-07-04"}"#,
            r#"{}"#,
        ];
        for body in bodies {
            let response = post_json(&state, "/api/calendar/add", body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
            let value = json_body(response).await;
            assert!(value["error"].as_str().is_some(), "body: {}", body);
        }

        assert!(mock.inserted().is_empty(), "no insert may reach the calendar");
    }

    #[tokio::test]
    async fn calendar_add_malformed_json_is_400() {
        let mock = Arc::new(MockCalendarService::new());
        let state = state(&mock, false);

        let response = post_json(&state, "/api/calendar/add", "{not json").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
        assert!(mock.inserted().is_empty());
    }

    #[tokio::test]
    async fn calendar_add_upstream_failure_is_500() {
        let mock = Arc::new(MockCalendarService::failing("quota exceeded"));
        let state = state(&mock, false);

        let response = post_json(
            &state,
            "/api/calendar/add",
            r#"{"title":"x","start":"2025-07-01","end":"2025-07-02"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
    }

    // --- /bookedDates ---

    #[tokio::test]
    async fn booked_dates_counts_per_start_date() {
        let mock = Arc::new(MockCalendarService::with_events(vec![
            all_day(2024, 7, 1),
            all_day(2024, 7, 1),
            all_day(2024, 7, 3),
        ]));
        let state = state(&mock, false);

        let response = get(&state, "/bookedDates").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({ "2024-07-01": 2, "2024-07-03": 1 })
        );
    }

    #[tokio::test]
    async fn booked_dates_empty_calendar_is_empty_object() {
        let mock = Arc::new(MockCalendarService::new());
        let state = state(&mock, false);

        let response = get(&state, "/bookedDates").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({}));
    }

    #[tokio::test]
    async fn booked_dates_upstream_failure_is_500_error() {
        let mock = Arc::new(MockCalendarService::failing("backend error"));
        let state = state(&mock, false);

        let response = get(&state, "/bookedDates").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn booked_dates_rejects_bad_query_dates() {
        let mock = Arc::new(MockCalendarService::new());
        let state = state(&mock, false);

        let response = get(&state, "/bookedDates?from=yesterday").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.list_calls(), 0);
    }

    #[tokio::test]
    async fn booked_dates_malformed_query_is_json_400() {
        let mock = Arc::new(MockCalendarService::new());
        let state = state(&mock, false);

        let response = get(&state, "/bookedDates?from=2024-07-01&from=2024-07-02").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
        assert_eq!(mock.list_calls(), 0);
    }

    #[tokio::test]
    async fn cached_occupancy_is_reused_until_an_insert() {
        let mock = Arc::new(MockCalendarService::with_events(vec![all_day(2024, 7, 1)]));
        let state = state(&mock, true);

        assert_eq!(get(&state, "/bookedDates").await.status(), StatusCode::OK);
        assert_eq!(get(&state, "/bookedDates").await.status(), StatusCode::OK);
        assert_eq!(mock.list_calls(), 1, "second read should come from the cache");

        let response = post_json(
            &state,
            "/addBooking",
            r#"{"name":"Anna","email":"anna@example.com","adults":2,"checkin":"2024-07-01","checkout":"2024-07-03","dinner":false}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(&state, "/bookedDates").await;
        assert_eq!(mock.list_calls(), 2, "insert should invalidate the cache");
        assert_eq!(json_body(response).await, json!({ "2024-07-01": 2 }));
    }

    #[tokio::test]
    async fn explicit_window_bypasses_cache() {
        let mock = Arc::new(MockCalendarService::with_events(vec![all_day(2024, 7, 1)]));
        let state = state(&mock, true);

        get(&state, "/bookedDates").await;
        get(&state, "/bookedDates?from=2024-07-01&to=2024-07-31").await;
        get(&state, "/bookedDates?from=2024-07-01&to=2024-07-31").await;

        assert_eq!(mock.list_calls(), 3);
    }

    // --- /addBooking ---

    #[tokio::test]
    async fn add_booking_returns_status_ok() {
        let mock = Arc::new(MockCalendarService::new());
        let state = state(&mock, false);

        let response = post_json(
            &state,
            "/addBooking",
            r#"{"name":"Anna Muster","email":"anna@example.com","adults":"2","checkin":"2025-08-01","checkout":"2025-08-03","dinner":true}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["eventId"].is_string());
        assert!(body.get("error").is_none());

        let inserted = mock.inserted();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].1.summary, "Booking: Anna Muster (2 adults)");
    }

    #[tokio::test]
    async fn add_booking_without_dates_is_status_error() {
        let mock = Arc::new(MockCalendarService::new());
        let state = state(&mock, false);

        let response = post_json(&state, "/addBooking", r#"{"name":"Anna","checkin":"2025-08-01"}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["error"].as_str().unwrap().contains("checkout"));
        assert!(mock.inserted().is_empty());
    }

    #[tokio::test]
    async fn add_booking_upstream_failure_is_status_error() {
        let mock = Arc::new(MockCalendarService::failing("insufficient permissions"));
        let state = state(&mock, false);

        let response = post_json(
            &state,
            "/addBooking",
            r#"{"checkin":"2025-08-01","checkout":"2025-08-02"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert!(body["error"].as_str().unwrap().contains("insufficient permissions"));
    }
}

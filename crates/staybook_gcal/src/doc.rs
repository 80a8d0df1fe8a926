// File: crates/staybook_gcal/src/doc.rs

use utoipa::OpenApi;

use crate::logic::{
    BookedDatesQuery, BookingRequest, BookingResponse, CalendarAddRequest, CalendarAddResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::booked_dates_handler,
        crate::handlers::add_booking_handler,
        crate::handlers::calendar_add_handler
    ),
    components(
        schemas(
            BookedDatesQuery,
            BookingRequest,
            BookingResponse,
            CalendarAddRequest,
            CalendarAddResponse
        )
    ),
    tags(
        (name = "GCal", description = "Booked dates and all-day bookings on Google Calendar")
    )
)]
pub struct GcalApiDoc;

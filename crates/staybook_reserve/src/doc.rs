// File: crates/staybook_reserve/src/doc.rs
use utoipa::OpenApi;

use crate::logic::ReserveResponse;

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::reserve_handler),
    components(schemas(ReserveResponse)),
    tags(
        (name = "Reservations", description = "Booking form submissions, logged server-side")
    )
)]
pub struct ReserveApiDoc;

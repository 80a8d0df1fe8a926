// File: services/staybook_backend/src/openapi.rs
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Staybook API",
        version = "0.1.0",
        description = "Booking page backend: reservation intake and Google Calendar gateway",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    components(),
    tags((name = "Staybook", description = "Core service endpoints")),
)]
struct ApiDoc;

/// The merged document of every compiled-in feature.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut doc = ApiDoc::openapi();
    #[cfg(feature = "gcal")]
    doc.merge(staybook_gcal::doc::GcalApiDoc::openapi());
    #[cfg(feature = "reserve")]
    doc.merge(staybook_reserve::doc::ReserveApiDoc::openapi());
    doc
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api_doc())
}

// --- File: crates/staybook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Runtime feature flag checks
pub mod handlers; // Health handlers
pub mod http; // HTTP response utilities
pub mod logging; // Logging utilities
pub mod routes; // Health routes
pub mod services; // Service abstractions

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{external_service_error, validation_error, HttpStatusCode, StaybookError};

// Re-export HTTP utilities for easier access
pub use http::IntoHttpResponse;

// Re-export logging utilities for easier access
pub use logging::{init, init_from_config, log_result, LogGuard};

pub use features::{is_gcal_enabled, is_reserve_enabled};

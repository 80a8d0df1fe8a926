// --- File: crates/staybook_reserve/src/lib.rs ---
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use logic::{process_reservation, IntakeOutcome};
pub use routes::routes;

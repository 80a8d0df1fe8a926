// --- File: crates/staybook_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;
pub mod service;

pub use handlers::GcalState;
pub use routes::{build_state, router};

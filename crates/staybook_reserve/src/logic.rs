// File: crates/staybook_reserve/src/logic.rs
//! Reservation intake: pull a few fields out of whatever the booking form sent.
//!
//! Nothing here can fail the request. A body that cannot be read becomes
//! [`IntakeOutcome::LoggedFailure`], and the handler still answers `{ok:true}`.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Shown for a date or email the submission did not carry.
pub const PLACEHOLDER: &str = "?";

/// Largest body read into memory; anything longer is logged as unreadable.
pub const MAX_RESERVATION_BYTES: usize = 1024 * 1024;

#[derive(Error, Debug)]
pub enum ReserveError {
    #[error("Reservation body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Reservation body is JSON but not an object")]
    NotAnObject,
    #[error("Reservation body could not be read: {0}")]
    Unreadable(#[from] axum::Error),
}

/// The fields worth a log line, extracted defensively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationSummary {
    pub reference: Uuid,
    /// `first_name last_name`, trimmed; empty when neither was sent.
    pub name: String,
    pub check_in: String,
    pub check_out: String,
    pub email: String,
}

impl ReservationSummary {
    /// `check_in -> check_out`, with `?` for a missing side.
    pub fn dates(&self) -> String {
        format!("{} -> {}", self.check_in, self.check_out)
    }
}

#[derive(Debug)]
pub enum IntakeOutcome {
    Recorded(ReservationSummary),
    LoggedFailure(ReserveError),
}

/// Always `ok: true`. `note` is only set when the submission could not be read.
#[derive(Serialize, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReserveResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&IntakeOutcome> for ReserveResponse {
    fn from(outcome: &IntakeOutcome) -> Self {
        match outcome {
            IntakeOutcome::Recorded(_) => ReserveResponse { ok: true, note: None },
            IntakeOutcome::LoggedFailure(_) => ReserveResponse {
                ok: true,
                note: Some("logged server-side".to_string()),
            },
        }
    }
}

// Strings as-is, numbers and bools as their JSON text, null as missing.
fn field_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Reads the submission. An empty body counts as a submission with no fields.
pub fn process_reservation(body: &[u8]) -> IntakeOutcome {
    let fields = if body.iter().all(u8::is_ascii_whitespace) {
        Map::new()
    } else {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => return IntakeOutcome::LoggedFailure(ReserveError::NotAnObject),
            Err(e) => return IntakeOutcome::LoggedFailure(e.into()),
        }
    };

    let first = field_text(&fields, "first_name").unwrap_or_default();
    let last = field_text(&fields, "last_name").unwrap_or_default();
    let placeholder = || PLACEHOLDER.to_string();

    IntakeOutcome::Recorded(ReservationSummary {
        reference: Uuid::new_v4(),
        name: format!("{} {}", first, last).trim().to_string(),
        check_in: field_text(&fields, "check_in").unwrap_or_else(placeholder),
        check_out: field_text(&fields, "check_out").unwrap_or_else(placeholder),
        email: field_text(&fields, "email").unwrap_or_else(placeholder),
    })
}

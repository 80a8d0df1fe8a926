// --- File: crates/staybook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by the Staybook crates.
///
/// Feature crates convert their own errors into this one at the HTTP boundary.
#[derive(Error, Debug)]
pub enum StaybookError {
    /// The request was understood but its content is not acceptable
    #[error("{0}")]
    ValidationError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during an external service call
    #[error("{service_name} error: {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

// Request errors are 400 and upstream or config failures 500; 404 is for unknown API paths only.
impl HttpStatusCode for StaybookError {
    fn status_code(&self) -> u16 {
        match self {
            StaybookError::ValidationError(_) => 400,
            StaybookError::NotFoundError(_) => 404,
            StaybookError::ConfigError(_) => 500,
            StaybookError::ExternalServiceError { .. } => 500,
        }
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> StaybookError {
    StaybookError::ValidationError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> StaybookError {
    StaybookError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

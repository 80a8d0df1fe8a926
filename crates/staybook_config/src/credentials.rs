//! Service account credential resolution.
//!
//! Google credentials reach the process either as a JSON key file referenced from
//! [`GcalConfig::key_path`] or as a pair of environment variables. Hosting platforms
//! that only allow single-line variables store the private key with literal `\n`
//! sequences, so the key is unescaped before use.

use std::env;
use std::fmt;
use std::path::PathBuf;

use config::ConfigError;

use crate::models::GcalConfig;

/// Environment variable holding the service account's client email.
pub const CLIENT_EMAIL_ENV: &str = "GOOGLE_CLIENT_EMAIL";

/// Environment variable holding the service account's PEM private key.
pub const PRIVATE_KEY_ENV: &str = "GOOGLE_PRIVATE_KEY";

/// Where the service account credential comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum ServiceAccountSource {
    /// Client email and private key taken from the environment.
    Env {
        client_email: String,
        private_key: String,
    },
    /// A JSON key file downloaded from the Google Cloud console.
    KeyFile(PathBuf),
}

impl fmt::Debug for ServiceAccountSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceAccountSource::Env { client_email, .. } => f
                .debug_struct("Env")
                .field("client_email", client_email)
                .field("private_key", &"<redacted>")
                .finish(),
            ServiceAccountSource::KeyFile(path) => f.debug_tuple("KeyFile").field(path).finish(),
        }
    }
}

impl ServiceAccountSource {
    /// Resolves the credential source from the process environment and `gcal`.
    pub fn resolve(gcal: &GcalConfig) -> Result<Self, ConfigError> {
        Self::resolve_with(gcal, |name| env::var(name).ok())
    }

    /// Same as [`resolve`](Self::resolve) with an injectable variable lookup.
    ///
    /// The environment pair wins over `key_path`. Blank values count as missing.
    pub fn resolve_with<F>(gcal: &GcalConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        match (non_blank(CLIENT_EMAIL_ENV), non_blank(PRIVATE_KEY_ENV)) {
            (Some(client_email), Some(private_key)) => {
                return Ok(ServiceAccountSource::Env {
                    client_email: client_email.trim().to_string(),
                    private_key: unescape_private_key(&private_key),
                });
            }
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!(
                    "Only one of {} / {} is set, falling back to gcal.key_path",
                    CLIENT_EMAIL_ENV,
                    PRIVATE_KEY_ENV
                );
            }
            (None, None) => {}
        }

        match gcal.key_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => Ok(ServiceAccountSource::KeyFile(PathBuf::from(path))),
            _ => Err(ConfigError::Message(format!(
                "No Google service account configured: set {} and {}, or gcal.key_path",
                CLIENT_EMAIL_ENV, PRIVATE_KEY_ENV
            ))),
        }
    }
}

/// Turns literal `\n` sequences into real newlines.
pub fn unescape_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

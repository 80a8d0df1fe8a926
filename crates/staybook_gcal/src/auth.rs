// File: crates/staybook_gcal/src/auth.rs
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator, ServiceAccountKey},
    CalendarHub,
};
use serde_json::json;
use staybook_config::ServiceAccountSource;
use std::error::Error;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Token endpoint written into keys assembled from environment variables.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Builds the service account key for `source`, reading the key file if needed.
pub async fn load_service_account_key(
    source: &ServiceAccountSource,
) -> Result<ServiceAccountKey, Box<dyn Error + Send + Sync>> {
    match source {
        ServiceAccountSource::KeyFile(path) => Ok(read_service_account_key(path).await?),
        ServiceAccountSource::Env {
            client_email,
            private_key,
        } => Ok(service_account_key_from_parts(client_email, private_key)?),
    }
}

/// Assembles a key from a client email and an already unescaped PEM private key.
pub fn service_account_key_from_parts(
    client_email: &str,
    private_key: &str,
) -> Result<ServiceAccountKey, serde_json::Error> {
    serde_json::from_value(json!({
        "type": "service_account",
        "client_email": client_email,
        "private_key": private_key,
        "token_uri": GOOGLE_TOKEN_URI,
    }))
}

pub async fn create_calendar_hub(
    source: &ServiceAccountSource,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    let sa_key = load_service_account_key(source).await?;

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    Ok(CalendarHub::new(client, auth))
}

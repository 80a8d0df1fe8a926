// --- File: crates/services/staybook_backend/src/app_state.rs ---
use std::sync::Arc;

use staybook_config::AppConfig;
use thiserror::Error;
#[cfg(feature = "gcal")]
use staybook_gcal::{handlers::GcalState, logic::GcalError};
#[cfg(feature = "gcal")]
use tracing::{info, warn};

/// Failures that stop the server before it binds.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] staybook_config::ConfigError),
    #[cfg(feature = "gcal")]
    #[error("Google Calendar setup failed: {0}")]
    Gcal(#[from] GcalError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the router needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,

    /// Present when the calendar is enabled at compile time and in config.
    #[cfg(feature = "gcal")]
    pub gcal_state: Option<Arc<GcalState>>,
}

impl AppState {
    /// Authenticates the calendar client when it is enabled.
    ///
    /// A broken calendar setup is an error here rather than a router without
    /// calendar routes, so misconfiguration shows up at boot.
    pub async fn initialize(config: Arc<AppConfig>) -> Result<Self, StartupError> {
        #[allow(unused_mut)]
        let mut builder = AppStateBuilder::new(config.clone());

        #[cfg(feature = "gcal")]
        {
            if staybook_common::is_gcal_enabled(&config) {
                let gcal_state = staybook_gcal::routes::build_state(&config).await?;
                info!(
                    "Google Calendar enabled for calendar {}",
                    gcal_state.settings.calendar_id
                );
                builder = builder.with_gcal_state(Some(Arc::new(gcal_state)));
            } else if config.use_gcal {
                warn!("use_gcal is set but the [gcal] section is missing; calendar routes disabled");
            } else {
                info!("Google Calendar disabled by configuration");
            }
        }

        Ok(builder.build())
    }
}

/// Assembles an [`AppState`] from parts, e.g. with a stub calendar in tests.
pub struct AppStateBuilder {
    config: Arc<AppConfig>,
    #[cfg(feature = "gcal")]
    gcal_state: Option<Arc<GcalState>>,
}

impl AppStateBuilder {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            #[cfg(feature = "gcal")]
            gcal_state: None,
        }
    }

    #[cfg(feature = "gcal")]
    pub fn with_gcal_state(mut self, gcal_state: Option<Arc<GcalState>>) -> Self {
        self.gcal_state = gcal_state;
        self
    }

    pub fn build(self) -> AppState {
        AppState {
            config: self.config,
            #[cfg(feature = "gcal")]
            gcal_state: self.gcal_state,
        }
    }
}

//! Runtime feature flag checks.
//!
//! Features are switched twice: at compile time through the backend's cargo
//! features (`gcal`, `reserve`, `openapi`) and at runtime through `use_*` flags in
//! the configuration. These helpers cover the runtime half.

use staybook_config::AppConfig;

/// Google Calendar routes need both the flag and a `gcal` section.
pub fn is_gcal_enabled(config: &AppConfig) -> bool {
    config.use_gcal && config.gcal.is_some()
}

/// Reservation intake needs no configuration beyond its flag.
pub fn is_reserve_enabled(config: &AppConfig) -> bool {
    config.use_reserve
}

//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `VAULTSHARE__*` environment variables. Each
//! sub-module represents a logical configuration section, and every field
//! has a default so an empty environment still yields a usable config.

pub mod events;
pub mod logging;
pub mod mirror;
pub mod sharing;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::events::EventsConfig;
use self::logging::LoggingConfig;
use self::mirror::MirrorConfig;
use self::sharing::SharingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
    /// External mirror service settings.
    #[serde(default)]
    #[validate(nested)]
    pub mirror: MirrorConfig,
    /// Share lifecycle settings.
    #[serde(default)]
    #[validate(nested)]
    pub sharing: SharingConfig,
    /// Event dispatcher settings.
    #[serde(default)]
    #[validate(nested)]
    pub events: EventsConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml`, the `config/{env}.toml` overlay, and
    /// environment variables prefixed with `VAULTSHARE__`, then validates
    /// value ranges.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("VAULTSHARE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app.validate()
            .map_err(|e| AppError::configuration(format!("Invalid configuration: {e}")))?;

        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.sharing.mirror_transitions);
        assert_eq!(config.events.handler_timeout_seconds, 30);
        assert!(config.mirror.base_url.is_empty());
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let mut config = AppConfig::default();
        config.events.handler_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let config = AppConfig::load("no-such-environment").expect("defaults load");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.sharing.max_recipients_per_share, 50);
    }
}

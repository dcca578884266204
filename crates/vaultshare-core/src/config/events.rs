//! Event dispatcher configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Event dispatcher settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventsConfig {
    /// Upper bound for a single handler invocation, in seconds.
    #[serde(default = "default_handler_timeout")]
    #[validate(range(min = 1, max = 600))]
    pub handler_timeout_seconds: u64,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            handler_timeout_seconds: default_handler_timeout(),
        }
    }
}

fn default_handler_timeout() -> u64 {
    30
}

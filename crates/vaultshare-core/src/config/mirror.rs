//! External mirror service configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Connection settings for the remote share service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MirrorConfig {
    /// Base URL of the remote share API. Empty selects the in-process
    /// loopback mirror.
    #[serde(default)]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,
    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl MirrorConfig {
    /// Whether a remote endpoint is configured.
    pub fn is_remote(&self) -> bool {
        !self.base_url.trim().is_empty()
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("vaultshare/{}", env!("CARGO_PKG_VERSION"))
}

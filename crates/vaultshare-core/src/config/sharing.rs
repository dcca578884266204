//! Share lifecycle configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Policies applied by the share orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SharingConfig {
    /// Also forward accept/reject transitions to the mirror before the
    /// local write.
    #[serde(default)]
    pub mirror_transitions: bool,
    /// Maximum number of recipients a single share may hold.
    #[serde(default = "default_max_recipients")]
    #[validate(range(min = 1, max = 10000))]
    pub max_recipients_per_share: usize,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            mirror_transitions: false,
            max_recipients_per_share: default_max_recipients(),
        }
    }
}

fn default_max_recipients() -> usize {
    50
}

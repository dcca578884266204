//! Request context carrying the acting user and their mirror token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vaultshare_core::error::AppError;
use vaultshare_core::result::AppResult;
use vaultshare_core::types::id::UserId;

/// Context for the current request.
///
/// Passed into every service method so each operation knows *who* is
/// acting and *when* the request arrived. Expiry checks use
/// `request_time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// Access token forwarded to the mirror client.
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `user_id` stamped with the current time.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            access_token: None,
            request_time: Utc::now(),
        }
    }

    /// Attaches the token used for mirror calls.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Returns the mirror token or a validation error if none was given.
    pub fn require_token(&self) -> AppResult<&str> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::validation("An access token is required for this operation"))
    }
}

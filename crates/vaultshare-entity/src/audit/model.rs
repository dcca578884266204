//! Audit log entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vaultshare_core::types::id::{AuditLogId, ShareId, UserId};

/// An immutable audit record correlating a share, an action, and an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    /// Unique audit entry identifier.
    pub id: AuditLogId,
    /// The share the action concerns.
    pub share_id: ShareId,
    /// The action tag (the event name, e.g. `"ShareAccepted"`).
    pub action: String,
    /// The user who performed the action.
    pub actor_id: UserId,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
    /// Free-form details.
    pub details: serde_json::Value,
}

/// Data required to append an audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLog {
    /// The share the action concerns.
    pub share_id: ShareId,
    /// The action tag.
    pub action: String,
    /// The acting user.
    pub actor_id: UserId,
    /// When the action occurred.
    pub occurred_at: DateTime<Utc>,
    /// Free-form details.
    pub details: serde_json::Value,
}

impl CreateAuditLog {
    /// Materialize the row with a fresh identifier.
    pub fn into_entry(self) -> AuditLog {
        AuditLog {
            id: AuditLogId::new(),
            share_id: self.share_id,
            action: self.action,
            actor_id: self.actor_id,
            created_at: self.occurred_at,
            details: self.details,
        }
    }
}

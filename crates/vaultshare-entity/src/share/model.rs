//! Share entry aggregate model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use vaultshare_core::types::id::{RecipientId, ShareId, UserId};

use super::recipient::Recipient;
use super::status::{AccessMode, ShareStatus};

/// A grant of access to one encrypted vault entry.
///
/// The entry together with its recipients is the consistency unit: it is
/// loaded and saved whole. Only the owner may change its membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareEntry {
    /// Unique share identifier.
    pub id: ShareId,
    /// The owning user.
    pub owner_id: UserId,
    /// Entry title (e.g. `"Bank"`).
    pub name: String,
    /// Entry type (e.g. `"login"`, `"note"`).
    pub entry_type: String,
    /// Structured snapshot of the shared entry.
    pub entry_snapshot: serde_json::Value,
    /// Lifecycle status.
    pub status: ShareStatus,
    /// Access mode granted to recipients.
    pub access_mode: AccessMode,
    /// Whether the snapshot is end-to-end encrypted.
    pub encrypted: bool,
    /// When the share stops granting access (None = never).
    pub expires_at: Option<DateTime<Utc>>,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// Last modification.
    pub updated_at: DateTime<Utc>,
    /// When the share was first sent to a recipient.
    pub shared_at: Option<DateTime<Utc>>,
    /// Whether recipients may download the entry.
    pub allow_download: bool,
    /// Recipients in invitation order.
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

impl ShareEntry {
    /// Whether `user_id` owns this share.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Whether the expiry timestamp lies at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    /// Whether the share is expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// The recipient record bound to `user_id`, if the user was invited.
    pub fn recipient_for_user(&self, user_id: UserId) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.user_id == user_id)
    }

    /// The recipient with the given identifier.
    pub fn recipient(&self, recipient_id: RecipientId) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.id == recipient_id)
    }

    /// Mutable access to the recipient with the given identifier.
    pub fn recipient_mut(&mut self, recipient_id: RecipientId) -> Option<&mut Recipient> {
        self.recipients.iter_mut().find(|r| r.id == recipient_id)
    }
}

/// Data required to create a new share.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareEntry {
    /// The owning user.
    pub owner_id: UserId,
    /// Entry title.
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    /// Entry type.
    #[validate(length(min = 1, max = 64, message = "entry_type is required"))]
    pub entry_type: String,
    /// Structured snapshot of the entry.
    #[serde(default)]
    pub entry_snapshot: serde_json::Value,
    /// Access mode for recipients.
    pub access_mode: AccessMode,
    /// Whether the snapshot is end-to-end encrypted.
    #[serde(default = "default_true")]
    pub encrypted: bool,
    /// Expiry (None = never).
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether recipients may download the entry.
    #[serde(default = "default_true")]
    pub allow_download: bool,
}

impl CreateShareEntry {
    /// Build the pending aggregate sent to the mirror for creation.
    pub fn into_entry(self) -> ShareEntry {
        let now = Utc::now();
        ShareEntry {
            id: ShareId::new(),
            owner_id: self.owner_id,
            name: self.name,
            entry_type: self.entry_type,
            entry_snapshot: self.entry_snapshot,
            status: ShareStatus::Pending,
            access_mode: self.access_mode,
            encrypted: self.encrypted,
            expires_at: self.expires_at,
            created_at: now,
            updated_at: now,
            shared_at: None,
            allow_download: self.allow_download,
            recipients: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

//! Request and result records for the share use cases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use vaultshare_core::types::id::{RecipientId, ShareId, UserId};
use vaultshare_entity::share::{AccessMode, CreateShareEntry, Recipient, RecipientRole, ShareEntry};

/// Request to create a new share.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareRequest {
    /// Entry title.
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    /// Entry type, e.g. `"login"`.
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

impl CreateShareRequest {
    /// Minimal request for an entry that never expires.
    pub fn new(name: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: entry_type.into(),
            entry_snapshot: serde_json::Value::Null,
            access_mode: AccessMode::ReadOnly,
            encrypted: true,
            expires_at: None,
            allow_download: true,
        }
    }

    /// Attach the owner and produce the entity creation record.
    pub fn into_create(self, owner_id: UserId) -> CreateShareEntry {
        CreateShareEntry {
            owner_id,
            name: self.name,
            entry_type: self.entry_type,
            entry_snapshot: self.entry_snapshot,
            access_mode: self.access_mode,
            encrypted: self.encrypted,
            expires_at: self.expires_at,
            allow_download: self.allow_download,
        }
    }
}

/// Request to invite a recipient to a share.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddReceiverRequest {
    /// The invited user's account.
    pub user_id: UserId,
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// Role granted on the share.
    pub role: RecipientRole,
    /// Public key the blob was sealed for.
    #[serde(default)]
    pub public_key: Option<String>,
    /// Entry payload sealed for this recipient.
    #[serde(with = "vaultshare_entity::share::blob", default)]
    pub encrypted_blob: Option<Vec<u8>>,
}

impl AddReceiverRequest {
    /// Request with the mandatory fields only.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: RecipientRole,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: email.into(),
            role,
            public_key: None,
            encrypted_blob: None,
        }
    }

    /// Attach the sealed payload and the key it was sealed for.
    pub fn with_blob(mut self, public_key: impl Into<String>, blob: Vec<u8>) -> Self {
        self.public_key = Some(public_key.into());
        self.encrypted_blob = Some(blob);
        self
    }
}

/// Read-only view of an invitation before it is answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationPreview {
    /// The share.
    pub share: ShareEntry,
    /// The caller's recipient record.
    pub recipient: Recipient,
    /// The payload sealed for the caller.
    #[serde(with = "vaultshare_entity::share::blob", default)]
    pub blob: Option<Vec<u8>>,
}

/// Outcome of an accepted invitation. The caller decrypts `blob`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptShareResult {
    /// The share.
    pub share: ShareEntry,
    /// The caller's recipient record, now accepted.
    pub recipient: Recipient,
    /// The payload sealed for the caller.
    #[serde(with = "vaultshare_entity::share::blob", default)]
    pub blob: Option<Vec<u8>>,
}

/// Confirmation of a rejected invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectShareResult {
    /// The share.
    pub share_id: ShareId,
    /// The rejecting recipient.
    pub recipient_id: RecipientId,
    /// Human-readable confirmation.
    pub message: String,
}

/// Confirmation of a new recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReceiverResult {
    /// The share.
    pub share_id: ShareId,
    /// The new recipient.
    pub recipient_id: RecipientId,
    /// Human-readable confirmation.
    pub message: String,
}

/// Confirmation that a renewal request reached the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalRequestResult {
    /// The share.
    pub share_id: ShareId,
    /// The requesting recipient.
    pub recipient_id: RecipientId,
    /// Human-readable confirmation.
    pub message: String,
}

fn default_true() -> bool {
    true
}

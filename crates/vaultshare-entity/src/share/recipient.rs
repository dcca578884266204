//! Recipient entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vaultshare_core::types::id::{RecipientId, ShareId, UserId};

use super::status::{RecipientRole, RecipientStatus};

/// A user invited to a share.
///
/// A recipient always belongs to exactly one [`super::ShareEntry`]; the
/// `share_id` is a back-reference, not ownership. Rejection and revocation
/// clear `encrypted_blob` but keep the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Unique recipient identifier.
    pub id: RecipientId,
    /// The share this recipient belongs to.
    pub share_id: ShareId,
    /// The invited user's account.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Email address the invitation was sent to.
    pub email: String,
    /// Public key the blob was encrypted for.
    pub public_key: Option<String>,
    /// Role granted on the share.
    pub role: RecipientRole,
    /// Invitation state.
    pub status: RecipientStatus,
    /// When the recipient accepted.
    pub joined_at: Option<DateTime<Utc>>,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
    /// Last state change.
    pub updated_at: DateTime<Utc>,
    /// Entry payload encrypted for this recipient.
    #[serde(with = "super::blob", default)]
    pub encrypted_blob: Option<Vec<u8>>,
}

impl Recipient {
    /// Build a freshly invited recipient with the current timestamps.
    pub fn invite(
        share_id: ShareId,
        user_id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: RecipientRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecipientId::new(),
            share_id,
            user_id,
            name: name.into(),
            email: email.into(),
            public_key: None,
            role,
            status: RecipientStatus::Invited,
            joined_at: None,
            created_at: now,
            updated_at: now,
            encrypted_blob: None,
        }
    }

    /// Attach the recipient's public key.
    pub fn with_public_key(mut self, public_key: Option<String>) -> Self {
        self.public_key = public_key;
        self
    }

    /// Attach the payload encrypted for this recipient.
    pub fn with_blob(mut self, blob: Option<Vec<u8>>) -> Self {
        self.encrypted_blob = blob;
        self
    }

    /// Mark the invitation accepted at `now`. Keeps the first join time.
    pub fn mark_accepted(&mut self, now: DateTime<Utc>) {
        self.status = RecipientStatus::Accepted;
        self.joined_at.get_or_insert(now);
        self.updated_at = now;
    }

    /// Mark the invitation rejected and drop the encrypted blob.
    pub fn mark_rejected(&mut self, now: DateTime<Utc>) {
        self.status = RecipientStatus::Rejected;
        self.encrypted_blob = None;
        self.updated_at = now;
    }

    /// Mark access revoked and drop the encrypted blob.
    pub fn mark_revoked(&mut self, now: DateTime<Utc>) {
        self.status = RecipientStatus::Revoked;
        self.encrypted_blob = None;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invited() -> Recipient {
        Recipient::invite(
            ShareId::new(),
            UserId::new(),
            "Bob",
            "bob@x.com",
            RecipientRole::Viewer,
        )
        .with_blob(Some(vec![1, 2, 3]))
    }

    #[test]
    fn test_rejection_clears_blob_but_keeps_record() {
        let mut recipient = invited();
        recipient.mark_rejected(Utc::now());
        assert_eq!(recipient.status, RecipientStatus::Rejected);
        assert!(recipient.encrypted_blob.is_none());
        assert_eq!(recipient.email, "bob@x.com");
    }

    #[test]
    fn test_accept_sets_join_time_once() {
        let mut recipient = invited();
        let first = Utc::now();
        recipient.mark_accepted(first);
        recipient.mark_accepted(first + chrono::Duration::minutes(5));
        assert_eq!(recipient.joined_at, Some(first));
        assert_eq!(recipient.encrypted_blob, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_blob_serializes_as_base64() {
        let recipient = invited();
        let json = serde_json::to_value(&recipient).expect("serialize");
        assert_eq!(json["encrypted_blob"], "AQID");
        let back: Recipient = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.encrypted_blob, Some(vec![1, 2, 3]));
    }
}

//! In-memory share repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use vaultshare_core::error::AppError;
use vaultshare_core::result::AppResult;
use vaultshare_core::types::id::{RecipientId, ShareId, UserId};
use vaultshare_entity::share::{Recipient, ShareEntry};

use crate::repositories::share::ShareRepository;

/// Share aggregates held in process memory, keyed by share ID.
#[derive(Debug, Default)]
pub struct InMemoryShareRepository {
    shares: RwLock<HashMap<ShareId, ShareEntry>>,
}

impl InMemoryShareRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `update` to the recipient with `recipient_id`, wherever it lives.
    async fn update_recipient<F>(&self, recipient_id: RecipientId, update: F) -> AppResult<()>
    where
        F: FnOnce(&mut Recipient) + Send,
    {
        let mut shares = self.shares.write().await;
        let now = Utc::now();
        for share in shares.values_mut() {
            if let Some(recipient) = share.recipient_mut(recipient_id) {
                update(recipient);
                share.updated_at = now;
                return Ok(());
            }
        }
        Err(AppError::not_found(format!(
            "Recipient {recipient_id} not found"
        )))
    }
}

/// Newest first; the time-ordered ID breaks ties between equal timestamps.
fn newest_first(mut shares: Vec<ShareEntry>) -> Vec<ShareEntry> {
    shares.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    shares
}

#[async_trait]
impl ShareRepository for InMemoryShareRepository {
    async fn list_by_user(&self, owner_id: UserId) -> AppResult<Vec<ShareEntry>> {
        let shares = self.shares.read().await;
        let owned = shares
            .values()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(newest_first(owned))
    }

    async fn list_received_by_user(&self, user_id: UserId) -> AppResult<Vec<ShareEntry>> {
        let shares = self.shares.read().await;
        let received = shares
            .values()
            .filter(|s| s.recipient_for_user(user_id).is_some())
            .cloned()
            .collect();
        Ok(newest_first(received))
    }

    async fn get_by_id(&self, id: ShareId) -> AppResult<ShareEntry> {
        self.shares
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Share {id} not found")))
    }

    async fn save(&self, entry: &ShareEntry) -> AppResult<()> {
        self.shares.write().await.insert(entry.id, entry.clone());
        debug!(share_id = %entry.id, recipients = entry.recipients.len(), "Share saved");
        Ok(())
    }

    async fn delete(&self, id: ShareId) -> AppResult<bool> {
        let removed = self.shares.write().await.remove(&id);
        if let Some(ref share) = removed {
            debug!(
                share_id = %id,
                recipients = share.recipients.len(),
                "Share deleted with its recipients"
            );
        }
        Ok(removed.is_some())
    }

    async fn get_share_and_recipient(
        &self,
        share_id: ShareId,
        user_id: UserId,
    ) -> AppResult<(ShareEntry, Recipient)> {
        let share = self.get_by_id(share_id).await?;
        let recipient = share.recipient_for_user(user_id).cloned().ok_or_else(|| {
            AppError::recipient_not_allowed(format!(
                "User {user_id} is not a recipient of share {share_id}"
            ))
        })?;
        Ok((share, recipient))
    }

    async fn mark_recipient_accepted(&self, recipient_id: RecipientId) -> AppResult<()> {
        self.update_recipient(recipient_id, |r| r.mark_accepted(Utc::now()))
            .await
    }

    async fn mark_recipient_rejected(&self, recipient_id: RecipientId) -> AppResult<()> {
        self.update_recipient(recipient_id, |r| r.mark_rejected(Utc::now()))
            .await
    }

    async fn mark_recipient_revoked(&self, recipient_id: RecipientId) -> AppResult<()> {
        self.update_recipient(recipient_id, |r| r.mark_revoked(Utc::now()))
            .await
    }

    async fn create_recipient(&self, recipient: &Recipient) -> AppResult<()> {
        let mut shares = self.shares.write().await;
        let share = shares.get_mut(&recipient.share_id).ok_or_else(|| {
            AppError::not_found(format!("Share {} not found", recipient.share_id))
        })?;
        share.shared_at.get_or_insert(recipient.created_at);
        share.updated_at = recipient.created_at;
        share.recipients.push(recipient.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use vaultshare_core::error::ErrorKind;
    use vaultshare_entity::share::{
        AccessMode, CreateShareEntry, RecipientRole, RecipientStatus,
    };

    fn share(owner_id: UserId) -> ShareEntry {
        CreateShareEntry {
            owner_id,
            name: "Bank".to_string(),
            entry_type: "login".to_string(),
            entry_snapshot: serde_json::json!({}),
            access_mode: AccessMode::ReadOnly,
            encrypted: true,
            expires_at: None,
            allow_download: true,
        }
        .into_entry()
    }

    async fn seeded() -> (InMemoryShareRepository, ShareEntry, Recipient) {
        let repo = InMemoryShareRepository::new();
        let entry = share(UserId::new());
        repo.save(&entry).await.unwrap();
        let recipient = Recipient::invite(
            entry.id,
            UserId::new(),
            "Bob",
            "bob@x.com",
            RecipientRole::Viewer,
        )
        .with_blob(Some(b"sealed".to_vec()));
        repo.create_recipient(&recipient).await.unwrap();
        (repo, entry, recipient)
    }

    #[tokio::test]
    async fn test_get_missing_share_is_not_found() {
        let repo = InMemoryShareRepository::new();
        let err = repo.get_by_id(ShareId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_unlisted_user_is_not_allowed() {
        let (repo, entry, _) = seeded().await;
        let err = repo
            .get_share_and_recipient(entry.id, UserId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::RecipientNotAllowed);

        let err = repo
            .get_share_and_recipient(ShareId::new(), UserId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_accept_preview_returns_blob() {
        let (repo, entry, recipient) = seeded().await;
        let (share, found, blob) = repo
            .get_share_for_accept(entry.id, recipient.user_id)
            .await
            .unwrap();
        assert_eq!(share.id, entry.id);
        assert_eq!(found.id, recipient.id);
        assert_eq!(blob, Some(b"sealed".to_vec()));
    }

    #[tokio::test]
    async fn test_reject_clears_blob_and_keeps_row() {
        let (repo, entry, recipient) = seeded().await;
        repo.mark_recipient_rejected(recipient.id).await.unwrap();
        let (_, found) = repo
            .get_share_and_recipient(entry.id, recipient.user_id)
            .await
            .unwrap();
        assert_eq!(found.status, RecipientStatus::Rejected);
        assert!(found.encrypted_blob.is_none());
    }

    #[tokio::test]
    async fn test_create_recipient_requires_parent() {
        let repo = InMemoryShareRepository::new();
        let orphan = Recipient::invite(
            ShareId::new(),
            UserId::new(),
            "Bob",
            "bob@x.com",
            RecipientRole::Viewer,
        );
        let err = repo.create_recipient(&orphan).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_cascades_recipients() {
        let (repo, entry, recipient) = seeded().await;
        assert!(repo.delete(entry.id).await.unwrap());
        assert!(!repo.delete(entry.id).await.unwrap());
        assert!(
            repo.list_received_by_user(recipient.user_id)
                .await
                .unwrap()
                .is_empty()
        );
        let err = repo.mark_recipient_accepted(recipient.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    proptest! {
        #[test]
        fn list_by_user_is_newest_first_and_stable(offsets in proptest::collection::vec(0i64..10_000, 1..20)) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let repo = InMemoryShareRepository::new();
                let owner = UserId::new();
                let base = Utc::now();
                for offset in &offsets {
                    let mut entry = share(owner);
                    entry.created_at = base - Duration::seconds(*offset);
                    repo.save(&entry).await.unwrap();
                }
                repo.save(&share(UserId::new())).await.unwrap();

                let first = repo.list_by_user(owner).await.unwrap();
                let second = repo.list_by_user(owner).await.unwrap();
                prop_assert_eq!(first.len(), offsets.len());
                prop_assert!(first.windows(2).all(|w| w[0].created_at >= w[1].created_at));
                prop_assert_eq!(first, second);
                Ok(())
            })?;
        }
    }
}

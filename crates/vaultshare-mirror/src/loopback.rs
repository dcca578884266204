//! In-process mirror backed by the local share repository.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use vaultshare_core::error::AppError;
use vaultshare_core::result::AppResult;
use vaultshare_core::types::id::{ShareId, UserId};
use vaultshare_database::repositories::ShareRepository;
use vaultshare_entity::share::{ShareEntry, ShareStatus};

use crate::client::MirrorClient;

/// Mirror used when no remote endpoint is configured: the local repository
/// acts as its own system of record.
///
/// The token is interpreted as the caller's user ID.
#[derive(Debug)]
pub struct LoopbackMirrorClient {
    repo: Arc<dyn ShareRepository>,
    token: RwLock<Option<String>>,
}

impl LoopbackMirrorClient {
    /// Create a loopback mirror over `repo`.
    pub fn new(repo: Arc<dyn ShareRepository>) -> Self {
        Self {
            repo,
            token: RwLock::new(None),
        }
    }

    async fn caller(&self) -> AppResult<UserId> {
        let token = self.token.read().await;
        let token = token
            .as_deref()
            .ok_or_else(|| AppError::external_service("Mirror token not set"))?;
        token
            .parse::<UserId>()
            .map_err(|_| AppError::external_service("Mirror token is not a valid user token"))
    }
}

#[async_trait]
impl MirrorClient for LoopbackMirrorClient {
    async fn set_token(&self, token: &str) {
        *self.token.write().await = Some(token.to_string());
    }

    async fn create_share(&self, entry: &ShareEntry) -> AppResult<ShareEntry> {
        let mut created = entry.clone();
        created.status = ShareStatus::Active;
        self.repo.save(&created).await?;
        debug!(share_id = %created.id, "Loopback mirror created share");
        Ok(created)
    }

    async fn accept_share(&self, share_id: ShareId) -> AppResult<()> {
        let user_id = self.caller().await?;
        self.repo.get_share_and_recipient(share_id, user_id).await?;
        Ok(())
    }

    async fn reject_share(&self, share_id: ShareId) -> AppResult<()> {
        let user_id = self.caller().await?;
        self.repo.get_share_and_recipient(share_id, user_id).await?;
        Ok(())
    }

    async fn get_share_by_me(&self) -> AppResult<Vec<ShareEntry>> {
        let user_id = self.caller().await?;
        self.repo.list_by_user(user_id).await
    }

    async fn get_share_with_me(&self) -> AppResult<Vec<ShareEntry>> {
        let user_id = self.caller().await?;
        self.repo.list_received_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultshare_core::error::ErrorKind;
    use vaultshare_database::InMemoryShareRepository;
    use vaultshare_entity::share::{AccessMode, CreateShareEntry};

    fn entry(owner_id: UserId) -> ShareEntry {
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

    #[tokio::test]
    async fn test_create_activates_and_lists_for_owner() {
        let mirror = LoopbackMirrorClient::new(Arc::new(InMemoryShareRepository::new()));
        let owner = UserId::new();
        let created = mirror.create_share(&entry(owner)).await.unwrap();
        assert_eq!(created.status, ShareStatus::Active);

        mirror.set_token(&owner.to_string()).await;
        let listed = mirror.get_share_by_me().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
    }

    #[tokio::test]
    async fn test_missing_token_fails() {
        let mirror = LoopbackMirrorClient::new(Arc::new(InMemoryShareRepository::new()));
        let err = mirror.get_share_with_me().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }
}

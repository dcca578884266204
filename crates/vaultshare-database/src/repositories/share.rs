//! Share aggregate repository port.

use async_trait::async_trait;

use vaultshare_core::result::AppResult;
use vaultshare_core::types::id::{RecipientId, ShareId, UserId};
use vaultshare_entity::share::{Recipient, ShareEntry};

/// Persistence contract for the share aggregate.
///
/// Lookups that miss return [`vaultshare_core::ErrorKind::NotFound`]; a
/// share that exists but does not list the user returns
/// [`vaultshare_core::ErrorKind::RecipientNotAllowed`]. Storage failures
/// are reported as [`vaultshare_core::ErrorKind::Database`].
#[async_trait]
pub trait ShareRepository: Send + Sync + std::fmt::Debug + 'static {
    /// All shares owned by `owner_id`, newest first.
    async fn list_by_user(&self, owner_id: UserId) -> AppResult<Vec<ShareEntry>>;

    /// All shares listing `user_id` as a recipient, newest first.
    async fn list_received_by_user(&self, user_id: UserId) -> AppResult<Vec<ShareEntry>>;

    /// Load a share with its recipients.
    async fn get_by_id(&self, id: ShareId) -> AppResult<ShareEntry>;

    /// Upsert the full aggregate, recipients included (replace-on-write).
    async fn save(&self, entry: &ShareEntry) -> AppResult<()>;

    /// Remove a share and its recipients. Returns `true` if it existed.
    async fn delete(&self, id: ShareId) -> AppResult<bool>;

    /// Combined read for previewing an invitation: the share, the user's
    /// recipient record, and the blob addressed to them.
    async fn get_share_for_accept(
        &self,
        share_id: ShareId,
        user_id: UserId,
    ) -> AppResult<(ShareEntry, Recipient, Option<Vec<u8>>)> {
        let (share, recipient) = self.get_share_and_recipient(share_id, user_id).await?;
        let blob = recipient.encrypted_blob.clone();
        Ok((share, recipient, blob))
    }

    /// Load a share and the recipient record bound to `user_id`.
    async fn get_share_and_recipient(
        &self,
        share_id: ShareId,
        user_id: UserId,
    ) -> AppResult<(ShareEntry, Recipient)>;

    /// Set the recipient's state to accepted.
    async fn mark_recipient_accepted(&self, recipient_id: RecipientId) -> AppResult<()>;

    /// Set the recipient's state to rejected and null its encrypted blob.
    async fn mark_recipient_rejected(&self, recipient_id: RecipientId) -> AppResult<()>;

    /// Set the recipient's state to revoked and null its encrypted blob.
    async fn mark_recipient_revoked(&self, recipient_id: RecipientId) -> AppResult<()>;

    /// Append a recipient to its (existing) parent share.
    async fn create_recipient(&self, recipient: &Recipient) -> AppResult<()>;
}

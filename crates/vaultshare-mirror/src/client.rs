//! Mirror client port.

use async_trait::async_trait;

use vaultshare_core::result::AppResult;
use vaultshare_core::types::id::ShareId;
use vaultshare_entity::share::ShareEntry;

/// Synchronous request/response port to the remote share service.
///
/// Every call may block or fail; failures are reported as
/// [`vaultshare_core::ErrorKind::ExternalService`] and are never retried by
/// the caller.
#[async_trait]
pub trait MirrorClient: Send + Sync + std::fmt::Debug + 'static {
    /// Set the bearer token used by subsequent calls.
    async fn set_token(&self, token: &str);

    /// Create a share remotely; the returned entry is authoritative.
    async fn create_share(&self, entry: &ShareEntry) -> AppResult<ShareEntry>;

    /// Record acceptance of a share by the token's user.
    async fn accept_share(&self, share_id: ShareId) -> AppResult<()>;

    /// Record rejection of a share by the token's user.
    async fn reject_share(&self, share_id: ShareId) -> AppResult<()>;

    /// Shares created by the token's user.
    async fn get_share_by_me(&self) -> AppResult<Vec<ShareEntry>>;

    /// Shares received by the token's user.
    async fn get_share_with_me(&self) -> AppResult<Vec<ShareEntry>>;
}

//! Audit log repository port.

use async_trait::async_trait;

use vaultshare_core::result::AppResult;
use vaultshare_core::types::id::ShareId;
use vaultshare_entity::audit::{AuditLog, CreateAuditLog};

/// Append-only store for audit entries.
#[async_trait]
pub trait AuditLogRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Append an entry and return the stored row.
    async fn append(&self, entry: CreateAuditLog) -> AppResult<AuditLog>;

    /// Entries for a share in the order they were appended.
    async fn list_by_share(&self, share_id: ShareId) -> AppResult<Vec<AuditLog>>;
}

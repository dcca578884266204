//! In-memory audit log repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use vaultshare_core::result::AppResult;
use vaultshare_core::types::id::ShareId;
use vaultshare_entity::audit::{AuditLog, CreateAuditLog};

use crate::repositories::audit::AuditLogRepository;

/// Append-only audit log held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryAuditLogRepository {
    entries: RwLock<Vec<AuditLog>>,
}

impl InMemoryAuditLogRepository {
    /// Create an empty audit log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no entry has been written yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn append(&self, entry: CreateAuditLog) -> AppResult<AuditLog> {
        let row = entry.into_entry();
        self.entries.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_by_share(&self, share_id: ShareId) -> AppResult<Vec<AuditLog>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.share_id == share_id)
            .cloned()
            .collect())
    }
}

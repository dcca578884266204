//! Audit trail consumer — appends one audit row per event.

use std::sync::Arc;

use async_trait::async_trait;

use vaultshare_core::events::DomainEvent;
use vaultshare_core::result::AppResult;
use vaultshare_database::repositories::AuditLogRepository;
use vaultshare_entity::audit::CreateAuditLog;

use crate::handler::EventHandler;

/// Writes dispatched events to the audit log.
///
/// Runs as an ordinary dispatched handler, so an entry is only written if
/// the process is alive when the handler task runs.
#[derive(Debug, Clone)]
pub struct AuditTrailHandler {
    audit_repo: Arc<dyn AuditLogRepository>,
}

impl AuditTrailHandler {
    /// Creates a new audit trail handler.
    pub fn new(audit_repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { audit_repo }
    }
}

/// Builds the audit row for an event.
pub fn audit_entry(event: &DomainEvent) -> AppResult<CreateAuditLog> {
    let mut details = serde_json::to_value(&event.payload)?;
    if let Some(map) = details.as_object_mut() {
        map.insert("event_id".to_string(), serde_json::json!(event.id));
    }

    Ok(CreateAuditLog {
        share_id: event.share_id(),
        action: event.event_name().to_string(),
        actor_id: event.actor_id,
        occurred_at: event.occurred_at,
        details,
    })
}

#[async_trait]
impl EventHandler for AuditTrailHandler {
    async fn handle(&self, event: &DomainEvent) -> AppResult<()> {
        let entry = audit_entry(event)?;
        self.audit_repo.append(entry).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "audit-trail"
    }
}

//! Log stream consumer.

use async_trait::async_trait;
use tracing::info;

use vaultshare_core::events::DomainEvent;
use vaultshare_core::result::AppResult;

use crate::handler::EventHandler;

/// Emits every dispatched event to the tracing log stream.
#[derive(Debug, Clone, Default)]
pub struct LogStreamHandler;

impl LogStreamHandler {
    /// Creates a new log stream handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for LogStreamHandler {
    async fn handle(&self, event: &DomainEvent) -> AppResult<()> {
        let recipient_id = event
            .payload
            .recipient_id()
            .map(|id| id.to_string())
            .unwrap_or_default();

        info!(
            target: "vaultshare::audit",
            event_id = %event.id,
            event = %event.kind(),
            share_id = %event.share_id(),
            recipient_id = %recipient_id,
            actor_id = %event.actor_id,
            occurred_at = %event.occurred_at,
            "Share event"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "log-stream"
    }
}

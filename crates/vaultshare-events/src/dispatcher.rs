//! Event dispatcher — fans events out to handlers without waiting for them.
//!
//! Handlers for one event are spawned in registration order, but each runs
//! in its own task, so their completion order is not defined. A handler that
//! errors, panics, or exceeds the configured timeout is logged and
//! otherwise ignored.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, error, warn};

use vaultshare_core::config::events::EventsConfig;
use vaultshare_core::events::{DomainEvent, EventKind};

use crate::handler::EventHandler;
use crate::registry::EventRegistry;

/// Dispatches domain events to all registered handlers.
#[derive(Debug)]
pub struct EventDispatcher {
    /// Handler registry.
    registry: EventRegistry,
    /// Upper bound for one handler invocation.
    handler_timeout: Duration,
}

impl EventDispatcher {
    /// Creates a dispatcher with an empty registry.
    pub fn new(config: &EventsConfig) -> Self {
        Self {
            registry: EventRegistry::new(),
            handler_timeout: Duration::from_secs(config.handler_timeout_seconds),
        }
    }

    /// Registers a handler for one event kind.
    pub async fn register(&self, kind: EventKind, handler: Arc<dyn EventHandler>) {
        self.registry.register(kind, handler).await;
    }

    /// Registers a handler for every event kind.
    pub async fn register_all(&self, handler: Arc<dyn EventHandler>) {
        self.registry.register_all(handler).await;
    }

    /// Spawns one task per handler registered for the event's kind and
    /// returns the number of tasks started. Does not wait for them.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn dispatch(&self, event: DomainEvent) -> usize {
        let kind = event.kind();
        let handlers = self.registry.get_handlers(kind).await;

        if handlers.is_empty() {
            debug!(event = %kind, share_id = %event.share_id(), "No handlers for event");
            return 0;
        }

        debug!(
            event = %kind,
            share_id = %event.share_id(),
            handler_count = handlers.len(),
            "Dispatching event"
        );

        let event = Arc::new(event);
        let count = handlers.len();
        for handler in handlers {
            tokio::spawn(run_handler(handler, event.clone(), self.handler_timeout));
        }
        count
    }

    /// Returns a reference to the handler registry.
    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }
}

/// Runs one handler, containing its failure modes.
async fn run_handler(handler: Arc<dyn EventHandler>, event: Arc<DomainEvent>, limit: Duration) {
    let invocation = AssertUnwindSafe(handler.handle(&event)).catch_unwind();

    match tokio::time::timeout(limit, invocation).await {
        Ok(Ok(Ok(()))) => {
            debug!(
                event = %event.kind(),
                handler = %handler.name(),
                "Handler completed"
            );
        }
        Ok(Ok(Err(e))) => {
            warn!(
                event = %event.kind(),
                handler = %handler.name(),
                share_id = %event.share_id(),
                error = %e,
                "Handler failed"
            );
        }
        Ok(Err(_panic)) => {
            error!(
                event = %event.kind(),
                handler = %handler.name(),
                share_id = %event.share_id(),
                "Handler panicked"
            );
        }
        Err(_) => {
            error!(
                event = %event.kind(),
                handler = %handler.name(),
                timeout_secs = limit.as_secs(),
                "Handler timed out"
            );
        }
    }
}

//! Event registry — consumers register handlers per event kind.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use vaultshare_core::events::EventKind;

use crate::handler::EventHandler;

/// Registry of event handlers organized by event kind.
///
/// Registration takes the write lock; lookups during dispatch take the
/// read lock, so concurrent dispatches never block each other.
#[derive(Debug, Default)]
pub struct EventRegistry {
    /// Event kind → handlers in registration order.
    handlers: RwLock<HashMap<EventKind, Vec<Arc<dyn EventHandler>>>>,
}

impl EventRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to the list for `kind`.
    pub async fn register(&self, kind: EventKind, handler: Arc<dyn EventHandler>) {
        let name = handler.name().to_string();
        let mut handlers = self.handlers.write().await;
        let entries = handlers.entry(kind).or_default();
        entries.push(handler);

        info!(
            event = %kind,
            handler = %name,
            position = entries.len(),
            "Event handler registered"
        );
    }

    /// Registers the same handler for every event kind.
    pub async fn register_all(&self, handler: Arc<dyn EventHandler>) {
        for kind in EventKind::ALL {
            self.register(kind, handler.clone()).await;
        }
    }

    /// Returns the handlers for `kind` in registration order.
    pub async fn get_handlers(&self, kind: EventKind) -> Vec<Arc<dyn EventHandler>> {
        let handlers = self.handlers.read().await;
        handlers.get(&kind).cloned().unwrap_or_default()
    }

    /// Returns the number of handlers registered for `kind`.
    pub async fn handler_count(&self, kind: EventKind) -> usize {
        let handlers = self.handlers.read().await;
        handlers.get(&kind).map(Vec::len).unwrap_or(0)
    }
}
